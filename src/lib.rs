// src/lib.rs
// Tektronix curve reader library - Public API

//! # tek_curve
//!
//! Parsers for the data a Tektronix oscilloscope returns for `CURVE?` and
//! `WFMPRE?` queries.
//!
//! ## Features
//!
//! - Validate and unframe `#<n><length><bytes>\n` curve blocks
//! - Decode 2-byte big-endian signed samples
//! - Lex and map the semicolon separated preamble into a typed record
//! - Scale samples and build the time axis
//!
//! Inputs are fully buffered; acquiring them from the instrument is up to
//! the caller.
//!
//! ## Example
//!
//! ```no_run
//! use tek_curve::{parse_curve, Waveform, WaveformPreamble};
//!
//! let preamble_text = std::fs::read_to_string("channel-1.wfmpre").unwrap();
//! let curve_block = std::fs::read("channel-1.bin").unwrap();
//!
//! let preamble = WaveformPreamble::parse(&preamble_text).expect("bad preamble");
//! let samples = parse_curve(&curve_block).expect("bad curve");
//! println!("{} of {} points", samples.len(), preamble.number_of_points);
//!
//! let wfm = Waveform::new(preamble, samples);
//! for (t, v) in wfm.points().take(5) {
//!     println!("{:.6e} s: {:.4} {}", t, v, wfm.preamble.y_unit);
//! }
//! ```

mod curve;
mod error;
mod preamble;
mod tokenizer;
mod waveform;

pub use curve::{decode, decode_with, frame, parse_curve, BigEndianI16, SampleFormat};
pub use error::{FormatError, Result};
pub use preamble::{Encoding, PointFormat, WaveformPreamble};
pub use tokenizer::tokenize;
pub use waveform::Waveform;

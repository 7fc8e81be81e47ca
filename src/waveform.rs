// src/waveform.rs
// Scaled waveform assembled from a preamble and a decoded curve

use crate::curve::parse_curve;
use crate::error::Result;
use crate::preamble::WaveformPreamble;

/// A decoded curve together with the preamble needed to scale it.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    pub preamble: WaveformPreamble,
    pub samples: Vec<i16>,
}

impl Waveform {
    /// Pair a preamble with raw samples.
    ///
    /// Samples are always 2-byte big-endian signed; a preamble declaring any
    /// other layout, or a different point count, is reported with a warning
    /// but accepted.
    pub fn new(preamble: WaveformPreamble, samples: Vec<i16>) -> Self {
        if !preamble.uses_native_curve_format() {
            log::warn!(
                "preamble declares {} byte(s)/point, {}, {}, {} but curve was read as 2-byte signed MSB binary",
                preamble.bytes_per_point,
                preamble.encoding.code(),
                if preamble.signed { "RI" } else { "RP" },
                if preamble.big_endian { "MSB" } else { "LSB" },
            );
        }
        if preamble.number_of_points != samples.len() {
            log::warn!(
                "preamble declares {} points, curve holds {}",
                preamble.number_of_points,
                samples.len()
            );
        }
        Waveform { preamble, samples }
    }

    /// Parse a `WFMPRE?` response and its `CURVE?` block.
    pub fn from_blocks(preamble: &str, curve: &[u8]) -> Result<Self> {
        let preamble = WaveformPreamble::parse(preamble)?;
        let samples = parse_curve(curve)?;
        Ok(Self::new(preamble, samples))
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples converted to `y_unit` using `(raw - YOFF) * YMULT + YZERO`.
    pub fn scaled_values(&self) -> Vec<f64> {
        let p = &self.preamble;
        self.samples
            .iter()
            .map(|&raw| (f64::from(raw) - p.y_off) * p.y_mult + p.y_zero)
            .collect()
    }

    /// Time of each sample in `x_unit`.
    pub fn time_values(&self) -> Vec<f64> {
        let p = &self.preamble;
        (0..self.samples.len())
            .map(|i| p.x_zero + i as f64 * p.x_seconds_per_point)
            .collect()
    }

    /// `(time, value)` pairs in sample order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time_values().into_iter().zip(self.scaled_values())
    }
}

// src/preamble.rs
// WFMPRE preamble: positional field mapping into WaveformPreamble

use std::fmt;
use std::str::FromStr;

use crate::error::{FormatError, Result};
use crate::tokenizer::tokenize;

/// Sample encoding declared by `ENCDG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Encoding {
    Binary,
    Ascii,
}

/// Point layout declared by `PT_FMT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointFormat {
    /// One value per point.
    Y,
    /// Min/max pairs per point.
    Envelope,
}

const ENCODINGS: &[(&str, Encoding)] = &[("BIN", Encoding::Binary), ("ASC", Encoding::Ascii)];

const POINT_FORMATS: &[(&str, PointFormat)] =
    &[("Y", PointFormat::Y), ("ENV", PointFormat::Envelope)];

// BN_FMT: RI is signed, RP is positive (unsigned)
const SIGNEDNESS: &[(&str, bool)] = &[("RI", true), ("RP", false)];

// BYT_OR: true when most significant byte comes first
const BYTE_ORDERS: &[(&str, bool)] = &[("MSB", true), ("LSB", false)];

fn lookup<T: Copy>(table: &[(&str, T)], field: &'static str, code: &str) -> Result<T> {
    table
        .iter()
        .find(|(name, _)| *name == code)
        .map(|&(_, value)| value)
        .ok_or_else(|| FormatError::UnknownValue {
            field,
            value: code.to_string(),
        })
}

fn code_of<T: Copy + PartialEq>(table: &[(&'static str, T)], value: T) -> &'static str {
    table
        .iter()
        .find(|(_, v)| *v == value)
        .map(|&(name, _)| name)
        .unwrap_or_default()
}

fn number<T: FromStr>(field: &'static str, token: &str) -> Result<T> {
    token.parse().map_err(|_| FormatError::InvalidNumber {
        field,
        value: token.to_string(),
    })
}

impl Encoding {
    /// Wire code as sent by the instrument.
    pub fn code(self) -> &'static str {
        code_of(ENCODINGS, self)
    }
}

impl FromStr for Encoding {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self> {
        lookup(ENCODINGS, Field::Encoding.mnemonic(), s)
    }
}

impl PointFormat {
    /// Wire code as sent by the instrument.
    pub fn code(self) -> &'static str {
        code_of(POINT_FORMATS, self)
    }
}

impl FromStr for PointFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self> {
        lookup(POINT_FORMATS, Field::PointFormat.mnemonic(), s)
    }
}

/// Decoded `WFMPRE?` response describing how to interpret a curve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaveformPreamble {
    pub bytes_per_point: u32,
    pub encoding: Encoding,
    pub signed: bool,
    pub big_endian: bool,
    pub number_of_points: usize,
    pub waveform_id: String,
    pub point_format: PointFormat,
    pub x_seconds_per_point: f64,
    pub x_zero: f64,
    pub x_unit: String,
    pub y_mult: f64,
    pub y_zero: f64,
    pub y_off: f64,
    pub y_unit: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    BytesPerPoint,
    Encoding,
    BinaryFormat,
    ByteOrder,
    NumberOfPoints,
    WaveformId,
    PointFormat,
    XIncrement,
    XZero,
    XUnit,
    YMult,
    YZero,
    YOff,
    YUnit,
}

/// Token position of every field. Positions 1 (BIT_NR) and 9 (PT_OFF) are
/// not used.
const LAYOUT: &[(usize, Field)] = &[
    (0, Field::BytesPerPoint),
    (2, Field::Encoding),
    (3, Field::BinaryFormat),
    (4, Field::ByteOrder),
    (5, Field::NumberOfPoints),
    (6, Field::WaveformId),
    (7, Field::PointFormat),
    (8, Field::XIncrement),
    (10, Field::XZero),
    (11, Field::XUnit),
    (12, Field::YMult),
    (13, Field::YZero),
    (14, Field::YOff),
    (15, Field::YUnit),
];

impl Field {
    fn mnemonic(self) -> &'static str {
        match self {
            Field::BytesPerPoint => "BYT_NR",
            Field::Encoding => "ENCDG",
            Field::BinaryFormat => "BN_FMT",
            Field::ByteOrder => "BYT_OR",
            Field::NumberOfPoints => "NR_PT",
            Field::WaveformId => "WFID",
            Field::PointFormat => "PT_FMT",
            Field::XIncrement => "XINCR",
            Field::XZero => "XZERO",
            Field::XUnit => "XUNIT",
            Field::YMult => "YMULT",
            Field::YZero => "YZERO",
            Field::YOff => "YOFF",
            Field::YUnit => "YUNIT",
        }
    }

    fn index(self) -> usize {
        LAYOUT
            .iter()
            .find(|(_, f)| *f == self)
            .map(|&(index, _)| index)
            .unwrap_or_default()
    }
}

/// Fields collected so far. Only turned into a `WaveformPreamble` once every
/// one of them is set.
#[derive(Default)]
struct Draft {
    bytes_per_point: Option<u32>,
    encoding: Option<Encoding>,
    signed: Option<bool>,
    big_endian: Option<bool>,
    number_of_points: Option<usize>,
    waveform_id: Option<String>,
    point_format: Option<PointFormat>,
    x_seconds_per_point: Option<f64>,
    x_zero: Option<f64>,
    x_unit: Option<String>,
    y_mult: Option<f64>,
    y_zero: Option<f64>,
    y_off: Option<f64>,
    y_unit: Option<String>,
}

impl Draft {
    fn assign(&mut self, field: Field, token: &str) -> Result<()> {
        let name = field.mnemonic();
        match field {
            Field::BytesPerPoint => self.bytes_per_point = Some(number(name, token)?),
            Field::Encoding => self.encoding = Some(token.parse()?),
            Field::BinaryFormat => self.signed = Some(lookup(SIGNEDNESS, name, token)?),
            Field::ByteOrder => self.big_endian = Some(lookup(BYTE_ORDERS, name, token)?),
            Field::NumberOfPoints => self.number_of_points = Some(number(name, token)?),
            Field::WaveformId => self.waveform_id = Some(token.to_string()),
            Field::PointFormat => self.point_format = Some(token.parse()?),
            Field::XIncrement => self.x_seconds_per_point = Some(number(name, token)?),
            Field::XZero => self.x_zero = Some(number(name, token)?),
            Field::XUnit => self.x_unit = Some(token.to_string()),
            Field::YMult => self.y_mult = Some(number(name, token)?),
            Field::YZero => self.y_zero = Some(number(name, token)?),
            Field::YOff => self.y_off = Some(number(name, token)?),
            Field::YUnit => self.y_unit = Some(token.to_string()),
        }
        Ok(())
    }

    fn finish(self) -> Result<WaveformPreamble> {
        fn required<T>(value: Option<T>, field: Field) -> Result<T> {
            value.ok_or(FormatError::MissingField {
                field: field.mnemonic(),
                index: field.index(),
            })
        }

        Ok(WaveformPreamble {
            bytes_per_point: required(self.bytes_per_point, Field::BytesPerPoint)?,
            encoding: required(self.encoding, Field::Encoding)?,
            signed: required(self.signed, Field::BinaryFormat)?,
            big_endian: required(self.big_endian, Field::ByteOrder)?,
            number_of_points: required(self.number_of_points, Field::NumberOfPoints)?,
            waveform_id: required(self.waveform_id, Field::WaveformId)?,
            point_format: required(self.point_format, Field::PointFormat)?,
            x_seconds_per_point: required(self.x_seconds_per_point, Field::XIncrement)?,
            x_zero: required(self.x_zero, Field::XZero)?,
            x_unit: required(self.x_unit, Field::XUnit)?,
            y_mult: required(self.y_mult, Field::YMult)?,
            y_zero: required(self.y_zero, Field::YZero)?,
            y_off: required(self.y_off, Field::YOff)?,
            y_unit: required(self.y_unit, Field::YUnit)?,
        })
    }
}

impl WaveformPreamble {
    /// Parse a `WFMPRE?` response such as
    /// `2;16;BIN;RI;MSB;2500;"Ch1, ...";Y;1.0E-7;0;-1.25E-4;"s";3.125E-4;0.0E0;-1.1008E4;"Volts"`.
    ///
    /// Fails on the first field that is missing, not a number, or carries an
    /// unknown code. Tokens past the last known position are ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let tokens = tokenize(text)?;

        let mut draft = Draft::default();
        for &(index, field) in LAYOUT {
            let token = tokens.get(index).ok_or(FormatError::MissingField {
                field: field.mnemonic(),
                index,
            })?;
            draft.assign(field, token)?;
        }
        let preamble = draft.finish()?;

        log::debug!(
            "parsed preamble: {} points, {} byte(s)/point, {}",
            preamble.number_of_points,
            preamble.bytes_per_point,
            preamble.encoding.code()
        );
        Ok(preamble)
    }

    /// Whether the curve this preamble describes is the 2-byte, signed,
    /// big-endian binary layout that [`crate::decode`] reads.
    pub fn uses_native_curve_format(&self) -> bool {
        self.bytes_per_point == 2 && self.encoding == Encoding::Binary && self.signed && self.big_endian
    }
}

impl FromStr for WaveformPreamble {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for WaveformPreamble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  bytes_per_point: {}", self.bytes_per_point)?;
        writeln!(f, "  encoding: {}", self.encoding.code())?;
        writeln!(f, "  signed: {}", self.signed)?;
        writeln!(f, "  big_endian: {}", self.big_endian)?;
        writeln!(f, "  number_of_points: {}", self.number_of_points)?;
        writeln!(f, "  waveform_id: {}", self.waveform_id)?;
        writeln!(f, "  point_format: {}", self.point_format.code())?;
        writeln!(f, "  x_seconds_per_point: {:e}", self.x_seconds_per_point)?;
        writeln!(f, "  x_zero: {:e}", self.x_zero)?;
        writeln!(f, "  x_unit: {}", self.x_unit)?;
        writeln!(f, "  y_mult: {:e}", self.y_mult)?;
        writeln!(f, "  y_zero: {:e}", self.y_zero)?;
        writeln!(f, "  y_off: {:e}", self.y_off)?;
        write!(f, "  y_unit: {}", self.y_unit)
    }
}

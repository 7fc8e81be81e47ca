// src/error.rs
// Format errors shared by the curve and preamble parsers

use thiserror::Error;

/// Every way a curve block or a WFMPRE preamble can fail to parse.
///
/// There is no recovery: a parse either yields a complete value or one of
/// these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("first character of curve data should be #")]
    MissingMarker,

    #[error("invalid header format: {0}")]
    InvalidHeader(String),

    #[error("missing data")]
    MissingData,

    #[error("missing terminator")]
    MissingTerminator,

    #[error("header does not match data: got {actual} expected {declared}")]
    LengthMismatch { actual: usize, declared: usize },

    #[error("curve data not divisible by {width} ({len} bytes)")]
    UnalignedCurve { len: usize, width: usize },

    #[error("quote in unquoted token")]
    QuoteInUnquotedToken,

    #[error("unknown escape: \\{0}")]
    UnknownEscape(char),

    #[error("extra characters after closing quote")]
    TrailingAfterQuote,

    #[error("unfinished token")]
    UnfinishedToken,

    #[error("missing field {field} (token {index})")]
    MissingField { field: &'static str, index: usize },

    #[error("invalid number for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("unknown value for {field}: {value:?}")]
    UnknownValue { field: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, FormatError>;

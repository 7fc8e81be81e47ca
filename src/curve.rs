// src/curve.rs
// CURVE block framing and sample decoding

use crate::error::{FormatError, Result};

const BLOCK_MARKER: u8 = b'#';
const TERMINATOR: u8 = b'\n';

/// Layout of a single sample inside a curve payload.
pub trait SampleFormat {
    type Sample;

    /// Bytes per sample.
    const WIDTH: usize;

    /// Read one sample from exactly `WIDTH` bytes.
    fn read(bytes: &[u8]) -> Self::Sample;
}

/// Two byte, two's complement, most significant byte first.
#[derive(Debug, Clone, Copy)]
pub struct BigEndianI16;

impl SampleFormat for BigEndianI16 {
    type Sample = i16;
    const WIDTH: usize = 2;

    fn read(bytes: &[u8]) -> i16 {
        i16::from_be_bytes([bytes[0], bytes[1]])
    }
}

fn ascii_digits(bytes: &[u8]) -> Result<usize> {
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return Err(FormatError::InvalidHeader(format!(
            "expected digits, got {:?}",
            String::from_utf8_lossy(bytes)
        )));
    }
    bytes.iter().try_fold(0usize, |acc, &b| {
        acc.checked_mul(10)
            .and_then(|v| v.checked_add(usize::from(b - b'0')))
            .ok_or_else(|| FormatError::InvalidHeader("length does not fit".to_string()))
    })
}

/// Validate the `#<c><length>` header and trailing newline of a curve block
/// and return the payload between them.
///
/// The returned slice is exactly as long as the length declared in the header.
pub fn frame(data: &[u8]) -> Result<&[u8]> {
    let (&marker, rest) = data.split_first().ok_or(FormatError::MissingMarker)?;
    if marker != BLOCK_MARKER {
        return Err(FormatError::MissingMarker);
    }

    let (count, rest) = rest
        .split_first()
        .ok_or_else(|| FormatError::InvalidHeader("missing digit count".to_string()))?;
    let count = ascii_digits(std::slice::from_ref(count))?;
    if count == 0 || rest.len() < count {
        return Err(FormatError::InvalidHeader(format!(
            "cannot read {} length digits",
            count
        )));
    }

    let (digits, rest) = rest.split_at(count);
    let declared = ascii_digits(digits)?;
    log::trace!("curve header declares {} bytes", declared);

    let (&last, payload) = rest.split_last().ok_or(FormatError::MissingData)?;
    if last != TERMINATOR {
        return Err(FormatError::MissingTerminator);
    }

    if payload.len() != declared {
        return Err(FormatError::LengthMismatch {
            actual: payload.len(),
            declared,
        });
    }
    Ok(payload)
}

/// Decode a payload with an explicit sample layout.
pub fn decode_with<F: SampleFormat>(payload: &[u8]) -> Result<Vec<F::Sample>> {
    if payload.len() % F::WIDTH != 0 {
        return Err(FormatError::UnalignedCurve {
            len: payload.len(),
            width: F::WIDTH,
        });
    }
    Ok(payload.chunks_exact(F::WIDTH).map(F::read).collect())
}

/// Decode a curve payload as big-endian signed 16-bit samples.
///
/// This layout is fixed and does not follow the preamble's `BYT_NR`, `BYT_OR`
/// or `BN_FMT`; see [`crate::WaveformPreamble::uses_native_curve_format`].
pub fn decode(payload: &[u8]) -> Result<Vec<i16>> {
    decode_with::<BigEndianI16>(payload)
}

/// Frame and decode a complete curve block.
pub fn parse_curve(data: &[u8]) -> Result<Vec<i16>> {
    let samples = decode(frame(data)?)?;
    log::debug!("decoded {} curve samples", samples.len());
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(payload: &[u8]) -> Vec<u8> {
        let len = payload.len().to_string();
        let mut data = format!("#{}{}", len.len(), len).into_bytes();
        data.extend_from_slice(payload);
        data.push(b'\n');
        data
    }

    #[test]
    fn test_frame_extracts_payload() {
        let data = block(&[1, 2, 3, 4]);
        assert_eq!(frame(&data).unwrap(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_frame_payload_may_contain_newlines() {
        let data = block(b"\n\n");
        assert_eq!(frame(&data).unwrap(), b"\n\n");
    }

    #[test]
    fn test_frame_zero_padded_length() {
        assert_eq!(frame(b"#3002ab\n").unwrap(), b"ab");
        assert_eq!(frame(b"#10\n").unwrap(), b"");
    }

    #[test]
    fn test_missing_marker() {
        assert_eq!(frame(b""), Err(FormatError::MissingMarker));
        assert_eq!(frame(b"$12ab\n"), Err(FormatError::MissingMarker));
    }

    #[test]
    fn test_bad_header_digits() {
        assert!(matches!(frame(b"#"), Err(FormatError::InvalidHeader(_))));
        assert!(matches!(frame(b"#x2ab\n"), Err(FormatError::InvalidHeader(_))));
        assert!(matches!(frame(b"#0ab\n"), Err(FormatError::InvalidHeader(_))));
        assert!(matches!(frame(b"#2a2ab\n"), Err(FormatError::InvalidHeader(_))));
        assert!(matches!(frame(b"#51"), Err(FormatError::InvalidHeader(_))));
    }

    #[test]
    fn test_missing_data() {
        assert_eq!(frame(b"#12"), Err(FormatError::MissingData));
    }

    #[test]
    fn test_missing_terminator() {
        assert_eq!(frame(b"#12ab"), Err(FormatError::MissingTerminator));
        assert_eq!(frame(b"#12ab\r"), Err(FormatError::MissingTerminator));
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(
            frame(b"#14ab\n"),
            Err(FormatError::LengthMismatch { actual: 2, declared: 4 })
        );
        let message = frame(b"#11ab\n").unwrap_err().to_string();
        assert_eq!(message, "header does not match data: got 2 expected 1");
    }

    #[test]
    fn test_decode_big_endian() {
        let samples = decode(&[0x00, 0x01, 0xff, 0xff, 0x80, 0x00, 0x7f, 0xff, 0xd7, 0x00]).unwrap();
        assert_eq!(samples, vec![1, -1, i16::MIN, i16::MAX, -10496]);
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode(&[]).unwrap(), Vec::<i16>::new());
    }

    #[test]
    fn test_decode_odd_length() {
        let err = decode(&[1, 2, 3]).unwrap_err();
        assert_eq!(err, FormatError::UnalignedCurve { len: 3, width: 2 });
        assert!(err.to_string().starts_with("curve data not divisible by 2"));
    }

    #[test]
    fn test_parse_curve() {
        let payload: Vec<u8> = [-3i16, 0, 300].iter().flat_map(|v| v.to_be_bytes()).collect();
        assert_eq!(parse_curve(&block(&payload)).unwrap(), vec![-3, 0, 300]);
        assert!(parse_curve(&block(&[1, 2, 3])).is_err());
    }
}

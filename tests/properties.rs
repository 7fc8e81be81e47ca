// tests/properties.rs
// Property tests for framing, decoding and lexing

use proptest::prelude::*;
use tek_curve::{decode, frame, parse_curve, tokenize, FormatError, WaveformPreamble};

fn block_with_header(payload: &[u8], declared: usize) -> Vec<u8> {
    let len = declared.to_string();
    let mut data = format!("#{}{}", len.len(), len).into_bytes();
    data.extend_from_slice(payload);
    data.push(b'\n');
    data
}

proptest! {
    /// Any well formed block yields exactly the declared payload
    #[test]
    fn test_frame_returns_declared_payload(payload in prop::collection::vec(any::<u8>(), 0..512)) {
        let data = block_with_header(&payload, payload.len());
        let framed = frame(&data).unwrap();
        prop_assert_eq!(framed, &payload[..]);
    }

    /// Decoded sample count is half the declared length
    #[test]
    fn test_sample_count_matches_header(samples in prop::collection::vec(any::<i16>(), 0..512)) {
        let payload: Vec<u8> = samples.iter().flat_map(|s| s.to_be_bytes()).collect();
        let data = block_with_header(&payload, payload.len());

        let decoded = decode(frame(&data).unwrap()).unwrap();
        prop_assert_eq!(decoded.len() * 2, payload.len());
        prop_assert_eq!(decoded, samples);
    }

    /// A header that disagrees with the data never yields a payload
    #[test]
    fn test_length_mismatch_is_rejected(
        payload in prop::collection::vec(any::<u8>(), 0..128),
        declared in 0usize..1000,
    ) {
        prop_assume!(declared != payload.len());
        let data = block_with_header(&payload, declared);
        prop_assert_eq!(
            frame(&data),
            Err(FormatError::LengthMismatch { actual: payload.len(), declared })
        );
    }

    /// Odd payloads are always rejected by the decoder
    #[test]
    fn test_odd_payload_is_rejected(payload in prop::collection::vec(any::<u8>(), 0..128)) {
        prop_assume!(payload.len() % 2 == 1);
        prop_assert!(decode(&payload).is_err());
    }

    /// Blocks that do not start with the marker are rejected
    #[test]
    fn test_missing_marker_is_rejected(data in prop::collection::vec(any::<u8>(), 0..64)) {
        prop_assume!(data.first() != Some(&b'#'));
        prop_assert_eq!(parse_curve(&data), Err(FormatError::MissingMarker));
    }

    /// Unquoted fields survive a join on ';'
    #[test]
    fn test_tokenize_unquoted_fields(fields in prop::collection::vec("[A-Za-z0-9.+-]{0,8}", 1..20)) {
        let text = fields.join(";");
        prop_assert_eq!(tokenize(&text).unwrap(), fields);
    }

    /// Quoted fields may hold separators and escaped quotes
    #[test]
    fn test_tokenize_quoted_fields(fields in prop::collection::vec("[a-z ;,\"]{0,8}", 1..10)) {
        let text = fields
            .iter()
            .map(|f| format!("\"{}\"", f.replace('"', "\\\"")))
            .collect::<Vec<_>>()
            .join(";");
        prop_assert_eq!(tokenize(&text).unwrap(), fields);
    }

    /// Parsing the same preamble twice gives the same record
    #[test]
    fn test_preamble_parse_is_repeatable(points in 0usize..100_000, y_mult in -1.0e3f64..1.0e3) {
        let text = format!(
            "2;16;BIN;RI;MSB;{};\"id\";Y;1.0E-7;0;0.0;\"s\";{:e};0.0;0.0;\"Volts\"",
            points, y_mult
        );
        let first = WaveformPreamble::parse(&text).unwrap();
        let second = WaveformPreamble::parse(&text).unwrap();
        prop_assert_eq!(first.number_of_points, points);
        prop_assert_eq!(first.y_mult, y_mult);
        prop_assert_eq!(first, second);
    }
}

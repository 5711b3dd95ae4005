// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR (Common Data Representation) encoding and decoding tests.

use rosteleop::encoding::cdr::{CdrCursor, CdrEncoder, EncapsulationKind};
use rosteleop::messages::{CdrMessage, Log, LogLevel, Time, Twist};
use rosteleop::CodecError;

// ============================================================================
// Wire Layout
// ============================================================================

#[test]
fn test_velocity_command_bytes() {
    // linear = 1.0, angular = 0.0, both scales 2.0
    let twist = Twist::planar(1.0 * 2.0, 0.0 * 2.0);
    let data = twist.to_cdr().expect("encode twist");

    assert_eq!(data.len(), 48);
    let expected = [2.0f64, 0.0, 0.0, 0.0, 0.0, 0.0];
    for (i, value) in expected.iter().enumerate() {
        assert_eq!(&data[i * 8..i * 8 + 8], &value.to_le_bytes(), "double {i}");
    }
}

#[test]
fn test_log_message_round_trip() {
    let log = Log {
        stamp: Time {
            sec: 100,
            nanosec: 500,
        },
        level: LogLevel::from_u8(20),
        name: "node".to_string(),
        msg: "hello".to_string(),
        file: "a.c".to_string(),
        function: "f".to_string(),
        line: 42,
    };
    let data = log.to_cdr().expect("encode log");

    // Decode with raw primitives in declared order
    let mut cursor = CdrCursor::new(&data);
    assert_eq!(cursor.read_i32().expect("sec"), 100);
    assert_eq!(cursor.read_u32().expect("nanosec"), 500);
    assert_eq!(cursor.read_u8().expect("level"), 20);
    assert_eq!(cursor.read_string().expect("name"), "node");
    assert_eq!(cursor.read_string().expect("msg"), "hello");
    assert_eq!(cursor.read_string().expect("file"), "a.c");
    assert_eq!(cursor.read_string().expect("function"), "f");
    assert_eq!(cursor.read_u32().expect("line"), 42);
    assert!(cursor.is_at_end());

    assert_eq!(Log::from_cdr(&data).expect("decode log"), log);
}

#[test]
fn test_log_decoded_from_hand_built_payload() {
    let data: Vec<u8> = vec![
        0x01, 0x00, 0x00, 0x00, // sec = 1
        0x02, 0x00, 0x00, 0x00, // nanosec = 2
        0x28, // level = 40
        0x00, 0x00, 0x00, // padding
        0x02, 0x00, 0x00, 0x00, b'n', 0x00, // name = "n"
        0x00, 0x00, // padding
        0x01, 0x00, 0x00, 0x00, 0x00, // msg = ""
        0x00, 0x00, 0x00, // padding
        0x01, 0x00, 0x00, 0x00, 0x00, // file = ""
        0x00, 0x00, 0x00, // padding
        0x01, 0x00, 0x00, 0x00, 0x00, // function = ""
        0x00, 0x00, 0x00, // padding
        0x09, 0x00, 0x00, 0x00, // line = 9
    ];
    let log = Log::from_cdr(&data).expect("decode");
    assert_eq!(log.level, LogLevel::Error);
    assert_eq!(log.name, "n");
    assert_eq!(log.msg, "");
    assert_eq!(log.line, 9);
}

// ============================================================================
// Alignment
// ============================================================================

#[test]
fn test_scalar_alignment_invariant() {
    let mut encoder = CdrEncoder::new();
    encoder.uint8(1);
    encoder.int32(2);
    assert_eq!(encoder.size() % 4, 0);
    encoder.uint8(3);
    encoder.float64(4.0);
    assert_eq!(encoder.size() % 8, 0);
    encoder.uint8(5);
    encoder.uint32(6);
    assert_eq!(encoder.size() % 4, 0);
}

#[test]
fn test_string_prefix_alignment() {
    for content_len in 0..8 {
        let text = "x".repeat(content_len);
        let mut encoder = CdrEncoder::new();
        encoder.uint8(0xAB);
        encoder.string(&text).expect("string");
        // Prefix always starts at offset 4 after one byte
        assert_eq!(&encoder.data()[4..8], &((content_len + 1) as u32).to_le_bytes());

        encoder.string(&text).expect("second string");
        let data = encoder.finish();

        let mut cursor = CdrCursor::new(&data);
        cursor.read_u8().expect("byte");
        assert_eq!(cursor.read_string().expect("first"), text);
        let before = cursor.position();
        assert_eq!(cursor.read_string().expect("second"), text);
        // The second prefix sat on a 4-byte boundary
        let prefix_start = cursor.position() - (content_len + 1) - 4;
        assert_eq!(prefix_start % 4, 0);
        assert!(prefix_start >= before);
    }
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_string_edge_cases() {
    let cases = ["", "héllo wörld", "日本語テキスト", "🦀", "abc"];
    let mut encoder = CdrEncoder::new();
    for case in cases {
        encoder.string(case).expect("encode");
        // Next field needs padding after most of these lengths
        encoder.uint32(0xDEAD_BEEF);
    }
    let data = encoder.finish();

    let mut cursor = CdrCursor::new(&data);
    for case in cases {
        assert_eq!(cursor.read_string().expect("decode"), case);
        assert_eq!(cursor.read_u32().expect("sentinel"), 0xDEAD_BEEF);
    }
    assert!(cursor.is_at_end());
}

#[test]
fn test_string_length_counts_bytes_not_chars() {
    let mut encoder = CdrEncoder::new();
    encoder.string("é").expect("encode");
    // 2 UTF-8 bytes + null
    assert_eq!(&encoder.data()[0..4], &3u32.to_le_bytes());
}

#[test]
fn test_invalid_utf8_is_an_error() {
    let data: Vec<u8> = vec![0x03, 0x00, 0x00, 0x00, 0xFF, 0xFE, 0x00];
    let mut cursor = CdrCursor::new(&data);
    assert!(matches!(
        cursor.read_string(),
        Err(CodecError::InvalidUtf8 { .. })
    ));
}

// ============================================================================
// Bounds
// ============================================================================

#[test]
fn test_truncated_uint32() {
    let data: Vec<u8> = vec![0x01, 0x02];
    let mut cursor = CdrCursor::new(&data);
    let err = cursor.read_u32().expect_err("must fail");
    assert!(matches!(
        err,
        CodecError::BufferTooShort {
            requested: 4,
            available: 2,
            cursor_pos: 0
        }
    ));
}

#[test]
fn test_every_truncation_of_a_log_fails_cleanly() {
    let log = Log {
        stamp: Time { sec: 5, nanosec: 6 },
        level: LogLevel::Debug,
        name: "name".to_string(),
        msg: "message".to_string(),
        file: "file.rs".to_string(),
        function: "func".to_string(),
        line: 99,
    };
    let data = log.to_cdr().expect("encode");
    for len in 0..data.len() {
        assert!(
            Log::from_cdr(&data[..len]).is_err(),
            "truncated to {len} bytes should fail"
        );
    }
}

#[test]
fn test_string_length_past_end() {
    let data: Vec<u8> = vec![0xFF, 0xFF, 0x00, 0x00, b'a', 0x00];
    let mut cursor = CdrCursor::new(&data);
    let err = cursor.read_string().expect_err("must fail");
    assert!(err.is_truncation());
}

// ============================================================================
// Encapsulation
// ============================================================================

#[test]
fn test_encapsulated_twist() {
    let twist = Twist::planar(0.25, -0.75);
    let data = twist
        .to_cdr_encapsulated(EncapsulationKind::CdrLe)
        .expect("encode");
    assert_eq!(data.len(), 4 + 48);
    assert_eq!(&data[0..4], &[0x00, 0x01, 0x00, 0x00]);
    assert_eq!(Twist::from_cdr_encapsulated(&data).expect("decode"), twist);
}

#[test]
fn test_encapsulated_big_endian_log() {
    let log = Log {
        stamp: Time {
            sec: -1,
            nanosec: 1,
        },
        level: LogLevel::Fatal,
        name: "be".to_string(),
        msg: "big endian".to_string(),
        file: String::new(),
        function: String::new(),
        line: 0x0102_0304,
    };
    let data = log
        .to_cdr_encapsulated(EncapsulationKind::CdrBe)
        .expect("encode");
    assert_eq!(&data[4..8], &(-1i32).to_be_bytes());
    assert_eq!(Log::from_cdr_encapsulated(&data).expect("decode"), log);
}

#[test]
fn test_parameter_list_encapsulation_rejected() {
    let mut data = Twist::planar(1.0, 0.0)
        .to_cdr_encapsulated(EncapsulationKind::CdrLe)
        .expect("encode");
    // PL_CDR_LE
    data[1] = 0x03;
    assert!(matches!(
        Twist::from_cdr_encapsulated(&data),
        Err(CodecError::InvalidHeader {
            kind: Some(0x0003),
            ..
        })
    ));
}

#[test]
fn test_encapsulated_header_too_short() {
    assert!(matches!(
        Twist::from_cdr_encapsulated(&[0x00]),
        Err(CodecError::InvalidHeader { len: 1, kind: None })
    ));
}

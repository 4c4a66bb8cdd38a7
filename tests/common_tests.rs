//! Integration tests for the common datapath types.

use macc_sim::common::*;

/// Tests lane packing order: lane 0 is the least significant byte.
#[test]
fn test_word_lane_order() {
    let word = Word::from_lanes([1, -1, 127, -128]);
    assert_eq!(word.raw(), 0x807F_FF01);
    assert_eq!(word.lane(0), 1);
    assert_eq!(word.lane(3), -128);
}

/// Tests that lanes are sign-extended when read from a raw value.
#[test]
fn test_word_sign_extension() {
    let word = Word::new(0xFF80_7F00);
    assert_eq!(word.lanes(), [0, 127, -128, -1]);
}

/// Tests the offset register range.
#[test]
fn test_offset_range() {
    assert_eq!(Offset::new(-256).unwrap().get(), -256);
    assert_eq!(Offset::new(255).unwrap().get(), 255);
    assert!(matches!(
        Offset::new(256),
        Err(SimError::OffsetOutOfRange(256))
    ));
    assert!(matches!(
        Offset::new(-257),
        Err(SimError::OffsetOutOfRange(-257))
    ));
}

/// Tests that words are written as lane arrays in stimulus files.
#[test]
fn test_word_json_format() {
    let word: Word = serde_json::from_str("[1, 2, 3, -4]").unwrap();
    assert_eq!(word.lanes(), [1, 2, 3, -4]);
    assert_eq!(serde_json::to_string(&word).unwrap(), "[1,2,3,-4]");
}

/// Tests that out-of-range offsets are rejected while deserializing.
#[test]
fn test_offset_json_rejects_out_of_range() {
    assert!(serde_json::from_str::<Offset>("300").is_err());
    assert_eq!(serde_json::from_str::<Offset>("-128").unwrap().get(), -128);
}

/// Tests error display formatting.
#[test]
fn test_error_display() {
    let err = SimError::InputDepthOutOfRange { depth: 9, max: 8 };
    assert_eq!(err.to_string(), "input depth 9 exceeds max_input_depth 8");
    assert_eq!(
        SimError::ZeroInputDepth.to_string(),
        "input depth must be at least 1"
    );
}

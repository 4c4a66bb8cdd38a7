//! Tests for the madd4 multiply-add pipeline.

use macc_sim::common::{Offset, Word};
use macc_sim::core::pipeline::latches::{Madd4Inputs, OperandLatch};
use macc_sim::core::pipeline::Pipe;
use macc_sim::core::units::madd4::{madd4, tree_sum, Madd4Pipeline};

fn inputs(i: [i8; 4], f: [i8; 4], offset: i32) -> Madd4Inputs {
    Madd4Inputs::new(
        Word::from_lanes(i),
        Word::from_lanes(f),
        Offset::new(offset).unwrap(),
    )
}

/// Tests the basic dot product with no offset.
#[test]
fn test_madd4_dot_product() {
    assert_eq!(madd4(&inputs([1, 2, 3, 4], [1, 1, 1, 1], 0)), 10);
    assert_eq!(madd4(&inputs([5, 6, 7, 8], [2, 2, 2, 2], 0)), 52);
}

/// Tests that the offset is added to the input operand only.
#[test]
fn test_madd4_offset_applies_to_inputs() {
    assert_eq!(madd4(&inputs([1, 1, 1, 1], [1, 1, 1, 1], 1)), 8);
    assert_eq!(madd4(&inputs([0, 0, 0, 0], [3, 0, 0, 0], 5)), 15);
    assert_eq!(madd4(&inputs([1, 2, 3, 4], [0, 0, 0, 0], 100)), 0);
}

/// Tests signed extremes of the 8-bit lanes.
#[test]
fn test_madd4_signed_extremes() {
    assert_eq!(madd4(&inputs([-128; 4], [-128; 4], 0)), 4 * 16384);
    assert_eq!(madd4(&inputs([-128; 4], [-128; 4], -128)), 4 * 32768);
    assert_eq!(madd4(&inputs([127; 4], [-128; 4], 0)), 4 * -16256);
    assert_eq!(madd4(&inputs([-1, 2, -3, 4], [5, -6, 7, -8], 0)), -5 - 12 - 21 - 32);
}

/// Tests that the offset-corrected operand wraps like a 9-bit register.
#[test]
fn test_madd4_operand_wraps_at_nine_bits() {
    let latch = OperandLatch::capture(&inputs([127, 0, 0, 0], [1, 0, 0, 0], 255));
    assert_eq!(latch.inputs[0], 382 - 512);
    assert_eq!(madd4(&inputs([127, 0, 0, 0], [1, 0, 0, 0], 255)), -130);
}

/// Tests the balanced reduction.
#[test]
fn test_tree_sum() {
    assert_eq!(tree_sum([1, 2, 3, 4]), 10);
    assert_eq!(tree_sum([-32768, 32767, 1, 0]), 0);
}

/// Tests that a result surfaces exactly two cycles after its inputs.
#[test]
fn test_madd4_pipeline_latency() {
    let mut pipe = Madd4Pipeline::new();
    assert_eq!(pipe.latency(), Madd4Pipeline::PIPELINE_CYCLES);
    assert_eq!(pipe.latency(), 2);

    pipe.tick(inputs([1, 2, 3, 4], [1, 1, 1, 1], 0));
    assert_eq!(pipe.output(), 0);
    assert_eq!(pipe.operands().inputs, [1, 2, 3, 4]);

    pipe.tick(Madd4Inputs::default());
    assert_eq!(pipe.output(), 10);
}

/// Tests back-to-back issue: one result per cycle in issue order.
#[test]
fn test_madd4_pipeline_back_to_back() {
    let mut pipe = Madd4Pipeline::new();
    let stream = [
        inputs([1, 2, 3, 4], [1, 1, 1, 1], 0),
        inputs([5, 6, 7, 8], [2, 2, 2, 2], 0),
        inputs([1, 1, 1, 1], [1, 1, 1, 1], 1),
        Madd4Inputs::default(),
        Madd4Inputs::default(),
    ];

    let mut seen = Vec::new();
    for word in stream {
        seen.push(pipe.output());
        pipe.tick(word);
    }
    assert_eq!(seen, vec![0, 0, 10, 52, 8]);
}

/// Tests that flushing clears both stages.
#[test]
fn test_madd4_pipeline_flush() {
    let mut pipe = Madd4Pipeline::new();
    pipe.tick(inputs([1, 2, 3, 4], [1, 1, 1, 1], 0));
    pipe.tick(inputs([1, 2, 3, 4], [1, 1, 1, 1], 0));
    pipe.flush();
    pipe.tick(Madd4Inputs::default());
    assert_eq!(pipe.output(), 0);
}

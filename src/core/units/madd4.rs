//! 4-wide multiply-add pipeline.
//!
//! Computes `sum((i[n] + offset) * f[n] for n in 0..4)` over two packed
//! words. The pipeline samples its inputs on every cycle; whether a result
//! is meaningful is tracked by the owner's sequencer.

use crate::common::constants::{LANES, MADD4_PIPELINE_CYCLES};
use crate::core::pipeline::latches::{Madd4Inputs, OperandLatch};
use crate::core::pipeline::Pipe;

/// Two-stage multiply-add pipeline.
///
/// * Stage 1 latches the offset-corrected input lanes and the filter lanes.
/// * Stage 2 latches the balanced-tree sum of the four combinational
///   products.
#[derive(Clone, Debug, Default)]
pub struct Madd4Pipeline {
    operands: OperandLatch,
    result: i32,
}

impl Madd4Pipeline {
    /// Cycles from presenting a word pair to its result being readable.
    pub const PIPELINE_CYCLES: usize = MADD4_PIPELINE_CYCLES;

    pub fn new() -> Self {
        Self::default()
    }

    /// Stage-1 latch contents.
    pub fn operands(&self) -> &OperandLatch {
        &self.operands
    }
}

impl Pipe for Madd4Pipeline {
    type Input = Madd4Inputs;
    type Output = i32;

    fn latency(&self) -> usize {
        Self::PIPELINE_CYCLES
    }

    fn tick(&mut self, input: Madd4Inputs) {
        // Both registers update on the same edge: the result register takes
        // the products of the operands latched on the previous cycle.
        self.result = tree_sum(self.operands.products());
        self.operands = OperandLatch::capture(&input);
    }

    fn output(&self) -> i32 {
        self.result
    }

    fn flush(&mut self) {
        *self = Self::default();
    }
}

/// Balanced reduction of the lane products.
pub fn tree_sum(products: [i32; LANES]) -> i32 {
    let low = products[0].wrapping_add(products[1]);
    let high = products[2].wrapping_add(products[3]);
    low.wrapping_add(high)
}

/// Single-cycle reference for one word pair, without pipelining.
pub fn madd4(inputs: &Madd4Inputs) -> i32 {
    tree_sum(OperandLatch::capture(inputs).products())
}

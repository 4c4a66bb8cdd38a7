//! Madd4 pipeline latch structures.
//!
//! The multiply-add pipeline has two register boundaries: the operand latch
//! written on the cycle a word pair is presented, and the result register
//! written one cycle later from the combinational products.

use crate::common::constants::{LANES, OPERAND_BITS};
use crate::common::data::wrap_signed;
use crate::common::{Offset, Word};

/// Values presented to the madd4 pipeline on one cycle.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Madd4Inputs {
    /// Four input activations.
    pub input: Word,
    /// Four filter weights.
    pub filter: Word,
    /// Shared correction added to each input lane.
    pub offset: Offset,
}

impl Madd4Inputs {
    pub fn new(input: Word, filter: Word, offset: Offset) -> Self {
        Self {
            input,
            filter,
            offset,
        }
    }
}

/// Stage-1 operand latch.
///
/// Holds the offset-corrected input lanes (wrapped to the 9-bit operand
/// register) and the sign-extended filter lanes.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct OperandLatch {
    /// Offset-corrected input lanes.
    pub inputs: [i32; LANES],
    /// Sign-extended filter lanes.
    pub filters: [i32; LANES],
}

impl OperandLatch {
    /// Computes the value written into the latch at the next clock edge.
    pub fn capture(inputs: &Madd4Inputs) -> Self {
        let offset = inputs.offset.get();
        let i_lanes = inputs.input.lanes();
        let f_lanes = inputs.filter.lanes();
        Self {
            inputs: i_lanes.map(|lane| wrap_signed(lane as i32 + offset, OPERAND_BITS)),
            filters: f_lanes.map(|lane| lane as i32),
        }
    }

    /// Combinational per-lane products.
    pub fn products(&self) -> [i32; LANES] {
        let mut products = [0; LANES];
        for (n, product) in products.iter_mut().enumerate() {
            *product = self.inputs[n] * self.filters[n];
        }
        products
    }
}

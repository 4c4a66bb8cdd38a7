//! Untimed golden model.
//!
//! Computes what a run must produce with no pipelining at all, for checking
//! the cycle-accurate path against.

use super::stimulus::WordPair;
use crate::common::Offset;
use crate::core::pipeline::latches::Madd4Inputs;
use crate::core::units::madd4::madd4;
use crate::core::units::PostProcess;

/// `sum over k, n of (i_k[n] + offset) * f_k[n]`, wrapping at 32 bits.
pub fn run_sum(words: &[WordPair], offset: Offset) -> i32 {
    words
        .iter()
        .map(|pair| madd4(&Madd4Inputs::new(pair.input, pair.filter, offset)))
        .fold(0i32, |acc, value| acc.wrapping_add(value))
}

/// Post-processed value the run reports with `done`.
pub fn run_output(words: &[WordPair], offset: Offset, transform: &dyn PostProcess) -> i32 {
    transform.process(run_sum(words, offset))
}

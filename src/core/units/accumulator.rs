//! Run accumulator.
//!
//! A single signed 32-bit register with add and clear controls. The result
//! output looks ahead: when an add is enabled, `result` already carries the
//! sum that will be committed at the next edge, so a consumer can use the
//! final total on the same cycle the last addend arrives.

use crate::core::pipeline::signals::AccumulatorControl;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Accumulator {
    stored: i32,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed register value.
    pub fn stored(&self) -> i32 {
        self.stored
    }

    /// Combinational result for this cycle's controls.
    ///
    /// `clear` does not affect the look-ahead; it only takes effect at the
    /// next edge.
    pub fn result(&self, ctrl: &AccumulatorControl) -> i32 {
        if ctrl.add_en {
            self.stored.wrapping_add(ctrl.in_value)
        } else {
            self.stored
        }
    }

    /// Clock edge. Clear wins over a concurrent add.
    pub fn tick(&mut self, ctrl: &AccumulatorControl) {
        if ctrl.clear {
            self.stored = 0;
        } else if ctrl.add_en {
            self.stored = self.stored.wrapping_add(ctrl.in_value);
        }
    }
}

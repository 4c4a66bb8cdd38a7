//! Per-cycle signal bundles.
//!
//! These structures are the boundary between the run controller and the
//! rest of the datapath: everything the controller samples on a cycle and
//! everything it drives combinationally on that same cycle.

use serde::Serialize;

/// Inputs sampled by the run controller on one cycle.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct RunInputs {
    /// Begin a new run. Only honoured in the ready state.
    pub start: bool,
    /// Number of words in the run. Registered: a value presented on cycle
    /// `t` is what the controller compares against on cycle `t + 1`.
    pub input_depth: u32,
    /// The word pair presented to the madd4 pipeline this cycle is valid.
    pub madd4_inputs_ready: bool,
    /// Madd4 pipeline output register.
    pub madd4_result: i32,
    /// Post-processor output register.
    pub pp_result: i32,
}

/// Outputs driven by the run controller on one cycle.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Serialize)]
pub struct RunOutputs {
    /// The presented word pair was consumed by the madd4 pipeline.
    pub madd4_start: bool,
    /// Accumulator add enable.
    pub acc_add_en: bool,
    /// Accumulator clear.
    pub acc_clear: bool,
    /// The final sum is being submitted to the post-processor.
    pub pp_start: bool,
    /// Value submitted to the post-processor. Zero unless `pp_start`.
    pub pp_accumulator: i32,
    /// The run has completed.
    pub done: bool,
    /// Post-processed result. Zero unless `done`.
    pub output: i32,
}

/// Accumulator control lines for one cycle.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct AccumulatorControl {
    pub add_en: bool,
    pub in_value: i32,
    pub clear: bool,
}

impl AccumulatorControl {
    /// Add `value` this cycle.
    pub fn add(value: i32) -> Self {
        Self {
            add_en: true,
            in_value: value,
            clear: false,
        }
    }

    /// Clear this cycle.
    pub fn clear() -> Self {
        Self {
            clear: true,
            ..Self::default()
        }
    }
}

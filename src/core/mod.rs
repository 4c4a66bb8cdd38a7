//! MACC core: pipeline primitives, execution units and the run controller.

/// Run controller state machine.
pub mod control;

/// Delay lines, sequencers, latches and signal bundles.
pub mod pipeline;

/// Multiply-add pipeline, accumulator and post-processor.
pub mod units;

pub use control::{RunController, RunState};

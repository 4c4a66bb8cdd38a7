//! Simulation harness, stimulus loading and the golden model.

/// Testbench wiring the controller to its collaborators.
pub mod harness;

/// Untimed reference results.
pub mod reference;

/// JSON stimulus format.
pub mod stimulus;

pub use harness::{CycleTrace, RunReport, Testbench};
pub use stimulus::{ReadyPattern, RunStimulus, Stimulus, WordPair};

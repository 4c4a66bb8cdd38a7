//! Execution units driven by the run controller.
//!
//! The multiply-add pipeline and the post-processor are fixed-latency
//! collaborators; the accumulator is owned by the controller itself.

/// Run accumulator register.
pub mod accumulator;

/// 4-wide multiply-add pipeline.
pub mod madd4;

/// Post-processing transforms and their fixed-latency wrapper.
pub mod post_process;

pub use accumulator::Accumulator;
pub use madd4::Madd4Pipeline;
pub use post_process::{PostProcess, PostProcessor};

//! Pipeline building blocks.
//!
//! This module contains the generic fixed-latency delay line, the validity
//! sequencer that tracks in-flight items, the madd4 operand latch, and the
//! per-cycle signal bundles exchanged with the run controller.

/// Generic fixed-latency delay line.
pub mod delay;

/// Madd4 pipeline latches.
pub mod latches;

/// Validity tracker for fixed-latency pipes.
pub mod sequencer;

/// Per-cycle controller signal bundles.
pub mod signals;

/// Fixed-latency pipe interface.
pub mod traits;

pub use delay::FixedLatencyPipe;
pub use sequencer::Sequencer;
pub use traits::Pipe;

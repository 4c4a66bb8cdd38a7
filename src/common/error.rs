//! Simulation error types.
//!
//! The modelled hardware has no runtime error taxonomy of its own. These
//! errors are raised at the simulation boundary, where a real register file
//! would have silently misbehaved (zero-depth runs, out-of-range offsets) or
//! where the host side fails (configuration and stimulus loading).

use thiserror::Error;

/// Result type alias for simulator operations.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors raised by the MACC simulator.
#[derive(Debug, Error)]
pub enum SimError {
    /// `start` was asserted while the registered input depth was zero.
    #[error("input depth must be at least 1")]
    ZeroInputDepth,

    /// `start` was asserted with a depth the counters were not sized for.
    #[error("input depth {depth} exceeds max_input_depth {max}")]
    InputDepthOutOfRange {
        /// Requested number of words.
        depth: u32,
        /// Configured maximum.
        max: u32,
    },

    /// Offset does not fit the 9-bit signed offset register.
    #[error("input offset {0} does not fit in 9 signed bits (-256..=255)")]
    OffsetOutOfRange(i32),

    /// A fixed-latency unit was configured with an unusable latency.
    #[error("{unit} latency must be at least 1 cycle, got {latency}")]
    InvalidLatency {
        /// Unit being configured.
        unit: &'static str,
        /// Rejected latency.
        latency: usize,
    },

    /// Post-processing activation range is empty.
    #[error("activation range is empty: min {min} > max {max}")]
    InvalidActivationRange {
        /// Lower clamp bound.
        min: i32,
        /// Upper clamp bound.
        max: i32,
    },

    /// The testbench watchdog expired before the run completed.
    #[error("run did not complete within {limit} cycles")]
    CycleLimit {
        /// Configured cycle budget.
        limit: u64,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("stimulus error: {0}")]
    Stimulus(#[from] serde_json::Error),
}

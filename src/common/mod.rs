//! Common utilities and types used throughout the MACC simulator.
//!
//! This module provides the packed datapath value types, fixed widths and
//! latencies, and the error type shared by every unit.

/// Datapath widths and fixed latencies.
pub mod constants;

/// Packed words and the offset register.
pub mod data;

/// Error types.
pub mod error;

pub use data::{Offset, Word};
pub use error::{Result, SimError};

pub use constants::{LANES, MADD4_PIPELINE_CYCLES};

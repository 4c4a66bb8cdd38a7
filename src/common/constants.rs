//! Datapath widths and fixed latencies.

/// Lanes per packed word.
pub const LANES: usize = 4;

/// Width of the offset-corrected input operand.
pub const OPERAND_BITS: u32 = 9;

/// Smallest value the offset register holds.
pub const OFFSET_MIN: i32 = -256;

/// Largest value the offset register holds.
pub const OFFSET_MAX: i32 = 255;

/// Cycles between presenting a word pair to the madd4 pipeline and reading
/// its result.
pub const MADD4_PIPELINE_CYCLES: usize = 2;

/// Default post-processor latency.
pub const DEFAULT_PP_PIPELINE_CYCLES: usize = 4;

/// Default depth bound; matches the 10-bit run counters.
pub const DEFAULT_MAX_INPUT_DEPTH: u32 = 1024;

//! Fixed-latency pipe interface.
//!
//! Defines the common behavior of every clocked unit that accepts one input
//! per cycle and presents the matching output a fixed number of cycles
//! later. The multiply-add pipeline, the post-processor and the raw delay
//! line all implement it, so the testbench and tests can drive them
//! uniformly.

/// A unit with a fixed input-to-output latency and strict FIFO ordering.
pub trait Pipe {
    /// Value accepted on each cycle.
    type Input;

    /// Value presented on the output register.
    type Output;

    /// Number of cycles between `tick(x)` and `output()` reflecting `x`.
    fn latency(&self) -> usize;

    /// Advances the pipe by one clock edge, sampling `input`.
    ///
    /// The input is captured whether or not anyone will consume the result;
    /// validity is tracked separately by a [`super::Sequencer`].
    fn tick(&mut self, input: Self::Input);

    /// Current output register value.
    fn output(&self) -> Self::Output;

    /// Clears every stage back to its reset value.
    fn flush(&mut self);
}

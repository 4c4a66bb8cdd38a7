//! Generic delay line.

use std::collections::VecDeque;

use super::traits::Pipe;
use crate::common::{Result, SimError};

/// A shift register of `L` stages.
///
/// A value passed to [`Pipe::tick`] on cycle `t` is readable from
/// [`Pipe::output`] on cycle `t + L`, and values surface in the order they
/// were accepted. Stage 0 is the newest entry.
#[derive(Clone, Debug)]
pub struct FixedLatencyPipe<T> {
    stages: VecDeque<T>,
}

impl<T: Clone + Default> FixedLatencyPipe<T> {
    /// Creates a pipe with every stage at `T::default()`.
    ///
    /// # Errors
    ///
    /// A zero latency would make the output combinational, which this type
    /// does not model; it is rejected with [`SimError::InvalidLatency`].
    pub fn new(latency: usize) -> Result<Self> {
        if latency == 0 {
            return Err(SimError::InvalidLatency {
                unit: "delay line",
                latency,
            });
        }
        Ok(Self {
            stages: std::iter::repeat(T::default()).take(latency).collect(),
        })
    }

    /// Stage contents, newest first.
    pub fn stages(&self) -> impl Iterator<Item = &T> + '_ {
        self.stages.iter()
    }
}

impl<T: Clone + Default> Pipe for FixedLatencyPipe<T> {
    type Input = T;
    type Output = T;

    fn latency(&self) -> usize {
        self.stages.len()
    }

    fn tick(&mut self, input: T) {
        self.stages.pop_back();
        self.stages.push_front(input);
    }

    fn output(&self) -> T {
        self.stages.back().cloned().unwrap_or_default()
    }

    fn flush(&mut self) {
        for stage in self.stages.iter_mut() {
            *stage = T::default();
        }
    }
}

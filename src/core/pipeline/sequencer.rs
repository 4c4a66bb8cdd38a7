//! Pipeline occupancy tracker.
//!
//! A `Sequencer` runs alongside a fixed-latency pipe and records, for each
//! of the last `L` cycles, whether an item was submitted. Its last stage
//! tells the owner that the pipe's output register holds a real result this
//! cycle rather than whatever garbage was sampled on an idle cycle.

use super::delay::FixedLatencyPipe;
use super::traits::Pipe;
use crate::common::Result;

/// Validity shift register for a pipe of latency `L`.
#[derive(Clone, Debug)]
pub struct Sequencer {
    track: FixedLatencyPipe<bool>,
}

impl Sequencer {
    pub fn new(latency: usize) -> Result<Self> {
        Ok(Self {
            track: FixedLatencyPipe::new(latency)?,
        })
    }

    pub fn latency(&self) -> usize {
        self.track.latency()
    }

    /// True when the item submitted exactly `L` cycles ago is now valid.
    pub fn valid(&self) -> bool {
        self.track.output()
    }

    /// Records whether an item was submitted this cycle.
    pub fn tick(&mut self, submitted: bool) {
        self.track.tick(submitted);
    }

    /// Number of submitted items whose results have not surfaced yet,
    /// including one that becomes valid this cycle.
    pub fn in_flight(&self) -> usize {
        self.track.stages().filter(|&&bit| bit).count()
    }

    /// Full track, `sequence()[k]` meaning "submitted `k + 1` cycles ago".
    pub fn sequence(&self) -> Vec<bool> {
        self.track.stages().copied().collect()
    }

    pub fn reset(&mut self) {
        self.track.flush();
    }
}

//! Run controller.
//!
//! Sequences one input channel's worth of multiply-adds: issues `N` word
//! pairs into the madd4 pipeline, folds each result into the accumulator as
//! it retires, forwards the final sum to the post-processor and reports
//! `done` once the post-processed value comes back.
//!
//! The controller is a five-state machine:
//!
//! ```text
//! Prepare -> Ready -> Run -> WaitAccumulate -> WaitPostProcess -> Ready
//! ```
//!
//! Every cycle, the handler for the current state computes a [`Next`] from
//! the registered state and the sampled [`RunInputs`] without touching
//! `self`; [`RunController::step`] then commits it as the clock edge.

use serde::Serialize;

use super::pipeline::signals::{AccumulatorControl, RunInputs, RunOutputs};
use super::pipeline::Sequencer;
use super::units::{Accumulator, Madd4Pipeline};
use crate::common::{Result, SimError};
use crate::config::Config;

// The last retirement must land in WaitAccumulate: the controller leaves
// Run at least one cycle after the last issue.
const _: () = assert!(Madd4Pipeline::PIPELINE_CYCLES >= 2);

/// Controller FSM state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum RunState {
    /// Reset state: clears the accumulator and counters.
    #[default]
    Prepare,
    /// Idle, waiting for `start`.
    Ready,
    /// Issuing words and retiring results.
    Run,
    /// All words issued; draining in-flight results.
    WaitAccumulate,
    /// Sum submitted; waiting for the post-processor.
    WaitPostProcess,
}

impl RunState {
    pub const ALL: [RunState; 5] = [
        RunState::Prepare,
        RunState::Ready,
        RunState::Run,
        RunState::WaitAccumulate,
        RunState::WaitPostProcess,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Register values to commit at the next clock edge, plus this cycle's
/// combinational outputs.
#[derive(Clone, Copy, Debug)]
struct Next {
    state: RunState,
    started: u32,
    retired: u32,
    acc: AccumulatorControl,
    madd4_submit: bool,
    pp_submit: bool,
    outputs: RunOutputs,
}

/// Sequencer for one accumulation run.
#[derive(Clone, Debug)]
pub struct RunController {
    state: RunState,
    max_input_depth: u32,
    /// Registered copy of the `input_depth` input.
    input_depth: u32,
    started: u32,
    retired: u32,
    accumulator: Accumulator,
    madd4_seq: Sequencer,
    pp_seq: Sequencer,
}

impl RunController {
    /// Creates a controller in the `Prepare` state.
    ///
    /// # Arguments
    ///
    /// * `max_input_depth` - Largest `input_depth` accepted on `start`.
    /// * `pp_latency` - Fixed latency of the post-processor being driven.
    pub fn new(max_input_depth: u32, pp_latency: usize) -> Result<Self> {
        Ok(Self {
            state: RunState::Prepare,
            max_input_depth,
            input_depth: 0,
            started: 0,
            retired: 0,
            accumulator: Accumulator::new(),
            madd4_seq: Sequencer::new(Madd4Pipeline::PIPELINE_CYCLES)?,
            pp_seq: Sequencer::new(pp_latency)?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.macc.max_input_depth, config.post_process.latency)
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Items issued to the madd4 pipeline in the current run.
    pub fn started(&self) -> u32 {
        self.started
    }

    /// Items folded into the accumulator in the current run.
    pub fn retired(&self) -> u32 {
        self.retired
    }

    /// Committed accumulator value.
    pub fn accumulator(&self) -> i32 {
        self.accumulator.stored()
    }

    /// Registered input depth the next `start` will use.
    pub fn input_depth(&self) -> u32 {
        self.input_depth
    }

    pub fn max_input_depth(&self) -> u32 {
        self.max_input_depth
    }

    /// Madd4 results still in flight.
    pub fn madd4_in_flight(&self) -> usize {
        self.madd4_seq.in_flight()
    }

    pub fn pp_latency(&self) -> usize {
        self.pp_seq.latency()
    }

    /// Returns to the reset state, dropping any run in progress.
    pub fn reset(&mut self) {
        self.state = RunState::Prepare;
        self.input_depth = 0;
        self.started = 0;
        self.retired = 0;
        self.accumulator = Accumulator::new();
        self.madd4_seq.reset();
        self.pp_seq.reset();
    }

    /// Advances the controller by one cycle.
    ///
    /// Returns the combinational outputs for the cycle in which `inputs`
    /// were sampled, then commits the register updates.
    ///
    /// # Errors
    ///
    /// Rejects a `start` whose registered depth is zero or above
    /// `max_input_depth`. The controller is left exactly as it was, still in
    /// `Ready`.
    pub fn step(&mut self, inputs: &RunInputs) -> Result<RunOutputs> {
        let mut next = Next {
            state: self.state,
            started: self.started,
            retired: self.retired,
            acc: AccumulatorControl::default(),
            madd4_submit: false,
            pp_submit: false,
            outputs: RunOutputs::default(),
        };

        if inputs.start && self.state != RunState::Ready {
            log::trace!("start ignored in {:?}", self.state);
        }

        match self.state {
            RunState::Prepare => self.prepare(&mut next),
            RunState::Ready => self.ready(inputs, &mut next)?,
            RunState::Run => self.run(inputs, &mut next),
            RunState::WaitAccumulate => self.wait_accumulate(inputs, &mut next),
            RunState::WaitPostProcess => self.wait_post_process(inputs, &mut next),
        }

        Ok(self.commit(inputs, next))
    }

    fn prepare(&self, next: &mut Next) {
        next.acc = AccumulatorControl::clear();
        next.started = 0;
        next.retired = 0;
        next.state = RunState::Ready;
    }

    fn ready(&self, inputs: &RunInputs, next: &mut Next) -> Result<()> {
        if !inputs.start {
            return Ok(());
        }
        self.check_depth()?;
        log::debug!("run start: input_depth={}", self.input_depth);
        self.issue(inputs, next);
        next.state = RunState::Run;
        Ok(())
    }

    fn run(&self, inputs: &RunInputs, next: &mut Next) {
        let starting_last = self.issue(inputs, next);
        self.retire(inputs, next);
        // A depth-1 run issued its only word from Ready.
        if starting_last || self.issue_complete() {
            next.state = RunState::WaitAccumulate;
        }
    }

    fn wait_accumulate(&self, inputs: &RunInputs, next: &mut Next) {
        if !self.retire(inputs, next) {
            return;
        }
        // The register has not taken this cycle's add yet; the look-ahead
        // result has.
        next.outputs.pp_start = true;
        next.outputs.pp_accumulator = self.accumulator.result(&next.acc);
        next.pp_submit = true;
        next.acc.clear = true;
        next.started = 0;
        next.retired = 0;
        next.state = RunState::WaitPostProcess;
    }

    fn wait_post_process(&self, inputs: &RunInputs, next: &mut Next) {
        if self.pp_seq.valid() {
            next.outputs.done = true;
            next.outputs.output = inputs.pp_result;
            next.state = RunState::Ready;
        }
    }

    /// Issues one word pair if the inputs are ready and the run still needs
    /// one. Returns true when the issued word is the last of the run.
    fn issue(&self, inputs: &RunInputs, next: &mut Next) -> bool {
        if !inputs.madd4_inputs_ready || self.issue_complete() {
            return false;
        }
        next.started = self.started + 1;
        next.madd4_submit = true;
        next.outputs.madd4_start = true;
        Some(self.started) == self.last_index()
    }

    /// Folds a madd4 result into the accumulator if one surfaces this cycle.
    /// Returns true when it is the last result of the run.
    fn retire(&self, inputs: &RunInputs, next: &mut Next) -> bool {
        if !self.madd4_seq.valid() {
            return false;
        }
        next.retired = self.retired + 1;
        next.acc = AccumulatorControl::add(inputs.madd4_result);
        Some(self.retired) == self.last_index()
    }

    fn issue_complete(&self) -> bool {
        self.started >= self.input_depth
    }

    fn last_index(&self) -> Option<u32> {
        self.input_depth.checked_sub(1)
    }

    fn check_depth(&self) -> Result<()> {
        if self.input_depth == 0 {
            log::warn!("start rejected: input_depth is zero");
            return Err(SimError::ZeroInputDepth);
        }
        if self.input_depth > self.max_input_depth {
            log::warn!(
                "start rejected: input_depth {} > max {}",
                self.input_depth,
                self.max_input_depth
            );
            return Err(SimError::InputDepthOutOfRange {
                depth: self.input_depth,
                max: self.max_input_depth,
            });
        }
        Ok(())
    }

    /// Clock edge.
    fn commit(&mut self, inputs: &RunInputs, next: Next) -> RunOutputs {
        let mut outputs = next.outputs;
        outputs.acc_add_en = next.acc.add_en;
        outputs.acc_clear = next.acc.clear;

        self.accumulator.tick(&next.acc);
        self.madd4_seq.tick(next.madd4_submit);
        self.pp_seq.tick(next.pp_submit);
        self.started = next.started;
        self.retired = next.retired;
        if next.state != self.state {
            log::debug!("{:?} -> {:?}", self.state, next.state);
        }
        self.state = next.state;
        self.input_depth = inputs.input_depth;

        debug_assert!(self.retired <= self.started);
        outputs
    }
}

//! Cycle-level testbench.
//!
//! Wires the run controller to a madd4 pipeline and a post-processor the way
//! the enclosing register file would: the next unread word pair is always
//! presented on the madd4 inputs, and it is consumed when the controller
//! pulses `madd4_start`. `input_depth` is a registered input, so the
//! testbench holds a run's depth for a cycle before asserting `start`.

use serde::Serialize;

use super::stimulus::{ReadyPattern, RunStimulus, Stimulus};
use crate::common::{Offset, Result, SimError};
use crate::config::Config;
use crate::core::pipeline::latches::Madd4Inputs;
use crate::core::pipeline::signals::{RunInputs, RunOutputs};
use crate::core::pipeline::Pipe;
use crate::core::units::{Madd4Pipeline, PostProcessor};
use crate::core::{RunController, RunState};
use crate::stats::SimStats;

/// Everything visible on one cycle.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CycleTrace {
    pub cycle: u64,
    pub state: RunState,
    pub started: u32,
    pub retired: u32,
    pub accumulator: i32,
    pub start: bool,
    pub madd4_inputs_ready: bool,
    pub madd4_result: i32,
    pub pp_result: i32,
    pub outputs: RunOutputs,
}

/// Outcome of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub input_depth: u32,
    pub offset: i32,
    /// Cycle on which `start` was sampled.
    pub start_cycle: u64,
    /// Cycle on which `done` was asserted.
    pub done_cycle: u64,
    pub issued: u32,
    pub retired: u32,
    /// Value submitted to the post-processor.
    pub pp_accumulator: i32,
    /// Value reported with `done`.
    pub output: i32,
}

impl RunReport {
    /// Cycles from `start` to `done`.
    pub fn latency(&self) -> u64 {
        self.done_cycle - self.start_cycle
    }
}

pub struct Testbench {
    controller: RunController,
    madd4: Madd4Pipeline,
    post_processor: PostProcessor,
    default_offset: Offset,
    max_cycles: u64,
    trace_enabled: bool,
    trace: Vec<CycleTrace>,
    stats: SimStats,
    cycle: u64,
}

impl Testbench {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            controller: RunController::from_config(config)?,
            madd4: Madd4Pipeline::new(),
            post_processor: PostProcessor::from_config(&config.post_process)?,
            default_offset: config.macc.input_offset_val()?,
            max_cycles: config.general.max_cycles,
            trace_enabled: cfg!(feature = "always-trace") || config.general.trace_cycles,
            trace: Vec::new(),
            stats: SimStats::default(),
            cycle: 0,
        })
    }

    pub fn controller(&self) -> &RunController {
        &self.controller
    }

    pub fn post_processor(&self) -> &PostProcessor {
        &self.post_processor
    }

    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    pub fn trace(&self) -> &[CycleTrace] {
        &self.trace
    }

    pub fn set_trace(&mut self, enabled: bool) {
        self.trace_enabled = enabled;
    }

    /// Cycles elapsed since construction.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Runs every entry of `stimulus` back to back.
    pub fn run_all(&mut self, stimulus: &Stimulus) -> Result<Vec<RunReport>> {
        stimulus
            .runs
            .iter()
            .map(|run| self.run(run, &stimulus.ready))
            .collect()
    }

    /// Drives one run from `start` to `done`.
    ///
    /// `ready` is indexed by cycles since this call began.
    pub fn run(&mut self, run: &RunStimulus, ready: &ReadyPattern) -> Result<RunReport> {
        let depth = run.input_depth();
        let offset = run.offset.unwrap_or(self.default_offset);
        let first_cycle = self.cycle;

        let mut next_word = 0usize;
        let mut start_cycle = None;
        let mut issued = 0u32;
        let mut retired = 0u32;
        let mut pp_accumulator = 0i32;

        loop {
            let elapsed = self.cycle - first_cycle;
            if self.max_cycles > 0 && elapsed >= self.max_cycles {
                return Err(SimError::CycleLimit {
                    limit: self.max_cycles,
                });
            }

            let start = start_cycle.is_none()
                && self.controller.state() == RunState::Ready
                && self.controller.input_depth() == depth;
            let pair = run.words.get(next_word);
            let word = pair
                .map(|pair| Madd4Inputs::new(pair.input, pair.filter, offset))
                .unwrap_or_default();
            let inputs = RunInputs {
                start,
                input_depth: depth,
                madd4_inputs_ready: pair.is_some() && ready.is_ready(elapsed),
                madd4_result: self.madd4.output(),
                pp_result: self.post_processor.output(),
            };

            let outputs = self.clock(&inputs, word)?;

            if start {
                start_cycle = Some(self.cycle);
            }
            if outputs.madd4_start {
                next_word += 1;
                issued += 1;
            }
            if outputs.acc_add_en {
                retired += 1;
            }
            if outputs.pp_start {
                pp_accumulator = outputs.pp_accumulator;
            }
            let done_cycle = self.cycle;
            self.cycle += 1;

            if outputs.done {
                let report = RunReport {
                    input_depth: depth,
                    offset: offset.get(),
                    start_cycle: start_cycle.unwrap_or(first_cycle),
                    done_cycle,
                    issued,
                    retired,
                    pp_accumulator,
                    output: outputs.output,
                };
                log::info!(
                    "run done: depth={} sum={} output={} latency={}",
                    depth,
                    report.pp_accumulator,
                    report.output,
                    report.latency()
                );
                return Ok(report);
            }
        }
    }

    /// One clock cycle across the controller and both pipes.
    fn clock(&mut self, inputs: &RunInputs, word: Madd4Inputs) -> Result<RunOutputs> {
        let state = self.controller.state();
        let (started, retired, accumulator) = (
            self.controller.started(),
            self.controller.retired(),
            self.controller.accumulator(),
        );

        let outputs = self.controller.step(inputs)?;
        self.madd4.tick(word);
        self.post_processor.tick(outputs.pp_accumulator);

        let stalled =
            state == RunState::Run && started < inputs.input_depth && !outputs.madd4_start;
        self.stats.record_cycle(state, &outputs, stalled);

        log::trace!(
            "cycle {}: {:?} started={} retired={} {:?}",
            self.cycle,
            state,
            started,
            retired,
            outputs
        );
        if self.trace_enabled {
            self.trace.push(CycleTrace {
                cycle: self.cycle,
                state,
                started,
                retired,
                accumulator,
                start: inputs.start,
                madd4_inputs_ready: inputs.madd4_inputs_ready,
                madd4_result: inputs.madd4_result,
                pp_result: inputs.pp_result,
                outputs,
            });
        }
        Ok(outputs)
    }
}

//! Simulation statistics collection and reporting.
//!
//! Tracks cycle counts, datapath activity, back-pressure stalls and the
//! time spent in each controller state.

use std::time::Instant;

use serde::Serialize;

use crate::core::pipeline::signals::RunOutputs;
use crate::core::RunState;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Debug, Clone, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    pub cycles: u64,
    pub runs_completed: u64,

    pub words_issued: u64,
    pub words_retired: u64,
    pub pp_submissions: u64,

    /// Cycles in `Run` where a word was still needed but not ready.
    pub stall_cycles: u64,

    /// Cycles spent in each state, indexed by [`RunState::index`].
    pub state_cycles: [u64; 5],
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            runs_completed: 0,
            words_issued: 0,
            words_retired: 0,
            pp_submissions: 0,
            stall_cycles: 0,
            state_cycles: [0; 5],
        }
    }
}

impl SimStats {
    /// Accounts for one controller cycle.
    ///
    /// `state` is the state the controller was in while producing
    /// `outputs`.
    pub fn record_cycle(&mut self, state: RunState, outputs: &RunOutputs, stalled: bool) {
        self.cycles += 1;
        self.state_cycles[state.index()] += 1;
        if outputs.madd4_start {
            self.words_issued += 1;
        }
        if outputs.acc_add_en {
            self.words_retired += 1;
        }
        if outputs.pp_start {
            self.pp_submissions += 1;
        }
        if outputs.done {
            self.runs_completed += 1;
        }
        if stalled {
            self.stall_cycles += 1;
        }
    }

    pub fn state_cycles(&self, state: RunState) -> u64 {
        self.state_cycles[state.index()]
    }

    /// Prints a formatted summary of all simulation statistics.
    pub fn print(&self) {
        let duration = self.start_time.elapsed();
        let seconds = duration.as_secs_f64();

        let cyc = if self.cycles == 0 { 1 } else { self.cycles };
        let words = if self.words_retired == 0 {
            1
        } else {
            self.words_retired
        };

        let wpc = self.words_retired as f64 / cyc as f64;
        let cpw = cyc as f64 / words as f64;
        let khz = if seconds > 0.0 {
            (self.cycles as f64 / seconds) / 1000.0
        } else {
            0.0
        };

        println!("\n==========================================================");
        println!("MACC4 RUN SEQUENCER STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_cycles               {}", self.cycles);
        println!("sim_freq                 {:.2} kHz", khz);
        println!("sim_runs                 {}", self.runs_completed);
        println!("sim_words                {}", self.words_retired);
        println!("sim_words_per_cycle      {:.4}", wpc);
        println!("sim_cycles_per_word      {:.4}", cpw);
        println!("----------------------------------------------------------");
        println!("DATAPATH");
        println!("  madd4.issued           {}", self.words_issued);
        println!("  madd4.retired          {}", self.words_retired);
        println!("  pp.submitted           {}", self.pp_submissions);
        println!(
            "  stalls.inputs          {} ({:.2}%)",
            self.stall_cycles,
            (self.stall_cycles as f64 / cyc as f64) * 100.0
        );
        println!("----------------------------------------------------------");
        println!("CONTROLLER STATES");
        for state in RunState::ALL {
            let count = self.state_cycles(state);
            println!(
                "  {:<22} {} ({:.2}%)",
                format!("{:?}", state),
                count,
                (count as f64 / cyc as f64) * 100.0
            );
        }
        println!("==========================================================");
    }
}

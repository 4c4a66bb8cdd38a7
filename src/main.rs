//! MACC4 Run Sequencer Simulator CLI.
//!
//! Loads a TOML configuration and a JSON stimulus, drives every run through
//! the cycle-accurate testbench, and prints the per-run results and the
//! simulation statistics.
//!
//! # Usage
//!
//! ```text
//! macc-sim --stimulus demos/e2e.json
//! macc-sim -c configs/requantize.toml -s demos/backpressure.json --check --trace trace.json
//! ```

use anyhow::{bail, Context};
use clap::Parser;
use std::fs;

use macc_sim::config::Config;
use macc_sim::sim::reference;
use macc_sim::sim::{Stimulus, Testbench};

/// Command-line arguments for the MACC simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "MACC4 Run Sequencer Cycle-Accurate Simulator")]
struct Args {
    #[arg(short, long, default_value = "configs/default.toml")]
    config: String,

    #[arg(short, long)]
    stimulus: String,

    /// Write the per-cycle trace as JSON to this path.
    #[arg(long)]
    trace: Option<String>,

    /// Compare every run against the untimed reference model.
    #[arg(long)]
    check: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = Config::from_file(&args.config)
        .with_context(|| format!("failed to load config {}", args.config))?;
    let stimulus = Stimulus::from_file(&args.stimulus)
        .with_context(|| format!("failed to load stimulus {}", args.stimulus))?;

    println!("Global Configuration");
    println!("--------------------");
    println!("General:");
    println!("  Trace Cycles:       {}", config.general.trace_cycles);
    println!("  Max Cycles/Run:     {}", config.general.max_cycles);
    println!("MACC:");
    println!("  Max Input Depth:    {}", config.macc.max_input_depth);
    println!("  Input Offset:       {}", config.macc.input_offset);
    println!("Post-Process:");
    println!("  Mode:               {:?}", config.post_process.mode);
    println!("  Latency:            {} cycles", config.post_process.latency);
    println!("--------------------");

    let mut bench = Testbench::new(&config)?;
    if args.trace.is_some() {
        bench.set_trace(true);
    }

    let reports = bench.run_all(&stimulus)?;
    for (n, (report, run)) in reports.iter().zip(&stimulus.runs).enumerate() {
        println!(
            "[run {}] depth={} offset={} sum={} output={} cycles={}",
            n,
            report.input_depth,
            report.offset,
            report.pp_accumulator,
            report.output,
            report.latency()
        );

        if args.check {
            let offset = run.offset.unwrap_or(config.macc.input_offset_val()?);
            let expected = reference::run_output(
                &run.words,
                offset,
                bench.post_processor().transform(),
            );
            if expected != report.output {
                bail!(
                    "run {} mismatch: expected {}, simulated {}",
                    n,
                    expected,
                    report.output
                );
            }
        }
    }
    if args.check {
        println!("[*] All {} run(s) match the reference model", reports.len());
    }

    bench.stats().print();

    if let Some(path) = args.trace {
        let json = serde_json::to_string_pretty(bench.trace())?;
        fs::write(&path, json).with_context(|| format!("failed to write trace {}", path))?;
        println!("[*] Trace written to {}", path);
    }

    Ok(())
}

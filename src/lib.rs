//! MACC4 Run Sequencer Simulator Library.
//!
//! This crate implements a cycle-accurate model of a small convolution
//! accelerator core: a 4-wide signed multiply-add pipeline with input offset
//! correction, a run accumulator, and the controller that sequences one
//! input channel's accumulation through the multiply-add pipeline and on
//! into a post-processor.
//!
//! # Architecture
//!
//! * **Madd4**: 2-cycle pipeline computing `sum((i[n] + offset) * f[n])`.
//! * **Accumulator**: 32-bit register with look-ahead result and
//!   clear-over-add priority.
//! * **Run controller**: `Prepare -> Ready -> Run -> WaitAccumulate ->
//!   WaitPostProcess` state machine that retires every issued word exactly
//!   once.
//! * **Post-processor**: opaque fixed-latency transform.
//!
//! # Modules
//!
//! * `common`: Datapath value types, constants, and error handling.
//! * `config`: Configuration loading and parsing.
//! * `core`: Pipeline primitives, execution units and the run controller.
//! * `sim`: Testbench, stimulus loading and reference model.
//! * `stats`: Performance statistics collection.

/// Shared types, constants and error handling.
///
/// Provides the packed word and offset types used on every datapath, and
/// the simulator error type.
pub mod common;

/// Configuration system for the controller and post-processor.
///
/// Loads and parses TOML configuration files.
pub mod config;

/// MACC core implementation.
///
/// Fixed-latency delay lines and sequencers, the madd4 pipeline, the
/// accumulator, the post-processor and the run controller.
pub mod core;

/// Simulation harness, stimulus files and the untimed golden model.
pub mod sim;

/// Performance statistics collection and reporting.
///
/// Tracks cycle counts, words issued and retired, back-pressure stalls and
/// per-state residency.
pub mod stats;

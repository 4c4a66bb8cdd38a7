use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::constants::{DEFAULT_MAX_INPUT_DEPTH, DEFAULT_PP_PIPELINE_CYCLES};
use crate::common::{Offset, Result, SimError};

const DEFAULT_MAX_CYCLES: u64 = 1_000_000;

/// Q31 value of 0.5; with `shift = 1` the requantizer scales by exactly 1.
const DEFAULT_MULTIPLIER: i32 = 1 << 30;
const DEFAULT_SHIFT: i32 = 1;
const INT8_MIN: i32 = -128;
const INT8_MAX: i32 = 127;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub macc: MaccConfig,
    #[serde(default)]
    pub post_process: PostProcessConfig,
}

impl Config {
    /// Reads and validates a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<()> {
        Offset::new(self.macc.input_offset)?;
        if self.post_process.latency == 0 {
            return Err(SimError::InvalidLatency {
                unit: "post-processor",
                latency: 0,
            });
        }
        if self.post_process.activation_min > self.post_process.activation_max {
            return Err(SimError::InvalidActivationRange {
                min: self.post_process.activation_min,
                max: self.post_process.activation_max,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub trace_cycles: bool,

    /// Testbench watchdog per run; 0 disables it.
    #[serde(default = "default_max_cycles")]
    pub max_cycles: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_cycles: false,
            max_cycles: default_max_cycles(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaccConfig {
    #[serde(default = "default_max_input_depth")]
    pub max_input_depth: u32,

    /// Offset used by runs that do not carry their own.
    #[serde(default)]
    pub input_offset: i32,
}

impl MaccConfig {
    pub fn input_offset_val(&self) -> Result<Offset> {
        Offset::new(self.input_offset)
    }
}

impl Default for MaccConfig {
    fn default() -> Self {
        Self {
            max_input_depth: default_max_input_depth(),
            input_offset: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostProcessMode {
    #[default]
    Identity,
    Requantize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostProcessConfig {
    #[serde(default = "default_pp_latency")]
    pub latency: usize,

    #[serde(default)]
    pub mode: PostProcessMode,

    #[serde(default)]
    pub bias: i32,

    #[serde(default = "default_multiplier")]
    pub multiplier: i32,

    #[serde(default = "default_shift")]
    pub shift: i32,

    #[serde(default)]
    pub output_offset: i32,

    #[serde(default = "default_activation_min")]
    pub activation_min: i32,

    #[serde(default = "default_activation_max")]
    pub activation_max: i32,
}

impl Default for PostProcessConfig {
    fn default() -> Self {
        Self {
            latency: default_pp_latency(),
            mode: PostProcessMode::default(),
            bias: 0,
            multiplier: default_multiplier(),
            shift: default_shift(),
            output_offset: 0,
            activation_min: default_activation_min(),
            activation_max: default_activation_max(),
        }
    }
}

fn default_max_cycles() -> u64 {
    DEFAULT_MAX_CYCLES
}

fn default_max_input_depth() -> u32 {
    DEFAULT_MAX_INPUT_DEPTH
}

fn default_pp_latency() -> usize {
    DEFAULT_PP_PIPELINE_CYCLES
}

fn default_multiplier() -> i32 {
    DEFAULT_MULTIPLIER
}

fn default_shift() -> i32 {
    DEFAULT_SHIFT
}

fn default_activation_min() -> i32 {
    INT8_MIN
}

fn default_activation_max() -> i32 {
    INT8_MAX
}

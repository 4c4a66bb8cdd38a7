//! Post-processing unit.
//!
//! The run controller treats post-processing as an opaque transform with a
//! fixed latency. Two transforms are provided: a pass-through, and the
//! per-channel requantization applied by the integer convolution kernels
//! that feed this accelerator (bias, fixed-point rescale, output offset,
//! activation clamp).

use std::fmt;

use crate::common::{Result, SimError};
use crate::config::{PostProcessConfig, PostProcessMode};
use crate::core::pipeline::{FixedLatencyPipe, Pipe};

/// Numeric transform applied to a completed run's sum.
pub trait PostProcess: fmt::Debug + Send {
    /// Returns the transformed value.
    fn process(&self, accumulator: i32) -> i32;
}

/// Passes the accumulator through unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct Identity;

impl PostProcess for Identity {
    fn process(&self, accumulator: i32) -> i32 {
        accumulator
    }
}

/// Per-channel int8 requantization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Requantize {
    pub bias: i32,
    /// Q31 fixed-point multiplier.
    pub multiplier: i32,
    /// Power-of-two exponent; positive shifts left.
    pub shift: i32,
    pub output_offset: i32,
    pub activation_min: i32,
    pub activation_max: i32,
}

impl Requantize {
    pub fn from_config(config: &PostProcessConfig) -> Result<Self> {
        if config.activation_min > config.activation_max {
            return Err(SimError::InvalidActivationRange {
                min: config.activation_min,
                max: config.activation_max,
            });
        }
        Ok(Self {
            bias: config.bias,
            multiplier: config.multiplier,
            shift: config.shift,
            output_offset: config.output_offset,
            activation_min: config.activation_min,
            activation_max: config.activation_max,
        })
    }
}

impl PostProcess for Requantize {
    fn process(&self, accumulator: i32) -> i32 {
        let acc = accumulator.wrapping_add(self.bias);
        let scaled = multiply_by_quantized_multiplier(acc, self.multiplier, self.shift);
        scaled
            .wrapping_add(self.output_offset)
            .clamp(self.activation_min, self.activation_max)
    }
}

/// High half of `2 * a * b`, rounded to nearest; saturates the one
/// overflowing case.
pub fn saturating_rounding_doubling_high_mul(a: i32, b: i32) -> i32 {
    if a == i32::MIN && b == i32::MIN {
        return i32::MAX;
    }
    let ab = a as i64 * b as i64;
    let nudge: i64 = if ab >= 0 { 1 << 30 } else { 1 - (1 << 30) };
    ((ab + nudge) / (1i64 << 31)) as i32
}

/// Arithmetic right shift rounding half away from zero.
pub fn rounding_divide_by_pot(x: i32, exponent: u32) -> i32 {
    if exponent == 0 {
        return x;
    }
    let exponent = exponent.min(31);
    let mask = ((1i64 << exponent) - 1) as i32;
    let remainder = x & mask;
    let threshold = (mask >> 1) + i32::from(x < 0);
    (x >> exponent) + i32::from(remainder > threshold)
}

/// Scales `x` by `multiplier * 2^shift`, `multiplier` being Q31.
pub fn multiply_by_quantized_multiplier(x: i32, multiplier: i32, shift: i32) -> i32 {
    let left = shift.max(0) as u32;
    let right = shift.saturating_neg().max(0) as u32;
    let shifted = x.wrapping_mul(1i32.wrapping_shl(left));
    rounding_divide_by_pot(
        saturating_rounding_doubling_high_mul(shifted, multiplier),
        right,
    )
}

/// Fixed-latency wrapper around a [`PostProcess`] transform.
///
/// The transform is applied as the value enters; the result then travels
/// through the delay line and surfaces `latency` cycles later.
#[derive(Debug)]
pub struct PostProcessor {
    transform: Box<dyn PostProcess>,
    pipe: FixedLatencyPipe<i32>,
}

impl PostProcessor {
    pub fn new(transform: Box<dyn PostProcess>, latency: usize) -> Result<Self> {
        if latency == 0 {
            return Err(SimError::InvalidLatency {
                unit: "post-processor",
                latency,
            });
        }
        Ok(Self {
            transform,
            pipe: FixedLatencyPipe::new(latency)?,
        })
    }

    /// Builds the configured transform.
    pub fn from_config(config: &PostProcessConfig) -> Result<Self> {
        let transform: Box<dyn PostProcess> = match config.mode {
            PostProcessMode::Identity => Box::new(Identity),
            PostProcessMode::Requantize => Box::new(Requantize::from_config(config)?),
        };
        Self::new(transform, config.latency)
    }

    pub fn transform(&self) -> &dyn PostProcess {
        self.transform.as_ref()
    }
}

impl Pipe for PostProcessor {
    type Input = i32;
    type Output = i32;

    fn latency(&self) -> usize {
        self.pipe.latency()
    }

    fn tick(&mut self, input: i32) {
        self.pipe.tick(self.transform.process(input));
    }

    fn output(&self) -> i32 {
        self.pipe.output()
    }

    fn flush(&mut self) {
        self.pipe.flush();
    }
}

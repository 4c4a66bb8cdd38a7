//! Stimulus files.
//!
//! A stimulus describes what the surrounding register file would feed the
//! run controller: one entry per run, each a list of input/filter word
//! pairs, plus the pattern in which the word pairs become ready.
//!
//! ```json
//! {
//!   "ready": { "repeat": [true, false] },
//!   "runs": [
//!     { "offset": 1, "words": [ { "input": [1, 1, 1, 1], "filter": [1, 1, 1, 1] } ] }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::{Offset, Result, Word};

/// One cycle's worth of madd4 operands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPair {
    pub input: Word,
    pub filter: Word,
}

impl WordPair {
    /// Builds a pair from signed lanes, lane 0 first.
    pub fn new(input: [i8; 4], filter: [i8; 4]) -> Self {
        Self {
            input: Word::from_lanes(input),
            filter: Word::from_lanes(filter),
        }
    }
}

/// Operands for a single accumulation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStimulus {
    /// Falls back to `macc.input_offset` when absent.
    #[serde(default)]
    pub offset: Option<Offset>,
    pub words: Vec<WordPair>,
}

impl RunStimulus {
    pub fn new(offset: Offset, words: Vec<WordPair>) -> Self {
        Self {
            offset: Some(offset),
            words,
        }
    }

    /// Number of word pairs, presented to the controller as `input_depth`.
    pub fn input_depth(&self) -> u32 {
        self.words.len() as u32
    }
}

/// When `madd4_inputs_ready` is asserted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadyPattern {
    /// Every cycle.
    #[default]
    Always,
    /// Cycle `k` of a run is ready iff `pattern[k % len]`; an empty pattern
    /// behaves like `Always`.
    Repeat(Vec<bool>),
}

impl ReadyPattern {
    pub fn is_ready(&self, cycle: u64) -> bool {
        match self {
            ReadyPattern::Always => true,
            ReadyPattern::Repeat(pattern) if pattern.is_empty() => true,
            ReadyPattern::Repeat(pattern) => pattern[(cycle % pattern.len() as u64) as usize],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stimulus {
    #[serde(default)]
    pub ready: ReadyPattern,
    pub runs: Vec<RunStimulus>,
}

impl Stimulus {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let stimulus = Self::from_json_str(&content)?;
        log::debug!(
            "loaded {} run(s) from {}",
            stimulus.runs.len(),
            path.display()
        );
        Ok(stimulus)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

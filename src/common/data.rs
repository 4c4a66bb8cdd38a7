//! Datapath value types.
//!
//! Words travel through the MACC datapath as packed 32-bit values holding
//! four signed bytes, one per channel element. The offset register is 9 bits
//! wide so that it can carry the full range of a negated int8 zero point.

use serde::{Deserialize, Serialize};

use super::constants::{LANES, OFFSET_MAX, OFFSET_MIN};
use super::error::{Result, SimError};

/// Four signed 8-bit lanes packed into a 32-bit word.
///
/// Lane `n` occupies bits `8n..8n+8`, so lane 0 is the least significant
/// byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i8; 4]", into = "[i8; 4]")]
pub struct Word(u32);

impl Word {
    /// Wraps a raw packed value.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Packs four lanes, lane 0 in the low byte.
    pub fn from_lanes(lanes: [i8; LANES]) -> Self {
        let bytes = lanes.map(|lane| lane as u8);
        Self(u32::from_le_bytes(bytes))
    }

    /// Raw packed value.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Sign-extended lane values.
    pub fn lanes(self) -> [i8; LANES] {
        self.0.to_le_bytes().map(|byte| byte as i8)
    }

    /// Single lane, sign-extended.
    ///
    /// # Panics
    ///
    /// Panics if `n >= LANES`.
    pub fn lane(self, n: usize) -> i8 {
        self.lanes()[n]
    }
}

impl From<[i8; LANES]> for Word {
    fn from(lanes: [i8; LANES]) -> Self {
        Self::from_lanes(lanes)
    }
}

impl From<Word> for [i8; LANES] {
    fn from(word: Word) -> Self {
        word.lanes()
    }
}

impl From<u32> for Word {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

/// Signed 9-bit input offset.
///
/// Construction through [`Offset::new`] rejects values outside the register
/// range instead of truncating them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Offset(i16);

impl Offset {
    /// No correction.
    pub const ZERO: Offset = Offset(0);

    pub fn new(value: i32) -> Result<Self> {
        if (OFFSET_MIN..=OFFSET_MAX).contains(&value) {
            Ok(Self(value as i16))
        } else {
            Err(SimError::OffsetOutOfRange(value))
        }
    }

    pub const fn get(self) -> i32 {
        self.0 as i32
    }
}

impl TryFrom<i32> for Offset {
    type Error = SimError;

    fn try_from(value: i32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Offset> for i32 {
    fn from(offset: Offset) -> Self {
        offset.get()
    }
}

/// Wraps `value` to a two's complement register of `bits` width and
/// sign-extends it back to `i32`.
pub fn wrap_signed(value: i32, bits: u32) -> i32 {
    let shift = 32 - bits;
    (value << shift) >> shift
}

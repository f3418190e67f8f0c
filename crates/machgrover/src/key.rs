//! Bit-string target keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{GroverError, GroverResult};

/// The basis state an oracle marks, written most significant bit first.
///
/// Character `k` of an `n`-bit key refers to qubit `n - 1 - k`, so the
/// key read as a binary number is the index of the marked basis state.
///
/// ```
/// use machgrover::TargetKey;
///
/// let key: TargetKey = "1010".parse().unwrap();
/// assert_eq!(key.len(), 4);
/// assert!(!key.qubit_bit(0));
/// assert!(key.qubit_bit(1));
/// assert_eq!(key.to_index(), Some(0b1010));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TargetKey {
    /// Bits, most significant first.
    bits: Vec<bool>,
}

impl TargetKey {
    /// Parse a key made of `0` and `1` characters.
    pub fn parse(key: &str) -> GroverResult<Self> {
        let bits = key
            .chars()
            .enumerate()
            .map(|(position, ch)| match ch {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(GroverError::InvalidKeyCharacter { ch, position }),
            })
            .collect::<GroverResult<Vec<_>>>()?;
        if bits.is_empty() {
            return Err(GroverError::KeyLengthMismatch {
                expected: 1,
                got: 0,
            });
        }
        Ok(Self { bits })
    }

    /// The `width`-bit key for basis state `index`.
    ///
    /// Bits of `index` above `width` are ignored. A zero width is rejected
    /// like an empty string in [`TargetKey::parse`].
    pub fn from_index(index: u64, width: usize) -> GroverResult<Self> {
        if width == 0 {
            return Err(GroverError::KeyLengthMismatch {
                expected: 1,
                got: 0,
            });
        }
        let bits = (0..width)
            .rev()
            .map(|q| q < 64 && (index >> q) & 1 == 1)
            .collect();
        Ok(Self { bits })
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if the key has no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The bit the key requires on search qubit `qubit`.
    ///
    /// # Panics
    ///
    /// Panics if `qubit` is not below [`len`](Self::len).
    pub fn qubit_bit(&self, qubit: usize) -> bool {
        self.bits[self.bits.len() - 1 - qubit]
    }

    /// Search qubits whose required bit is 0, in ascending order.
    pub fn zero_qubits(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(|&q| !self.qubit_bit(q))
    }

    /// The marked basis index, if it fits in 64 bits.
    pub fn to_index(&self) -> Option<u64> {
        if self.bits.len() > 64 {
            return None;
        }
        Some(
            self.bits
                .iter()
                .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit)),
        )
    }
}

impl fmt::Display for TargetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for TargetKey {
    type Err = GroverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TargetKey {
    type Error = GroverError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TargetKey> for String {
    fn from(key: TargetKey) -> Self {
        key.to_string()
    }
}

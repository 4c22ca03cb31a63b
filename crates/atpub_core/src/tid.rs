//! Timestamp identifiers (TIDs) used as record keys.

use crate::error::{PubError, Result};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Base32-sortkey alphabet. Lexicographic order of encoded strings matches
/// numeric order of the underlying values.
const ALPHABET: &[u8; 32] = b"234567abcdefghijklmnopqrstuvwxyz";

/// A 64-bit timestamp identifier used as a record key.
///
/// Bit layout (big-endian significance):
/// - bit 63: always 0
/// - bits 62-10: microseconds since the UNIX epoch
/// - bits 9-0: random clock identifier
///
/// TIDs are the record keys of atpub's remote collections. They sort
/// chronologically both as integers and in their 13-character string
/// encoding, so a lexicographic listing of record keys is a time ordering.
///
/// # Examples
///
/// ```
/// use atpub_core::Tid;
///
/// let tid = Tid::now();
/// assert_eq!(tid.to_string().len(), 13);
///
/// let parsed: Tid = tid.to_string().parse().unwrap();
/// assert_eq!(parsed, tid);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tid(u64);

impl Tid {
    /// The length of a TID in its string encoding.
    pub const STR_LEN: usize = 13;

    /// Generates a fresh TID from the current wall clock.
    ///
    /// The timestamp is read at millisecond resolution and multiplied by
    /// 1000, matching the upstream scheme this client interoperates with.
    /// Two calls within the same millisecond are therefore distinguished
    /// (and ordered) only by the random 10-bit clock id, so uniqueness and
    /// strict monotonicity are probabilistic, not guaranteed.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        let clock_id = rand::thread_rng().gen_range(0..1024u16);
        Self::from_parts(millis * 1000, clock_id)
    }

    /// Composes a TID from a microsecond timestamp and a clock id.
    ///
    /// The clock id is masked to 10 bits and the composed value to 63 bits,
    /// so the top bit of a TID is always 0.
    pub fn from_parts(micros: u64, clock_id: u16) -> Self {
        let value = (micros << 10) | u64::from(clock_id & 0x03FF);
        Self(value & 0x7FFF_FFFF_FFFF_FFFF)
    }

    /// Returns the raw 64-bit value.
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Returns the embedded microsecond timestamp.
    #[inline]
    pub fn timestamp_micros(&self) -> u64 {
        self.0 >> 10
    }

    /// Returns the embedded 10-bit clock id.
    #[inline]
    pub fn clock_id(&self) -> u16 {
        (self.0 & 0x03FF) as u16
    }
}

impl fmt::Display for Tid {
    /// Encodes the value into exactly 13 base32-sortkey characters,
    /// most-significant group first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; Self::STR_LEN];
        let mut value = self.0;
        for slot in buf.iter_mut().rev() {
            *slot = ALPHABET[(value & 0x1F) as usize];
            value >>= 5;
        }
        // The alphabet is pure ASCII.
        f.write_str(std::str::from_utf8(&buf).expect("ASCII alphabet"))
    }
}

impl fmt::Debug for Tid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tid({})", self)
    }
}

impl FromStr for Tid {
    type Err = PubError;

    /// Parses a 13-character TID string.
    ///
    /// Accepts exactly the strings matching
    /// `^[234567abcdefghij][234567abcdefghijklmnopqrstuvwxyz]{12}$`:
    /// 13 characters of the base32-sortkey alphabet, with the first
    /// character restricted to the 16 symbols whose 5-bit value has its
    /// top bit clear (the TID top bit is always 0).
    fn from_str(s: &str) -> Result<Self> {
        if s.len() != Self::STR_LEN {
            return Err(PubError::InvalidTid(format!(
                "expected {} characters, got {}",
                Self::STR_LEN,
                s.len()
            )));
        }

        let mut value: u64 = 0;
        for (i, b) in s.bytes().enumerate() {
            let digit = ALPHABET.iter().position(|&a| a == b).ok_or_else(|| {
                PubError::InvalidTid(format!("invalid character {:?} at position {}", b as char, i))
            })?;
            if i == 0 && digit >= 16 {
                return Err(PubError::InvalidTid(format!(
                    "first character {:?} would set the top bit",
                    b as char
                )));
            }
            value = (value << 5) | digit as u64;
        }

        Ok(Self(value))
    }
}

impl Serialize for Tid {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Tid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

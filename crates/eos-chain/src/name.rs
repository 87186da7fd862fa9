//! Base32-compacted account and method names.
//!
//! The ledger packs names of up to 13 characters from the alphabet
//! `.12345a-z` into a single u64: five bits per character for the first
//! twelve, four bits for the thirteenth. Trailing dots are dropped when
//! converting back to text.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use eos_primitives::util::{ByteReader, ByteWriter};

use crate::ChainError;

/// Decoding alphabet indexed by symbol value.
const CHARMAP: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

/// A base32-compacted name (account, method, or permission).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Name(u64);

impl Name {
    /// Wrap a raw u64 name value.
    ///
    /// # Arguments
    /// * `value` - The packed name value.
    ///
    /// # Returns
    /// A `Name` wrapping the value.
    pub fn new(value: u64) -> Self {
        Name(value)
    }

    /// Return the packed u64 value.
    ///
    /// # Returns
    /// The raw name value.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Serialize the name to the wire (u64 little-endian).
    ///
    /// # Arguments
    /// * `writer` - The destination writer.
    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_u64_le(self.0);
    }

    /// Deserialize a name from the wire.
    ///
    /// # Arguments
    /// * `reader` - The source reader.
    ///
    /// # Returns
    /// `Ok(Name)` or an error if the reader runs out of data.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, ChainError> {
        Ok(Name(reader.read_u64_le()?))
    }
}

/// Map a character to its 5-bit symbol value.
fn char_to_symbol(c: u8) -> Option<u64> {
    match c {
        b'.' => Some(0),
        b'1'..=b'5' => Some(u64::from(c - b'1') + 1),
        b'a'..=b'z' => Some(u64::from(c - b'a') + 6),
        _ => None,
    }
}

impl FromStr for Name {
    type Err = ChainError;

    /// Parse a textual name into its packed form.
    ///
    /// Up to 13 characters from `.12345a-z`; the thirteenth character may
    /// only carry a 4-bit symbol value (`.`, `1`-`5`, `a`-`j`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() > 13 {
            return Err(ChainError::InvalidName(format!(
                "'{}' is longer than 13 characters",
                s
            )));
        }

        let mut value: u64 = 0;
        for (i, &c) in bytes.iter().enumerate() {
            let symbol = char_to_symbol(c).ok_or_else(|| {
                ChainError::InvalidName(format!("'{}' contains invalid character '{}'", s, c as char))
            })?;
            if i < 12 {
                value |= symbol << (64 - 5 * (i + 1));
            } else {
                // 13th character: only the low 4 bits are available.
                if symbol > 0x0f {
                    return Err(ChainError::InvalidName(format!(
                        "'{}' 13th character exceeds the 4-bit range",
                        s
                    )));
                }
                value |= symbol;
            }
        }
        Ok(Name(value))
    }
}

impl fmt::Display for Name {
    /// Render the packed name as text, dropping trailing dots.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut chars = [b'.'; 13];
        let mut tmp = self.0;
        for i in (0..13).rev() {
            let mask = if i == 12 { 0x0f } else { 0x1f };
            chars[i] = CHARMAP[(tmp & mask) as usize];
            tmp >>= if i == 12 { 4 } else { 5 };
        }

        let end = chars
            .iter()
            .rposition(|&c| c != b'.')
            .map_or(0, |p| p + 1);
        // The charmap is ASCII, so this is always valid UTF-8.
        f.write_str(std::str::from_utf8(&chars[..end]).map_err(|_| fmt::Error)?)
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

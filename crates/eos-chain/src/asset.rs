//! Fixed-point asset amounts and symbols.
//!
//! An asset couples an i64 minor-unit amount with a symbol carrying a
//! decimal precision and a 1-7 character uppercase code. The display form
//! ("10.0000 EOS") keeps exactly `precision` fractional digits, so
//! re-encoding a decoded string reproduces it byte-for-byte.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use eos_primitives::util::{ByteReader, ByteWriter};

use crate::ChainError;

/// Maximum supported decimal precision.
pub const MAX_PRECISION: u8 = 18;

/// Wire length of a symbol code (zero-padded).
const SYMBOL_CODE_LEN: usize = 7;

// ---------------------------------------------------------------------------
// Symbol
// ---------------------------------------------------------------------------

/// An asset symbol: a decimal precision and an uppercase code.
///
/// Wire format: one precision byte followed by the code zero-padded to
/// seven bytes. Text format: `"<precision>,<code>"`, e.g. `"4,EOS"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol {
    precision: u8,
    code: String,
}

impl Symbol {
    /// Create a symbol from a code and precision.
    ///
    /// # Arguments
    /// * `code` - 1-7 uppercase ASCII letters.
    /// * `precision` - Number of decimal places, at most 18.
    ///
    /// # Returns
    /// `Ok(Symbol)` or `MalformedAsset` if either part is out of range.
    pub fn new(code: &str, precision: u8) -> Result<Self, ChainError> {
        if code.is_empty() || code.len() > SYMBOL_CODE_LEN {
            return Err(ChainError::MalformedAsset(format!(
                "symbol code '{}' must be 1-7 characters",
                code
            )));
        }
        if !code.bytes().all(|c| c.is_ascii_uppercase()) {
            return Err(ChainError::MalformedAsset(format!(
                "symbol code '{}' must be uppercase A-Z",
                code
            )));
        }
        if precision > MAX_PRECISION {
            return Err(ChainError::MalformedAsset(format!(
                "precision {} exceeds the maximum of {}",
                precision, MAX_PRECISION
            )));
        }
        Ok(Symbol {
            precision,
            code: code.to_string(),
        })
    }

    /// Return the decimal precision.
    ///
    /// # Returns
    /// The number of fractional digits.
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Return the symbol code.
    ///
    /// # Returns
    /// The uppercase code string.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Serialize the symbol to the wire.
    ///
    /// # Arguments
    /// * `writer` - The destination writer.
    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_u8(self.precision);
        let mut code_bytes = [0u8; SYMBOL_CODE_LEN];
        code_bytes[..self.code.len()].copy_from_slice(self.code.as_bytes());
        writer.write_bytes(&code_bytes);
    }

    /// Deserialize a symbol from the wire.
    ///
    /// # Arguments
    /// * `reader` - The source reader.
    ///
    /// # Returns
    /// `Ok(Symbol)` or an error on EOF or an invalid code.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, ChainError> {
        let precision = reader.read_u8()?;
        let raw = reader.read_bytes(SYMBOL_CODE_LEN)?;
        let end = raw.iter().position(|&c| c == 0).unwrap_or(SYMBOL_CODE_LEN);
        let code = std::str::from_utf8(&raw[..end])
            .map_err(|_| ChainError::MalformedAsset("symbol code is not ASCII".to_string()))?;
        Self::new(code, precision)
    }
}

impl FromStr for Symbol {
    type Err = ChainError;

    /// Parse the `"<precision>,<code>"` text form, e.g. `"4,EOS"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (precision, code) = s.split_once(',').ok_or_else(|| {
            ChainError::MalformedAsset(format!("symbol '{}' is missing the comma", s))
        })?;
        let precision: u8 = precision.parse().map_err(|_| {
            ChainError::MalformedAsset(format!("symbol '{}' has a bad precision", s))
        })?;
        Self::new(code, precision)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision, self.code)
    }
}

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

/// A fixed-point asset amount.
///
/// Wire format: i64 minor-unit amount (little-endian) followed by the
/// symbol. Display form: the scaled amount with exactly `precision`
/// fractional digits, a space, and the symbol code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Asset {
    amount: i64,
    symbol: Symbol,
}

impl Asset {
    /// Create an asset from a minor-unit amount and symbol.
    ///
    /// # Arguments
    /// * `amount` - The amount in minor units (may be negative).
    /// * `symbol` - The asset symbol.
    ///
    /// # Returns
    /// A new `Asset`.
    pub fn new(amount: i64, symbol: Symbol) -> Self {
        Asset { amount, symbol }
    }

    /// Return the minor-unit amount.
    ///
    /// # Returns
    /// The amount in minor units.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Return the asset symbol.
    ///
    /// # Returns
    /// A reference to the symbol.
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Render a minor-unit amount as a display string.
    ///
    /// # Arguments
    /// * `amount` - The minor-unit amount as a decimal integer string.
    /// * `code` - The symbol code to append.
    /// * `precision` - The number of fractional digits.
    ///
    /// # Returns
    /// `Ok(String)` like `"0.0001 EOS"`, or `InvalidAmount` if the amount
    /// string is not an integer, or `MalformedAsset` if the symbol or
    /// precision is out of range.
    pub fn encode_amount(amount: &str, code: &str, precision: u8) -> Result<String, ChainError> {
        // Validate the symbol parameters up front.
        let _ = Symbol::new(code, precision)?;
        let value = parse_integer(amount)
            .ok_or_else(|| ChainError::InvalidAmount(format!("'{}' is not an integer", amount)))?;
        Ok(format!("{} {}", format_scaled(value, precision), code))
    }

    /// Decode a display string into its minor-unit parts.
    ///
    /// The precision is the number of digits after the decimal point; a
    /// string without a decimal point decodes with precision 0.
    ///
    /// # Arguments
    /// * `text` - A display string like `"10.0000 EOS"`.
    ///
    /// # Returns
    /// `Ok((amount, code, precision))` where `amount` is the normalized
    /// minor-unit integer string, or `MalformedAsset` on a missing space,
    /// invalid symbol, or non-numeric body.
    pub fn decode_amount(text: &str) -> Result<(String, String, u8), ChainError> {
        let (numeric, code) = text.split_once(' ').ok_or_else(|| {
            ChainError::MalformedAsset(format!("'{}' is missing the symbol separator", text))
        })?;
        if code.is_empty() || code.contains(' ') {
            return Err(ChainError::MalformedAsset(format!(
                "'{}' has an empty or split symbol",
                text
            )));
        }

        let (sign, digits) = match numeric.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", numeric),
        };

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(ChainError::MalformedAsset(format!("'{}' has no digits", text)));
        }
        if !int_part.bytes().all(|c| c.is_ascii_digit())
            || !frac_part.bytes().all(|c| c.is_ascii_digit())
        {
            return Err(ChainError::MalformedAsset(format!(
                "'{}' has a non-numeric amount",
                text
            )));
        }

        let precision = frac_part.len();
        if precision > MAX_PRECISION as usize {
            return Err(ChainError::MalformedAsset(format!(
                "'{}' has more than {} decimal places",
                text, MAX_PRECISION
            )));
        }
        let _ = Symbol::new(code, precision as u8)?;

        let combined: i128 = format!("{}{}{}", sign, int_part, frac_part)
            .parse()
            .map_err(|_| {
                ChainError::MalformedAsset(format!("'{}' overflows the amount range", text))
            })?;
        Ok((combined.to_string(), code.to_string(), precision as u8))
    }

    /// Serialize the asset to the wire.
    ///
    /// # Arguments
    /// * `writer` - The destination writer.
    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_i64_le(self.amount);
        self.symbol.write_to(writer);
    }

    /// Deserialize an asset from the wire.
    ///
    /// # Arguments
    /// * `reader` - The source reader.
    ///
    /// # Returns
    /// `Ok(Asset)` or an error on EOF or an invalid symbol.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, ChainError> {
        let amount = reader.read_i64_le()?;
        let symbol = Symbol::read_from(reader)?;
        Ok(Asset { amount, symbol })
    }
}

impl FromStr for Asset {
    type Err = ChainError;

    /// Parse a display string like `"10.0000 EOS"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (amount, code, precision) = Self::decode_amount(s)?;
        let amount: i64 = amount.parse().map_err(|_| {
            ChainError::InvalidAmount(format!("'{}' overflows the 64-bit amount range", s))
        })?;
        Ok(Asset {
            amount,
            symbol: Symbol::new(&code, precision)?,
        })
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            format_scaled(i128::from(self.amount), self.symbol.precision),
            self.symbol.code
        )
    }
}

impl Serialize for Asset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Asset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// Parse a decimal integer string, rejecting signs other than a single
/// leading minus and any non-digit characters.
fn parse_integer(s: &str) -> Option<i128> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    if digits.is_empty() || !digits.bytes().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let value: i128 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Format a minor-unit value with exactly `precision` fractional digits.
fn format_scaled(value: i128, precision: u8) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let digits = value.unsigned_abs().to_string();
    let precision = precision as usize;

    if precision == 0 {
        return format!("{}{}", sign, digits);
    }

    let padded = if digits.len() <= precision {
        format!("{}{}", "0".repeat(precision + 1 - digits.len()), digits)
    } else {
        digits
    };
    let split = padded.len() - precision;
    format!("{}{}.{}", sign, &padded[..split], &padded[split..])
}

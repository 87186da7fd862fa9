//! Block timestamps with second resolution.
//!
//! The ledger represents expiration times as u32 seconds since the Unix
//! epoch, rendered in JSON as `"2019-01-22T02:20:42.000"` (UTC, no zone
//! suffix, millisecond field always zero).

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use eos_primitives::util::{ByteReader, ByteWriter};

use crate::ChainError;

/// Text format emitted by chain nodes.
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// A point in time with second resolution (u32 seconds since epoch).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct TimePointSec(u32);

impl TimePointSec {
    /// Wrap a raw Unix timestamp.
    ///
    /// # Arguments
    /// * `secs` - Seconds since the Unix epoch.
    ///
    /// # Returns
    /// A `TimePointSec` for that instant.
    pub fn from_unix(secs: u32) -> Self {
        TimePointSec(secs)
    }

    /// Return the current time plus an offset, for expiration stamps.
    ///
    /// # Arguments
    /// * `secs` - Seconds to add to the current time.
    ///
    /// # Returns
    /// A `TimePointSec` `secs` in the future.
    pub fn from_now(secs: u32) -> Self {
        let now = Utc::now().timestamp().max(0) as u64;
        TimePointSec((now + u64::from(secs)).min(u64::from(u32::MAX)) as u32)
    }

    /// Return the raw seconds-since-epoch value.
    ///
    /// # Returns
    /// Seconds since the Unix epoch.
    pub fn as_secs(&self) -> u32 {
        self.0
    }

    /// Serialize the timestamp to the wire (u32 little-endian).
    ///
    /// # Arguments
    /// * `writer` - The destination writer.
    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_u32_le(self.0);
    }

    /// Deserialize a timestamp from the wire.
    ///
    /// # Arguments
    /// * `reader` - The source reader.
    ///
    /// # Returns
    /// `Ok(TimePointSec)` or an error if the reader runs out of data.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, ChainError> {
        Ok(TimePointSec(reader.read_u32_le()?))
    }
}

impl FromStr for TimePointSec {
    type Err = ChainError;

    /// Parse the node's timestamp form; a missing or partial millisecond
    /// field is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .map_err(|e| ChainError::InvalidTime(format!("'{}': {}", s, e)))?;
        let secs = naive.and_utc().timestamp();
        if !(0..=i64::from(u32::MAX)).contains(&secs) {
            return Err(ChainError::InvalidTime(format!(
                "'{}' is outside the u32 range",
                s
            )));
        }
        Ok(TimePointSec(secs as u32))
    }
}

impl fmt::Display for TimePointSec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dt = DateTime::<Utc>::from_timestamp(i64::from(self.0), 0)
            .ok_or(fmt::Error)?;
        write!(f, "{}", dt.format(TIME_FORMAT))
    }
}

impl Serialize for TimePointSec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimePointSec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

// TrailControl Client Library
// Written by
//   The TrailControl developers
//
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the CC0 Public Domain Dedication
// along with this software.
// If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
//

//! # Checkpoints
//!
//! A checkpoint is a `(id, timestamp)` pair the contract records each time a
//! wallet calls `markCheckpoint`. Queries return them flattened as
//! `[id, timestamp, id, timestamp, ...]`, every value a big-endian hex
//! number. Zero is encoded as the empty string.
//!

use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::impl_std_error;

/// Rendering used for checkpoint times.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// A checkpoint decoding error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The value list has an odd length; holds the id without a timestamp.
    UnpairedValue(String),
    /// A value that is not a hex number.
    InvalidHex(String),
    /// A value too large for its field.
    Overflow {
        /// The offending hex value
        value: String,
        /// Field name
        field: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::UnpairedValue(ref v) => {
                write!(f, "checkpoint id \"{}\" has no matching timestamp", v)
            }
            Error::InvalidHex(ref v) => write!(f, "\"{}\" is not a hex number", v),
            Error::Overflow { ref value, field } => {
                write!(f, "{} \"{}\" is out of range", field, value)
            }
        }
    }
}

impl_std_error!(Error);

/// A checkpoint recorded for a wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(crate = "actual_serde")
)]
pub struct Checkpoint {
    /// Checkpoint identifier chosen by the caller.
    pub id: u32,
    /// Block timestamp, in seconds since the Unix epoch.
    pub timestamp: u64,
}

impl Checkpoint {
    /// The block time as a UTC date, if it is representable.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.timestamp).ok()?;
        DateTime::<Utc>::from_timestamp(secs, 0)
    }

    /// The block time as `YYYY-MM-DD HH:MM:SS UTC`.
    ///
    /// Timestamps beyond the calendar range fall back to the raw number.
    pub fn format_timestamp(&self) -> String {
        match self.datetime() {
            Some(dt) => dt.format(TIMESTAMP_FORMAT).to_string(),
            None => format!("{} (out of range)", self.timestamp),
        }
    }
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "checkpoint {} at {}", self.id, self.format_timestamp())
    }
}

/// Decodes a big-endian hex number as returned by a contract query.
pub fn decode_hex_u64(value: &str, field: &'static str) -> Result<u64, Error> {
    if !value.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidHex(value.to_owned()));
    }
    let digits = value.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(0);
    }
    u64::from_str_radix(digits, 16)
        .map_err(|_| Error::Overflow { value: value.to_owned(), field })
}

/// Groups a flattened `[id, timestamp, ...]` query result into checkpoints,
/// keeping the contract's order.
pub fn parse_checkpoint_pairs<S: AsRef<str>>(values: &[S]) -> Result<Vec<Checkpoint>, Error> {
    if let Some(last) = values.last().filter(|_| values.len() % 2 == 1) {
        return Err(Error::UnpairedValue(last.as_ref().to_owned()));
    }

    values
        .chunks_exact(2)
        .map(|pair| {
            let raw_id = pair[0].as_ref();
            let id = decode_hex_u64(raw_id, "checkpoint id")?;
            let id = u32::try_from(id)
                .map_err(|_| Error::Overflow { value: raw_id.to_owned(), field: "checkpoint id" })?;
            let timestamp = decode_hex_u64(pair[1].as_ref(), "timestamp")?;
            Ok(Checkpoint { id, timestamp })
        })
        .collect()
}

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

//! Hex Encoding and Decoding
//!
//! Contract queries return their values as hex strings. Decoding is done by
//! `hex-conservative`, which accepts either case; encoding is lowercase.

use std::fmt;

use hex_conservative::{decode_to_vec, DecodeVariableLengthBytesError};

/// Trait for objects that can be serialized as hex strings.
pub trait ToHex {
    /// Converts to a hexadecimal representation of the object.
    fn to_hex(&self) -> String;
}

/// Trait for objects that can be deserialized from hex strings.
pub trait FromHex: Sized {
    /// Error returned by [`FromHex::from_hex`], may differ depending
    /// on whether `Self` is fixed size of variable length.
    type Err;

    /// Produces an object from a hex string.
    fn from_hex(s: &str) -> Result<Self, Self::Err>;
}

/// Outputs hex into an object implementing `fmt::Write`, honouring width
/// (zero padded on the left) and precision (truncation).
pub fn format_hex(data: &[u8], f: &mut fmt::Formatter) -> fmt::Result {
    let prec = f.precision().unwrap_or(2 * data.len());
    let width = f.width().unwrap_or(2 * data.len());
    for _ in (2 * data.len())..width {
        f.write_str("0")?;
    }
    for ch in data.iter().take(prec / 2) {
        write!(f, "{:02x}", *ch)?;
    }
    if prec < 2 * data.len() && prec % 2 == 1 {
        write!(f, "{:x}", data[prec / 2] / 16)?;
    }
    Ok(())
}

impl ToHex for [u8] {
    fn to_hex(&self) -> String {
        use std::fmt::Write;
        let mut ret = String::with_capacity(2 * self.len());
        for ch in self {
            write!(ret, "{:02x}", ch).expect("writing to string");
        }
        ret
    }
}

impl FromHex for Vec<u8> {
    type Err = DecodeVariableLengthBytesError;

    fn from_hex(s: &str) -> Result<Self, Self::Err> {
        decode_to_vec(s)
    }
}

impl FromHex for [u8; 32] {
    type Err = hex_conservative::DecodeFixedLengthBytesError;

    fn from_hex(s: &str) -> Result<Self, Self::Err> {
        hex_conservative::decode_to_array(s)
    }
}

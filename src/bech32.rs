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

// This file is an adaptation of the bech32 crate with the following
// license notice:
//
// Copyright (c) 2017 Clark Moody
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! # Bech32
//!
//! The checksummed base32 format of [BIP-173], which MultiversX uses for
//! account and contract addresses.
//!
//! A bech32 string is made of a human-readable part (HRP), the separator `1`,
//! and a data part of 5-bit values followed by a 6 value checksum. Payload
//! bytes are repacked into 5-bit groups with [`convert_bits`] before encoding.
//!
//! Decoding accepts strings that are either all lowercase or all uppercase.
//! Mixed case is rejected and encoding always produces lowercase output.
//!
//! ```rust
//! use trailcontrol::bech32;
//!
//! let encoded = bech32::encode("bech32", &[0x00, 0x01, 0x02]).unwrap();
//! assert_eq!(encoded, "bech321qpz4nc4pe");
//!
//! let (hrp, data) = bech32::decode_to_base32(&encoded).unwrap();
//! assert_eq!(hrp, "bech32");
//! assert_eq!(data, vec![0x00, 0x01, 0x02]);
//! ```
//!
//! [BIP-173]: <https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki>

use std::fmt;

use crate::error::impl_std_error;

/// Human-readable part and data part separator
pub const SEP: char = '1';

/// Number of 5-bit values making up the checksum.
pub const CHECKSUM_LENGTH: usize = 6;

/// Encoding character set. Maps data value -> char
const CHARSET: [char; 32] = [
    'q', 'p', 'z', 'r', 'y', '9', 'x', '8', 'g', 'f', '2', 't', 'v', 'd', 'w', '0', 's', '3', 'j',
    'n', '5', '4', 'k', 'h', 'c', 'e', '6', 'm', 'u', 'a', '7', 'l',
];

// Reverse character set. Maps ASCII byte -> CHARSET index on [0,31]
const CHARSET_REV: [i8; 128] = [
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    15, -1, 10, 17, 21, 20, 26, 30, 7, 5, -1, -1, -1, -1, -1, -1, -1, 29, -1, 24, 13, 25, 9, 8, 23,
    -1, 18, 22, 31, 27, 19, -1, 1, 0, 3, 16, 11, 28, 12, 14, 6, 4, 2, -1, -1, -1, -1, -1, -1, 29,
    -1, 24, 13, 25, 9, 8, 23, -1, 18, 22, 31, 27, 19, -1, 1, 0, 3, 16, 11, 28, 12, 14, 6, 4, 2, -1,
    -1, -1, -1, -1,
];

/// Generator coefficients
const GEN: [u32; 5] = [0x3b6a_57b2, 0x2650_8e6d, 0x1ea1_19fa, 0x3d42_33dd, 0x2a14_62b3];

/// Bech32 encoding and decoding errors.
///
/// The first group of variants describes malformed strings, the second
/// describes payloads that cannot be regrouped between bit widths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The string contains no `1` separator.
    MissingSeparator,
    /// The human-readable part is empty.
    EmptyHrp,
    /// The human-readable part is not the one the caller asked for.
    HrpMismatch {
        /// Expected HRP
        expected: String,
        /// HRP found in the string, lowercased
        found: String,
    },
    /// A character outside the HRP range or the data alphabet.
    InvalidChar(char),
    /// The string mixes upper and lower case characters.
    MixedCase,
    /// The data part is too short to hold a checksum.
    InvalidLength(usize),
    /// The checksum does not verify.
    InvalidChecksum,
    /// A value does not fit the source bit width.
    InvalidData(u8),
    /// Non-zero or over-long padding when converting without padding.
    InvalidPadding,
    /// Bit widths must be between 1 and 8.
    InvalidWidth {
        /// Source width
        from: u32,
        /// Target width
        to: u32,
    },
}

impl Error {
    /// Whether this error describes an encoded string that is not valid bech32.
    pub fn is_format_error(&self) -> bool {
        !self.is_encoding_error()
    }

    /// Whether this error comes from regrouping values between bit widths.
    pub fn is_encoding_error(&self) -> bool {
        matches!(
            *self,
            Error::InvalidData(_) | Error::InvalidPadding | Error::InvalidWidth { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::MissingSeparator => write!(f, "missing human-readable separator, \"{}\"", SEP),
            Error::EmptyHrp => f.write_str("the human-readable part is empty"),
            Error::HrpMismatch { ref expected, ref found } => {
                write!(f, "expected human-readable part \"{}\", found \"{}\"", expected, found)
            }
            Error::InvalidChar(c) => write!(f, "invalid character {:?}", c),
            Error::MixedCase => f.write_str("mixed-case strings not allowed"),
            Error::InvalidLength(len) => {
                write!(f, "data part of {} characters is too short for a checksum", len)
            }
            Error::InvalidChecksum => f.write_str("invalid checksum"),
            Error::InvalidData(v) => write!(f, "invalid data point ({})", v),
            Error::InvalidPadding => f.write_str("invalid padding"),
            Error::InvalidWidth { from, to } => {
                write!(f, "cannot convert between {}-bit and {}-bit groups", from, to)
            }
        }
    }
}

impl_std_error!(Error);

/// Regroups `data`, read as a single big-endian bit stream of `from`-bit
/// values, into `to`-bit values.
///
/// With `pad` set a trailing partial group is flushed, filled with zero bits.
/// Without it, leftover bits must be fewer than `from` and all zero.
pub fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Result<Vec<u8>, Error> {
    if from == 0 || from > 8 || to == 0 || to > 8 {
        return Err(Error::InvalidWidth { from, to });
    }

    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let maxv: u32 = (1 << to) - 1;
    let mut ret = Vec::with_capacity((data.len() * from as usize).div_ceil(to as usize));
    for &value in data {
        let v = u32::from(value);
        if v >> from != 0 {
            return Err(Error::InvalidData(value));
        }
        acc = (acc << from) | v;
        bits += from;
        while bits >= to {
            bits -= to;
            ret.push(((acc >> bits) & maxv) as u8);
        }
        // Only the pending bits matter from here on.
        acc &= (1 << bits) - 1;
    }

    if pad {
        if bits > 0 {
            ret.push(((acc << (to - bits)) & maxv) as u8);
        }
    } else if bits >= from || ((acc << (to - bits)) & maxv) != 0 {
        return Err(Error::InvalidPadding);
    }
    Ok(ret)
}

/// Expands the HRP for checksum computation: the high bits of every
/// character, a zero, then the low five bits of every character.
pub fn hrp_expand(hrp: &[u8]) -> Vec<u8> {
    let mut v = Vec::with_capacity(hrp.len() * 2 + 1);
    v.extend(hrp.iter().map(|b| b >> 5));
    v.push(0);
    v.extend(hrp.iter().map(|b| b & 0x1f));
    v
}

/// The BCH checksum accumulator over 5-bit `values`.
pub fn polymod(values: &[u8]) -> u32 {
    let mut chk: u32 = 1;
    for &v in values {
        let b = chk >> 25;
        chk = ((chk & 0x1ff_ffff) << 5) ^ u32::from(v);
        for (i, gen) in GEN.iter().enumerate() {
            if (b >> i) & 1 == 1 {
                chk ^= gen;
            }
        }
    }
    chk
}

/// Computes the checksum of `data` under `hrp`, most significant value first.
pub fn create_checksum(hrp: &[u8], data: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data);
    values.extend_from_slice(&[0; CHECKSUM_LENGTH]);
    let plm = polymod(&values) ^ 1;

    let mut checksum = [0u8; CHECKSUM_LENGTH];
    for (p, c) in checksum.iter_mut().enumerate() {
        *c = ((plm >> (5 * (CHECKSUM_LENGTH - 1 - p))) & 0x1f) as u8;
    }
    checksum
}

/// Checks that `data`, checksum included, verifies under `hrp`.
pub fn verify_checksum(hrp: &[u8], data: &[u8]) -> bool {
    let mut exp = hrp_expand(hrp);
    exp.extend_from_slice(data);
    polymod(&exp) == 1
}

/// Validates an HRP and returns it lowercased.
fn check_hrp(hrp: &str) -> Result<String, Error> {
    if hrp.is_empty() {
        return Err(Error::EmptyHrp);
    }

    let mut has_lower = false;
    let mut has_upper = false;
    for c in hrp.chars() {
        // Valid subset of ASCII
        if !('!'..='~').contains(&c) {
            return Err(Error::InvalidChar(c));
        }
        has_lower |= c.is_ascii_lowercase();
        has_upper |= c.is_ascii_uppercase();
    }
    if has_lower && has_upper {
        return Err(Error::MixedCase);
    }
    Ok(hrp.to_ascii_lowercase())
}

/// Writes `hrp`, the separator and the checksummed data part, assuming both
/// have already been validated.
fn write_checked<W: fmt::Write>(w: &mut W, hrp: &str, data: &[u8]) -> fmt::Result {
    let checksum = create_checksum(hrp.as_bytes(), data);
    w.write_str(hrp)?;
    w.write_char(SEP)?;
    for &p in data.iter().chain(checksum.iter()) {
        w.write_char(CHARSET[usize::from(p)])?;
    }
    Ok(())
}

/// Encodes 5-bit `data` under `hrp`.
///
/// The HRP is lowercased. Every data value must be below 32.
pub fn encode(hrp: &str, data: &[u8]) -> Result<String, Error> {
    let hrp = check_hrp(hrp)?;
    if let Some(&bad) = data.iter().find(|&&v| v > 31) {
        return Err(Error::InvalidData(bad));
    }

    let mut ret = String::with_capacity(hrp.len() + 1 + data.len() + CHECKSUM_LENGTH);
    write_checked(&mut ret, &hrp, data).expect("writing to string");
    Ok(ret)
}

/// Encode a bech32 payload to an [`fmt::Formatter`].
///
/// Invalid input is reported as [`fmt::Error`].
pub fn encode_to_fmt(fmt: &mut fmt::Formatter, hrp: &str, data: &[u8]) -> fmt::Result {
    let hrp = check_hrp(hrp).map_err(|_| fmt::Error)?;
    if data.iter().any(|&v| v > 31) {
        return Err(fmt::Error);
    }
    write_checked(fmt, &hrp, data)
}

/// Regroups `bytes` into 5-bit values and encodes them under `hrp`.
pub fn bytes_to_bech32(hrp: &str, bytes: &[u8]) -> Result<String, Error> {
    let data = convert_bits(bytes, 8, 5, true)?;
    encode(hrp, &data)
}

/// Decode a bech32 string into the HRP and the 5-bit data values, checksum
/// removed. The HRP is returned lowercased.
pub fn decode_to_base32(s: &str) -> Result<(String, Vec<u8>), Error> {
    // Split at separator and check for two pieces
    let (raw_hrp, raw_data) = match s.rfind(SEP) {
        None => return Err(Error::MissingSeparator),
        Some(sep) => {
            let (hrp, data) = s.split_at(sep);
            (hrp, &data[1..])
        }
    };
    if raw_hrp.is_empty() {
        return Err(Error::EmptyHrp);
    }
    if raw_data.len() < CHECKSUM_LENGTH {
        return Err(Error::InvalidLength(raw_data.len()));
    }

    let mut has_lower = false;
    let mut has_upper = false;
    for c in raw_hrp.chars() {
        if !('!'..='~').contains(&c) {
            return Err(Error::InvalidChar(c));
        }
        has_lower |= c.is_ascii_lowercase();
        has_upper |= c.is_ascii_uppercase();
    }

    // Check data payload
    let mut data = raw_data
        .chars()
        .map(|c| {
            if !c.is_ascii() {
                return Err(Error::InvalidChar(c));
            }
            has_lower |= c.is_ascii_lowercase();
            has_upper |= c.is_ascii_uppercase();

            // c < 128 since it is ASCII, CHARSET_REV.len() == 128
            let num_value = CHARSET_REV[c as usize];
            if !(0..=31).contains(&num_value) {
                return Err(Error::InvalidChar(c));
            }
            Ok(num_value as u8)
        })
        .collect::<Result<Vec<u8>, Error>>()?;

    // Ensure no mixed case
    if has_lower && has_upper {
        return Err(Error::MixedCase);
    }

    let hrp = raw_hrp.to_ascii_lowercase();
    if !verify_checksum(hrp.as_bytes(), &data) {
        return Err(Error::InvalidChecksum);
    }

    data.truncate(data.len() - CHECKSUM_LENGTH);
    Ok((hrp, data))
}

/// Decodes a bech32 string that must carry `expected_hrp`, returning the
/// payload bytes.
///
/// The HRP comparison ignores case, in line with the decoder accepting
/// all-uppercase strings.
pub fn decode(expected_hrp: &str, s: &str) -> Result<Vec<u8>, Error> {
    let (hrp, data) = decode_to_base32(s)?;
    if !hrp.eq_ignore_ascii_case(expected_hrp) {
        return Err(Error::HrpMismatch { expected: expected_hrp.to_owned(), found: hrp });
    }
    convert_bits(&data, 5, 8, false)
}

#[cfg(test)]
mod test {
    use super::*;

    use rand::Rng;

    const ZERO_ADDRESS: &str = "erd1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq6gq4hu";

    #[test]
    fn test_polymod_sanity() {
        assert_eq!(polymod(&[]), 1);
        assert_eq!(polymod(&[0]), 32);

        let mut expanded = hrp_expand(b"a");
        expanded.extend([10, 28, 25, 31, 20, 31]); // "2uel5l"
        assert_eq!(polymod(&expanded), 1);
    }

    #[test]
    fn test_hrp_expand() {
        assert_eq!(hrp_expand(b"erd"), vec![3, 3, 3, 0, 5, 18, 4]);
        assert_eq!(hrp_expand(b"A"), vec![2, 0, 1]);
    }

    #[test]
    fn test_checksum() {
        assert_eq!(create_checksum(b"erd", &[]), [12, 6, 20, 11, 31, 31]);

        let data = convert_bits(&[7, 2, 3, 4, 5, 6, 7, 8, 9, 234, 123, 213, 16], 8, 5, true).unwrap();
        let mut full = data.clone();
        full.extend_from_slice(&create_checksum(b"erd", &data));
        assert!(verify_checksum(b"erd", &full));
        assert!(!verify_checksum(b"erc", &full));
    }

    #[test]
    fn test_convert_bits() {
        assert_eq!(convert_bits(&[0xff], 8, 5, true).unwrap(), vec![31, 28]);
        assert_eq!(convert_bits(&[0xff], 8, 5, false), Err(Error::InvalidPadding));
        assert_eq!(convert_bits(&[31, 28], 5, 8, false).unwrap(), vec![0xff]);
        // Non-zero leftover bits.
        assert_eq!(convert_bits(&[31, 29], 5, 8, false), Err(Error::InvalidPadding));
        // A whole unused 5-bit group.
        assert_eq!(convert_bits(&[31, 28, 0], 5, 8, false), Err(Error::InvalidPadding));
        assert_eq!(convert_bits(&[32], 5, 8, true), Err(Error::InvalidData(32)));
        assert_eq!(convert_bits(&[1], 0, 8, true), Err(Error::InvalidWidth { from: 0, to: 8 }));
        assert_eq!(convert_bits(&[1], 8, 9, true), Err(Error::InvalidWidth { from: 8, to: 9 }));
        assert!(convert_bits(&[], 8, 5, false).unwrap().is_empty());
    }

    #[test]
    fn test_convert_bits_identity() {
        let mut rng = rand::thread_rng();
        for len in 0..80 {
            let bytes: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            let five = convert_bits(&bytes, 8, 5, true).unwrap();
            assert!(five.iter().all(|&v| v < 32));
            assert_eq!(convert_bits(&five, 5, 8, false).unwrap(), bytes);
        }
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode("bech32", &[0, 1, 2]).unwrap(), "bech321qpz4nc4pe");
        assert_eq!(encode("BECH32", &[0, 1, 2]).unwrap(), "bech321qpz4nc4pe");
        assert_eq!(bytes_to_bech32("erd", &[0; 32]).unwrap(), ZERO_ADDRESS);
        assert_eq!(encode("", &[0]), Err(Error::EmptyHrp));
        assert_eq!(encode("eRd", &[0]), Err(Error::MixedCase));
        assert_eq!(encode("e d", &[0]), Err(Error::InvalidChar(' ')));
        assert_eq!(encode("erd", &[0, 32]), Err(Error::InvalidData(32)));
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode("erd", ZERO_ADDRESS).unwrap(), vec![0; 32]);
        assert_eq!(decode("erd", &ZERO_ADDRESS.to_uppercase()).unwrap(), vec![0; 32]);
        assert_eq!(decode("ERD", ZERO_ADDRESS).unwrap(), vec![0; 32]);

        assert_eq!(
            decode("bech32", ZERO_ADDRESS),
            Err(Error::HrpMismatch { expected: "bech32".into(), found: "erd".into() })
        );
        assert_eq!(decode("erd", "erdqqqqqqqq"), Err(Error::MissingSeparator));
        assert_eq!(decode("erd", "1qqqqqqqqq"), Err(Error::EmptyHrp));
        assert_eq!(decode("erd", "erd1qqqqq"), Err(Error::InvalidLength(5)));
        assert_eq!(decode("erd", "erd1qqqqqqqqqqqb"), Err(Error::InvalidChar('b')));
        assert_eq!(decode("erd", "erd1qqqqqqqqqqqé"), Err(Error::InvalidChar('é')));

        let mut mixed = ZERO_ADDRESS.to_owned();
        mixed.replace_range(4..5, "Q");
        assert_eq!(decode("erd", &mixed), Err(Error::MixedCase));

        let mut bad = ZERO_ADDRESS.to_owned();
        bad.replace_range(10..11, "p");
        assert_eq!(decode("erd", &bad), Err(Error::InvalidChecksum));
    }

    #[test]
    fn test_decode_padding_error() {
        // A valid checksum over a payload whose trailing bits are not zero.
        let s = encode("erd", &[31, 29]).unwrap();
        let err = decode("erd", &s).unwrap_err();
        assert_eq!(err, Error::InvalidPadding);
        assert!(err.is_encoding_error());
        assert!(Error::InvalidChecksum.is_format_error());
    }

    #[test]
    fn test_single_char_corruption() {
        let mut rng = rand::thread_rng();
        for _ in 0..10 {
            let bytes: [u8; 32] = rng.gen();
            let encoded = bytes_to_bech32("erd", &bytes).unwrap();
            let sep = encoded.rfind(SEP).unwrap();

            for pos in 0..encoded.len() {
                if pos == sep {
                    continue;
                }
                let original = encoded.as_bytes()[pos] as char;
                let replacements: &[char] = if pos < sep { &['a', 'b', 'x', 'z'] } else { &CHARSET };
                for &c in replacements {
                    if c == original {
                        continue;
                    }
                    let mut corrupted = encoded.clone();
                    corrupted.replace_range(pos..=pos, &c.to_string());
                    assert!(decode("erd", &corrupted).is_err(), "{} decoded", corrupted);
                }
            }
        }
    }

    #[test]
    fn test_roundtrip_and_residue() {
        let mut rng = rand::thread_rng();
        for hrp in &["erd", "bc", "tb", "a", "an-hrp!"] {
            for len in 0..64 {
                let bytes: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
                let encoded = bytes_to_bech32(hrp, &bytes).unwrap();
                assert_eq!(decode(hrp, &encoded).unwrap(), bytes);

                let (dec_hrp, _) = decode_to_base32(&encoded).unwrap();
                assert_eq!(&dec_hrp, hrp);

                // The whole expansion always lands on the target residue.
                let sep = encoded.rfind(SEP).unwrap();
                let mut values = hrp_expand(hrp.as_bytes());
                values.extend(encoded[sep + 1..].chars().map(|c| CHARSET_REV[c as usize] as u8));
                assert_eq!(polymod(&values), 1);
            }
        }
    }
}

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

//! # Addresses
//!
//! MultiversX accounts and contracts are identified by 32 raw bytes. They are
//! shown to users as bech32 strings under the `erd` prefix, and contract
//! queries hand them back either one per value or packed together into a
//! single hex blob.
//!

use std::fmt;
use std::str::FromStr;

use hex_conservative::DecodeVariableLengthBytesError;

use crate::bech32;
use crate::error::{impl_std_error, write_err};
use crate::hex::{self, FromHex, ToHex};

/// Length of an address in bytes.
pub const ADDRESS_LEN: usize = 32;

/// Length of a hex encoded address.
pub const ADDRESS_HEX_LEN: usize = 2 * ADDRESS_LEN;

/// Number of leading zero bytes that mark a smart contract address.
const CONTRACT_PREFIX_LEN: usize = 8;

/// Address parsing error
#[derive(Debug)]
pub enum AddressError {
    /// Bech32 encoding error
    Bech32(bech32::Error),
    /// Invalid hex input.
    InvalidHex(DecodeVariableLengthBytesError),
    /// The payload is not 32 bytes long.
    InvalidLength(usize),
    /// A packed address blob whose hex length is not a multiple of 64.
    InvalidBlobLength(usize),
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            AddressError::Bech32(ref e) => write_err!(f, "bech32 error"; e),
            AddressError::InvalidHex(ref e) => write_err!(f, "invalid hex"; e),
            AddressError::InvalidLength(len) => {
                write!(f, "an address must be {} bytes long, not {}", ADDRESS_LEN, len)
            }
            AddressError::InvalidBlobLength(len) => write!(
                f,
                "packed address list of {} hex characters is not a multiple of {}",
                len, ADDRESS_HEX_LEN
            ),
        }
    }
}

impl_std_error!(AddressError, Bech32, InvalidHex);

#[doc(hidden)]
impl From<bech32::Error> for AddressError {
    fn from(e: bech32::Error) -> AddressError {
        AddressError::Bech32(e)
    }
}

#[doc(hidden)]
impl From<DecodeVariableLengthBytesError> for AddressError {
    fn from(e: DecodeVariableLengthBytesError) -> AddressError {
        AddressError::InvalidHex(e)
    }
}

/// The parameters to render addresses.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AddressParams {
    hrp: &'static str,
}

impl AddressParams {
    /// MultiversX address parameters, shared by mainnet, testnet and devnet.
    pub const MULTIVERSX: AddressParams = AddressParams::new("erd");

    /// Parameters with a custom HRP.
    ///
    /// # Panics
    ///
    /// If `hrp` is empty, holds a character outside `!`..=`~` or mixes upper
    /// and lower case. In a `const` this is a compile-time error.
    pub const fn new(hrp: &'static str) -> AddressParams {
        let bytes = hrp.as_bytes();
        assert!(!bytes.is_empty(), "empty HRP");
        let (mut lower, mut upper) = (false, false);
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            assert!(b >= 0x21 && b <= 0x7e, "invalid HRP character");
            lower |= b.is_ascii_lowercase();
            upper |= b.is_ascii_uppercase();
            i += 1;
        }
        assert!(!(lower && upper), "mixed-case HRP");
        AddressParams { hrp }
    }

    /// The bech32 HRP.
    pub const fn hrp(&self) -> &'static str {
        self.hrp
    }
}

/// A MultiversX address.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address {
    /// the network
    pub params: &'static AddressParams,
    bytes: [u8; ADDRESS_LEN],
}

impl Address {
    /// Wraps raw address bytes.
    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN], params: &'static AddressParams) -> Address {
        Address { params, bytes }
    }

    /// Creates an address from a slice that must be exactly 32 bytes long.
    pub fn from_slice(bytes: &[u8], params: &'static AddressParams) -> Result<Address, AddressError> {
        let bytes: [u8; ADDRESS_LEN] =
            bytes.try_into().map_err(|_| AddressError::InvalidLength(bytes.len()))?;
        Ok(Address { params, bytes })
    }

    /// Parses 64 hex characters.
    pub fn from_hex(s: &str, params: &'static AddressParams) -> Result<Address, AddressError> {
        let bytes = Vec::<u8>::from_hex(s)?;
        Address::from_slice(&bytes, params)
    }

    /// The raw address bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.bytes
    }

    /// Lowercase hex form of the raw bytes.
    pub fn to_hex(&self) -> String {
        self.bytes[..].to_hex()
    }

    /// Whether this is a smart contract address. Contract addresses start
    /// with eight zero bytes.
    pub fn is_smart_contract(&self) -> bool {
        self.bytes[..CONTRACT_PREFIX_LEN].iter().all(|&b| b == 0)
    }

    /// Parse the address using the given parameters.
    /// When using the built-in parameters, you can use [FromStr].
    pub fn parse_with_params(
        s: &str,
        params: &'static AddressParams,
    ) -> Result<Address, AddressError> {
        let bytes = bech32::decode(params.hrp(), s)?;
        Address::from_slice(&bytes, params)
    }
}

/// Splits a hex blob of concatenated 32-byte addresses, in order.
///
/// This is how the contract returns its wallet list. An empty blob holds no
/// addresses.
pub fn parse_address_blob(
    blob: &str,
    params: &'static AddressParams,
) -> Result<Vec<Address>, AddressError> {
    if blob.len() % ADDRESS_HEX_LEN != 0 {
        return Err(AddressError::InvalidBlobLength(blob.len()));
    }

    let bytes = Vec::<u8>::from_hex(blob)?;
    bytes.chunks_exact(ADDRESS_LEN).map(|chunk| Address::from_slice(chunk, params)).collect()
}

impl fmt::Display for Address {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let data = bech32::convert_bits(&self.bytes, 8, 5, true).map_err(|_| fmt::Error)?;
        bech32::encode_to_fmt(fmt, self.params.hrp(), &data)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, fmt)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        hex::format_hex(&self.bytes, f)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Address, AddressError> {
        Address::parse_with_params(s, &AddressParams::MULTIVERSX)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Address {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use std::fmt::Formatter;

        struct Visitor;
        impl serde::de::Visitor<'_> for Visitor {
            type Value = Address;

            fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
                formatter.write_str("a bech32 MultiversX address")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Address::from_str(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(Visitor)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

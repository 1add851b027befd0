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

//! # Configuration
//!
//! Everything that identifies the deployment: which contract, which gateway,
//! how much gas to attach and which `mxpy` binary to run. A [`Config`] is
//! built once and handed to the ledger client.
//!
//! With the `serde` feature a TOML [`ConfigFile`] can override any field of
//! the devnet defaults:
//!
//! ```toml
//! contract = "erd1qqqqqqqqqqqqqpgq9xrcm5t9axzsdgak3xz3ljqd3gc62xvcafls8uljtt"
//! proxy = "https://devnet-gateway.multiversx.com"
//! gas_limit = 10000000
//! ```

use std::fmt;
use std::path::PathBuf;

use crate::address::{Address, AddressParams};
use crate::error::{impl_std_error, write_err};

/// The TrailControl contract deployed on devnet.
pub const DEVNET_CONTRACT: Address = Address::from_bytes(
    [
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x05, 0x00, 0x29, 0x87, 0x8d, 0xd1, 0x65,
        0xe9, 0x85, 0x06, 0xa3, 0xb6, 0x89, 0x85, 0x1f, 0xc8, 0x0d, 0x8a, 0x31, 0xa5, 0x19, 0x98,
        0xea, 0x7f,
    ],
    &AddressParams::MULTIVERSX,
);

/// The devnet API gateway.
pub const DEVNET_PROXY: &str = "https://devnet-gateway.multiversx.com";

/// The devnet block explorer.
pub const DEVNET_EXPLORER: &str = "https://devnet-explorer.multiversx.com";

/// Gas attached to `markCheckpoint` calls.
pub const DEFAULT_GAS_LIMIT: u64 = 10_000_000;

/// Name of the MultiversX CLI executable.
pub const DEFAULT_MXPY: &str = "mxpy";

/// A configuration error.
#[derive(Debug)]
pub enum Error {
    /// A field holds an unusable value.
    InvalidValue {
        /// Field name
        field: &'static str,
        /// What is wrong with it
        reason: &'static str,
    },
    /// The configuration file could not be read.
    Io(std::io::Error),
    /// The configuration file is not valid TOML for [`ConfigFile`].
    #[cfg(feature = "serde")]
    Toml(toml::de::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidValue { field, reason } => write!(f, "invalid {}: {}", field, reason),
            Error::Io(ref e) => write_err!(f, "reading configuration file"; e),
            #[cfg(feature = "serde")]
            Error::Toml(ref e) => write_err!(f, "parsing configuration file"; e),
        }
    }
}

#[cfg(not(feature = "serde"))]
impl_std_error!(Error, Io);
#[cfg(feature = "serde")]
impl_std_error!(Error, Io, Toml);

/// Deployment settings for the ledger client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The TrailControl contract.
    pub contract: Address,
    /// Gateway URL passed to `mxpy --proxy`.
    pub proxy: String,
    /// Explorer base URL, used to link transactions.
    pub explorer: String,
    /// Gas limit for `markCheckpoint`.
    pub gas_limit: u64,
    /// The `mxpy` executable, looked up in `PATH` when relative.
    pub mxpy: PathBuf,
}

impl Config {
    /// The devnet deployment.
    pub fn devnet() -> Config {
        Config {
            contract: DEVNET_CONTRACT,
            proxy: DEVNET_PROXY.to_owned(),
            explorer: DEVNET_EXPLORER.to_owned(),
            gas_limit: DEFAULT_GAS_LIMIT,
            mxpy: PathBuf::from(DEFAULT_MXPY),
        }
    }

    /// Checks the settings that would otherwise only fail inside `mxpy`.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.contract.is_smart_contract() {
            return Err(Error::InvalidValue {
                field: "contract",
                reason: "not a smart contract address",
            });
        }
        for (field, url) in [("proxy", &self.proxy), ("explorer", &self.explorer)] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(Error::InvalidValue { field, reason: "expected an http(s) URL" });
            }
        }
        if self.gas_limit == 0 {
            return Err(Error::InvalidValue { field: "gas_limit", reason: "must be positive" });
        }
        if self.mxpy.as_os_str().is_empty() {
            return Err(Error::InvalidValue { field: "mxpy", reason: "empty path" });
        }
        Ok(())
    }

    /// The explorer page of transaction `hash`.
    pub fn explorer_tx_url(&self, hash: &str) -> String {
        format!("{}/transactions/{}", self.explorer.trim_end_matches('/'), hash)
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::devnet()
    }
}

/// Optional overrides, as read from a TOML file.
#[cfg(feature = "serde")]
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(crate = "actual_serde", deny_unknown_fields)]
pub struct ConfigFile {
    /// See [`Config::contract`].
    pub contract: Option<Address>,
    /// See [`Config::proxy`].
    pub proxy: Option<String>,
    /// See [`Config::explorer`].
    pub explorer: Option<String>,
    /// See [`Config::gas_limit`].
    pub gas_limit: Option<u64>,
    /// See [`Config::mxpy`].
    pub mxpy: Option<PathBuf>,
}

#[cfg(feature = "serde")]
impl ConfigFile {
    /// Parses TOML text.
    pub fn from_toml_str(s: &str) -> Result<ConfigFile, Error> {
        toml::from_str(s).map_err(Error::Toml)
    }

    /// Reads and parses the file at `path`.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<ConfigFile, Error> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        ConfigFile::from_toml_str(&contents)
    }

    /// Overlays the fields that are set onto `base`.
    pub fn apply(self, base: Config) -> Config {
        Config {
            contract: self.contract.unwrap_or(base.contract),
            proxy: self.proxy.unwrap_or(base.proxy),
            explorer: self.explorer.unwrap_or(base.explorer),
            gas_limit: self.gas_limit.unwrap_or(base.gas_limit),
            mxpy: self.mxpy.unwrap_or(base.mxpy),
        }
    }
}

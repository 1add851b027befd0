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

//! # TrailControl Client Library
//!
//! Marks and queries TrailControl checkpoints on MultiversX. Includes a
//! bech32 codec for rendering the 32-byte account addresses the contract
//! returns, and a ledger client that drives the `mxpy` command line tool.
//!
//! ```
//! use trailcontrol::{Address, Config};
//!
//! let config = Config::devnet();
//! let wallet: Address = "erd1d8sf28qdes9rjj2rkpvndydanc9n24xsnldnls9gqpy6km3xaflszh8a6c"
//!     .parse()
//!     .unwrap();
//! assert!(config.contract.is_smart_contract());
//! assert!(!wallet.is_smart_contract());
//! ```
//!

// Coding conventions
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![deny(missing_docs)]

/// Re-export of serde crate
#[cfg(feature = "serde")]
pub extern crate actual_serde as serde;

pub mod address;
pub mod bech32;
pub mod checkpoint;
pub mod config;
pub mod error;
pub mod hex;
pub mod ledger;
pub mod pem;

// export everything at the top level so it can be used as `trailcontrol::Address` etc.
pub use crate::address::{parse_address_blob, Address, AddressError, AddressParams};
pub use crate::checkpoint::Checkpoint;
pub use crate::config::Config;
#[cfg(feature = "serde")]
pub use crate::config::ConfigFile;
pub use crate::ledger::{CommandRunner, Ledger, LedgerError, MarkReceipt, Mxpy, SystemRunner};

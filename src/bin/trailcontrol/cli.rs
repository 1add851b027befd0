use std::path::PathBuf;

use clap::{Parser, Subcommand};
use trailcontrol::Address;

/// Mark and query TrailControl checkpoints on MultiversX.
///
/// Transactions and queries are sent with `mxpy`, which must be installed.
/// Settings default to the devnet deployment and can be overridden by a TOML
/// file and then by the flags below.
#[derive(Debug, Parser)]
#[command(name = "trailcontrol", version)]
pub(crate) struct Cli {
    /// TOML file overriding the devnet defaults
    #[arg(long, global = true, env = "TRAILCONTROL_CONFIG", value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Gateway URL passed to mxpy
    #[arg(long, global = true, value_name = "URL")]
    pub(crate) proxy: Option<String>,

    /// TrailControl contract address
    #[arg(long, global = true, value_name = "ADDRESS")]
    pub(crate) contract: Option<Address>,

    /// Gas limit for markCheckpoint
    #[arg(long, global = true, value_name = "GAS")]
    pub(crate) gas_limit: Option<u64>,

    /// mxpy executable
    #[arg(long, global = true, env = "MXPY", value_name = "PATH")]
    pub(crate) mxpy: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Mark a checkpoint with the wallet in a PEM file
    Mark {
        /// Wallet PEM file
        pem: PathBuf,
        /// Checkpoint identifier
        checkpoint_id: u32,
    },
    /// Show the checkpoints of a wallet
    Query {
        /// Wallet address (erd1...)
        address: Address,
    },
    /// Show the checkpoints of the wallet in a PEM file
    QueryPem {
        /// Wallet PEM file
        pem: PathBuf,
    },
    /// Show every wallet with checkpoints
    List,
    /// Render hex bytes as a bech32 string
    Encode {
        /// Hex encoded bytes
        hex: String,
        /// Human-readable prefix
        #[arg(long, default_value = "erd")]
        hrp: String,
    },
    /// Decode a bech32 string to hex bytes
    Decode {
        /// Bech32 string
        bech32: String,
        /// Expected human-readable prefix
        #[arg(long, default_value = "erd")]
        hrp: String,
    },
}

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

//! # Ledger client
//!
//! The TrailControl contract is reached through the `mxpy` command line
//! tool, which signs and sends transactions and runs read-only queries. The
//! [`Ledger`] trait is what the rest of the crate talks to; [`Mxpy`]
//! implements it by spawning `mxpy` through a [`CommandRunner`].
//!

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output};

use serde_json::Value;

use crate::address::{parse_address_blob, Address, AddressError};
use crate::checkpoint::{self, parse_checkpoint_pairs, Checkpoint};
use crate::config::Config;
use crate::error::write_err;
use crate::pem;

/// Contract endpoint that records a checkpoint for the caller.
pub const MARK_CHECKPOINT: &str = "markCheckpoint";
/// Contract view listing the checkpoints of a wallet.
pub const GET_CHECKPOINTS_FOR: &str = "getCheckpointsFor";
/// Contract view listing every wallet with at least one checkpoint.
pub const GET_ALL_WALLETS: &str = "getAllWallets";

/// Field of the `mxpy contract call` output holding the transaction hash.
const TX_HASH_FIELD: &str = "emittedTransactionHash";

/// An error talking to the ledger.
#[derive(Debug)]
pub enum LedgerError {
    /// The wallet PEM file does not exist.
    MissingPem(PathBuf),
    /// The wallet address could not be read from the PEM file.
    Pem(pem::Error),
    /// `mxpy` could not be started.
    Spawn {
        /// The program that was run
        program: PathBuf,
        /// The underlying error
        error: io::Error,
    },
    /// `mxpy` exited unsuccessfully.
    CommandFailed {
        /// Exit status
        status: ExitStatus,
        /// Captured standard error
        stderr: String,
    },
    /// The query output is not JSON.
    Json(serde_json::Error),
    /// The query output is JSON of an unexpected shape.
    InvalidResponse(String),
    /// A returned value is not a valid checkpoint list.
    Checkpoint(checkpoint::Error),
    /// A returned value is not a valid address list.
    Address(AddressError),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            LedgerError::MissingPem(ref path) => {
                write!(f, "PEM file not found: {}", path.display())
            }
            LedgerError::Pem(ref e) => write_err!(f, "reading wallet PEM"; e),
            LedgerError::Spawn { ref program, ref error } => {
                write_err!(f, "failed to run {}", program.display(); error)
            }
            LedgerError::CommandFailed { status, ref stderr } => {
                write!(f, "mxpy failed ({}): {}", status, stderr.trim())
            }
            LedgerError::Json(ref e) => write_err!(f, "mxpy output is not JSON"; e),
            LedgerError::InvalidResponse(ref s) => write!(f, "unexpected mxpy response: {}", s),
            LedgerError::Checkpoint(ref e) => write_err!(f, "invalid checkpoint list"; e),
            LedgerError::Address(ref e) => write_err!(f, "invalid wallet list"; e),
        }
    }
}

impl std::error::Error for LedgerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            LedgerError::Pem(ref e) => Some(e),
            LedgerError::Spawn { ref error, .. } => Some(error),
            LedgerError::Json(ref e) => Some(e),
            LedgerError::Checkpoint(ref e) => Some(e),
            LedgerError::Address(ref e) => Some(e),
            _ => None,
        }
    }
}

#[doc(hidden)]
impl From<pem::Error> for LedgerError {
    fn from(e: pem::Error) -> LedgerError {
        LedgerError::Pem(e)
    }
}

#[doc(hidden)]
impl From<serde_json::Error> for LedgerError {
    fn from(e: serde_json::Error) -> LedgerError {
        LedgerError::Json(e)
    }
}

#[doc(hidden)]
impl From<checkpoint::Error> for LedgerError {
    fn from(e: checkpoint::Error) -> LedgerError {
        LedgerError::Checkpoint(e)
    }
}

#[doc(hidden)]
impl From<AddressError> for LedgerError {
    fn from(e: AddressError) -> LedgerError {
        LedgerError::Address(e)
    }
}

/// The outcome of a `markCheckpoint` transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkReceipt {
    /// The wallet that signed the transaction.
    pub wallet: Address,
    /// Transaction hash, when `mxpy` reported one.
    pub tx_hash: Option<String>,
    /// Explorer link for `tx_hash`.
    pub tx_url: Option<String>,
}

/// Operations on the TrailControl contract.
pub trait Ledger {
    /// Signs with the wallet in `pem` and records checkpoint `id`.
    fn mark_checkpoint(&self, pem: &Path, id: u32) -> Result<MarkReceipt, LedgerError>;

    /// The checkpoints of `address`, in the order the contract stored them.
    fn checkpoints_for(&self, address: &Address) -> Result<Vec<Checkpoint>, LedgerError>;

    /// Every wallet with at least one checkpoint.
    fn all_wallets(&self) -> Result<Vec<Address>, LedgerError>;
}

/// Runs an external program to completion.
pub trait CommandRunner {
    /// Runs `program` with `args`, capturing its output.
    fn run(&self, program: &Path, args: &[String]) -> io::Result<Output>;
}

/// Runs commands with [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[String]) -> io::Result<Output> {
        Command::new(program).args(args).output()
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &Path, args: &[String]) -> io::Result<Output> {
        (**self).run(program, args)
    }
}

/// Ledger client that shells out to `mxpy`.
#[derive(Debug)]
pub struct Mxpy<R = SystemRunner> {
    config: Config,
    runner: R,
}

impl Mxpy<SystemRunner> {
    /// Creates a client running the real `mxpy`.
    pub fn new(config: Config) -> Self {
        Mxpy::with_runner(config, SystemRunner)
    }
}

impl<R: CommandRunner> Mxpy<R> {
    /// Creates a client that runs commands through `runner`.
    pub fn with_runner(config: Config, runner: R) -> Self {
        Mxpy { config, runner }
    }

    /// The deployment this client talks to.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Arguments of `mxpy contract call` for checkpoint `id`.
    pub fn call_args(&self, pem: &Path, id: u32) -> Vec<String> {
        vec![
            "contract".into(),
            "call".into(),
            self.config.contract.to_string(),
            format!("--pem={}", pem.display()),
            format!("--function={}", MARK_CHECKPOINT),
            format!("--arguments={}", id),
            "--send".into(),
            format!("--proxy={}", self.config.proxy),
            format!("--gas-limit={}", self.config.gas_limit),
        ]
    }

    /// Arguments of `mxpy contract query` for view `function`.
    pub fn query_args(&self, function: &str, argument: Option<&str>) -> Vec<String> {
        let mut args = vec![
            "contract".into(),
            "query".into(),
            self.config.contract.to_string(),
            format!("--function={}", function),
        ];
        if let Some(argument) = argument {
            args.push(format!("--arguments={}", argument));
        }
        args.push(format!("--proxy={}", self.config.proxy));
        args
    }

    /// Runs `mxpy` and returns its standard output.
    fn execute(&self, args: &[String]) -> Result<String, LedgerError> {
        let program = &self.config.mxpy;
        tracing::debug!(program = %program.display(), ?args, "running mxpy");

        let output = self
            .runner
            .run(program, args)
            .map_err(|error| LedgerError::Spawn { program: program.clone(), error })?;
        if !output.status.success() {
            return Err(LedgerError::CommandFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Runs a view and returns its values as hex strings.
    fn query(&self, function: &str, argument: Option<&str>) -> Result<Vec<String>, LedgerError> {
        let stdout = self.execute(&self.query_args(function, argument))?;
        let values = parse_query_values(&stdout)?;
        tracing::debug!(function, count = values.len(), "query returned");
        Ok(values)
    }

    /// Finds the transaction hash in `mxpy contract call` output.
    fn tx_hash(&self, stdout: &str) -> Option<String> {
        if let Some(hash) = tx_hash_from_json(stdout) {
            return Some(hash);
        }

        let explorer = self.config.explorer.trim_end_matches('/');
        let host = explorer.split_once("://").map_or(explorer, |(_, host)| host);
        let marker = format!("{}/transactions/", host);
        stdout
            .lines()
            .filter(|line| line.contains(&marker))
            .filter_map(|line| line.trim().rsplit('/').next())
            .map(|hash| hash.trim_matches(|c: char| !c.is_ascii_alphanumeric()))
            .find(|hash| !hash.is_empty())
            .map(str::to_owned)
    }
}

impl<R: CommandRunner> Ledger for Mxpy<R> {
    fn mark_checkpoint(&self, pem: &Path, id: u32) -> Result<MarkReceipt, LedgerError> {
        if !pem.exists() {
            return Err(LedgerError::MissingPem(pem.to_owned()));
        }
        let wallet = pem::address_from_pem(pem, self.config.contract.params)?;
        tracing::info!(%wallet, id, "marking checkpoint");

        let stdout = self.execute(&self.call_args(pem, id))?;
        let tx_hash = self.tx_hash(&stdout);
        if tx_hash.is_none() {
            tracing::warn!(%wallet, id, "transaction sent but mxpy reported no hash");
        }
        let tx_url = tx_hash.as_deref().map(|hash| self.config.explorer_tx_url(hash));
        Ok(MarkReceipt { wallet, tx_hash, tx_url })
    }

    fn checkpoints_for(&self, address: &Address) -> Result<Vec<Checkpoint>, LedgerError> {
        let argument = format!("addr:{}", address);
        let values = self.query(GET_CHECKPOINTS_FOR, Some(&argument))?;
        Ok(parse_checkpoint_pairs(&values)?)
    }

    fn all_wallets(&self) -> Result<Vec<Address>, LedgerError> {
        let params = self.config.contract.params;
        let mut wallets = vec![];
        for blob in self.query(GET_ALL_WALLETS, None)? {
            wallets.extend(parse_address_blob(&blob, params)?);
        }
        Ok(wallets)
    }
}

/// Parses the JSON printed by `mxpy contract query`.
///
/// Older `mxpy` releases print an array of hex strings; newer ones print an
/// array of objects carrying `hex`, `base64` and `number` renderings.
pub fn parse_query_values(stdout: &str) -> Result<Vec<String>, LedgerError> {
    let value: Value = serde_json::from_str(stdout.trim())?;
    let items = match value {
        Value::Array(items) => items,
        Value::Null => return Ok(vec![]),
        other => {
            return Err(LedgerError::InvalidResponse(format!("expected an array, got {}", other)))
        }
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Ok(s),
            Value::Object(mut map) => match map.remove("hex") {
                Some(Value::String(s)) => Ok(s),
                _ => Err(LedgerError::InvalidResponse(format!(
                    "value without a hex field: {}",
                    Value::Object(map)
                ))),
            },
            other => Err(LedgerError::InvalidResponse(format!("unexpected value {}", other))),
        })
        .collect()
}

/// Reads the transaction hash from the JSON object printed after a call.
///
/// `mxpy` may log plain lines before the JSON, so parsing starts at the first
/// line that opens an object.
fn tx_hash_from_json(stdout: &str) -> Option<String> {
    let start = if stdout.trim_start().starts_with('{') {
        0
    } else {
        stdout.find("\n{")? + 1
    };
    let mut stream = serde_json::Deserializer::from_str(&stdout[start..]).into_iter::<Value>();
    match stream.next()?.ok()?.get(TX_HASH_FIELD)? {
        Value::String(hash) if !hash.is_empty() => Some(hash.clone()),
        _ => None,
    }
}

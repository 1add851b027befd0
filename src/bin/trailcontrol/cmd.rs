//! Command execution.

use std::io::Write;

use anyhow::{bail, Context, Result};
use trailcontrol::hex::{FromHex, ToHex};
use trailcontrol::{bech32, pem, AddressParams, Config, ConfigFile, Ledger, Mxpy};

use crate::cli::{Cli, Command};
use crate::output;

/// Runs the parsed command line, writing results to `out`.
pub(crate) fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    match cli.command {
        Command::Encode { .. } | Command::Decode { .. } => convert(&cli.command, out),
        _ => {
            let config = load_config(cli)?;
            execute(&Mxpy::new(config), &cli.command, out)
        }
    }
}

/// Builds the configuration: devnet defaults, then the config file, then
/// flags.
pub(crate) fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::devnet();
    if let Some(ref path) = cli.config {
        config = ConfigFile::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?
            .apply(config);
    }
    if let Some(ref proxy) = cli.proxy {
        config.proxy = proxy.clone();
    }
    if let Some(contract) = cli.contract {
        config.contract = contract;
    }
    if let Some(gas_limit) = cli.gas_limit {
        config.gas_limit = gas_limit;
    }
    if let Some(ref mxpy) = cli.mxpy {
        config.mxpy = mxpy.clone();
    }

    config.validate().context("invalid configuration")?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

/// Runs `command` against `ledger`.
pub(crate) fn execute<L: Ledger, W: Write>(ledger: &L, command: &Command, out: &mut W) -> Result<()> {
    match *command {
        Command::Mark { ref pem, checkpoint_id } => {
            writeln!(out, "Marking checkpoint {} with {}", checkpoint_id, pem.display())?;
            let receipt = ledger
                .mark_checkpoint(pem, checkpoint_id)
                .with_context(|| format!("marking checkpoint {}", checkpoint_id))?;
            writeln!(out, "   Wallet: {}", receipt.wallet)?;
            output::receipt(out, &receipt)?;
        }
        Command::Query { ref address } => {
            let checkpoints = ledger
                .checkpoints_for(address)
                .with_context(|| format!("querying checkpoints of {}", address))?;
            output::checkpoint_table(out, address, &checkpoints)?;
        }
        Command::QueryPem { ref pem } => {
            if !pem.exists() {
                bail!("PEM file not found: {}", pem.display());
            }
            let address = pem::address_from_pem(pem, &AddressParams::MULTIVERSX)
                .with_context(|| format!("reading {}", pem.display()))?;
            let checkpoints = ledger
                .checkpoints_for(&address)
                .with_context(|| format!("querying checkpoints of {}", address))?;
            output::checkpoint_table(out, &address, &checkpoints)?;
        }
        Command::List => {
            let wallets = ledger.all_wallets().context("listing wallets")?;
            if wallets.is_empty() {
                writeln!(out, "No wallets with checkpoints")?;
                return Ok(());
            }
            output::wallets_header(out, wallets.len())?;
            for (i, wallet) in wallets.iter().enumerate() {
                let checkpoints = ledger
                    .checkpoints_for(wallet)
                    .with_context(|| format!("querying checkpoints of {}", wallet))?;
                output::wallet_summary(out, i + 1, wallet, &checkpoints)?;
            }
        }
        Command::Encode { .. } | Command::Decode { .. } => convert(command, out)?,
    }
    Ok(())
}

/// Converts between hex and bech32. Needs no ledger.
fn convert<W: Write>(command: &Command, out: &mut W) -> Result<()> {
    match *command {
        Command::Encode { ref hex, ref hrp } => {
            let bytes = Vec::<u8>::from_hex(hex).with_context(|| format!("invalid hex {:?}", hex))?;
            let encoded = bech32::bytes_to_bech32(hrp, &bytes)
                .with_context(|| format!("encoding with prefix {:?}", hrp))?;
            writeln!(out, "{}", encoded)?;
        }
        Command::Decode { bech32: ref input, ref hrp } => {
            let bytes =
                bech32::decode(hrp, input).with_context(|| format!("decoding {:?}", input))?;
            writeln!(out, "{}", bytes.to_hex())?;
        }
        _ => bail!("not a conversion command"),
    }
    Ok(())
}

//! Human readable rendering of ledger results.

use std::io::{self, Write};

use trailcontrol::{Address, Checkpoint, MarkReceipt};

const RULE_WIDTH: usize = 80;

/// Prints the outcome of a `mark` command.
pub(crate) fn receipt<W: Write>(out: &mut W, receipt: &MarkReceipt) -> io::Result<()> {
    match receipt.tx_url {
        Some(ref url) => {
            writeln!(out, "Checkpoint marked.")?;
            writeln!(out, "   TX: {}", url)
        }
        None => writeln!(out, "Checkpoint marked (transaction hash not reported)."),
    }
}

/// Prints the checkpoints of one wallet as a table.
pub(crate) fn checkpoint_table<W: Write>(
    out: &mut W,
    address: &Address,
    checkpoints: &[Checkpoint],
) -> io::Result<()> {
    writeln!(out, "Checkpoints for {}", address)?;
    if checkpoints.is_empty() {
        return writeln!(out, "   No checkpoints marked for this wallet");
    }

    writeln!(out)?;
    writeln!(out, "   {:<6} {:<15} {}", "ID", "Timestamp", "Date")?;
    writeln!(out, "   {} {} {}", "-".repeat(6), "-".repeat(15), "-".repeat(30))?;
    for cp in checkpoints {
        writeln!(out, "   {:<6} {:<15} {}", cp.id, cp.timestamp, cp.format_timestamp())?;
    }
    Ok(())
}

/// Prints the banner of the wallet summary.
pub(crate) fn wallets_header<W: Write>(out: &mut W, count: usize) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "{}", rule)?;
    writeln!(out, "ALL WALLETS")?;
    writeln!(out, "{}", rule)?;
    writeln!(out)?;
    writeln!(out, "Total wallets: {}", count)?;
    writeln!(out)
}

/// Prints one numbered wallet of the summary with its checkpoints.
pub(crate) fn wallet_summary<W: Write>(
    out: &mut W,
    index: usize,
    address: &Address,
    checkpoints: &[Checkpoint],
) -> io::Result<()> {
    writeln!(out, "Wallet {}: {}", index, address)?;
    if checkpoints.is_empty() {
        writeln!(out, "  No checkpoints")?;
    } else {
        writeln!(out, "  Checkpoints:")?;
        for cp in checkpoints {
            writeln!(out, "    - ID {:2} - {}", cp.id, cp.format_timestamp())?;
        }
    }
    writeln!(out)
}

#[cfg(all(test, feature = "integration"))]
mod checkpoints;

use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use trailcontrol::{Address, Checkpoint, Config, Ledger, MarkReceipt, Mxpy};

/// Wallet used to sign test transactions.
pub const PEM_ENV: &str = "TRAILCONTROL_TEST_PEM";
/// Optional gateway override.
pub const PROXY_ENV: &str = "TRAILCONTROL_TEST_PROXY";

/// How long to wait for a sent transaction to show up in queries.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(90);
const POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Ledger calls that panic on failure, for use in tests.
pub trait Call {
    fn mark(&self, pem: &Path, id: u32) -> MarkReceipt;
    fn checkpoints(&self, address: &Address) -> Vec<Checkpoint>;
    fn wallets(&self) -> Vec<Address>;
    /// Polls until `address` holds more than `count` checkpoints.
    fn wait_for_checkpoints(&self, address: &Address, count: usize) -> Vec<Checkpoint>;
}

impl<L: Ledger> Call for L {
    fn mark(&self, pem: &Path, id: u32) -> MarkReceipt {
        match self.mark_checkpoint(pem, id) {
            Ok(r) => r,
            Err(e) => panic!("error {} while marking checkpoint {} with {}", e, id, pem.display()),
        }
    }

    fn checkpoints(&self, address: &Address) -> Vec<Checkpoint> {
        match self.checkpoints_for(address) {
            Ok(v) => v,
            Err(e) => panic!("error {} while querying checkpoints of {}", e, address),
        }
    }

    fn wallets(&self) -> Vec<Address> {
        match self.all_wallets() {
            Ok(v) => v,
            Err(e) => panic!("error {} while listing wallets", e),
        }
    }

    fn wait_for_checkpoints(&self, address: &Address, count: usize) -> Vec<Checkpoint> {
        let start = Instant::now();
        loop {
            let checkpoints = self.checkpoints(address);
            if checkpoints.len() > count {
                return checkpoints;
            }
            if start.elapsed() > SETTLE_TIMEOUT {
                panic!("{} still has {} checkpoints after {:?}", address, count, SETTLE_TIMEOUT);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

/// Builds a devnet client and returns it with the test wallet PEM.
pub fn setup() -> (Mxpy, PathBuf) {
    let pem = std::env::var_os(PEM_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| panic!("{} must point to a funded devnet wallet", PEM_ENV));
    assert!(pem.exists(), "{} does not exist", pem.display());

    let mut config = Config::devnet();
    if let Ok(proxy) = std::env::var(PROXY_ENV) {
        config.proxy = proxy;
    }
    config.validate().unwrap();
    (Mxpy::new(config), pem)
}

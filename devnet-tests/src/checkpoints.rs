use rand::Rng;
use trailcontrol::pem::address_from_pem;
use trailcontrol::AddressParams;

use crate::{setup, Call};

#[test]
fn list_wallets() {
    let (mxpy, _) = setup();
    let wallets = mxpy.wallets();
    for wallet in &wallets {
        assert!(!wallet.is_smart_contract(), "{} is a contract", wallet);
        let checkpoints = mxpy.checkpoints(wallet);
        assert!(!checkpoints.is_empty(), "{} is listed without checkpoints", wallet);
    }
}

#[test]
fn mark_and_query() {
    let (mxpy, pem) = setup();
    let wallet = address_from_pem(&pem, &AddressParams::MULTIVERSX).unwrap();
    let before = mxpy.checkpoints(&wallet);

    let id = rand::thread_rng().gen_range(1_000..1_000_000);
    let receipt = mxpy.mark(&pem, id);
    assert_eq!(receipt.wallet, wallet);
    if let Some(url) = receipt.tx_url {
        assert!(url.starts_with(&mxpy.config().explorer), "unexpected explorer link {}", url);
    }

    let after = mxpy.wait_for_checkpoints(&wallet, before.len());
    assert_eq!(&after[..before.len()], &before[..]);
    let new = after.last().unwrap();
    assert_eq!(new.id, id);
    assert!(before.last().map_or(true, |last| last.timestamp <= new.timestamp));
    assert!(new.datetime().is_some());

    assert!(mxpy.wallets().contains(&wallet));
}

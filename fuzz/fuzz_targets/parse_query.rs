use trailcontrol::checkpoint::parse_checkpoint_pairs;
use trailcontrol::ledger::parse_query_values;
use trailcontrol::{parse_address_blob, AddressParams};

fn do_test(data: &[u8]) {
    let s = String::from_utf8_lossy(data);
    if let Ok(values) = parse_query_values(&s) {
        if let Ok(checkpoints) = parse_checkpoint_pairs(&values) {
            assert_eq!(checkpoints.len() * 2, values.len());
            for cp in checkpoints {
                let _ = cp.format_timestamp();
            }
        }
        for value in &values {
            if let Ok(addrs) = parse_address_blob(value, &AddressParams::MULTIVERSX) {
                assert_eq!(addrs.len() * 64, value.len());
            }
        }
    }
}

#[cfg(not(any(feature = "afl", feature = "honggfuzz")))]
fn main() {}

#[cfg(feature = "afl")]
fn main() {
    afl::read_stdio_bytes(|data| {
        do_test(&data);
    });
}

#[cfg(feature = "honggfuzz")]
#[macro_use]
extern crate honggfuzz;
#[cfg(feature = "honggfuzz")]
fn main() {
    loop {
        fuzz!(|data| {
            do_test(data);
        });
    }
}

use trailcontrol::bech32;
use trailcontrol::Address;

fn do_test(data: &[u8]) {
    let s = match std::str::from_utf8(data) {
        Ok(s) => s,
        Err(_) => return,
    };

    if let Ok((hrp, values)) = bech32::decode_to_base32(s) {
        let reencoded = bech32::encode(&hrp, &values).unwrap();
        assert_eq!(reencoded, s.to_lowercase());
    }

    if let Ok(addr) = s.parse::<Address>() {
        assert_eq!(addr.to_string(), s.to_lowercase());
        assert_eq!(Address::from_hex(&addr.to_hex(), addr.params).unwrap(), addr);
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

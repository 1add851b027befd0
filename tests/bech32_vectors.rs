//! Checks the codec against the BIP-173 test vectors and against the
//! `bech32` crate.

use rand::Rng;
use trailcontrol::bech32 as codec;
use trailcontrol::{parse_address_blob, Address, AddressParams};

#[test]
fn bip173_valid() {
    let valid = [
        "A12UEL5L",
        "a12uel5l",
        "an83characterlonghumanreadablepartthatcontainsthenumber1andtheexcludedcharactersbio1tt5tgs",
        "abcdef1qpzry9x8gf2tvdw0s3jn54khce6mua7lmqqqxw",
        "11qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqc8247j",
        "split1checkupstagehandshakeupstreamerranterredcaperred2y9e3w",
        "?1ezyfcl",
    ];

    for s in valid {
        let (hrp, data) = codec::decode_to_base32(s).unwrap_or_else(|e| panic!("{}: {}", s, e));
        // Re-encoding reproduces the lowercase form.
        assert_eq!(codec::encode(&hrp, &data).unwrap(), s.to_lowercase(), "vector: {}", s);

        let mut expanded = codec::hrp_expand(hrp.as_bytes());
        expanded.extend_from_slice(&data);
        expanded.extend_from_slice(&codec::create_checksum(hrp.as_bytes(), &data));
        assert_eq!(codec::polymod(&expanded), 1, "vector: {}", s);
    }
}

#[test]
fn bip173_invalid() {
    let invalid = [
        ("\u{20}1nwldj5", codec::Error::InvalidChar(' ')),
        ("\u{7f}1axkwrx", codec::Error::InvalidChar('\u{7f}')),
        ("\u{80}1eym55h", codec::Error::InvalidChar('\u{80}')),
        ("pzry9x0s0muk", codec::Error::MissingSeparator),
        ("1pzry9x0s0muk", codec::Error::EmptyHrp),
        ("x1b4n0q5v", codec::Error::InvalidChar('b')),
        ("li1dgmt3", codec::Error::InvalidLength(5)),
        ("de1lg7wt\u{ff}", codec::Error::InvalidChar('\u{ff}')),
        ("A1G7SGD8", codec::Error::InvalidChecksum),
        ("10a06t8", codec::Error::EmptyHrp),
        ("1qzzfhee", codec::Error::EmptyHrp),
        ("a12UEL5L", codec::Error::MixedCase),
    ];

    for (s, expected) in invalid {
        let err = codec::decode_to_base32(s).unwrap_err();
        assert_eq!(err, expected, "vector: {:?}", s);
        assert!(err.is_format_error());
    }
}

#[test]
fn agrees_with_bech32_crate() {
    let hrp = bech32::Hrp::parse("erd").unwrap();
    let mut rng = rand::thread_rng();

    for _ in 0..200 {
        let len = rng.gen_range(0..=40);
        let bytes: Vec<u8> = (0..len).map(|_| rng.gen()).collect();

        let ours = codec::bytes_to_bech32("erd", &bytes).unwrap();
        let theirs = bech32::encode::<bech32::Bech32>(hrp, &bytes).unwrap();
        assert_eq!(ours, theirs);

        let (decoded_hrp, decoded) = bech32::decode(&ours).unwrap();
        assert_eq!(decoded_hrp, hrp);
        assert_eq!(decoded, bytes);
        assert_eq!(codec::decode("erd", &theirs).unwrap(), bytes);
    }
}

#[test]
fn single_character_corruption_is_detected() {
    let address = "erd1qqqqqqqqqqqqqpgq9xrcm5t9axzsdgak3xz3ljqd3gc62xvcafls8uljtt";
    let alphabet = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";

    for i in 4..address.len() {
        for c in alphabet.chars() {
            if address.as_bytes()[i] == c as u8 {
                continue;
            }
            let mut corrupted = address.to_owned();
            corrupted.replace_range(i..i + 1, &c.to_string());
            assert!(
                codec::decode("erd", &corrupted).is_err(),
                "corruption at {} to {} was accepted",
                i,
                c
            );
        }
    }
}

#[test]
fn wallet_list_blob() {
    let mut rng = rand::thread_rng();
    let addresses: Vec<Address> = (0..5)
        .map(|_| Address::from_bytes(rng.gen(), &AddressParams::MULTIVERSX))
        .collect();
    let blob: String = addresses.iter().map(Address::to_hex).collect();

    let parsed = parse_address_blob(&blob, &AddressParams::MULTIVERSX).unwrap();
    assert_eq!(parsed, addresses);
    for (addr, chunk) in parsed.iter().zip(blob.as_bytes().chunks(64)) {
        let bytes = bech32::decode(&addr.to_string()).unwrap().1;
        assert_eq!(trailcontrol::hex::ToHex::to_hex(&bytes[..]), std::str::from_utf8(chunk).unwrap());
    }
}

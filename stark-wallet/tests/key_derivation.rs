//! Tests for STARK key derivation

use num_bigint::BigUint;
use num_traits::Num;
use rand::RngCore;

use stark_wallet::account::{build_account_path, int_from_bits};
use stark_wallet::crypto::grind::stark_order;
use stark_wallet::crypto::keys::*;
use stark_wallet::crypto::{deserialize_signature, fix_message, grind_key, serialize_signature, EthSignature};
use stark_wallet::Error;

const ADDRESS: &str = "0xa4864d977b944315389d1765ffa7e66f74ee8cd7";

#[test]
fn test_grind_key_is_pure_and_in_range() {
    let order = stark_order();
    let mut rng = rand::thread_rng();

    for _ in 0..32 {
        let mut key = [0u8; 32];
        rng.fill_bytes(&mut key);
        let key_hex = format!("0x{}", hex::encode(key));

        let first = grind_key(&key_hex).unwrap();
        assert_eq!(first, grind_key(&key_hex).unwrap());
        assert!(BigUint::from_str_radix(&first, 16).unwrap() < order);
    }
}

#[test]
fn test_signature_round_trip_for_random_scalars() {
    let mut rng = rand::thread_rng();

    for recovery_param in [None, Some(0), Some(1), Some(27), Some(28)] {
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        rng.fill_bytes(&mut r);
        rng.fill_bytes(&mut s);

        let sig = EthSignature::new(BigUint::from_bytes_be(&r), BigUint::from_bytes_be(&s), recovery_param);
        let parsed = deserialize_signature(&serialize_signature(&sig)).unwrap();

        assert_eq!(parsed.r, sig.r);
        assert_eq!(parsed.s, sig.s);
        assert_eq!(parsed.recovery_param, recovery_param.map(|v| if v >= 27 { v - 27 } else { v }));
    }
}

#[test]
fn test_fix_message_lengths() {
    let short = "a".repeat(62);
    assert_eq!(fix_message(&short).unwrap(), short);

    let shifted = "b".repeat(63);
    assert_eq!(fix_message(&shifted).unwrap(), format!("{}0", shifted));

    assert!(matches!(fix_message(&"c".repeat(64)), Err(Error::InvalidMessageLength(64))));
    assert!(matches!(fix_message(&"d".repeat(70)), Err(Error::InvalidMessageLength(70))));
}

#[test]
fn test_account_path_matches_bit_slices() {
    let path = build_account_path("starkex", "immutablex", ADDRESS, "1").unwrap();

    let low = int_from_bits(ADDRESS, -31, None).unwrap();
    let high = int_from_bits(ADDRESS, -62, Some(-31)).unwrap();
    assert_eq!(BigUint::from(path.address_low()), low);
    assert_eq!(BigUint::from(path.address_high()), high);

    let rendered = path.to_string();
    let segments: Vec<&str> = rendered.split('/').collect();
    assert_eq!(segments.first(), Some(&"m"));
    assert_eq!(segments.last(), Some(&"1"));
    assert_eq!(segments.len() - 1, 6);
}

#[test]
fn test_stark_public_key_is_prefixed_x_coordinate() {
    let seed = "0x0a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f60718293a4b5c6d7e8f9";
    let path = build_account_path("starkex", "immutablex", ADDRESS, "1").unwrap();
    let key_pair = derive_key_pair_from_path(seed, &path.to_string()).unwrap();

    let x = x_coordinate_of(&public_key_encoding(&key_pair, true)).unwrap();
    assert_eq!(stark_public_key_of(&key_pair).unwrap(), format!("0x{}", x));
    assert_eq!(x.len() % 2, 0);
}

#[test]
fn test_custom_hd_backend() {
    /// Derives the same key for every path, standing in for an external wallet
    struct FixedNode([u8; 32]);

    impl HdNode for FixedNode {
        fn from_seed(seed: &[u8]) -> stark_wallet::Result<Self> {
            let mut key = [0u8; 32];
            key[32 - seed.len().min(32)..].copy_from_slice(&seed[..seed.len().min(32)]);
            Ok(Self(key))
        }

        fn derive_path(&self, _path: &str) -> stark_wallet::Result<Self> {
            Ok(Self(self.0))
        }

        fn private_key_hex(&self) -> String {
            format!("0x{}", hex::encode(self.0))
        }
    }

    let seed = "86f3e7293141f20a8baff320e8ee4accb9d4a4bf2b4d295e8cee784db46e0519";
    let key_pair = derive_key_pair_with::<FixedNode>(seed, "m/1", 10).unwrap();
    assert_eq!(
        key_pair.private_key_hex(),
        "5c8c8683596c732541a59e03007b2d30dbbbb873556fe65b5fb63c16688f941"
    );
}

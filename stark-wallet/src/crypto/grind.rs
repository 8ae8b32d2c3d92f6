//! STARK key grinding
//!
//! Maps arbitrary key material below the secp256k1 order into the STARK
//! scalar field. Reducing a hash modulo the STARK order directly would favor
//! low values, so candidates at or above the largest multiple of the order
//! are rejected and re-hashed.

use num_bigint::BigUint;
use sha2::{Digest, Sha256};
use starknet_curve::curve_params::EC_ORDER;
use tracing::debug;

use crate::config::DEFAULT_MAX_GRIND_ROUNDS;
use crate::error::{Error, Result};
use super::encoding::decode_hex;

/// Grind a private key (hex) into a STARK private key (hex)
///
/// The result is lowercase hex without prefix or leading zeros and is always
/// strictly below the STARK curve order.
pub fn grind_key(private_key_hex: &str) -> Result<String> {
    grind_key_with_limit(private_key_hex, DEFAULT_MAX_GRIND_ROUNDS)
}

/// [`grind_key`] with an explicit bound on rejection rounds
///
/// The round index hashed alongside the candidate stays at zero for every
/// round and only the candidate is re-hashed. Deployed accounts were derived
/// this way; advancing the index would change their keys.
pub fn grind_key_with_limit(private_key_hex: &str, max_rounds: u32) -> Result<String> {
    let stark_order = stark_order();
    let threshold = grind_threshold(&stark_order);

    let index = 0u32;
    let mut key = hash_key_with_index(&decode_hex(private_key_hex)?, index);

    let mut rounds = 0u32;
    while key >= threshold {
        if rounds >= max_rounds {
            return Err(Error::GrindKeyExhausted { rounds });
        }
        debug!(round = rounds, "grind candidate rejected, re-hashing");
        key = hash_key_with_index(&key.to_bytes_be(), index);
        rounds += 1;
    }

    Ok((key % &stark_order).to_str_radix(16))
}

/// The STARK curve order as an integer
pub fn stark_order() -> BigUint {
    BigUint::from_bytes_be(&EC_ORDER.to_bytes_be())
}

/// The secp256k1 group order as an integer
pub fn secp256k1_order() -> BigUint {
    BigUint::from_bytes_be(&secp256k1::constants::CURVE_ORDER)
}

/// Largest multiple of the STARK order below the secp256k1 order
fn grind_threshold(stark_order: &BigUint) -> BigUint {
    let secp_order = secp256k1_order();
    &secp_order - (&secp_order % stark_order)
}

fn hash_key_with_index(key: &[u8], index: u32) -> BigUint {
    let mut hasher = Sha256::new();
    hasher.update(key);
    hasher.update(encode_index(index));
    BigUint::from_bytes_be(&hasher.finalize())
}

/// Big-endian index padded to whole bytes, zero is a single byte
fn encode_index(index: u32) -> Vec<u8> {
    let bytes = index.to_be_bytes();
    let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len() - 1);
    bytes[first..].to_vec()
}

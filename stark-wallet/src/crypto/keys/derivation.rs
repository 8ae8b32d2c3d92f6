//! Seed-to-STARK-key derivation

use crate::config::DEFAULT_MAX_GRIND_ROUNDS;
use crate::crypto::encoding::decode_hex;
use crate::crypto::grind::grind_key_with_limit;
use crate::error::Result;
use super::hd::{Bip32Node, HdNode};
use super::stark::{StarkKeyPair, STARK_CURVE};

/// Derive a STARK key pair from a hex seed along a BIP-32 path
pub fn derive_key_pair_from_path(seed_hex: &str, path: &str) -> Result<StarkKeyPair> {
    derive_key_pair_with::<Bip32Node>(seed_hex, path, DEFAULT_MAX_GRIND_ROUNDS)
}

/// Derive a STARK key pair using the HD back-end `N`
///
/// The child key at `path` is ground into the STARK scalar field and then
/// turned into a key pair on the STARK curve.
pub fn derive_key_pair_with<N: HdNode>(seed_hex: &str, path: &str, max_grind_rounds: u32) -> Result<StarkKeyPair> {
    let seed = decode_hex(seed_hex)?;
    let child = N::from_seed(&seed)?.derive_path(path)?;
    let stark_private_key = grind_key_with_limit(&child.private_key_hex(), max_grind_rounds)?;
    STARK_CURVE.key_from_private(&stark_private_key)
}

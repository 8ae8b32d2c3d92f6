//! STARK account paths
//!
//! `m/2645'/layer'/application'/address_low'/address_high'/index`, where the
//! layer and application segments are the low 31 bits of their SHA-256
//! digests and the address segments are the low and next 31 bits of the
//! Ethereum address.

use std::fmt;

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::crypto::encoding::decode_hex;
use crate::error::{Error, Result};

/// Purpose segment of every STARK account path (EIP-2645)
pub const STARK_PATH_PURPOSE: u32 = 2645;

/// Width in bits of each hash- or address-derived segment
const SEGMENT_BITS: isize = 31;

/// A STARK account derivation path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    layer: u32,
    application: u32,
    address_low: u32,
    address_high: u32,
    index: String,
}

impl DerivationPath {
    /// Layer segment (hardened)
    pub fn layer(&self) -> u32 {
        self.layer
    }

    /// Application segment (hardened)
    pub fn application(&self) -> u32 {
        self.application
    }

    /// Low 31 address bits (hardened)
    pub fn address_low(&self) -> u32 {
        self.address_low
    }

    /// Next 31 address bits (hardened)
    pub fn address_high(&self) -> u32 {
        self.address_high
    }

    /// Account index, as supplied
    pub fn index(&self) -> &str {
        &self.index
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "m/{}'/{}'/{}'/{}'/{}'/{}",
            STARK_PATH_PURPOSE, self.layer, self.application, self.address_low, self.address_high, self.index
        )
    }
}

impl Serialize for DerivationPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Build the account path for an Ethereum address
pub fn build_account_path(
    layer: &str,
    application: &str,
    eth_address: &str,
    index: &str,
) -> Result<DerivationPath> {
    let layer_hash = hex::encode(Sha256::digest(layer.as_bytes()));
    let application_hash = hex::encode(Sha256::digest(application.as_bytes()));

    Ok(DerivationPath {
        layer: segment(&layer_hash, -SEGMENT_BITS, None)?,
        application: segment(&application_hash, -SEGMENT_BITS, None)?,
        address_low: segment(eth_address, -SEGMENT_BITS, None)?,
        address_high: segment(eth_address, -2 * SEGMENT_BITS, Some(-SEGMENT_BITS))?,
        index: index.to_string(),
    })
}

fn segment(hex: &str, start: isize, end: Option<isize>) -> Result<u32> {
    int_from_bits(hex, start, end)?
        .to_u32()
        .ok_or_else(|| Error::InvalidInput(format!("Path segment out of range for {}", hex)))
}

/// Interpret the bit slice `[start, end)` of a hex string as an integer
///
/// Indices follow Python slicing: negative values count from the end, values
/// past either end are clamped, and `end = None` means the end of the string.
/// An empty slice is zero.
pub fn int_from_bits(hex: &str, start: isize, end: Option<isize>) -> Result<BigUint> {
    let bytes = decode_hex(hex)?;
    let bits: Vec<bool> = bytes
        .iter()
        .flat_map(|&byte| (0..8u32).rev().map(move |shift| (byte >> shift) & 1 == 1))
        .collect();

    let len = bits.len() as isize;
    let clamp = |i: isize| (if i < 0 { (i + len).max(0) } else { i.min(len) }) as usize;
    let start = clamp(start);
    let end = clamp(end.unwrap_or(len));

    let mut value = BigUint::default();
    if start < end {
        for bit in &bits[start..end] {
            value <<= 1u32;
            if *bit {
                value += 1u32;
            }
        }
    }
    Ok(value)
}

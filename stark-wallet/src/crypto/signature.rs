//! Ethereum ECDSA signature serialization
//!
//! Signatures travel as a compact `0x ‖ r ‖ s ‖ v` hex string. The same codec
//! is used to pull the `s` scalar out of the consent signature and to
//! normalize signatures produced for L1 message signing.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::Num;

use crate::error::{Error, Result};
use super::encoding::{add_hex_prefix, strip_hex_prefix};

/// Width of `r` and `s` in bytes
pub const SIGNATURE_SEGMENT_BYTES: usize = 32;

/// Offset of Ethereum's legacy recovery ids (27/28)
const LEGACY_RECOVERY_OFFSET: u8 = 27;

/// An Ethereum ECDSA signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthSignature {
    /// The `r` scalar
    pub r: BigUint,
    /// The `s` scalar
    pub s: BigUint,
    /// Recovery id, normalized to 0/1 when parsed
    pub recovery_param: Option<u8>,
}

impl EthSignature {
    /// Create a signature from its parts
    pub fn new(r: BigUint, s: BigUint, recovery_param: Option<u8>) -> Self {
        Self { r, s, recovery_param }
    }

    /// The `s` scalar as 64 hex digits, without prefix
    pub fn s_hex(&self) -> String {
        format!("{:0>64}", self.s.to_str_radix(16))
    }
}

impl fmt::Display for EthSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize_signature(self))
    }
}

impl FromStr for EthSignature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        deserialize_signature(s)
    }
}

/// Serialize a signature as `0x ‖ r(64) ‖ s(64) ‖ v(2)`
///
/// The recovery id is written as-is and omitted entirely when absent.
pub fn serialize_signature(sig: &EthSignature) -> String {
    let recovery = sig
        .recovery_param
        .map(|v| format!("{:02x}", v))
        .unwrap_or_default();

    add_hex_prefix(&format!(
        "{:0>64}{:0>64}{}",
        sig.r.to_str_radix(16),
        sig.s.to_str_radix(16),
        recovery
    ))
}

/// Deserialize a compact signature with 32-byte `r` and `s`
pub fn deserialize_signature(sig: &str) -> Result<EthSignature> {
    deserialize_signature_with_size(sig, SIGNATURE_SEGMENT_BYTES)
}

/// Deserialize a compact signature whose `r` and `s` are `size_bytes` wide
///
/// Up to two hex digits may follow `s`; they hold the recovery id. Values of
/// 27 and above are shifted down by 27 (Ethereum's legacy `v`), smaller values
/// are taken as already normalized. Both conventions are accepted on purpose,
/// since wallets disagree on which one they emit.
pub fn deserialize_signature_with_size(sig: &str, size_bytes: usize) -> Result<EthSignature> {
    let sig = strip_hex_prefix(sig.trim());
    let size = size_bytes * 2;

    if !sig.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidSignature(format!("Signature is not hex: {}", sig)));
    }
    if size == 0 || sig.len() < size * 2 || sig.len() > size * 2 + 2 {
        return Err(Error::InvalidSignature(format!(
            "Invalid signature length: {} hex digits",
            sig.len()
        )));
    }

    let r = parse_segment(&sig[..size])?;
    let s = parse_segment(&sig[size..size * 2])?;
    let recovery_param = import_recovery_param(&sig[size * 2..])?;

    Ok(EthSignature { r, s, recovery_param })
}

fn parse_segment(hex: &str) -> Result<BigUint> {
    BigUint::from_str_radix(hex, 16)
        .map_err(|e| Error::InvalidSignature(format!("Invalid signature segment: {}", e)))
}

fn import_recovery_param(v: &str) -> Result<Option<u8>> {
    if v.is_empty() {
        return Ok(None);
    }

    let v = u8::from_str_radix(v, 16)
        .map_err(|e| Error::InvalidSignature(format!("Invalid recovery param: {}", e)))?;

    if v >= LEGACY_RECOVERY_OFFSET {
        Ok(Some(v - LEGACY_RECOVERY_OFFSET))
    } else {
        Ok(Some(v))
    }
}

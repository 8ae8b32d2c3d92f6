//! Hex helpers shared by the codecs

use num_bigint::BigUint;

use crate::error::{Error, Result};

/// Remove a leading `0x`/`0X`, if any
pub fn strip_hex_prefix(hex: &str) -> &str {
    hex.strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex)
}

/// Add a `0x` prefix unless one is already present
pub fn add_hex_prefix(hex: &str) -> String {
    format!("0x{}", strip_hex_prefix(hex))
}

/// Decode hex into bytes, left-padding odd-length input with a zero nibble
pub fn decode_hex(hex: &str) -> Result<Vec<u8>> {
    let hex = strip_hex_prefix(hex);
    let decoded = if hex.len() % 2 == 1 {
        hex::decode(format!("0{}", hex))
    } else {
        hex::decode(hex)
    };
    decoded.map_err(|e| Error::InvalidInput(format!("Invalid hex '{}': {}", hex, e)))
}

/// Parse hex into an unsigned integer (empty input is zero)
pub fn hex_to_biguint(hex: &str) -> Result<BigUint> {
    Ok(BigUint::from_bytes_be(&decode_hex(hex)?))
}

/// Render an integer as lowercase hex padded to a whole number of bytes
pub fn biguint_to_even_hex(value: &BigUint) -> String {
    let hex = value.to_str_radix(16);
    if hex.len() % 2 == 1 {
        format!("0{}", hex)
    } else {
        hex
    }
}

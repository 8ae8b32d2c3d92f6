//! STARK message normalization

use num_bigint::BigUint;
use num_traits::{Num, Zero};

use crate::error::{Error, Result};
use super::encoding::strip_hex_prefix;

/// Messages up to this many hex digits are signed as-is
const MAX_UNSHIFTED_HEX_DIGITS: usize = 62;

/// Normalize a hex message to the STARK curve's 251-bit order
///
/// Leading zeros are dropped. Messages of at most 62 digits come back
/// unchanged. A 63-digit message is shifted left by one nibble (a trailing
/// `0` is appended). Anything longer fails with
/// [`Error::InvalidMessageLength`].
pub fn fix_message(message_hex: &str) -> Result<String> {
    let hex = strip_hex_prefix(message_hex);
    let value = if hex.is_empty() {
        BigUint::zero()
    } else {
        BigUint::from_str_radix(hex, 16)
            .map_err(|e| Error::InvalidInput(format!("Invalid message hex: {}", e)))?
    };
    let normalized = value.to_str_radix(16);

    match normalized.len() {
        len if len <= MAX_UNSHIFTED_HEX_DIGITS => Ok(normalized),
        63 => Ok(format!("{}0", normalized)),
        len => Err(Error::InvalidMessageLength(len)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_message_unchanged() {
        let msg = "1".repeat(62);
        assert_eq!(fix_message(&msg).unwrap(), msg);
        assert_eq!(fix_message("0xabc").unwrap(), "abc");
    }

    #[test]
    fn test_leading_zeros_dropped() {
        assert_eq!(fix_message("0x000abc").unwrap(), "abc");
        let msg = format!("0{}", "f".repeat(62));
        assert_eq!(fix_message(&msg).unwrap(), "f".repeat(62));
    }

    #[test]
    fn test_63_digits_shifted() {
        let msg = format!("1{}", "2".repeat(62));
        let fixed = fix_message(&msg).unwrap();
        assert_eq!(fixed.len(), 64);
        assert_eq!(fixed, format!("{}0", msg));
    }

    #[test]
    fn test_too_long() {
        let msg = "a".repeat(64);
        assert!(matches!(fix_message(&msg), Err(Error::InvalidMessageLength(64))));
    }

    #[test]
    fn test_not_hex() {
        assert!(matches!(fix_message("0xnothex"), Err(Error::InvalidInput(_))));
    }
}

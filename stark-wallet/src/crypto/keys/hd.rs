//! Hierarchical deterministic key derivation
//!
//! The STARK key pipeline only needs three things from an HD back-end: build
//! a master node from seed bytes, walk a derivation path, and hand back the
//! child's private key. [`HdNode`] captures exactly that, and [`Bip32Node`] is
//! the default secp256k1 BIP-32 implementation.

use std::fmt;
use std::str::FromStr;

use bip32::{DerivationPath, XPrv};

use crate::error::{Error, Result};

/// An HD derivation back-end
pub trait HdNode: Sized {
    /// Build the master node from seed bytes
    fn from_seed(seed: &[u8]) -> Result<Self>;

    /// Derive the descendant at `path` (e.g. `m/44'/60'/0'/0/0`)
    fn derive_path(&self, path: &str) -> Result<Self>;

    /// The node's private key as `0x`-prefixed, 64-digit hex
    fn private_key_hex(&self) -> String;
}

/// A BIP-32 node on secp256k1
///
/// Seeds must be 16, 32 or 64 bytes long.
#[derive(Clone)]
pub struct Bip32Node {
    xprv: XPrv,
}

impl fmt::Debug for Bip32Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bip32Node")
            .field("depth", &self.xprv.attrs().depth)
            .finish_non_exhaustive()
    }
}

impl HdNode for Bip32Node {
    fn from_seed(seed: &[u8]) -> Result<Self> {
        let xprv = XPrv::new(seed)
            .map_err(|e| Error::KeyDerivation(format!("Failed to create master key: {}", e)))?;
        Ok(Self { xprv })
    }

    fn derive_path(&self, path: &str) -> Result<Self> {
        let mut xprv = self.xprv.clone();
        for child_number in parse_derivation_path(path)? {
            xprv = xprv
                .derive_child(child_number)
                .map_err(|e| Error::KeyDerivation(format!("Child derivation failed at {}: {}", child_number, e)))?;
        }
        Ok(Self { xprv })
    }

    fn private_key_hex(&self) -> String {
        let key_bytes: [u8; 32] = self.xprv.private_key().to_bytes().into();
        format!("0x{}", hex::encode(key_bytes))
    }
}

/// Parse a BIP-32 derivation path
pub fn parse_derivation_path(path: &str) -> Result<DerivationPath> {
    DerivationPath::from_str(path)
        .map_err(|e| Error::KeyDerivation(format!("Invalid derivation path '{}': {}", path, e)))
}

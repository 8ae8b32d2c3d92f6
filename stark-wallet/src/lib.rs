//! STARK Wallet - deterministic layer-2 key derivation
//!
//! This library derives a STARK-curve key pair from an Ethereum account. The
//! account signs a fixed consent message, the signature's `s` value seeds a
//! BIP-32 derivation along an account path built from the layer, application
//! and address, and the derived secp256k1 key is ground into the STARK scalar
//! field.
//!
//! The Ethereum signature helpers used along the way (serialization and L1
//! message signing) are exposed as well.

pub mod error;
pub mod config;
pub mod crypto;
pub mod account;
pub mod signer;

// Re-export commonly used types for convenience
pub use error::{Error, Result};
pub use config::StarkWalletConfig;
pub use crypto::{grind_key, fix_message, EthSignature};
pub use crypto::keys::{StarkCurve, StarkKeyPair, CurveKeyPair, HdNode, Bip32Node};
pub use account::{
    build_account_path, generate_stark_wallet, generate_stark_wallet_from_signed_message,
    DerivationPath, StarkWallet, StarkWalletGenerator,
};
pub use signer::{sign_message, sign_raw, EthSigner, SignedMessage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

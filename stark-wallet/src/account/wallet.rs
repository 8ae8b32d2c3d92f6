//! STARK wallet generation

use std::marker::PhantomData;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::StarkWalletConfig;
use crate::crypto::keys::{derive_key_pair_with, stark_public_key_of, Bip32Node, HdNode, StarkKeyPair};
use crate::crypto::signature::deserialize_signature;
use crate::error::Result;
use crate::signer::EthSigner;
use super::path::{build_account_path, DerivationPath};

/// A STARK key pair derived from an Ethereum account
///
/// The wallet carries the private key for as long as it lives and never
/// serializes or prints it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StarkWallet {
    path: DerivationPath,
    stark_public_key: String,
    #[serde(skip)]
    stark_key_pair: StarkKeyPair,
}

impl StarkWallet {
    /// The derivation path of the key
    pub fn path(&self) -> &DerivationPath {
        &self.path
    }

    /// The STARK public key (`0x`-prefixed x-coordinate)
    pub fn stark_public_key(&self) -> &str {
        &self.stark_public_key
    }

    /// The STARK key pair
    pub fn stark_key_pair(&self) -> &StarkKeyPair {
        &self.stark_key_pair
    }

    /// Take ownership of the key pair
    pub fn into_key_pair(self) -> StarkKeyPair {
        self.stark_key_pair
    }
}

/// Derives STARK wallets from Ethereum signers
///
/// The derivation is only reproducible if the signer's ECDSA is
/// deterministic (RFC 6979): the consent signature's `s` value seeds the HD
/// derivation, so a signer that randomizes its nonces yields a different
/// STARK key every time.
#[derive(Debug, Clone)]
pub struct StarkWalletGenerator<N: HdNode = Bip32Node> {
    config: StarkWalletConfig,
    _node: PhantomData<fn() -> N>,
}

impl Default for StarkWalletGenerator {
    fn default() -> Self {
        Self {
            config: StarkWalletConfig::default(),
            _node: PhantomData,
        }
    }
}

impl StarkWalletGenerator {
    /// Create a generator using BIP-32 derivation
    pub fn new(config: StarkWalletConfig) -> Result<Self> {
        Self::with_hd_backend(config)
    }
}

impl<N: HdNode> StarkWalletGenerator<N> {
    /// Create a generator using the HD back-end `N`
    pub fn with_hd_backend(config: StarkWalletConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            _node: PhantomData,
        })
    }

    /// The generator's configuration
    pub fn config(&self) -> &StarkWalletConfig {
        &self.config
    }

    /// Ask `signer` to sign the consent message and derive its STARK wallet
    #[instrument(skip_all)]
    pub async fn generate_from_signer<S: EthSigner + ?Sized>(&self, signer: &S) -> Result<StarkWallet> {
        let eth_address = signer.address().await?.to_lowercase();
        let signature = signer.sign_message(&self.config.signature_message).await?;
        self.generate_from_signed_message(&eth_address, &signature)
    }

    /// Derive the STARK wallet for an address from its consent signature
    #[instrument(skip(self, signature))]
    pub fn generate_from_signed_message(&self, eth_address: &str, signature: &str) -> Result<StarkWallet> {
        let path = build_account_path(
            &self.config.layer,
            &self.config.application,
            eth_address,
            &self.config.account_index,
        )?;
        debug!(%path, "built account path");

        // The signature's s value is the HD seed
        let seed = deserialize_signature(signature)?.s_hex();
        let stark_key_pair = derive_key_pair_with::<N>(&seed, &path.to_string(), self.config.max_grind_rounds)?;
        let stark_public_key = stark_public_key_of(&stark_key_pair)?;
        debug!(%stark_public_key, "derived stark key");

        Ok(StarkWallet {
            path,
            stark_public_key,
            stark_key_pair,
        })
    }
}

/// Derive the STARK wallet of `signer` with the default configuration
pub async fn generate_stark_wallet<S: EthSigner + ?Sized>(signer: &S) -> Result<StarkWallet> {
    StarkWalletGenerator::<Bip32Node>::default().generate_from_signer(signer).await
}

/// Derive a STARK wallet from an address and its consent signature
pub fn generate_stark_wallet_from_signed_message(eth_address: &str, signature: &str) -> Result<StarkWallet> {
    StarkWalletGenerator::<Bip32Node>::default().generate_from_signed_message(eth_address, signature)
}

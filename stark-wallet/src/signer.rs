//! Ethereum signer capability and L1 message signing
//!
//! Signing is the only step of the pipeline that waits on the outside world:
//! a hardware wallet or browser extension may need the user to approve the
//! request. There is no timeout; dropping the future abandons the request.
//! Errors from the signer are surfaced unchanged and never retried.

use async_trait::async_trait;
use ethers::utils::to_checksum;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::crypto::signature::{deserialize_signature, serialize_signature};
use crate::error::{Error, Result};

/// An Ethereum account able to sign personal messages
#[async_trait]
pub trait EthSigner: Send + Sync {
    /// The account address
    async fn address(&self) -> Result<String>;

    /// Sign `payload` as a personal message, returning the signature as hex
    async fn sign_message(&self, payload: &str) -> Result<String>;
}

/// Every `ethers` signer (local keys, Ledger, Trezor, ...) is an [`EthSigner`]
#[async_trait]
impl<S> EthSigner for S
where
    S: ethers::signers::Signer,
    S::Error: 'static,
{
    async fn address(&self) -> Result<String> {
        Ok(to_checksum(&ethers::signers::Signer::address(self), None))
    }

    async fn sign_message(&self, payload: &str) -> Result<String> {
        let signature = ethers::signers::Signer::sign_message(self, payload)
            .await
            .map_err(|e| Error::Signer(Box::new(e)))?;
        Ok(format!("0x{}", signature))
    }
}

/// A message signed with the L1 key, as the exchange API expects it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedMessage {
    /// The signed message
    pub message: String,
    /// The signer's address, as reported by the signer
    pub eth_address: String,
    /// The normalized signature
    pub eth_signature: String,
}

/// Sign `payload` and return the signature with its recovery id normalized to 0/1
#[instrument(skip_all)]
pub async fn sign_raw<S: EthSigner + ?Sized>(payload: &str, signer: &S) -> Result<String> {
    let signature = signer.sign_message(payload).await?;
    let signature = deserialize_signature(&signature)?;
    debug!(recovery_param = ?signature.recovery_param, "signed raw payload");
    Ok(serialize_signature(&signature))
}

/// Sign `message` and bundle it with the signer's address
#[instrument(skip_all)]
pub async fn sign_message<S: EthSigner + ?Sized>(message: &str, signer: &S) -> Result<SignedMessage> {
    let eth_address = signer.address().await?;
    let eth_signature = sign_raw(message, signer).await?;

    Ok(SignedMessage {
        message: message.to_string(),
        eth_address,
        eth_signature,
    })
}

//! Derivation configuration

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Message the Ethereum account signs to unlock its STARK key
pub const DEFAULT_SIGNATURE_MESSAGE: &str =
    "Only sign this request if you’ve initiated an action with Immutable X.";

/// Layer name hashed into the account path
pub const DEFAULT_ACCOUNT_LAYER: &str = "starkex";

/// Application name hashed into the account path
pub const DEFAULT_ACCOUNT_APPLICATION: &str = "immutablex";

/// Account index, the last (non-hardened) path segment
pub const DEFAULT_ACCOUNT_INDEX: &str = "1";

/// Upper bound on grinding rounds
pub const DEFAULT_MAX_GRIND_ROUNDS: u32 = 100_000;

/// Parameters of the STARK wallet derivation scheme
///
/// Every field defaults to the deployed Immutable X values, so an empty JSON
/// object deserializes to [`StarkWalletConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarkWalletConfig {
    /// Layer name
    pub layer: String,
    /// Application name
    pub application: String,
    /// Account index
    pub account_index: String,
    /// Consent message signed by the Ethereum account
    pub signature_message: String,
    /// Maximum number of grinding rounds before giving up
    pub max_grind_rounds: u32,
}

impl Default for StarkWalletConfig {
    fn default() -> Self {
        Self {
            layer: DEFAULT_ACCOUNT_LAYER.to_string(),
            application: DEFAULT_ACCOUNT_APPLICATION.to_string(),
            account_index: DEFAULT_ACCOUNT_INDEX.to_string(),
            signature_message: DEFAULT_SIGNATURE_MESSAGE.to_string(),
            max_grind_rounds: DEFAULT_MAX_GRIND_ROUNDS,
        }
    }
}

impl StarkWalletConfig {
    /// Parse and validate a configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can produce a valid account path
    pub fn validate(&self) -> Result<()> {
        if self.layer.is_empty() {
            return Err(Error::Config("Layer must not be empty".to_string()));
        }
        if self.application.is_empty() {
            return Err(Error::Config("Application must not be empty".to_string()));
        }
        if self.signature_message.is_empty() {
            return Err(Error::Config("Signature message must not be empty".to_string()));
        }
        if self.account_index.parse::<u32>().map_or(true, |index| index >= 0x80000000) {
            return Err(Error::Config(format!("Invalid account index: {}", self.account_index)));
        }
        if self.max_grind_rounds == 0 {
            return Err(Error::Config("max_grind_rounds must be positive".to_string()));
        }
        Ok(())
    }
}

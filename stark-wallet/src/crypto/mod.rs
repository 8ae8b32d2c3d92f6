//! Cryptographic primitives and operations
//!
//! This module provides the Ethereum signature codec, STARK key grinding,
//! message normalization and the key derivation back-ends.

pub mod encoding;
pub mod signature;
pub mod grind;
pub mod message;
pub mod keys;

pub use signature::*;
pub use grind::*;
pub use message::*;

//! Key derivation and management
//!
//! This module provides the HD derivation back-end, the STARK curve key pairs
//! and the pipeline joining them.

pub mod hd;
pub mod stark;
mod derivation;

pub use hd::{Bip32Node, HdNode};
pub use stark::{
    public_key_encoding, stark_public_key_of, x_coordinate_of, CurveKeyPair, StarkCurve,
    StarkKeyPair, StarkPublicKey, STARK_CURVE,
};
pub use derivation::*;

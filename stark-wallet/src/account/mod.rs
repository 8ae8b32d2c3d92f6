//! Account management functionality
//!
//! This module builds STARK account paths and derives STARK wallets from
//! Ethereum accounts.

mod path;
mod wallet;

pub use path::*;
pub use wallet::*;

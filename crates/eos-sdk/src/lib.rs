#![deny(missing_docs)]

//! EOS SDK - Complete SDK.
//!
//! Re-exports all EOS SDK components for convenient single-crate usage.

pub use eos_primitives as primitives;
pub use eos_chain as chain;
pub use eos_wallet as wallet;
pub use eos_rpc as rpc;

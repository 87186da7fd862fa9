/// Elliptic curve cryptography on secp256k1.
///
/// Provides private keys, public keys in the ledger's legacy text format,
/// canonical recoverable ECDSA signatures, and ECDH shared secrets.

pub mod private_key;
pub mod public_key;
pub mod signature;

pub use private_key::{PrivateKey, SharedSecret};
pub use public_key::PublicKey;
pub use signature::Signature;

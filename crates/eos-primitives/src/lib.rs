/// EOS SDK - Cryptographic primitives, hashing, and byte-level utilities.
///
/// This crate provides the foundational building blocks for the EOS SDK:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, SHA-512, HMAC)
/// - Little-endian byte reader/writer with varuint32 encoding
/// - Elliptic curve cryptography (secp256k1 keys, canonical recoverable
///   signatures, ECDH shared secrets)
/// - AES-256-CBC encryption for memo payloads

pub mod hash;
pub mod util;
pub mod ec;
pub mod aes;

mod error;
pub use error::PrimitivesError;

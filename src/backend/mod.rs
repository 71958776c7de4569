//! Alternate engine implementations selected at build time.
//!
//! Each backend implements [`crate::SignatureScheme`] and is exercised by
//! the same conformance suite as the native engines.
//!
//! - `k256` (feature `k256-backend`): secp256k1 ECDSA from the RustCrypto
//!   `k256` crate.

#[cfg(feature = "k256-backend")]
mod k256;

#[cfg(feature = "k256-backend")]
pub use self::k256::K256Ecdsa;

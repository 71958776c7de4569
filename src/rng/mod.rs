//! Deterministic random bit generation
//!
//! The engine never acquires entropy on its own. Key generation takes a
//! caller-supplied `rand_core::RngCore + CryptoRng`; everything that must
//! be reproducible (RFC 6979 nonces, batch-verification coefficients) is
//! expanded from its inputs with an HMAC-DRBG.

mod hmac_drbg;

/// HMAC-based deterministic random bit generator.
pub use hmac_drbg::HmacDrbg;

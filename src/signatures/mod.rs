//! Digital signature schemes.
//!
//! Each engine is bound to one curve and one [`crate::EngineConfig`] and
//! works purely on byte buffers:
//!
//! - [`Ecdsa`]: RFC 6979 ECDSA with public-key recovery, plus the key
//!   lifecycle of the Weierstrass curves,
//! - [`Schnorr`]: bip-schnorr style signatures with batch verification,
//! - [`Eddsa`]: Ed25519 with tweaked signing and Montgomery conversion.
//!
//! The DER codec in [`der`] is shared by the ECDSA helpers and can be used
//! on its own.
//!
//! Verification never fails with an error. A signature that is malformed
//! or does not satisfy the equation is reported as `false`.

pub mod der;
mod ecdsa;
mod eddsa;
mod schnorr;

pub use ecdsa::Ecdsa;
pub use eddsa::Eddsa;
pub use schnorr::{BatchItem, Schnorr};

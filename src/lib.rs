//! Elliptic-curve signatures over fixed-width byte buffers
//!
//! This crate implements key management, signing and verification for
//! the NIST prime curves P-192, P-224, P-256, P-384 and P-521, for
//! secp256k1, and for Ed25519. Every operation takes and returns raw
//! bytes: big-endian scalars, SEC1 points and compact or DER signatures
//! for the Weierstrass curves, RFC 8032 encodings for Ed25519.
//!
//! The focus is on **strictness and predictability**. Inputs are validated
//! at every boundary and never repaired, secret-dependent arithmetic is
//! branch-free, and the only shared state is a lazily built, read-only
//! table of base-point multiples per curve.
//!
//! # Module overview
//!
//! - `primitives`
//!   The fixed-width `Uint` integer (nine 64-bit limbs, enough for
//!   P-521) with carry-propagating and constant-time helpers.
//!
//! - `arith`
//!   Montgomery arithmetic modulo a prime: the `Modulus` constants and the
//!   `Elem` residue type with inversion, square roots, cube roots and
//!   quadratic-residue tests. Used for both field and scalar arithmetic.
//!
//! - `curve`
//!   Curve parameters, the complete projective group law, SEC1 encodings,
//!   hash-to-curve maps (SSWU, Icart, SVDW) and the Ed25519 group.
//!
//! - `keys`
//!   The key lifecycle: generation, validation, reduction, negation,
//!   inversion, tweaks, combination, ECDH and the Edwards/Montgomery
//!   conversions.
//!
//! - `signatures`
//!   The ECDSA, Schnorr and Ed25519 engines and the DER codec.
//!
//! - `hash`, `rng`
//!   The SHA-2 selector consumed by the engines and the HMAC-DRBG used for
//!   RFC 6979 nonces and batch-verification coefficients.
//!
//! - `engine`, `backend`
//!   The `SignatureScheme` contract and the optional `k256` backend.
//!
//! # Example
//!
//! ```
//! use ecc_engine::{CurveId, Ecdsa, EngineConfig};
//!
//! let ecdsa = Ecdsa::new(CurveId::Secp256k1, EngineConfig::default());
//! let key = [0x11u8; 32];
//! let digest = [0x22u8; 32];
//!
//! let public = ecdsa.public_key_create(&key, true).unwrap();
//! let sig = ecdsa.sign(&digest, &key).unwrap();
//!
//! assert!(ecdsa.verify(&digest, &sig, &public));
//! ```
//!
//! # Design goals
//!
//! - Errors only for malformed input; a failed verification is `false`
//! - No global flags: behaviour is configured per engine
//! - Constant-time handling of private keys and nonces
//! - No I/O and no hidden entropy source

pub mod arith;
pub mod backend;
pub mod config;
pub mod curve;
pub mod engine;
pub mod error;
pub mod hash;
pub mod keys;
pub mod primitives;
pub mod rng;
pub mod signatures;

pub use config::EngineConfig;
pub use curve::CurveId;
pub use engine::SignatureScheme;
pub use error::{Error, Result};
pub use hash::HashAlgorithm;
pub use signatures::{BatchItem, Ecdsa, Eddsa, Schnorr};

#[cfg(feature = "k256-backend")]
pub use backend::K256Ecdsa;

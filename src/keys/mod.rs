//! Key material and key-level operations.
//!
//! Keys are plain byte strings at the API boundary; this module gives them
//! meaning for each curve family and implements everything that does not
//! involve a signature.
//!
//! ## Weierstrass keys
//!
//! Big-endian private scalars in `[1, n)` and SEC1 public keys. The
//! lifecycle (generation, validation, reduction, negation, inversion,
//! additive and multiplicative tweaks, combination and ECDH) is exposed as
//! methods of [`crate::Ecdsa`].
//!
//! ## Ed25519 keys
//!
//! A 32-byte seed is expanded with SHA-512 into a clamped scalar and a
//! nonce prefix, following RFC 8032. Public keys are 32-byte Edwards
//! encodings. Conversion to and from the Montgomery form of the curve and
//! X25519-style key agreement are exposed on [`crate::Eddsa`].

mod edwards;
mod weierstrass;

pub(crate) use edwards::ExpandedKey;
pub(crate) use weierstrass::{decode_private, decode_public, decode_scalar};

//! The engine contract.
//!
//! [`SignatureScheme`] is the common surface of every signing engine in
//! the crate: the native [`Ecdsa`] and [`Eddsa`] engines, and the `k256`
//! backend when the `k256-backend` feature is enabled. Backends are picked
//! at build time; callers that only need to sign and verify can be written
//! once against the trait, and the conformance tests run the same checks
//! over every implementation.

use crate::error::Result;
use crate::signatures::{Ecdsa, Eddsa};
use rand_core::CryptoRngCore;

/// Key generation, signing and verification over raw bytes.
pub trait SignatureScheme: Send + Sync {
    /// Curve or scheme name, e.g. `"P256"` or `"ED25519"`.
    fn name(&self) -> &'static str;

    fn private_key_size(&self) -> usize;

    fn signature_size(&self) -> usize;

    fn generate_private_key(&self, rng: &mut dyn CryptoRngCore) -> Vec<u8>;

    fn private_key_verify(&self, key: &[u8]) -> bool;

    /// Public key for `key`, in the scheme's preferred (compressed) form.
    fn public_key(&self, key: &[u8]) -> Result<Vec<u8>>;

    fn public_key_verify(&self, key: &[u8]) -> bool;

    fn sign(&self, msg: &[u8], key: &[u8]) -> Result<Vec<u8>>;

    fn verify(&self, msg: &[u8], sig: &[u8], key: &[u8]) -> bool;
}

impl SignatureScheme for Ecdsa {
    fn name(&self) -> &'static str {
        self.id().name()
    }

    fn private_key_size(&self) -> usize {
        self.size()
    }

    fn signature_size(&self) -> usize {
        Ecdsa::signature_size(self)
    }

    fn generate_private_key(&self, rng: &mut dyn CryptoRngCore) -> Vec<u8> {
        self.private_key_generate(rng)
    }

    fn private_key_verify(&self, key: &[u8]) -> bool {
        Ecdsa::private_key_verify(self, key)
    }

    fn public_key(&self, key: &[u8]) -> Result<Vec<u8>> {
        self.public_key_create(key, true)
    }

    fn public_key_verify(&self, key: &[u8]) -> bool {
        Ecdsa::public_key_verify(self, key)
    }

    fn sign(&self, msg: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        Ecdsa::sign(self, msg, key)
    }

    fn verify(&self, msg: &[u8], sig: &[u8], key: &[u8]) -> bool {
        Ecdsa::verify(self, msg, sig, key)
    }
}

impl SignatureScheme for Eddsa {
    fn name(&self) -> &'static str {
        "ED25519"
    }

    fn private_key_size(&self) -> usize {
        self.size()
    }

    fn signature_size(&self) -> usize {
        Eddsa::signature_size(self)
    }

    fn generate_private_key(&self, rng: &mut dyn CryptoRngCore) -> Vec<u8> {
        self.private_key_generate(rng)
    }

    fn private_key_verify(&self, key: &[u8]) -> bool {
        Eddsa::private_key_verify(self, key)
    }

    fn public_key(&self, key: &[u8]) -> Result<Vec<u8>> {
        self.public_key_create(key)
    }

    fn public_key_verify(&self, key: &[u8]) -> bool {
        Eddsa::public_key_verify(self, key)
    }

    fn sign(&self, msg: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        Eddsa::sign(self, msg, key)
    }

    fn verify(&self, msg: &[u8], sig: &[u8], key: &[u8]) -> bool {
        Eddsa::verify(self, msg, sig, key)
    }
}

//! secp256k1 ECDSA backed by the `k256` crate.
//!
//! Messages are treated as prehashed digests, as in the native engine.
//! `k256` signs with RFC 6979 nonces and normalizes to low S, so it
//! produces the same compact signatures as `Ecdsa` on secp256k1. Its
//! verifier rejects high-S signatures, where the native one accepts them.

use crate::engine::SignatureScheme;
use crate::error::{Error, Result};
use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use rand_core::CryptoRngCore;
use tracing::debug;

const SIZE: usize = 32;

/// secp256k1 engine implemented with `k256`.
#[derive(Copy, Clone, Debug, Default)]
pub struct K256Ecdsa;

impl K256Ecdsa {
    pub fn new() -> Self {
        debug!(curve = "SECP256K1", "k256 backend created");
        Self
    }

    fn signing_key(key: &[u8]) -> Result<SigningKey> {
        if key.len() != SIZE {
            return Err(Error::InvalidScalar);
        }

        SigningKey::from_slice(key).map_err(|_| Error::InvalidScalar)
    }
}

impl SignatureScheme for K256Ecdsa {
    fn name(&self) -> &'static str {
        "SECP256K1"
    }

    fn private_key_size(&self) -> usize {
        SIZE
    }

    fn signature_size(&self) -> usize {
        2 * SIZE
    }

    fn generate_private_key(&self, mut rng: &mut dyn CryptoRngCore) -> Vec<u8> {
        SigningKey::random(&mut rng).to_bytes().to_vec()
    }

    fn private_key_verify(&self, key: &[u8]) -> bool {
        Self::signing_key(key).is_ok()
    }

    fn public_key(&self, key: &[u8]) -> Result<Vec<u8>> {
        let sk = Self::signing_key(key)?;
        let pk = VerifyingKey::from(&sk);

        Ok(pk.to_encoded_point(true).as_bytes().to_vec())
    }

    fn public_key_verify(&self, key: &[u8]) -> bool {
        VerifyingKey::from_sec1_bytes(key).is_ok()
    }

    fn sign(&self, msg: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        let sk = Self::signing_key(key)?;
        let sig: Signature = sk.sign_prehash(msg).map_err(|_| Error::InvalidEncoding)?;

        Ok(sig.to_bytes().to_vec())
    }

    fn verify(&self, msg: &[u8], sig: &[u8], key: &[u8]) -> bool {
        let Ok(pk) = VerifyingKey::from_sec1_bytes(key) else {
            return false;
        };

        let Ok(sig) = Signature::from_slice(sig) else {
            return false;
        };

        pk.verify_prehash(msg, &sig).is_ok()
    }
}

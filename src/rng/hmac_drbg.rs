//! HMAC-based deterministic random bit generator
//!
//! Implements HMAC_DRBG (NIST SP 800-90A) without reseeding, in the shape
//! RFC 6979 relies on: the generator is instantiated from entropy, nonce
//! and personalization strings, and every `generate` call is followed by
//! an update with no additional input. That post-generate update is
//! exactly the "K = HMAC_K(V || 0x00), V = HMAC_K(V)" retry step of
//! RFC 6979 §3.2 (h), so nonce derivation is simply repeated `generate`.
//!
//! The same generator also expands the deterministic coefficients used by
//! Schnorr batch verification.

use crate::hash::HashAlgorithm;
use zeroize::Zeroize;

/// HMAC-DRBG state (`K`, `V`) over a SHA-2 function.
pub struct HmacDrbg {
    hash: HashAlgorithm,
    k: Vec<u8>,
    v: Vec<u8>,
}

impl HmacDrbg {
    /// Instantiates the generator from `entropy ‖ nonce ‖ pers`.
    pub fn new(hash: HashAlgorithm, entropy: &[u8], nonce: &[u8], pers: &[u8]) -> Self {
        let size = hash.output_size();

        let mut drbg = Self {
            hash,
            k: vec![0x00; size],
            v: vec![0x01; size],
        };

        drbg.update(&[entropy, nonce, pers]);
        drbg
    }

    fn update(&mut self, seed: &[&[u8]]) {
        let provided = seed.iter().any(|s| !s.is_empty());

        let mut parts: Vec<&[u8]> = Vec::with_capacity(seed.len() + 2);
        parts.push(&self.v);
        parts.push(&[0x00]);
        parts.extend_from_slice(seed);

        let k = self.hash.hmac(&self.k, &parts);
        self.k.zeroize();
        self.k = k;
        self.v = self.hash.hmac(&self.k, &[self.v.as_slice()]);

        if provided {
            let mut parts: Vec<&[u8]> = Vec::with_capacity(seed.len() + 2);
            parts.push(&self.v);
            parts.push(&[0x01]);
            parts.extend_from_slice(seed);

            let k = self.hash.hmac(&self.k, &parts);
            self.k.zeroize();
            self.k = k;
            self.v = self.hash.hmac(&self.k, &[self.v.as_slice()]);
        }
    }

    /// Fills `out` with pseudorandom bytes, then advances the state.
    pub fn fill_bytes(&mut self, out: &mut [u8]) {
        let mut offset = 0;

        while offset < out.len() {
            self.v = self.hash.hmac(&self.k, &[self.v.as_slice()]);

            let to_copy = self.v.len().min(out.len() - offset);
            out[offset..offset + to_copy].copy_from_slice(&self.v[..to_copy]);

            offset += to_copy;
        }

        self.update(&[]);
    }

    /// Returns `len` pseudorandom bytes.
    pub fn generate(&mut self, len: usize) -> Vec<u8> {
        let mut out = vec![0u8; len];
        self.fill_bytes(&mut out);
        out
    }
}

impl Drop for HmacDrbg {
    fn drop(&mut self) {
        self.k.zeroize();
        self.v.zeroize();
    }
}

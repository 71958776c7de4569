//! Engine configuration.
//!
//! Behavioural switches are passed to each engine when it is built rather
//! than read from process-wide state. Two engines for the same curve may
//! therefore run side by side with different settings.

use crate::hash::HashAlgorithm;

/// Strategy object handed to `Ecdsa::new`, `Schnorr::new` and `Eddsa::new`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Use the lazily built fixed-base table for `k·G`. When disabled,
    /// base-point multiplication goes through the generic windowed ladder.
    pub precompute: bool,

    /// Digest used for nonce derivation and challenges. `None` selects the
    /// curve's default.
    pub hash: Option<HashAlgorithm>,
}

impl EngineConfig {
    /// The default configuration: precomputation on, curve hash.
    pub const fn new() -> Self {
        Self {
            precompute: true,
            hash: None,
        }
    }

    /// Enables or disables the fixed-base table.
    pub const fn with_precompute(mut self, precompute: bool) -> Self {
        self.precompute = precompute;
        self
    }

    /// Overrides the digest.
    pub const fn with_hash(mut self, hash: HashAlgorithm) -> Self {
        self.hash = Some(hash);
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

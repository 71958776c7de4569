//! Message digests consumed by the engines.
//!
//! The engine never implements a hash itself; it selects one of the SHA-2
//! functions from the `sha2` crate (and HMAC over it from `hmac`) through
//! the small [`HashAlgorithm`] selector. Inputs are passed as a list of
//! parts so callers can hash concatenations without building a buffer.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

/// SHA-2 family member used for nonces, challenges and key expansion.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

macro_rules! digest_parts {
    ($hash:ty, $parts:expr) => {{
        let mut h = <$hash>::new();
        for p in $parts {
            h.update(p);
        }
        h.finalize().to_vec()
    }};
}

macro_rules! hmac_parts {
    ($hash:ty, $key:expr, $parts:expr) => {{
        let mut mac = <Hmac<$hash> as Mac>::new_from_slice($key)
            .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
        for p in $parts {
            mac.update(p);
        }
        mac.finalize().into_bytes().to_vec()
    }};
}

impl HashAlgorithm {
    /// Digest length in bytes.
    pub const fn output_size(self) -> usize {
        match self {
            Self::Sha224 => 28,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// Hashes the concatenation of `parts`.
    pub fn digest(self, parts: &[&[u8]]) -> Vec<u8> {
        match self {
            Self::Sha224 => digest_parts!(Sha224, parts),
            Self::Sha256 => digest_parts!(Sha256, parts),
            Self::Sha384 => digest_parts!(Sha384, parts),
            Self::Sha512 => digest_parts!(Sha512, parts),
        }
    }

    /// HMAC of the concatenation of `parts` under `key`.
    pub fn hmac(self, key: &[u8], parts: &[&[u8]]) -> Vec<u8> {
        match self {
            Self::Sha224 => hmac_parts!(Sha224, key, parts),
            Self::Sha256 => hmac_parts!(Sha256, key, parts),
            Self::Sha384 => hmac_parts!(Sha384, key, parts),
            Self::Sha512 => hmac_parts!(Sha512, key, parts),
        }
    }
}

//! Error type shared by every engine.
//!
//! Errors are reserved for malformed input. A signature that simply does
//! not verify is a `false`, and a key that cannot be recovered is a
//! `None`; neither goes through this type.

use thiserror::Error;

/// Failure kinds reported at the API boundary.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// A scalar is outside `[0, n)` (or `[1, n)` for private keys), or an
    /// operation would produce the zero scalar.
    #[error("invalid scalar")]
    InvalidScalar,

    /// A point is off the curve, has non-canonical coordinates, or is the
    /// identity where a public key is required.
    #[error("invalid curve point")]
    InvalidPoint,

    /// A byte layout is malformed: wrong length, unknown prefix, hybrid
    /// parity mismatch, or non-minimal DER.
    #[error("invalid encoding")]
    InvalidEncoding,

    /// The requested operation is not defined for this curve.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}

/// Result type used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

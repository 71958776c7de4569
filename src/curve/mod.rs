//! Elliptic-curve groups.
//!
//! This module holds everything that depends on the shape of a curve but
//! not on a signature scheme:
//!
//! - `params`: the six short-Weierstrass parameter sets and their
//!   process-wide instances,
//! - `point`: the complete projective group law,
//! - `sec1`: strict public-key encodings,
//! - `map`: the hash-to-curve maps (SSWU, Icart, SVDW),
//! - `edwards`: the Ed25519 group in extended coordinates,
//! - `table`: scalar multiplication shared by both shapes.
//!
//! Curves are immutable once built. The only lazily initialized state is
//! the fixed-base table each curve keeps behind a `OnceLock`.

pub mod edwards;
pub mod map;
mod params;
mod point;
pub mod sec1;
pub(crate) mod table;

pub use edwards::{EdwardsCurve, EdwardsPoint};
pub use params::{Curve, CurveId};
pub(crate) use params::MapConstants;
pub use point::{AffinePoint, ProjectivePoint};

//! Modular arithmetic
//!
//! Field arithmetic (modulo a curve prime `p`) and scalar arithmetic
//! (modulo a group order `n`) share one implementation: both are odd
//! prime moduli handled in Montgomery form over fixed-width limbs.
//!
//! - `Modulus` holds the per-prime constants and the raw operations.
//! - `Elem` is a residue tagged with its modulus, with operator overloads.
//!
//! Secret-dependent operations never branch on residue values. Exponents
//! and anything suffixed `_vartime` are treated as public.

mod elem;
mod modulus;

pub use elem::Elem;
pub use modulus::Modulus;

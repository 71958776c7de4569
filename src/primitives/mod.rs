//! Primitive types
//!
//! This module defines the low-level integer type every other layer is
//! built on.
//!
//! Primitives are simple, fixed-size, allocation-free building blocks with
//! well-defined semantics. They do not attempt to be a general big-integer
//! library: there is no division by arbitrary values and no variable
//! width. Modular arithmetic lives in `arith`.
//!
//! Current primitives include:
//! - `Uint`: a 576-bit unsigned integer in 64-bit limbs, wide enough for
//!   every supported curve including P-521

mod uint;

pub use uint::{BYTES, LIMBS, Uint};
pub(crate) use uint::{adc, mac, sbb};

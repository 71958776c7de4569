//! Limb-based fixed-width unsigned integer.

mod core;
mod ops;

pub use self::core::{BYTES, LIMBS, Uint};
pub(crate) use self::ops::{adc, mac, sbb};

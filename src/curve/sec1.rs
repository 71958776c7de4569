//! SEC1 point encodings
//!
//! Three layouts are accepted for a public key of a curve with `size`-byte
//! field elements:
//!
//! | prefix      | layout      | length       |
//! |-------------|-------------|--------------|
//! | `02` / `03` | `x`         | `1 + size`   |
//! | `04`        | `x ‖ y`     | `1 + 2·size` |
//! | `06` / `07` | `x ‖ y`     | `1 + 2·size` |
//!
//! Decoding is strict. Coordinates must be below `p`, and a compressed `x`
//! is range-checked before any square root is taken. A hybrid prefix must
//! agree with the parity of `y`. The identity has no encoding.

use crate::arith::Elem;
use crate::curve::params::Curve;
use crate::curve::point::{AffinePoint, ProjectivePoint};
use crate::error::{Error, Result};
use subtle::{Choice, CtOption};

/// Solves the curve equation for `y` with the requested parity.
///
/// # Returns
/// Nothing when `x³ + a·x + b` is not a square.
pub(crate) fn decompress(curve: &Curve, x: &Elem, odd: Choice) -> CtOption<AffinePoint> {
    let root = curve.rhs(x).sqrt();
    let found = root.is_some();
    let y = root.unwrap_or(Elem::zero(curve.fp));

    let p = AffinePoint {
        x: *x,
        y: y.conditional_negate(y.is_odd() ^ odd),
    };

    CtOption::new(p, found)
}

fn coordinate(curve: &Curve, bytes: &[u8]) -> Result<Elem> {
    Option::<Elem>::from(Elem::from_be_bytes(curve.fp, bytes)).ok_or(Error::InvalidPoint)
}

/// Decodes a public key.
///
/// # Returns
/// - `InvalidEncoding` for a wrong length, an unknown prefix or a hybrid
///   parity mismatch,
/// - `InvalidPoint` for a coordinate `≥ p`, a compressed `x` without a
///   matching `y`, or a point off the curve.
pub fn decode(curve: &Curve, bytes: &[u8]) -> Result<AffinePoint> {
    let size = curve.size;

    let Some((&prefix, body)) = bytes.split_first() else {
        return Err(Error::InvalidEncoding);
    };

    match prefix {
        0x02 | 0x03 => {
            if body.len() != size {
                return Err(Error::InvalidEncoding);
            }

            let x = coordinate(curve, body)?;
            Option::<AffinePoint>::from(decompress(curve, &x, Choice::from(prefix & 1)))
                .ok_or(Error::InvalidPoint)
        }
        0x04 | 0x06 | 0x07 => {
            if body.len() != 2 * size {
                return Err(Error::InvalidEncoding);
            }

            let p = AffinePoint {
                x: coordinate(curve, &body[..size])?,
                y: coordinate(curve, &body[size..])?,
            };

            if !curve.is_on_curve(&p) {
                return Err(Error::InvalidPoint);
            }

            if prefix != 0x04 && bool::from(p.y.is_odd()) != (prefix & 1 == 1) {
                return Err(Error::InvalidEncoding);
            }

            Ok(p)
        }
        _ => Err(Error::InvalidEncoding),
    }
}

/// Encodes a finite point, compressed or uncompressed.
pub fn encode(p: &AffinePoint, compress: bool) -> Vec<u8> {
    let size = p.x.modulus().bytes();

    if compress {
        let mut out = vec![0u8; 1 + size];
        out[0] = 0x02 | p.y.is_odd().unwrap_u8();
        p.x.write_be_bytes(&mut out[1..]);
        out
    } else {
        let mut out = vec![0u8; 1 + 2 * size];
        out[0] = 0x04;
        p.x.write_be_bytes(&mut out[1..1 + size]);
        p.y.write_be_bytes(&mut out[1 + size..]);
        out
    }
}

/// Encodes a projective point, failing on the identity.
pub fn encode_projective(p: &ProjectivePoint, compress: bool) -> Result<Vec<u8>> {
    p.to_affine()
        .map(|a| encode(&a, compress))
        .ok_or(Error::InvalidPoint)
}

/// Decodes straight into projective form.
pub fn decode_projective(curve: &'static Curve, bytes: &[u8]) -> Result<ProjectivePoint> {
    decode(curve, bytes).map(|a| ProjectivePoint::from_affine(curve, &a))
}

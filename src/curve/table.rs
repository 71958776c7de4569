//! Scalar multiplication shared by both curve shapes
//!
//! Point types implement the small [`Group`] trait; everything that only
//! needs the group law lives here once:
//!
//! - a constant-time 4-bit fixed-window ladder for secret scalars,
//! - a variable-time interleaved double multiplication for verification,
//! - the fixed-base table used for `k·G`.
//!
//! Table lookups scan every entry with conditional assignment so memory
//! access never depends on the scalar.

use crate::primitives::Uint;
use subtle::{ConditionallySelectable, ConstantTimeEq};

/// Group operations required by the multiplication routines.
pub(crate) trait Group: Copy + ConditionallySelectable {
    /// The identity element of the same curve as `self`.
    fn identity_like(&self) -> Self;

    fn add(&self, rhs: &Self) -> Self;

    fn double(&self) -> Self;
}

const WIDTH: usize = 16;

fn select<P: Group>(table: &[P; WIDTH], idx: u8) -> P {
    let mut out = table[0];

    for (j, p) in table.iter().enumerate().skip(1) {
        out.conditional_assign(p, (j as u8).ct_eq(&idx));
    }

    out
}

fn window<P: Group>(p: &P) -> [P; WIDTH] {
    let mut t = [p.identity_like(); WIDTH];

    for j in 1..WIDTH {
        t[j] = t[j - 1].add(p);
    }

    t
}

/// `k·p` with a fixed number of group operations for a given `bits`.
pub(crate) fn mul_ct<P: Group>(p: &P, k: &Uint, bits: usize) -> P {
    let table = window(p);
    let mut acc = p.identity_like();

    for i in (0..bits.div_ceil(4)).rev() {
        for _ in 0..4 {
            acc = acc.double();
        }
        acc = acc.add(&select(&table, k.nibble(i)));
    }

    acc
}

/// `a·p + b·q` for public scalars.
pub(crate) fn mul_add_vartime<P: Group>(p: &P, a: &Uint, q: &P, b: &Uint) -> P {
    let pq = p.add(q);
    let bits = a.bits_vartime().max(b.bits_vartime());
    let mut acc = p.identity_like();

    for i in (0..bits).rev() {
        acc = acc.double();

        match (a.bit(i), b.bit(i)) {
            (1, 1) => acc = acc.add(&pq),
            (1, 0) => acc = acc.add(p),
            (0, 1) => acc = acc.add(q),
            _ => {}
        }
    }

    acc
}

/// Precomputed multiples `j·16^i·G` for every 4-bit window `i`.
///
/// Multiplication by the base point then costs one constant-time lookup
/// and one addition per window, with no doublings.
pub(crate) struct BaseTable<P> {
    windows: Vec<[P; WIDTH]>,
}

impl<P: Group> BaseTable<P> {
    pub(crate) fn new(g: &P, bits: usize) -> Self {
        let count = bits.div_ceil(4);
        let mut windows = Vec::with_capacity(count);
        let mut base = *g;

        for _ in 0..count {
            windows.push(window(&base));
            for _ in 0..4 {
                base = base.double();
            }
        }

        Self { windows }
    }

    /// `k·G` for `k` below `2^bits`.
    pub(crate) fn mul(&self, k: &Uint) -> P {
        let mut acc = self.windows[0][0];

        for (i, w) in self.windows.iter().enumerate() {
            acc = acc.add(&select(w, k.nibble(i)));
        }

        acc
    }
}

// Copyright 2025 the Tri Raster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-pixel coverage test.
//!
//! Screen positions are snapped to a fixed-point grid with [`SUBPIXEL_BITS`] fractional bits
//! and edge functions are evaluated exactly in 128-bit integers. Exact arithmetic is what
//! makes the tie-break below well defined: two triangles sharing an edge see exactly the
//! same zero set for it, so every sample on the edge goes to exactly one of them.

use crate::region::PixelRect;

/// Number of fractional bits of snapped screen coordinates.
pub(crate) const SUBPIXEL_BITS: u32 = 8;
/// One pixel in sub-pixel units.
pub(crate) const SUBPIXEL_ONE: i64 = 1 << SUBPIXEL_BITS;
/// Offset of a pixel centre from its corner, in sub-pixel units.
pub(crate) const SUBPIXEL_HALF: i64 = SUBPIXEL_ONE / 2;

/// A point on the sub-pixel grid.
pub(crate) type SnappedPoint = [i64; 2];

/// The edge function of a directed edge `s -> t`, `E(p) = (p - s) × (t - s)`, written as
/// `a * x + b * y + c` and oriented so that the triangle interior is positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EdgeFunction {
    a: i64,
    b: i64,
    c: i128,
    /// Whether a sample exactly on the edge counts as covered.
    inclusive: bool,
}

impl EdgeFunction {
    /// The edge function of `s -> t`, negated if `flip` is set.
    pub(crate) fn new(s: SnappedPoint, t: SnappedPoint, flip: bool) -> Self {
        let (mut a, mut b) = (t[1] - s[1], s[0] - t[0]);
        let mut c = i128::from(s[1]) * i128::from(t[0]) - i128::from(s[0]) * i128::from(t[1]);
        // Direction of the edge once the interior is on its positive side.
        let (mut dx, mut dy) = (t[0] - s[0], t[1] - s[1]);

        if flip {
            a = -a;
            b = -b;
            c = -c;
            dx = -dx;
            dy = -dy;
        }

        Self {
            a,
            b,
            c,
            inclusive: dy < 0 || (dy == 0 && dx > 0),
        }
    }

    /// Evaluate the edge function at a sub-pixel position.
    #[inline]
    pub(crate) fn eval(&self, p: SnappedPoint) -> i128 {
        i128::from(self.a) * i128::from(p[0]) + i128::from(self.b) * i128::from(p[1]) + self.c
    }

    /// The change of the edge function when moving one pixel to the right.
    #[inline]
    fn step_x(&self) -> i128 {
        i128::from(self.a) * i128::from(SUBPIXEL_ONE)
    }

    /// Whether a sample with edge value `value` lies on the inner side of this edge.
    ///
    /// A value of exactly zero is inside only if the edge points down (`dy < 0`) or, when
    /// horizontal, to the right. This is the same as nudging every sample by an
    /// infinitesimal `(-ε, -ε²)`, so each sample on a shared edge or a shared vertex of a
    /// closed fan belongs to exactly one triangle.
    #[inline]
    pub(crate) fn contains(&self, value: i128) -> bool {
        value > 0 || (value == 0 && self.inclusive)
    }
}

/// The centre of pixel `(x, y)` on the sub-pixel grid.
#[inline]
pub(crate) fn pixel_center(x: u16, y: u16) -> SnappedPoint {
    [
        i64::from(x) * SUBPIXEL_ONE + SUBPIXEL_HALF,
        i64::from(y) * SUBPIXEL_ONE + SUBPIXEL_HALF,
    ]
}

/// Call `covered` with the position and the three edge values of every pixel of `rect`
/// whose centre is inside the triangle bounded by `edges`.
///
/// Edge values are walked incrementally along each row.
pub(crate) fn for_each_covered(
    edges: &[EdgeFunction; 3],
    rect: PixelRect,
    mut covered: impl FnMut(u16, u16, [i128; 3]),
) {
    let steps = edges.map(|e| e.step_x());

    for y in rect.y0..rect.y1 {
        let start = pixel_center(rect.x0, y);
        let mut values = edges.map(|e| e.eval(start));

        for x in rect.x0..rect.x1 {
            if edges[0].contains(values[0])
                && edges[1].contains(values[1])
                && edges[2].contains(values[2])
            {
                covered(x, y, values);
            }

            for (value, step) in values.iter_mut().zip(steps) {
                *value += step;
            }
        }
    }
}

// Copyright 2025 the Tri Raster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clipping triangles against the plane just in front of the eye.
//!
//! Vertices with `w <= 0` cannot be projected. Instead of dropping every triangle that has
//! such a vertex, the triangle is clipped in homogeneous space against `w >= W_EPSILON`
//! (Sutherland-Hodgman). The remaining polygon has at most four corners and is fanned into
//! at most two triangles.
//!
//! Every clipped corner remembers its weights relative to the three corners of the input
//! triangle. Clip-space positions are linear in those weights, so perspective-correct
//! barycentrics computed for a clipped piece can be mapped back onto the input triangle
//! exactly.

use crate::mesh::ClipVertex;
use smallvec::SmallVec;

/// The smallest `w` a vertex may have after clipping.
pub(crate) const W_EPSILON: f64 = 1e-6;

/// A clip-space vertex of a (possibly) clipped triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ClippedVertex {
    /// Homogeneous clip-space position.
    pub(crate) position: [f64; 4],
    /// Weights of the three corners of the source triangle that produce `position`.
    pub(crate) weights: [f64; 3],
}

impl ClippedVertex {
    fn corner(position: ClipVertex, corner: usize) -> Self {
        let mut weights = [0.0; 3];
        weights[corner] = 1.0;
        Self {
            position: position.map(f64::from),
            weights,
        }
    }

    #[inline]
    pub(crate) fn w(&self) -> f64 {
        self.position[3]
    }

    fn lerp(&self, other: &Self, t: f64) -> Self {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self {
            position: core::array::from_fn(|i| mix(self.position[i], other.position[i])),
            weights: core::array::from_fn(|i| mix(self.weights[i], other.weights[i])),
        }
    }
}

/// The pieces of a triangle that lie in front of the near plane.
pub(crate) type ClippedTriangles = SmallVec<[[ClippedVertex; 3]; 2]>;

/// Clip a triangle against `w >= W_EPSILON`.
///
/// Returns no pieces if the triangle lies entirely behind the plane, the triangle itself if it
/// lies entirely in front, and otherwise one or two pieces that keep the input winding.
pub(crate) fn clip_near(corners: [ClipVertex; 3]) -> ClippedTriangles {
    let input: [ClippedVertex; 3] = core::array::from_fn(|i| ClippedVertex::corner(corners[i], i));

    if input.iter().all(|v| v.w() >= W_EPSILON) {
        let mut pieces = ClippedTriangles::new();
        pieces.push(input);
        return pieces;
    }

    let mut polygon: SmallVec<[ClippedVertex; 4]> = SmallVec::new();
    for (i, current) in input.iter().enumerate() {
        let next = &input[(i + 1) % 3];
        let d_current = current.w() - W_EPSILON;
        let d_next = next.w() - W_EPSILON;

        if d_current >= 0.0 {
            polygon.push(*current);
        }
        if (d_current >= 0.0) != (d_next >= 0.0) {
            // Always interpolate from the visible end, so that two triangles sharing this
            // edge get bit-identical crossings.
            let (inside, outside, d_inside, d_outside) = if d_current >= 0.0 {
                (current, next, d_current, d_next)
            } else {
                (next, current, d_next, d_current)
            };
            let t = d_inside / (d_inside - d_outside);
            let mut crossing = inside.lerp(outside, t);
            // Pin the crossing exactly onto the plane.
            crossing.position[3] = W_EPSILON;
            polygon.push(crossing);
        }
    }

    let mut pieces = ClippedTriangles::new();
    for i in 1..polygon.len().saturating_sub(1) {
        pieces.push([polygon[0], polygon[i], polygon[i + 1]]);
    }
    pieces
}

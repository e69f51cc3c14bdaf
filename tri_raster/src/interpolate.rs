// Copyright 2025 the Tri Raster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perspective-correct barycentrics and depth of a covered pixel.

use crate::buffers::Fragment;
use crate::setup::ScreenTriangle;

/// Turn the edge values of a covered pixel into a candidate fragment.
///
/// `edge_values` are the oriented edge functions of `triangle` at the pixel centre. Returns
/// `None` if the interpolated depth lies outside `[-1, 1]`.
pub(crate) fn interpolate(triangle: &ScreenTriangle, edge_values: [i128; 3]) -> Option<Fragment> {
    let area = triangle.area as f64;

    // Screen-space weights divided by w, then renormalized.
    let mut weights: [f64; 3] =
        core::array::from_fn(|i| edge_values[i] as f64 / area / triangle.vertices[i].w());
    let sum: f64 = weights.iter().sum();
    if !sum.is_finite() || sum <= 0.0 {
        return None;
    }
    for weight in &mut weights {
        *weight /= sum;
    }

    // Depth mixes the NDC depths of the corners with the same weights as any attribute.
    let mut depth = 0.0;
    let mut barycentric = [0.0_f64; 3];
    for (weight, vertex) in weights.iter().zip(&triangle.vertices) {
        depth += weight * (vertex.position[2] / vertex.w());
        for (b, source) in barycentric.iter_mut().zip(vertex.weights) {
            *b += weight * source;
        }
    }

    if !(-1.0..=1.0).contains(&depth) {
        return None;
    }

    Some(Fragment {
        triangle_id: triangle.id,
        depth: depth as f32,
        barycentric: barycentric.map(|b| b as f32),
    })
}

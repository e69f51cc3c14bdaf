// Copyright 2025 the Tri Raster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Triangle setup: projection, snapping, culling and bounding boxes.

use crate::clip::{ClippedVertex, clip_near};
use crate::coverage::{EdgeFunction, SUBPIXEL_HALF, SUBPIXEL_ONE, SnappedPoint};
use crate::mesh::ClipVertex;
use crate::region::PixelRect;
use crate::settings::FaceCulling;
use smallvec::SmallVec;

/// The largest magnitude of a snapped coordinate.
///
/// Products of two coordinates have to fit into an `i128` with room to spare, and the
/// coordinates themselves have to be exactly representable as `f64` before rounding.
const MAX_SNAPPED: f64 = (1_u64 << 52) as f64;

/// A triangle, or a piece of one, ready for the coverage test.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScreenTriangle {
    /// The index of the source triangle in the mesh.
    pub(crate) id: i32,
    /// The pixels whose centres may be covered, clamped to the image.
    pub(crate) bbox: PixelRect,
    /// `edges[i]` is the edge opposite vertex `i`, oriented so the interior is positive.
    pub(crate) edges: [EdgeFunction; 3],
    /// Twice the screen-space area in squared sub-pixel units. Always positive.
    pub(crate) area: i128,
    /// The clip-space corners of this piece.
    pub(crate) vertices: [ClippedVertex; 3],
}

/// The screen-space pieces of one triangle.
pub(crate) type ScreenTriangles = SmallVec<[ScreenTriangle; 2]>;

/// Project a triangle onto a `width × height` image.
///
/// The triangle is first clipped against the near plane. Pieces that are degenerate after
/// snapping, culled, or that don't cover any pixel centre of the image are dropped.
pub(crate) fn setup_triangle(
    id: i32,
    corners: [ClipVertex; 3],
    width: u16,
    height: u16,
    culling: FaceCulling,
) -> ScreenTriangles {
    let mut triangles = ScreenTriangles::new();

    let pieces = clip_near(corners);
    if pieces.is_empty() {
        log::trace!("triangle {id} lies behind the near plane");
    }

    for vertices in pieces {
        let Some(points) = snap(&vertices, width, height) else {
            log::warn!("triangle {id} exceeds the representable screen range and is dropped");
            continue;
        };

        let area = signed_area(&points);
        if area == 0 {
            log::trace!("triangle {id} is degenerate");
            continue;
        }

        // Screen space keeps the orientation of NDC, where counter-clockwise is front.
        let front_facing = area < 0;
        if culling.culls(front_facing) {
            log::trace!("triangle {id} is culled");
            continue;
        }

        let Some(bbox) = pixel_bounds(&points, width, height) else {
            log::trace!("triangle {id} covers no pixel centre of the image");
            continue;
        };

        let flip = area < 0;
        let edges = core::array::from_fn(|i| {
            EdgeFunction::new(points[(i + 1) % 3], points[(i + 2) % 3], flip)
        });

        triangles.push(ScreenTriangle {
            id,
            bbox,
            edges,
            area: area.abs(),
            vertices,
        });
    }

    triangles
}

/// Map clip-space vertices to the sub-pixel grid of the image.
///
/// Returns `None` if any coordinate is not finite or out of range.
fn snap(vertices: &[ClippedVertex; 3], width: u16, height: u16) -> Option<[SnappedPoint; 3]> {
    let scale_x = f64::from(width) * 0.5 * SUBPIXEL_ONE as f64;
    let scale_y = f64::from(height) * 0.5 * SUBPIXEL_ONE as f64;

    let mut points = [[0_i64; 2]; 3];
    for (point, vertex) in points.iter_mut().zip(vertices) {
        let [x, y, _, w] = vertex.position;
        let screen = [(x / w + 1.0) * scale_x, (y / w + 1.0) * scale_y];
        for (coord, value) in point.iter_mut().zip(screen) {
            let snapped = value.round();
            if !snapped.is_finite() || snapped.abs() > MAX_SNAPPED {
                return None;
            }
            *coord = snapped as i64;
        }
    }

    Some(points)
}

/// `(v2 - v0) × (v1 - v0)`, which is the value of every edge function at its opposite vertex.
fn signed_area(points: &[SnappedPoint; 3]) -> i128 {
    let [v0, v1, v2] = points.map(|p| p.map(i128::from));
    (v2[0] - v0[0]) * (v1[1] - v0[1]) - (v2[1] - v0[1]) * (v1[0] - v0[0])
}

/// The pixels whose centres lie in the bounding box of the points, clamped to the image.
fn pixel_bounds(points: &[SnappedPoint; 3], width: u16, height: u16) -> Option<PixelRect> {
    let span = |axis: usize, size: u16| {
        let min = points.iter().map(|p| p[axis]).min().unwrap_or(0);
        let max = points.iter().map(|p| p[axis]).max().unwrap_or(0);
        // First and last pixel whose centre is inside `[min, max]`.
        let first = (min - SUBPIXEL_HALF + SUBPIXEL_ONE - 1).div_euclid(SUBPIXEL_ONE);
        let last = (max - SUBPIXEL_HALF).div_euclid(SUBPIXEL_ONE);
        let first = first.max(0);
        let last = last.min(i64::from(size) - 1);
        // Both ends lie within `0..size` once the span is non-empty.
        (first <= last).then(|| (first as u16, last as u16 + 1))
    };

    let (x0, x1) = span(0, width)?;
    let (y0, y1) = span(1, height)?;
    Some(PixelRect::new(x0, y0, x1, y1))
}

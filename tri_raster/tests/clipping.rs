// Copyright 2025 the Tri Raster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Triangles with vertices behind the camera.

use crate::util::{Scene, assert_barycentrics_valid, coverage_counts, exact_barycentrics};
use tri_raster::RasterBuffers;

/// A triangle with one vertex behind the eye, at `w = -1`.
fn crossing() -> (Scene, [[f32; 4]; 3]) {
    let mut scene = Scene::new(32, 32);
    let corners = [
        [-0.6, -0.6, 0.0, 1.0],
        [0.6, -0.6, 0.0, 1.0],
        [0.0, 0.5, 0.0, -1.0],
    ];
    let ids = corners.map(|c| scene.clip_vertex(c));
    scene.triangle(ids[0], ids[1], ids[2]);
    (scene, corners)
}

#[test]
fn visible_part_is_rasterized() {
    let (scene, _) = crossing();
    let buffers = scene.render();

    assert!(coverage_counts(&buffers, 1)[0] > 20);
    assert_barycentrics_valid(&buffers);
}

#[test]
fn barycentrics_refer_to_the_original_vertices() {
    let (scene, corners) = crossing();
    let buffers = scene.render();

    for y in 0..scene.height {
        for x in 0..scene.width {
            let Some(fragment) = buffers.fragment(x, y, 0) else {
                continue;
            };
            let b = fragment.barycentric.map(f64::from);
            assert!(b.iter().all(|&b| b > -1e-6), "pixel ({x}, {y}): {b:?}");

            // The weighted clip-space point lies in front of the eye and projects onto the
            // pixel centre.
            let point: [f64; 4] =
                core::array::from_fn(|c| (0..3).map(|k| b[k] * f64::from(corners[k][c])).sum());
            assert!(point[3] > 0.0);
            let sx = (point[0] / point[3] + 1.0) * 16.0;
            let sy = (point[1] / point[3] + 1.0) * 16.0;
            assert!((sx - (f64::from(x) + 0.5)).abs() < 1e-2, "pixel ({x}, {y}): {sx}");
            assert!((sy - (f64::from(y) + 0.5)).abs() < 1e-2, "pixel ({x}, {y}): {sy}");

            let exact = exact_barycentrics(&scene, corners, x, y);
            for (b, e) in b.iter().zip(exact) {
                assert!((b - e).abs() < 1e-3);
            }
        }
    }
}

#[test]
fn triangle_behind_the_eye_is_invisible() {
    let mut scene = Scene::new(16, 16);
    let ids = [
        [-0.5, -0.5, 0.0, -1.0],
        [0.5, -0.5, 0.0, -1.0],
        [0.0, 0.5, 0.0, -2.0],
    ]
    .map(|c| scene.clip_vertex(c));
    scene.triangle(ids[0], ids[1], ids[2]);
    // Touching the eye plane with a single vertex.
    let ids = [
        [-0.5, -0.5, 0.0, 0.0],
        [0.5, -0.5, 0.0, -1.0],
        [0.0, 0.5, 0.0, -1.0],
    ]
    .map(|c| scene.clip_vertex(c));
    scene.triangle(ids[0], ids[1], ids[2]);

    assert_eq!(scene.render(), RasterBuffers::with_size(16, 16, 1).unwrap());
}

#[test]
fn near_plane_crossing_is_seamless() {
    // A quad whose far edge is in front of the eye and whose near edge is behind it.
    let mut scene = Scene::new(32, 32);
    let a = scene.clip_vertex([-1.0, -0.5, 0.0, 1.0]);
    let b = scene.clip_vertex([1.0, -0.5, 0.0, 1.0]);
    let c = scene.clip_vertex([3.0, 1.5, 0.0, -1.0]);
    let d = scene.clip_vertex([-3.0, 1.5, 0.0, -1.0]);
    scene.triangle(a, b, c);
    scene.triangle(a, c, d);

    let buffers = scene.render();
    let counts = coverage_counts(&buffers, 2);
    assert!(counts[0] > 0 && counts[1] > 0);

    // The visible part projects onto every row above NDC y = -0.5, across the whole width.
    for y in 0..32 {
        for x in 0..32 {
            assert_eq!(buffers.fragment(x, y, 0).is_some(), y >= 8, "pixel ({x}, {y})");
        }
    }
}

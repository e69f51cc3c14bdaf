// Copyright 2025 the Tri Raster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keeping more than one depth layer per pixel.

use crate::util::{Scene, assert_barycentrics_valid};
use tri_raster::{CLEAR_DEPTH, RasterSettings};

fn settings(num_layers: u16) -> RasterSettings {
    RasterSettings {
        num_layers,
        ..RasterSettings::default()
    }
}

/// Three triangles covering the whole 8 × 8 image, at the given depths.
fn stacked(depths: [f32; 3]) -> Scene {
    let mut scene = Scene::new(8, 8);
    for depth in depths {
        scene.flat_triangle([(0.0, 0.0), (16.0, 0.0), (0.0, 16.0)], depth);
    }
    scene
}

#[test]
fn two_layers_keep_the_two_nearest() {
    // Triangle 0 is farthest, 1 nearest, 2 in between.
    let buffers = stacked([0.6, -0.4, 0.1]).render_with(settings(2));

    for y in 0..8 {
        for x in 0..8 {
            let nearest = buffers.fragment(x, y, 0).unwrap();
            let second = buffers.fragment(x, y, 1).unwrap();
            assert_eq!(nearest.triangle_id, 1);
            assert_eq!(second.triangle_id, 2);
            assert!(nearest.depth < second.depth);
        }
    }
    assert_barycentrics_valid(&buffers);
}

#[test]
fn extra_layers_stay_empty() {
    let buffers = stacked([0.6, -0.4, 0.1]).render_with(settings(4));

    let ids: Vec<_> = (0..4)
        .map(|layer| buffers.fragment(5, 2, layer).map(|f| f.triangle_id))
        .collect();
    assert_eq!(ids, [Some(1), Some(2), Some(0), None]);
    assert_eq!(buffers.slot(5, 2, 3).unwrap().depth, CLEAR_DEPTH);
}

#[test]
fn layers_are_stored_one_after_another() {
    let buffers = stacked([0.6, -0.4, 0.1]).render_with(settings(3));
    let pixels = 64;

    assert_eq!(buffers.triangle_ids().len(), 3 * pixels);
    assert_eq!(buffers.barycentric_coordinates().len(), 9 * pixels);
    for (layer, id) in [1, 2, 0].into_iter().enumerate() {
        let ids = &buffers.triangle_ids()[layer * pixels..(layer + 1) * pixels];
        assert!(ids.iter().all(|&i| i == id));
    }

    // Pixel (3, 1) of layer 2.
    let slot = 2 * pixels + 8 + 3;
    let depth = buffers.z_buffer()[slot];
    assert!((depth - 0.6).abs() < 1e-6);
    let bary = &buffers.barycentric_coordinates()[3 * slot..3 * slot + 3];
    assert_eq!(bary, &buffers.fragment(3, 1, 2).unwrap().barycentric);
}

#[test]
fn partial_overlap_fills_layers_per_pixel() {
    let mut scene = Scene::new(8, 8);
    // Left half, near.
    let left = scene.flat_triangle([(0.0, -8.0), (4.0, -8.0), (4.0, 24.0)], -0.5);
    let left_rest = scene.flat_triangle([(0.0, -8.0), (4.0, 24.0), (0.0, 24.0)], -0.5);
    // Whole image, far.
    let far = scene.flat_triangle([(0.0, 0.0), (16.0, 0.0), (0.0, 16.0)], 0.5);

    let buffers = scene.render_with(settings(2));
    for y in 0..8 {
        for x in 0..8 {
            let first = buffers.fragment(x, y, 0).unwrap().triangle_id;
            let second = buffers.fragment(x, y, 1).map(|f| f.triangle_id);
            if x < 4 {
                assert!(first == left || first == left_rest);
                assert_eq!(second, Some(far));
            } else {
                assert_eq!(first, far);
                assert_eq!(second, None);
            }
        }
    }
}

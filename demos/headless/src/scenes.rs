// Copyright 2025 the Tri Raster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Meshes in clip space.

use glam::{Mat4, Vec3, Vec4};

use crate::SceneKind;

/// Flat clip-space vertices and triangle indices, ready for [`tri_raster::Mesh::new`].
pub(crate) struct Scene {
    pub(crate) vertices: Vec<f32>,
    pub(crate) triangles: Vec<i32>,
}

impl Scene {
    fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    fn push_vertex(&mut self, position: Vec4) -> i32 {
        let index = (self.vertices.len() / 4) as i32;
        self.vertices.extend_from_slice(&position.to_array());
        index
    }

    fn push_triangle(&mut self, corners: [Vec4; 3]) {
        for corner in corners {
            let index = self.push_vertex(corner);
            self.triangles.push(index);
        }
    }
}

pub(crate) fn build(kind: SceneKind, distance: f32, width: u16, height: u16) -> Scene {
    match kind {
        SceneKind::Quad => quad(),
        SceneKind::Overlap => overlap(),
        SceneKind::Cube => cube(distance, f32::from(width) / f32::from(height.max(1))),
    }
}

fn quad() -> Scene {
    let mut scene = Scene::new();
    for (x, y) in [(-0.8, -0.8), (0.8, -0.8), (0.8, 0.8), (-0.8, 0.8)] {
        scene.push_vertex(Vec4::new(x, y, 0.0, 1.0));
    }
    scene.triangles.extend_from_slice(&[0, 1, 2, 0, 2, 3]);
    scene
}

/// Three triangles that overlap each other at different depths.
///
/// Render with several layers to see the hidden ones.
fn overlap() -> Scene {
    let mut scene = Scene::new();
    for (offset, depth) in [(-0.3, 0.5), (0.0, -0.2), (0.3, 0.1)] {
        scene.push_triangle([
            Vec4::new(-0.7 + offset, -0.6, depth, 1.0),
            Vec4::new(0.5 + offset, -0.6 - offset, depth, 1.0),
            Vec4::new(offset, 0.7, depth, 1.0),
        ]);
    }
    scene
}

/// A cube around the origin, wound counter-clockwise when seen from the outside.
fn cube(distance: f32, aspect: f32) -> Scene {
    const CORNERS: [[f32; 3]; 8] = [
        [-1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0],
        [1.0, 1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [1.0, -1.0, 1.0],
        [1.0, 1.0, 1.0],
        [-1.0, 1.0, 1.0],
    ];
    const FACES: [[i32; 4]; 6] = [
        [4, 5, 6, 7],
        [1, 0, 3, 2],
        [5, 1, 2, 6],
        [0, 4, 7, 3],
        [7, 6, 2, 3],
        [0, 1, 5, 4],
    ];

    let eye = Vec3::new(0.6, 0.5, 1.0).normalize() * distance;
    let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
    let projection = Mat4::perspective_rh_gl(60_f32.to_radians(), aspect, 0.1, 20.0);
    let model = Mat4::from_rotation_y(0.3);
    let transform = projection * view * model;

    let mut scene = Scene::new();
    for corner in CORNERS {
        scene.push_vertex(transform * Vec3::from(corner).extend(1.0));
    }
    for [a, b, c, d] in FACES {
        scene.triangles.extend_from_slice(&[a, b, c, a, c, d]);
    }
    scene
}

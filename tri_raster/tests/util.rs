// Copyright 2025 the Tri Raster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use tri_raster::{Mesh, RasterBuffers, RasterSettings, Rasterizer};

/// A mesh under construction, with vertices given in pixel coordinates.
#[derive(Debug, Clone)]
pub(crate) struct Scene {
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) vertices: Vec<f32>,
    pub(crate) triangles: Vec<i32>,
}

impl Scene {
    pub(crate) fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            vertices: vec![],
            triangles: vec![],
        }
    }

    /// Add a clip-space vertex and return its index.
    pub(crate) fn clip_vertex(&mut self, vertex: [f32; 4]) -> i32 {
        let index = (self.vertices.len() / 4) as i32;
        self.vertices.extend_from_slice(&vertex);
        index
    }

    /// Add a vertex at pixel position `(x, y)` with NDC depth `z`, scaled by `w`.
    pub(crate) fn vertex(&mut self, x: f32, y: f32, z: f32, w: f32) -> i32 {
        let ndc_x = 2.0 * x / f32::from(self.width) - 1.0;
        let ndc_y = 2.0 * y / f32::from(self.height) - 1.0;
        self.clip_vertex([ndc_x * w, ndc_y * w, z * w, w])
    }

    pub(crate) fn triangle(&mut self, a: i32, b: i32, c: i32) -> i32 {
        let index = (self.triangles.len() / 3) as i32;
        self.triangles.extend_from_slice(&[a, b, c]);
        index
    }

    /// Add a triangle with its own three vertices, all at depth `z` and `w = 1`.
    pub(crate) fn flat_triangle(&mut self, corners: [(f32, f32); 3], z: f32) -> i32 {
        let [a, b, c] = corners.map(|(x, y)| self.vertex(x, y, z, 1.0));
        self.triangle(a, b, c)
    }

    pub(crate) fn mesh(&self) -> Mesh<'_> {
        Mesh::new(&self.vertices, &self.triangles).unwrap()
    }

    pub(crate) fn render(&self) -> RasterBuffers {
        self.render_with(RasterSettings::default())
    }

    pub(crate) fn render_with(&self, settings: RasterSettings) -> RasterBuffers {
        let mut buffers = RasterBuffers::new();
        Rasterizer::new_with(settings)
            .unwrap()
            .rasterize(&self.mesh(), self.width, self.height, &mut buffers)
            .unwrap();
        buffers
    }
}

/// The triangle id of every pixel of `layer`, with `None` for empty pixels.
pub(crate) fn id_image(buffers: &RasterBuffers, layer: u16) -> Vec<Option<i32>> {
    let mut ids = vec![];
    for y in 0..buffers.height() {
        for x in 0..buffers.width() {
            ids.push(buffers.fragment(x, y, layer).map(|f| f.triangle_id));
        }
    }
    ids
}

/// How many pixels each triangle of a single-layer rendering covers.
pub(crate) fn coverage_counts(buffers: &RasterBuffers, triangle_count: usize) -> Vec<usize> {
    let mut counts = vec![0; triangle_count];
    for id in id_image(buffers, 0).into_iter().flatten() {
        counts[id as usize] += 1;
    }
    counts
}

/// Render every triangle of `scene` on its own and count how often each pixel is covered.
pub(crate) fn overlap_counts(scene: &Scene) -> Vec<u32> {
    let mut counts = vec![0; usize::from(scene.width) * usize::from(scene.height)];
    for triangle in scene.triangles.chunks_exact(3) {
        let single = Scene {
            triangles: triangle.to_vec(),
            ..scene.clone()
        };
        for (count, id) in counts.iter_mut().zip(id_image(&single.render(), 0)) {
            *count += u32::from(id.is_some());
        }
    }
    counts
}

pub(crate) fn assert_barycentrics_valid(buffers: &RasterBuffers) {
    for layer in 0..buffers.layers() {
        for y in 0..buffers.height() {
            for x in 0..buffers.width() {
                let Some(fragment) = buffers.fragment(x, y, layer) else {
                    continue;
                };
                let sum: f32 = fragment.barycentric.iter().sum();
                assert!(
                    (sum - 1.0).abs() < 1e-5,
                    "barycentrics at ({x}, {y}, {layer}) sum to {sum}"
                );
            }
        }
    }
}

/// The weights of the point on the clip-space triangle `corners` that projects onto the
/// pixel centre of `(x, y)`, found by solving the projection directly.
pub(crate) fn exact_barycentrics(scene: &Scene, corners: [[f32; 4]; 3], x: u16, y: u16) -> [f64; 3] {
    let nx = 2.0 * (f64::from(x) + 0.5) / f64::from(scene.width) - 1.0;
    let ny = 2.0 * (f64::from(y) + 0.5) / f64::from(scene.height) - 1.0;
    let c = corners.map(|c| c.map(f64::from));

    // Rows: x - nx * w = 0, y - ny * w = 0, sum of weights = 1.
    let m = [
        [c[0][0] - nx * c[0][3], c[1][0] - nx * c[1][3], c[2][0] - nx * c[2][3]],
        [c[0][1] - ny * c[0][3], c[1][1] - ny * c[1][3], c[2][1] - ny * c[2][3]],
        [1.0, 1.0, 1.0],
    ];
    let det = |m: &[[f64; 3]; 3]| {
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    };
    let d = det(&m);

    core::array::from_fn(|k| {
        let mut mk = m;
        for (row, rhs) in mk.iter_mut().zip([0.0, 0.0, 1.0]) {
            row[k] = rhs;
        }
        det(&mk) / d
    })
}

// Copyright 2025 the Tri Raster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::Criterion;
use rand::prelude::StdRng;
use rand::{Rng, SeedableRng};
use tri_raster::{Mesh, RasterBuffers, RasterSettings, Rasterizer};

const SEED: [u8; 32] = [0; 32];
const WIDTH: u16 = 512;
const HEIGHT: u16 = 512;

/// A closed grid of `cells × cells` quads covering the image, with jittered depth.
fn grid(cells: usize) -> (Vec<f32>, Vec<i32>) {
    let mut rng = StdRng::from_seed(SEED);
    let mut vertices = vec![];
    let mut triangles = vec![];

    for j in 0..=cells {
        for i in 0..=cells {
            let x = 2.0 * i as f32 / cells as f32 - 1.0;
            let y = 2.0 * j as f32 / cells as f32 - 1.0;
            vertices.extend_from_slice(&[x, y, rng.gen_range(-0.5..0.5), 1.0]);
        }
    }
    let at = |i: usize, j: usize| (j * (cells + 1) + i) as i32;
    for j in 0..cells {
        for i in 0..cells {
            triangles.extend_from_slice(&[at(i, j), at(i + 1, j), at(i + 1, j + 1)]);
            triangles.extend_from_slice(&[at(i, j), at(i + 1, j + 1), at(i, j + 1)]);
        }
    }

    (vertices, triangles)
}

/// Large triangles at random depths, overlapping each other many times.
fn overlapping(count: usize) -> (Vec<f32>, Vec<i32>) {
    let mut rng = StdRng::from_seed(SEED);
    let mut vertices = vec![];
    for _ in 0..3 * count {
        let w = rng.gen_range(1.0..4.0);
        vertices.extend_from_slice(&[
            rng.gen_range(-1.2..1.2) * w,
            rng.gen_range(-1.2..1.2) * w,
            rng.gen_range(-1.0..1.0) * w,
            w,
        ]);
    }
    let triangles = (0..3 * count as i32).collect();

    (vertices, triangles)
}

pub fn raster(c: &mut Criterion) {
    let mut g = c.benchmark_group("raster");

    macro_rules! raster_single {
        ($name:ident, $mesh:expr, $layers:expr, $threads:expr) => {
            let (vertices, triangles) = $mesh;
            let mesh = Mesh::new(&vertices, &triangles).unwrap();
            let rasterizer = Rasterizer::new_with(RasterSettings {
                num_layers: $layers,
                num_threads: $threads,
                ..RasterSettings::default()
            })
            .unwrap();

            g.bench_function(stringify!($name), |b| {
                let mut buffers = RasterBuffers::new();
                b.iter(|| {
                    buffers.clear();
                    rasterizer
                        .rasterize(&mesh, WIDTH, HEIGHT, &mut buffers)
                        .unwrap();
                })
            });
        };
    }

    raster_single!(grid_small_triangles, grid(128), 1, 0);
    raster_single!(grid_large_triangles, grid(8), 1, 0);
    raster_single!(overlapping_1_layer, overlapping(200), 1, 0);
    raster_single!(overlapping_4_layers, overlapping(200), 4, 0);
    #[cfg(feature = "multithreading")]
    {
        raster_single!(grid_small_triangles_mt, grid(128), 1, 4);
        raster_single!(overlapping_4_layers_mt, overlapping(200), 4, 4);
    }
}

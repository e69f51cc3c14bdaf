// Copyright 2025 the Tri Raster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::dispatch::{Dispatcher, TileBins, resolve_region};
use crate::error::Result;
use crate::mesh::Mesh;
use crate::region::Regions;
use crate::settings::FaceCulling;
use crate::setup::{ScreenTriangle, setup_triangle};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Sets up triangles and resolves tiles on a dedicated rayon thread pool.
///
/// Triangle setup is independent per triangle, and every tile owns a disjoint part of the
/// output buffers, so neither stage needs any synchronization beyond rayon's own.
#[derive(Debug)]
pub(crate) struct MultiThreadedDispatcher {
    thread_pool: ThreadPool,
}

impl MultiThreadedDispatcher {
    pub(crate) fn new(num_threads: u16) -> Result<Self> {
        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(usize::from(num_threads))
            .thread_name(|index| format!("tri_raster-{index}"))
            .build()?;

        Ok(Self { thread_pool })
    }
}

impl Dispatcher for MultiThreadedDispatcher {
    fn setup(
        &self,
        mesh: &Mesh<'_>,
        width: u16,
        height: u16,
        culling: FaceCulling,
    ) -> Vec<ScreenTriangle> {
        // Collecting an indexed parallel iterator keeps mesh order.
        let pieces: Vec<_> = self.thread_pool.install(|| {
            (0..mesh.triangle_count())
                .into_par_iter()
                .map(|index| {
                    setup_triangle(index as i32, mesh.corners(index), width, height, culling)
                })
                .collect()
        });

        pieces.into_iter().flatten().collect()
    }

    fn resolve(&self, triangles: &[ScreenTriangle], bins: &TileBins, regions: &mut Regions<'_>) {
        self.thread_pool.install(|| {
            regions.update_regions_par(|region| {
                let bin = bins.get(region.index);
                resolve_region(region, triangles, bin);
            });
        });
    }
}

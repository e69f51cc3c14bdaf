// Copyright 2025 the Tri Raster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::dispatch::{Dispatcher, TileBins, resolve_region};
use crate::mesh::Mesh;
use crate::region::Regions;
use crate::settings::FaceCulling;
use crate::setup::{ScreenTriangle, setup_triangle};

/// Runs every stage on the calling thread.
#[derive(Debug, Default)]
pub(crate) struct SingleThreadedDispatcher;

impl Dispatcher for SingleThreadedDispatcher {
    fn setup(
        &self,
        mesh: &Mesh<'_>,
        width: u16,
        height: u16,
        culling: FaceCulling,
    ) -> Vec<ScreenTriangle> {
        (0..mesh.triangle_count())
            .flat_map(|index| {
                // The mesh guarantees that triangle indices fit into an i32.
                setup_triangle(index as i32, mesh.corners(index), width, height, culling)
            })
            .collect()
    }

    fn resolve(&self, triangles: &[ScreenTriangle], bins: &TileBins, regions: &mut Regions<'_>) {
        regions.update_regions(|region| {
            let bin = bins.get(region.index);
            resolve_region(region, triangles, bin);
        });
    }
}

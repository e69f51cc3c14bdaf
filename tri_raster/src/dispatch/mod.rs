// Copyright 2025 the Tri Raster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(feature = "multithreading")]
pub(crate) mod multi_threaded;
pub(crate) mod single_threaded;

use crate::coverage::for_each_covered;
use crate::depth::resolve;
use crate::interpolate::interpolate;
use crate::mesh::Mesh;
use crate::region::{Region, Regions, TileGrid};
use crate::settings::FaceCulling;
use crate::setup::ScreenTriangle;
use core::fmt::Debug;

/// The two parallelizable stages of a rasterization call.
///
/// Implementations may split the work however they like, but the result must be the same as
/// setting up and resolving every triangle one after the other, in mesh order.
pub(crate) trait Dispatcher: Debug + Send + Sync {
    /// Set up every triangle of the mesh, keeping mesh order.
    fn setup(
        &self,
        mesh: &Mesh<'_>,
        width: u16,
        height: u16,
        culling: FaceCulling,
    ) -> Vec<ScreenTriangle>;

    /// Resolve the binned triangles into every region.
    fn resolve(&self, triangles: &[ScreenTriangle], bins: &TileBins, regions: &mut Regions<'_>);
}

/// For every tile, the indices of the screen triangles whose bounding box touches it.
///
/// Each bin lists its triangles in ascending order, which is submission order.
#[derive(Debug)]
pub(crate) struct TileBins {
    bins: Vec<Vec<usize>>,
}

impl TileBins {
    pub(crate) fn new(grid: &TileGrid, triangles: &[ScreenTriangle]) -> Self {
        let mut bins = vec![Vec::new(); grid.tile_count()];

        for (index, triangle) in triangles.iter().enumerate() {
            let (tx0, ty0, tx1, ty1) = grid.tiles_touching(&triangle.bbox);
            for ty in ty0..=ty1 {
                for tx in tx0..=tx1 {
                    bins[ty * grid.tiles_x + tx].push(index);
                }
            }
        }

        Self { bins }
    }

    /// The triangles binned into tile `index`.
    pub(crate) fn get(&self, index: usize) -> &[usize] {
        self.bins.get(index).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Run coverage, interpolation and depth resolution for every triangle binned into `region`.
pub(crate) fn resolve_region(region: &mut Region<'_>, triangles: &[ScreenTriangle], bin: &[usize]) {
    for &index in bin {
        let triangle = &triangles[index];
        let rect = triangle.bbox.intersect(&region.rect);

        for_each_covered(&triangle.edges, rect, |x, y, edge_values| {
            if let Some(fragment) = interpolate(triangle, edge_values) {
                resolve(&mut region.pixel(x, y), fragment);
            }
        });
    }
}

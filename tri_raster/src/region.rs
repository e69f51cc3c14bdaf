// Copyright 2025 the Tri Raster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Splitting the output buffers into tile regions that can be written concurrently.

use crate::buffers::Fragment;
use crate::depth::LayerSlots;

/// The width of a tile in pixels.
pub(crate) const TILE_WIDTH: u16 = 64;
/// The height of a tile in pixels.
pub(crate) const TILE_HEIGHT: u16 = 16;

/// A half-open rectangle of pixels, `[x0, x1) × [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PixelRect {
    pub(crate) x0: u16,
    pub(crate) y0: u16,
    pub(crate) x1: u16,
    pub(crate) y1: u16,
}

impl PixelRect {
    pub(crate) fn new(x0: u16, y0: u16, x1: u16, y1: u16) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    pub(crate) fn intersect(&self, other: &Self) -> Self {
        Self {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        }
    }

    pub(crate) fn width(&self) -> usize {
        usize::from(self.x1.saturating_sub(self.x0))
    }

    pub(crate) fn height(&self) -> usize {
        usize::from(self.y1.saturating_sub(self.y0))
    }
}

/// The tile grid laid over an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TileGrid {
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) tiles_x: usize,
    pub(crate) tiles_y: usize,
}

impl TileGrid {
    pub(crate) fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            tiles_x: usize::from(width).div_ceil(usize::from(TILE_WIDTH)),
            tiles_y: usize::from(height).div_ceil(usize::from(TILE_HEIGHT)),
        }
    }

    pub(crate) fn tile_count(&self) -> usize {
        self.tiles_x * self.tiles_y
    }

    /// The pixels covered by tile `(tx, ty)`, cut off at the image border.
    pub(crate) fn tile_rect(&self, tx: usize, ty: usize) -> PixelRect {
        // Tile origins are below the image size, which fits in a u16.
        let x0 = (tx * usize::from(TILE_WIDTH)) as u16;
        let y0 = (ty * usize::from(TILE_HEIGHT)) as u16;
        PixelRect::new(
            x0,
            y0,
            x0.saturating_add(TILE_WIDTH).min(self.width),
            y0.saturating_add(TILE_HEIGHT).min(self.height),
        )
    }

    /// The inclusive range of tiles touched by `rect`, as `(tx0, ty0, tx1, ty1)`.
    pub(crate) fn tiles_touching(&self, rect: &PixelRect) -> (usize, usize, usize, usize) {
        let tw = usize::from(TILE_WIDTH);
        let th = usize::from(TILE_HEIGHT);
        (
            usize::from(rect.x0) / tw,
            usize::from(rect.y0) / th,
            (usize::from(rect.x1) - 1) / tw,
            (usize::from(rect.y1) - 1) / th,
        )
    }
}

/// The output buffers, split into one [`Region`] per tile.
#[derive(Debug)]
pub(crate) struct Regions<'a> {
    regions: Vec<Region<'a>>,
}

impl<'a> Regions<'a> {
    /// Split layer-major output buffers into tile regions.
    ///
    /// The buffers must already have the sizes `RasterBuffers::ensure_size` gives them.
    pub(crate) fn new(
        grid: &TileGrid,
        layers: u16,
        triangle_ids: &'a mut [i32],
        z_buffer: &'a mut [f32],
        barycentric_coordinates: &'a mut [f32],
    ) -> Self {
        let layers = usize::from(layers);
        let ids = split_tiles(triangle_ids, grid, layers, 1);
        let depths = split_tiles(z_buffer, grid, layers, 1);
        let barys = split_tiles(barycentric_coordinates, grid, layers, 3);

        let regions = ids
            .into_iter()
            .zip(depths)
            .zip(barys)
            .enumerate()
            .map(|(index, ((ids, depths), barys))| Region {
                index,
                rect: grid.tile_rect(index % grid.tiles_x, index / grid.tiles_x),
                layers,
                ids,
                depths,
                barys,
            })
            .collect();

        Self { regions }
    }

    /// Apply the given function to each region. The functions will be applied
    /// in parallel in the current threadpool.
    #[cfg(feature = "multithreading")]
    pub(crate) fn update_regions_par(&mut self, func: impl Fn(&mut Region<'_>) + Send + Sync) {
        use rayon::iter::ParallelIterator;
        use rayon::prelude::IntoParallelRefMutIterator;

        self.regions.par_iter_mut().for_each(func);
    }

    /// Apply the given function to each region.
    pub(crate) fn update_regions(&mut self, func: impl FnMut(&mut Region<'_>)) {
        self.regions.iter_mut().for_each(func);
    }
}

/// Cut every row of every layer into tile-wide pieces and group the pieces by tile.
///
/// Within a tile, pieces are ordered by layer first and row second.
fn split_tiles<'a, T>(
    mut buffer: &'a mut [T],
    grid: &TileGrid,
    layers: usize,
    components: usize,
) -> Vec<Vec<&'a mut [T]>> {
    let width = usize::from(grid.width);
    let tile_width = usize::from(TILE_WIDTH);
    let row_advance = width * components;

    let mut tiles: Vec<Vec<&'a mut [T]>> = (0..grid.tile_count())
        .map(|_| Vec::with_capacity(layers * usize::from(TILE_HEIGHT)))
        .collect();

    for _ in 0..layers {
        for y in 0..usize::from(grid.height) {
            let next = core::mem::take(&mut buffer);
            let (mut row, tail) = next.split_at_mut(row_advance);
            buffer = tail;

            let ty = y / usize::from(TILE_HEIGHT);
            for tx in 0..grid.tiles_x {
                let piece_width = tile_width.min(width - tx * tile_width) * components;
                let next = core::mem::take(&mut row);
                let (head, rest) = next.split_at_mut(piece_width);
                row = rest;
                tiles[ty * grid.tiles_x + tx].push(head);
            }
        }
    }

    tiles
}

/// The pixels of one tile, across all layers of all output buffers.
#[derive(Debug)]
pub(crate) struct Region<'a> {
    /// The index of the tile in row-major tile order.
    pub(crate) index: usize,
    /// The pixels this region covers.
    pub(crate) rect: PixelRect,
    layers: usize,
    ids: Vec<&'a mut [i32]>,
    depths: Vec<&'a mut [f32]>,
    barys: Vec<&'a mut [f32]>,
}

impl<'a> Region<'a> {
    /// The layer slots of pixel `(x, y)`, in image coordinates.
    pub(crate) fn pixel(&mut self, x: u16, y: u16) -> PixelSlots<'_, 'a> {
        debug_assert!(x >= self.rect.x0 && x < self.rect.x1, "pixel outside of region");
        debug_assert!(y >= self.rect.y0 && y < self.rect.y1, "pixel outside of region");

        PixelSlots {
            row: usize::from(y - self.rect.y0),
            column: usize::from(x - self.rect.x0),
            region: self,
        }
    }
}

/// The layer slots of a single pixel inside a [`Region`].
#[derive(Debug)]
pub(crate) struct PixelSlots<'r, 'a> {
    region: &'r mut Region<'a>,
    row: usize,
    column: usize,
}

impl PixelSlots<'_, '_> {
    #[inline]
    fn row_index(&self, layer: usize) -> usize {
        layer * self.region.rect.height() + self.row
    }
}

impl LayerSlots for PixelSlots<'_, '_> {
    fn layers(&self) -> usize {
        self.region.layers
    }

    fn get(&self, layer: usize) -> Fragment {
        let row = self.row_index(layer);
        let c = self.column;
        let bary = &self.region.barys[row][3 * c..3 * c + 3];

        Fragment {
            triangle_id: self.region.ids[row][c],
            depth: self.region.depths[row][c],
            barycentric: [bary[0], bary[1], bary[2]],
        }
    }

    fn set(&mut self, layer: usize, fragment: Fragment) {
        let row = self.row_index(layer);
        let c = self.column;

        self.region.ids[row][c] = fragment.triangle_id;
        self.region.depths[row][c] = fragment.depth;
        self.region.barys[row][3 * c..3 * c + 3].copy_from_slice(&fragment.barycentric);
    }
}

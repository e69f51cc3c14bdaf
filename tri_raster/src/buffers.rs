// Copyright 2025 the Tri Raster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-pixel output state.

use crate::error::{Error, Result};

/// The depth of an empty slot, the far end of normalized device depth.
pub const CLEAR_DEPTH: f32 = 1.0;

/// The winning triangle of one pixel-layer slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    /// The zero-based index of the triangle in the mesh.
    pub triangle_id: i32,
    /// Normalized device depth in `[-1, 1)`; smaller is closer.
    pub depth: f32,
    /// Perspective-correct weights of the triangle's three vertices, summing to 1.
    pub barycentric: [f32; 3],
}

impl Fragment {
    /// The contents of a slot that no triangle has been written to.
    pub const EMPTY: Self = Self {
        triangle_id: 0,
        depth: CLEAR_DEPTH,
        barycentric: [0.0; 3],
    };

    /// Whether this slot holds a triangle.
    ///
    /// Triangle id 0 is a real triangle, so occupancy is decided by depth alone.
    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.depth < CLEAR_DEPTH
    }
}

/// The number of slots for an image, or an error if it doesn't fit in memory.
pub(crate) fn slot_count(width: u16, height: u16, layers: u16) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage { width, height });
    }
    if layers == 0 {
        return Err(Error::NoLayers);
    }

    usize::from(width)
        .checked_mul(usize::from(height))
        .and_then(|pixels| pixels.checked_mul(usize::from(layers)))
        .filter(|slots| slots.checked_mul(3).is_some_and(|n| n <= isize::MAX as usize))
        .ok_or(Error::OutputTooLarge {
            width,
            height,
            layers,
        })
}

/// Resize and clear the three output vectors, unless they already have the right sizes.
///
/// Vectors of the right size are left as they are, so results from a previous call act as
/// existing depth state. Returns whether anything was cleared.
pub(crate) fn ensure_size(
    slots: usize,
    triangle_ids: &mut Vec<i32>,
    z_buffer: &mut Vec<f32>,
    barycentric_coordinates: &mut Vec<f32>,
) -> bool {
    let mut cleared = false;
    cleared |= reset_if_mismatched(triangle_ids, slots, 0);
    cleared |= reset_if_mismatched(z_buffer, slots, CLEAR_DEPTH);
    cleared |= reset_if_mismatched(barycentric_coordinates, 3 * slots, 0.0);
    cleared
}

fn reset_if_mismatched<T: Copy>(buffer: &mut Vec<T>, len: usize, value: T) -> bool {
    if buffer.len() == len {
        return false;
    }
    reset(buffer, len, value);
    true
}

fn reset<T: Copy>(buffer: &mut Vec<T>, len: usize, value: T) {
    buffer.clear();
    buffer.resize(len, value);
}

/// Triangle ids, depths and barycentric coordinates for every pixel and layer of an image.
///
/// All three buffers are layer-major and row-major within a layer: the slot of pixel
/// `(x, y)` in `layer` is `layer * width * height + y * width + x`, and its barycentric
/// coordinates are the three values starting at three times that index.
///
/// Empty slots hold triangle id 0, depth [`CLEAR_DEPTH`] and zero barycentrics. Since 0 is
/// also a valid triangle id, whether a slot is covered must be read from its depth; see
/// [`Fragment::is_occupied`].
///
/// Buffers are reused across calls. They are only cleared when the image size or layer count
/// changes; otherwise each call resolves its triangles against whatever the buffers hold.
/// Call [`RasterBuffers::clear`] to start from an empty image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RasterBuffers {
    width: u16,
    height: u16,
    layers: u16,
    pub(crate) triangle_ids: Vec<i32>,
    pub(crate) z_buffer: Vec<f32>,
    pub(crate) barycentric_coordinates: Vec<f32>,
}

impl RasterBuffers {
    /// Create empty buffers. They are sized by the first call that uses them.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create buffers sized and cleared for the given image.
    pub fn with_size(width: u16, height: u16, layers: u16) -> Result<Self> {
        let mut buffers = Self::new();
        buffers.ensure_size(width, height, layers)?;
        Ok(buffers)
    }

    /// Make the buffers fit the given image, clearing them only if their shape changes.
    ///
    /// Returns whether the buffers were cleared.
    pub fn ensure_size(&mut self, width: u16, height: u16, layers: u16) -> Result<bool> {
        let slots = slot_count(width, height, layers)?;
        let cleared = if (width, height, layers) != (self.width, self.height, self.layers) {
            // Same slot count in a different shape still puts old fragments on the wrong pixels.
            reset(&mut self.triangle_ids, slots, 0);
            reset(&mut self.z_buffer, slots, CLEAR_DEPTH);
            reset(&mut self.barycentric_coordinates, 3 * slots, 0.0);
            true
        } else {
            ensure_size(
                slots,
                &mut self.triangle_ids,
                &mut self.z_buffer,
                &mut self.barycentric_coordinates,
            )
        };
        self.width = width;
        self.height = height;
        self.layers = layers;
        Ok(cleared)
    }

    /// Reset every slot to empty, keeping the current size.
    pub fn clear(&mut self) {
        self.triangle_ids.fill(0);
        self.z_buffer.fill(CLEAR_DEPTH);
        self.barycentric_coordinates.fill(0.0);
    }

    /// The image width in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// The image height in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The number of depth layers.
    pub fn layers(&self) -> u16 {
        self.layers
    }

    /// The triangle id of every slot.
    pub fn triangle_ids(&self) -> &[i32] {
        &self.triangle_ids
    }

    /// The normalized device depth of every slot.
    pub fn z_buffer(&self) -> &[f32] {
        &self.z_buffer
    }

    /// The three barycentric coordinates of every slot.
    pub fn barycentric_coordinates(&self) -> &[f32] {
        &self.barycentric_coordinates
    }

    /// The contents of slot `(x, y, layer)`, including empty ones.
    ///
    /// Returns `None` if the position is outside of the buffers.
    pub fn slot(&self, x: u16, y: u16, layer: u16) -> Option<Fragment> {
        if x >= self.width || y >= self.height || layer >= self.layers {
            return None;
        }
        let pixels = usize::from(self.width) * usize::from(self.height);
        let idx = usize::from(layer) * pixels
            + usize::from(y) * usize::from(self.width)
            + usize::from(x);
        let bary = self.barycentric_coordinates.get(3 * idx..3 * idx + 3)?;

        Some(Fragment {
            triangle_id: *self.triangle_ids.get(idx)?,
            depth: *self.z_buffer.get(idx)?,
            barycentric: [bary[0], bary[1], bary[2]],
        })
    }

    /// The triangle covering `(x, y)` in `layer`, or `None` if the slot is empty.
    pub fn fragment(&self, x: u16, y: u16, layer: u16) -> Option<Fragment> {
        self.slot(x, y, layer).filter(Fragment::is_occupied)
    }

    /// Give up the buffers as `(triangle_ids, z_buffer, barycentric_coordinates)`.
    pub fn into_parts(self) -> (Vec<i32>, Vec<f32>, Vec<f32>) {
        (self.triangle_ids, self.z_buffer, self.barycentric_coordinates)
    }
}

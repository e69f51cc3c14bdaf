// Copyright 2025 the Tri Raster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-rasterizer configuration.

/// Which triangles to discard based on their winding in normalized device coordinates.
///
/// Front faces are counter-clockwise when viewed with x pointing right and y pointing up,
/// matching the OpenGL convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FaceCulling {
    /// Keep every triangle regardless of its winding.
    #[default]
    None,
    /// Discard counter-clockwise (front-facing) triangles.
    Front,
    /// Discard clockwise (back-facing) triangles.
    Back,
}

impl FaceCulling {
    /// Whether a triangle with the given facing is discarded.
    #[inline]
    pub(crate) fn culls(self, front_facing: bool) -> bool {
        match self {
            Self::None => false,
            Self::Front => front_facing,
            Self::Back => !front_facing,
        }
    }
}

/// Settings that apply to every call made through a [`Rasterizer`](crate::Rasterizer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterSettings {
    /// How many depth layers to keep per pixel, nearest first.
    ///
    /// With a single layer this is a plain z-buffer. With more layers the nearest
    /// `num_layers` fragments of every pixel are kept, which is what depth peeling needs.
    /// Must be at least 1.
    pub num_layers: u16,
    /// The face culling policy.
    pub face_culling: FaceCulling,
    /// The number of worker threads.
    ///
    /// 0 means rasterizing on the calling thread. This only has an effect if the
    /// `multithreading` feature is enabled; the output is identical either way.
    pub num_threads: u16,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            num_layers: 1,
            face_culling: FaceCulling::None,
            num_threads: 0,
        }
    }
}

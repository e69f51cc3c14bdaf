// Copyright 2025 the Tri Raster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The public entry points.

use crate::buffers::{RasterBuffers, ensure_size, slot_count};
#[cfg(feature = "multithreading")]
use crate::dispatch::multi_threaded::MultiThreadedDispatcher;
use crate::dispatch::single_threaded::SingleThreadedDispatcher;
use crate::dispatch::{Dispatcher, TileBins};
use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::region::{Regions, TileGrid};
use crate::settings::RasterSettings;

/// A reusable triangle rasterizer.
///
/// A rasterizer holds its [`RasterSettings`] and, when multithreaded, its own thread pool.
/// Create it once and use it for many calls.
#[derive(Debug)]
pub struct Rasterizer {
    settings: RasterSettings,
    dispatcher: Box<dyn Dispatcher>,
}

impl Rasterizer {
    /// Create a single-threaded rasterizer with one depth layer and no face culling.
    pub fn new() -> Self {
        Self {
            settings: RasterSettings::default(),
            dispatcher: Box::new(SingleThreadedDispatcher),
        }
    }

    /// Create a rasterizer with custom settings.
    ///
    /// Fails if `settings.num_layers` is 0, or if the thread pool can't be created.
    pub fn new_with(settings: RasterSettings) -> Result<Self> {
        if settings.num_layers == 0 {
            return Err(Error::NoLayers);
        }

        #[cfg(feature = "multithreading")]
        let dispatcher: Box<dyn Dispatcher> = match settings.num_threads {
            0 => Box::new(SingleThreadedDispatcher),
            n => Box::new(MultiThreadedDispatcher::new(n)?),
        };
        #[cfg(not(feature = "multithreading"))]
        let dispatcher: Box<dyn Dispatcher> = {
            if settings.num_threads > 0 {
                log::debug!("multithreading is disabled, rasterizing on the calling thread");
            }
            Box::new(SingleThreadedDispatcher)
        };

        Ok(Self {
            settings,
            dispatcher,
        })
    }

    /// The settings this rasterizer was created with.
    pub fn settings(&self) -> &RasterSettings {
        &self.settings
    }

    /// Rasterize `mesh` onto a `width × height` image.
    ///
    /// The buffers are resized and cleared first if their shape doesn't match. Otherwise the
    /// triangles are resolved against what the buffers already hold.
    pub fn rasterize(
        &self,
        mesh: &Mesh<'_>,
        width: u16,
        height: u16,
        buffers: &mut RasterBuffers,
    ) -> Result<()> {
        if buffers.ensure_size(width, height, self.settings.num_layers)? {
            log::debug!(
                "cleared output buffers for {width}x{height} with {} layers",
                self.settings.num_layers
            );
        }

        self.run(
            mesh,
            width,
            height,
            &mut buffers.triangle_ids,
            &mut buffers.z_buffer,
            &mut buffers.barycentric_coordinates,
        );
        Ok(())
    }

    /// Rasterize `mesh` onto a `width × height` image, writing to caller-owned vectors.
    ///
    /// The vectors use the layout described on [`RasterBuffers`]. Each one is cleared and
    /// resized only if its length doesn't match the image, so vectors from an earlier call
    /// with the same size take part in depth testing.
    pub fn rasterize_into(
        &self,
        mesh: &Mesh<'_>,
        width: u16,
        height: u16,
        triangle_ids: &mut Vec<i32>,
        z_buffer: &mut Vec<f32>,
        barycentric_coordinates: &mut Vec<f32>,
    ) -> Result<()> {
        let slots = slot_count(width, height, self.settings.num_layers)?;
        if ensure_size(slots, triangle_ids, z_buffer, barycentric_coordinates) {
            log::debug!(
                "resized output buffers to {width}x{height} with {} layers",
                self.settings.num_layers
            );
        }

        self.run(
            mesh,
            width,
            height,
            triangle_ids,
            z_buffer,
            barycentric_coordinates,
        );
        Ok(())
    }

    fn run(
        &self,
        mesh: &Mesh<'_>,
        width: u16,
        height: u16,
        triangle_ids: &mut [i32],
        z_buffer: &mut [f32],
        barycentric_coordinates: &mut [f32],
    ) {
        let triangles = self
            .dispatcher
            .setup(mesh, width, height, self.settings.face_culling);
        log::debug!(
            "rasterizing {} of {} triangles onto {width}x{height} with {} layers",
            triangles.len(),
            mesh.triangle_count(),
            self.settings.num_layers
        );
        if triangles.is_empty() {
            return;
        }

        let grid = TileGrid::new(width, height);
        let bins = TileBins::new(&grid, &triangles);
        let mut regions = Regions::new(
            &grid,
            self.settings.num_layers,
            triangle_ids,
            z_buffer,
            barycentric_coordinates,
        );
        self.dispatcher.resolve(&triangles, &bins, &mut regions);
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Rasterize a triangle mesh with one depth layer and no face culling.
///
/// `vertices` holds `(x, y, z, w)` clip-space positions and `triangles` holds three vertex
/// indices per triangle. The outputs use the layout described on [`RasterBuffers`] and are
/// cleared only if their lengths don't match the image.
///
/// All arguments are checked before any output is touched.
///
/// Each call sets up a fresh [`Rasterizer`]. Callers that rasterize repeatedly into the same
/// buffers should keep a `Rasterizer` around and use [`Rasterizer::rasterize_into`] instead.
pub fn rasterize_triangles(
    vertices: &[f32],
    triangles: &[i32],
    width: u16,
    height: u16,
    triangle_ids: &mut Vec<i32>,
    z_buffer: &mut Vec<f32>,
    barycentric_coordinates: &mut Vec<f32>,
) -> Result<()> {
    rasterize_triangles_with(
        vertices,
        triangles,
        width,
        height,
        triangle_ids,
        z_buffer,
        barycentric_coordinates,
        RasterSettings::default(),
    )
}

/// Like [`rasterize_triangles`], with custom settings.
///
/// With a non-zero [`RasterSettings::num_threads`] this builds a new thread pool on every
/// call. To render many frames, create a [`Rasterizer`] once with
/// [`Rasterizer::new_with`] and call [`Rasterizer::rasterize_into`] for each of them.
#[expect(
    clippy::too_many_arguments,
    reason = "mirrors the flat buffer interface of `rasterize_triangles`"
)]
pub fn rasterize_triangles_with(
    vertices: &[f32],
    triangles: &[i32],
    width: u16,
    height: u16,
    triangle_ids: &mut Vec<i32>,
    z_buffer: &mut Vec<f32>,
    barycentric_coordinates: &mut Vec<f32>,
    settings: RasterSettings,
) -> Result<()> {
    let mesh = Mesh::new(vertices, triangles)?;
    Rasterizer::new_with(settings)?.rasterize_into(
        &mesh,
        width,
        height,
        triangle_ids,
        z_buffer,
        barycentric_coordinates,
    )
}

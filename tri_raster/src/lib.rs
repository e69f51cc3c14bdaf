// Copyright 2025 the Tri Raster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A CPU triangle rasterizer that tells you, for every pixel, which triangle covers it.
//!
//! Given a mesh in homogeneous clip space, Tri Raster produces three per-pixel buffers:
//! the id of the covering triangle, its depth in normalized device coordinates, and the
//! perspective-correct barycentric weights of its three vertices. The weights are what a
//! consumer needs to interpolate its own vertex attributes; no shading happens here.
//!
//! Coverage is exact. Screen positions are snapped to a fixed sub-pixel grid and edge
//! functions are evaluated in integer arithmetic with a top-left style tie-break, so
//! triangles sharing an edge never leave a gap or both cover the same pixel.
//!
//! # Usage
//!
//! ```
//! use tri_raster::{Mesh, RasterBuffers, Rasterizer};
//!
//! // Two triangles covering the whole image.
//! let vertices = [
//!     -1.0, -1.0, 0.0, 1.0, //
//!     1.0, -1.0, 0.0, 1.0, //
//!     1.0, 1.0, 0.0, 1.0, //
//!     -1.0, 1.0, 0.0, 1.0,
//! ];
//! let triangles = [0, 1, 2, 0, 2, 3];
//!
//! let mesh = Mesh::new(&vertices, &triangles)?;
//! let mut buffers = RasterBuffers::new();
//! Rasterizer::new().rasterize(&mesh, 4, 4, &mut buffers)?;
//!
//! let fragment = buffers.fragment(3, 0, 0).unwrap();
//! assert_eq!(fragment.triangle_id, 0);
//! assert_eq!(fragment.depth, 0.0);
//! # Ok::<(), tri_raster::Error>(())
//! ```
//!
//! [`rasterize_triangles`] offers the same on flat `Vec`s, for callers that manage their
//! own buffers.
//!
//! # Depth layers
//!
//! [`RasterSettings::num_layers`] keeps the nearest `n` fragments of every pixel instead of
//! only the nearest one, sorted nearest first. This is the building block of depth peeling.
//!
//! # Near plane
//!
//! Triangles are clipped against a plane just in front of the eye before projection, so
//! triangles with vertices behind the camera still show their visible part. Barycentric
//! weights always refer to the vertices of the original triangle.
//!
//! # Features
//!
//! - `multithreading`: Rasterize on a rayon thread pool when
//!   [`RasterSettings::num_threads`] is non-zero. The output is identical to rasterizing on
//!   a single thread.
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

mod buffers;
mod clip;
mod coverage;
mod depth;
mod dispatch;
mod error;
mod interpolate;
mod mesh;
mod region;
mod render;
mod settings;
mod setup;

pub use buffers::{CLEAR_DEPTH, Fragment, RasterBuffers};
pub use error::{Error, Result};
pub use mesh::{ClipVertex, Mesh};
pub use render::{Rasterizer, rasterize_triangles, rasterize_triangles_with};
pub use settings::{FaceCulling, RasterSettings};

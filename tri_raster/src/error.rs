// Copyright 2025 the Tri Raster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported before any rasterization work begins.

use thiserror::Error;

/// Errors that can occur when rasterizing a mesh.
///
/// All of them describe a malformed call. They are detected before any output buffer is
/// touched, so on error the buffers hold exactly what they held before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The flat vertex buffer does not hold whole `(x, y, z, w)` groups.
    #[error("vertices must have size divisible by 4. Got: {0}")]
    VertexBufferSize(usize),
    /// The flat triangle buffer does not hold whole index triplets.
    #[error("triangles must have size divisible by 3. Got: {0}")]
    TriangleBufferSize(usize),
    /// A triangle refers to a vertex that does not exist.
    #[error(
        "triangle {triangle} corner {corner} refers to vertex {index}, but there are only {vertex_count} vertices"
    )]
    VertexIndexOutOfRange {
        /// The offending triangle.
        triangle: usize,
        /// Which of the three corners holds the bad index.
        corner: usize,
        /// The index as it appears in the triangle buffer.
        index: i32,
        /// The number of vertices in the mesh.
        vertex_count: usize,
    },
    /// There are more triangles than can be identified by an `i32` triangle id.
    #[error("{0} triangles cannot be identified by i32 triangle ids")]
    TooManyTriangles(usize),
    /// The output image has no pixels.
    #[error("image must not be empty. Got: {width}x{height}")]
    EmptyImage {
        /// The requested width.
        width: u16,
        /// The requested height.
        height: u16,
    },
    /// At least one depth layer is required.
    #[error("num_layers must be at least 1")]
    NoLayers,
    /// The output buffers would be larger than the address space allows.
    #[error("output of {width}x{height} pixels with {layers} layers is too large")]
    OutputTooLarge {
        /// The requested width.
        width: u16,
        /// The requested height.
        height: u16,
        /// The requested number of layers.
        layers: u16,
    },
    /// The worker thread pool could not be created.
    #[cfg(feature = "multithreading")]
    #[error("couldn't create the rasterizer thread pool: {0}")]
    ThreadPool(String),
}

#[cfg(feature = "multithreading")]
impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Self::ThreadPool(err.to_string())
    }
}

/// A result whose error defaults to [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

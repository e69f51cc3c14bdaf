// Copyright 2025 the Tri Raster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validated views over flat vertex and triangle buffers.

use crate::error::{Error, Result};

/// A vertex in homogeneous clip space, `[x, y, z, w]`.
pub type ClipVertex = [f32; 4];

/// A borrowed triangle mesh whose structure has been checked.
///
/// Constructing a `Mesh` is the only place where the flat input buffers are validated, so
/// everything downstream can index vertices without further checks.
#[derive(Debug, Clone, Copy)]
pub struct Mesh<'a> {
    vertices: &'a [ClipVertex],
    triangles: &'a [[i32; 3]],
}

impl<'a> Mesh<'a> {
    /// Create a mesh from a flat buffer of `4 * vertex_count` clip-space coordinates and a flat
    /// buffer of `3 * triangle_count` vertex indices.
    ///
    /// Fails if either buffer has a length that doesn't divide into whole vertices or
    /// triangles, if any index is negative or not smaller than the vertex count, or if there
    /// are too many triangles to be identified by an `i32`.
    pub fn new(vertices: &'a [f32], triangles: &'a [i32]) -> Result<Self> {
        let vertices: &[ClipVertex] = bytemuck::try_cast_slice(vertices)
            .map_err(|_| Error::VertexBufferSize(vertices.len()))?;
        let triangles: &[[i32; 3]] = bytemuck::try_cast_slice(triangles)
            .map_err(|_| Error::TriangleBufferSize(triangles.len()))?;

        if i32::try_from(triangles.len()).is_err() {
            return Err(Error::TooManyTriangles(triangles.len()));
        }

        let vertex_count = vertices.len();
        for (triangle, indices) in triangles.iter().enumerate() {
            for (corner, &index) in indices.iter().enumerate() {
                let in_range = usize::try_from(index).is_ok_and(|i| i < vertex_count);
                if !in_range {
                    return Err(Error::VertexIndexOutOfRange {
                        triangle,
                        corner,
                        index,
                        vertex_count,
                    });
                }
            }
        }

        Ok(Self {
            vertices,
            triangles,
        })
    }

    /// The number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// The number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// The vertex at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn vertex(&self, index: usize) -> ClipVertex {
        self.vertices[index]
    }

    /// The vertex indices of the triangle at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn triangle(&self, index: usize) -> [u32; 3] {
        // Indices were checked to be non-negative in `new`.
        self.triangles[index].map(|i| i as u32)
    }

    /// The three clip-space corners of the triangle at `index`.
    pub(crate) fn corners(&self, index: usize) -> [ClipVertex; 3] {
        self.triangle(index).map(|i| self.vertices[i as usize])
    }
}

//! Indexed triangle meshes for the instanced ornament layers

pub mod primitives;

use crate::math::Vec3;

/// Floats per vertex in `Mesh::vertex_data`
pub const VERTEX_STRIDE: usize = 6;

/// A vertex with position and normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }

    /// Layout: position(3) + normal(3)
    pub fn to_array(&self) -> [f32; VERTEX_STRIDE] {
        [
            self.position.x, self.position.y, self.position.z,
            self.normal.x, self.normal.y, self.normal.z,
        ]
    }
}

/// A mesh composed of vertices and triangle indices
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add vertices and return the starting index
    pub fn add_vertices(&mut self, verts: impl IntoIterator<Item = Vertex>) -> u32 {
        let start = self.vertices.len() as u32;
        self.vertices.extend(verts);
        start
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Add a quad as two triangles (CCW winding)
    pub fn add_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.add_triangle(a, b, c);
        self.add_triangle(a, c, d);
    }

    /// Interleaved vertex buffer data
    pub fn vertex_data(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.to_array()).collect()
    }

    pub fn index_data(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_to_array() {
        let v = Vertex::new(Vec3::new(1.0, 2.0, 3.0), Vec3::UP);
        let arr = v.to_array();
        assert_eq!(arr, [1.0, 2.0, 3.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_mesh_add_quad() {
        let mut mesh = Mesh::new();
        let start = mesh.add_vertices(vec![Vertex::new(Vec3::ZERO, Vec3::UP); 4]);
        assert_eq!(start, 0);
        mesh.add_quad(0, 1, 2, 3);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.index_data(), &[0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_vertex_data_is_interleaved() {
        let mut mesh = Mesh::new();
        mesh.add_vertices(vec![
            Vertex::new(Vec3::ZERO, Vec3::UP),
            Vertex::new(Vec3::ONE, Vec3::UP),
        ]);
        let data = mesh.vertex_data();
        assert_eq!(data.len(), 2 * VERTEX_STRIDE);
        assert_eq!(data[VERTEX_STRIDE], 1.0);
    }
}

//! Unit meshes for gifts, baubles and lights

use std::f32::consts::{PI, TAU};
use crate::layout::OrnamentShape;
use crate::math::Vec3;
use super::{Mesh, Vertex};

/// Segments around and along the bauble sphere
pub const SPHERE_SEGMENTS: usize = 32;

/// The mesh an ornament layer instances
pub fn mesh_for(shape: OrnamentShape) -> Mesh {
    match shape {
        OrnamentShape::Box => unit_box(),
        OrnamentShape::Sphere => uv_sphere(1.0, SPHERE_SEGMENTS, SPHERE_SEGMENTS),
        OrnamentShape::Star => octahedron(1.0),
    }
}

/// Axis-aligned cube with unit edges, centred on the origin.
/// Four vertices per face so every face keeps a flat normal.
pub fn unit_box() -> Mesh {
    // (normal, u, v) with u × v = normal, which keeps the winding CCW from outside
    let faces = [
        (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0)),
        (Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 0.0)),
        (Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0)),
        (Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)),
        (Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
        (Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0)),
    ];

    let mut mesh = Mesh::new();
    for (normal, u, v) in faces {
        let center = normal.scale(0.5);
        let corner = |su: f32, sv: f32| {
            Vertex::new(center + u.scale(0.5 * su) + v.scale(0.5 * sv), normal)
        };
        let start = mesh.add_vertices([
            corner(-1.0, -1.0),
            corner(1.0, -1.0),
            corner(1.0, 1.0),
            corner(-1.0, 1.0),
        ]);
        mesh.add_quad(start, start + 1, start + 2, start + 3);
    }
    mesh
}

/// Latitude/longitude sphere. Pole rows skip their degenerate triangles.
pub fn uv_sphere(radius: f32, width_segments: usize, height_segments: usize) -> Mesh {
    let mut mesh = Mesh::new();
    let row = width_segments as u32 + 1;

    for iy in 0..=height_segments {
        let theta = iy as f32 / height_segments as f32 * PI;
        for ix in 0..=width_segments {
            let phi = ix as f32 / width_segments as f32 * TAU;
            let normal = Vec3::new(-phi.cos() * theta.sin(), theta.cos(), phi.sin() * theta.sin());
            mesh.add_vertices([Vertex::new(normal.scale(radius), normal)]);
        }
    }

    for iy in 0..height_segments as u32 {
        for ix in 0..width_segments as u32 {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                mesh.add_triangle(a, b, d);
            }
            if iy != height_segments as u32 - 1 {
                mesh.add_triangle(b, c, d);
            }
        }
    }
    mesh
}

/// Flat-shaded regular octahedron with its vertices on the axes
pub fn octahedron(radius: f32) -> Mesh {
    let mut mesh = Mesh::new();
    for sx in [1.0f32, -1.0] {
        for sy in [1.0f32, -1.0] {
            for sz in [1.0f32, -1.0] {
                let a = Vec3::new(sx * radius, 0.0, 0.0);
                let mut b = Vec3::new(0.0, sy * radius, 0.0);
                let mut c = Vec3::new(0.0, 0.0, sz * radius);

                let outward = Vec3::new(sx, sy, sz);
                if (b - a).cross(&(c - a)).dot(&outward) < 0.0 {
                    std::mem::swap(&mut b, &mut c);
                }
                let normal = outward.normalize();
                let start = mesh.add_vertices([
                    Vertex::new(a, normal),
                    Vertex::new(b, normal),
                    Vertex::new(c, normal),
                ]);
                mesh.add_triangle(start, start + 1, start + 2);
            }
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_outward(mesh: &Mesh) {
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.vertices[i as usize].position);
            let centroid = (a + b + c).scale(1.0 / 3.0);
            let n = (b - a).cross(&(c - a));
            assert!(n.dot(&centroid) > 0.0, "inward triangle {:?}", tri);
        }
    }

    fn assert_unit_normals(mesh: &Mesh) {
        for v in &mesh.vertices {
            assert!((v.normal.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_box() {
        let mesh = unit_box();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        for v in &mesh.vertices {
            for c in v.position.to_array() {
                assert!((c.abs() - 0.5).abs() < 1e-6);
            }
        }
        assert_outward(&mesh);
        assert_unit_normals(&mesh);
    }

    #[test]
    fn test_sphere() {
        let mesh = uv_sphere(1.0, 32, 32);
        assert_eq!(mesh.vertex_count(), 33 * 33);
        // Two triangles per quad minus one per quad on each pole row
        assert_eq!(mesh.triangle_count(), 2 * 32 * 32 - 2 * 32);
        for v in &mesh.vertices {
            assert!((v.position.length() - 1.0).abs() < 1e-5);
        }
        assert_outward(&mesh);
        assert_unit_normals(&mesh);
    }

    #[test]
    fn test_octahedron() {
        let mesh = octahedron(1.0);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 8);
        assert_outward(&mesh);
        assert_unit_normals(&mesh);
    }

    #[test]
    fn test_indices_in_bounds() {
        for shape in [OrnamentShape::Box, OrnamentShape::Sphere, OrnamentShape::Star] {
            let mesh = mesh_for(shape);
            let count = mesh.vertex_count() as u32;
            assert!(mesh.index_data().iter().all(|&i| i < count));
        }
    }
}

//! Mesh sanity checks used by the scene tests.

use shared::Rgb;

use crate::viewport::mesh::MeshData;
use crate::viewport::picking::Aabb;

const STRIDE: usize = 9;

pub struct MeshValidator<'a> {
    mesh: &'a MeshData,
}

impl<'a> MeshValidator<'a> {
    pub fn new(mesh: &'a MeshData) -> Self {
        Self { mesh }
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertices.len() / STRIDE
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.indices.len() / 3
    }

    fn vertex(&self, i: usize) -> &[f32] {
        &self.mesh.vertices[i * STRIDE..(i + 1) * STRIDE]
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_mesh(self.mesh)
    }

    /// Bounding-box extent (x, y, z)
    pub fn dimensions(&self) -> [f32; 3] {
        let aabb = self.aabb();
        (aabb.max - aabb.min).to_array()
    }

    pub fn dimensions_approx(&self, expected: [f32; 3], tolerance: f32) -> bool {
        self.dimensions()
            .iter()
            .zip(expected)
            .all(|(d, e)| (d - e).abs() < tolerance)
    }

    /// Lowest vertex height; the floor is y = 0
    pub fn min_y(&self) -> Option<f32> {
        (0..self.vertex_count())
            .map(|i| self.vertex(i)[1])
            .min_by(|a, b| a.total_cmp(b))
    }

    /// True when some vertex carries `color` (per channel, within `tolerance` on the 0-1 scale)
    pub fn has_color(&self, color: Rgb, tolerance: f32) -> bool {
        let want = color.to_unit();
        (0..self.vertex_count()).any(|i| {
            let c = &self.vertex(i)[6..9];
            c.iter().zip(want).all(|(a, b)| (a - b).abs() < tolerance)
        })
    }

    /// All integrity problems found; empty means the mesh is usable
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mesh = self.mesh;

        if mesh.vertices.len() % STRIDE != 0 {
            errors.push(format!("Vertex buffer length {} is not a multiple of {STRIDE}", mesh.vertices.len()));
        }
        if mesh.indices.len() % 3 != 0 {
            errors.push(format!("Index buffer length {} is not a multiple of 3", mesh.indices.len()));
        }

        let count = self.vertex_count() as u32;
        let bad: Vec<u32> = mesh.indices.iter().copied().filter(|&i| i >= count).take(5).collect();
        if !bad.is_empty() {
            errors.push(format!("Indices out of range (vertex_count={count}): {bad:?}"));
        }

        if mesh.vertices.iter().any(|v| !v.is_finite()) {
            errors.push("Non-finite vertex data".to_string());
        }

        let unnormalized = (0..self.vertex_count())
            .filter(|&i| {
                let n = &self.vertex(i)[3..6];
                let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
                (len - 1.0).abs() > 0.1
            })
            .count();
        if unnormalized > 0 {
            errors.push(format!("{unnormalized} normals are not unit-length"));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::mesh;

    #[test]
    fn test_cube_is_valid() {
        let m = mesh::cube(2.0, 1.0, 0.5, [0.5; 3]);
        let v = MeshValidator::new(&m);
        assert!(v.validate_all().is_empty());
        assert!(v.dimensions_approx([2.0, 1.0, 0.5], 1e-5));
        assert_eq!(v.min_y(), Some(-0.5));
    }

    #[test]
    fn test_reports_bad_buffers() {
        let bad = MeshData {
            vertices: vec![0.0; 10],
            indices: vec![0, 1, 7, 2],
        };
        let errors = MeshValidator::new(&bad).validate_all();
        assert!(errors.iter().any(|e| e.contains("multiple of 9")));
        assert!(errors.iter().any(|e| e.contains("multiple of 3")));
        assert!(errors.iter().any(|e| e.contains("out of range")));
    }

    #[test]
    fn test_has_color() {
        let m = mesh::cube(1.0, 1.0, 1.0, Rgb::new(0xff, 0x6b, 0x6b).to_unit());
        let v = MeshValidator::new(&m);
        assert!(v.has_color(Rgb::new(0xff, 0x6b, 0x6b), 0.01));
        assert!(!v.has_color(Rgb::BLACK, 0.01));
    }

    #[test]
    fn test_empty_mesh() {
        let m = MeshData::new();
        let v = MeshValidator::new(&m);
        assert!(v.validate_all().is_empty());
        assert_eq!(v.min_y(), None);
    }
}

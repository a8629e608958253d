use glam::Vec3;

use super::mesh::MeshData;

/// A ray in world space
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::MAX),
        max: Vec3::splat(f32::MIN),
    };

    /// Compute AABB from MeshData (9 floats per vertex: pos+normal+color)
    pub fn from_mesh(data: &MeshData) -> Self {
        let mut aabb = Self::EMPTY;
        for v in data.vertices.chunks_exact(9) {
            aabb.extend(Vec3::new(v[0], v[1], v[2]));
        }
        aabb
    }

    pub fn extend(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Center of the bounding box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Ray-AABB intersection using the slab method.
/// Returns the distance along the ray to the nearest hit, or None.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    if aabb.is_empty() {
        return None;
    }

    let inv_dir = Vec3::new(
        1.0 / ray.direction.x,
        1.0 / ray.direction.y,
        1.0 / ray.direction.z,
    );

    let t1 = (aabb.min - ray.origin) * inv_dir;
    let t2 = (aabb.max - ray.origin) * inv_dir;

    let tmin = t1.min(t2).max_element();
    let tmax = t1.max(t2).min_element();

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Möller-Trumbore ray-triangle intersection algorithm.
/// Returns the distance along the ray if hit, or None if no intersection.
pub fn ray_triangle_intersect(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);

    // Intersection is behind ray origin
    if t > EPSILON {
        Some(t)
    } else {
        None
    }
}

/// Nearest triangle hit distance in a world-space mesh.
pub fn ray_mesh(ray: &Ray, mesh: &MeshData) -> Option<f32> {
    let pos = |i: u32| {
        let b = i as usize * 9;
        Vec3::new(mesh.vertices[b], mesh.vertices[b + 1], mesh.vertices[b + 2])
    };

    mesh.indices
        .chunks_exact(3)
        .filter_map(|tri| ray_triangle_intersect(ray, pos(tri[0]), pos(tri[1]), pos(tri[2])))
        .min_by(|a, b| a.total_cmp(b))
}

/// Something that can be hit by a picking ray
pub struct Pickable<'a> {
    /// Broad-phase boxes, one per part
    pub bounds: &'a [Aabb],
    /// World-space triangles for the exact test
    pub mesh: &'a MeshData,
}

/// Pick the nearest candidate hit by the ray and return its index.
pub fn pick_nearest<'a>(ray: &Ray, candidates: impl IntoIterator<Item = Pickable<'a>>) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;

    for (idx, candidate) in candidates.into_iter().enumerate() {
        let near_box = candidate
            .bounds
            .iter()
            .filter_map(|b| ray_aabb(ray, b))
            .min_by(|a, b| a.total_cmp(b));
        let Some(box_dist) = near_box else {
            continue;
        };
        if best.is_some_and(|(_, d)| box_dist > d) {
            continue;
        }
        if let Some(dist) = ray_mesh(ray, candidate.mesh) {
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((idx, dist));
            }
        }
    }

    best.map(|(idx, _)| idx)
}

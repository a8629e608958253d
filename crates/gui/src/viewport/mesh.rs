use glam::{Mat3, Mat4, Vec3};

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b]
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    /// 9 floats per vertex: position(3) + normal(3) + color(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 9
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Append `other` with every position transformed by `transform`
    /// and every normal by its inverse transpose.
    pub fn append_transformed(&mut self, other: &MeshData, transform: Mat4) {
        let normal_mat = Mat3::from_mat4(transform).inverse().transpose();
        let base = self.vertex_count() as u32;

        self.vertices.reserve(other.vertices.len());
        for v in other.vertices.chunks_exact(9) {
            let p = transform.transform_point3(Vec3::new(v[0], v[1], v[2]));
            let n = (normal_mat * Vec3::new(v[3], v[4], v[5])).normalize_or_zero();
            self.vertices.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z, v[6], v[7], v[8]]);
        }
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Append `other` unchanged
    pub fn append(&mut self, other: &MeshData) {
        self.append_transformed(other, Mat4::IDENTITY);
    }
}

/// Lines mesh: interleaved [pos.x, pos.y, pos.z, r, g, b, a]
#[derive(Clone, Debug, Default)]
pub struct LineMeshData {
    /// 7 floats per vertex: position(3) + color(4)
    pub vertices: Vec<f32>,
}

// ── Primitive generation (centered on the local origin) ──

/// Axis-aligned box. Faces in order +Z, -Z, +X, -X, +Y, -Y.
pub fn cube(w: f32, h: f32, d: f32, color: [f32; 3]) -> MeshData {
    let half = Vec3::new(w, h, d) * 0.5;
    let mut out = MeshData::new();

    // (normal, in-plane u axis); v = normal x u keeps the winding counter-clockwise
    let faces = [
        (Vec3::Z, Vec3::X),
        (Vec3::NEG_Z, Vec3::NEG_X),
        (Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_X, Vec3::Z),
        (Vec3::Y, Vec3::X),
        (Vec3::NEG_Y, Vec3::X),
    ];
    for (normal, u) in faces {
        let v = normal.cross(u);
        let (n, u, v) = (normal * half, u * half, v * half);
        push_quad(&mut out, [n - u - v, n + u - v, n + u + v, n - u + v], normal, color);
    }
    out
}

/// Single-sided quad; corners counter-clockwise when seen from the `normal` side
pub fn quad(corners: [Vec3; 4], normal: Vec3, color: [f32; 3]) -> MeshData {
    let mut out = MeshData::new();
    push_quad(&mut out, corners, normal, color);
    out
}

/// Truncated cone along Y (a cylinder when both radii match, a cone when the top is zero)
pub fn frustum(radius_top: f32, radius_bottom: f32, height: f32, segments: u32, color: [f32; 3]) -> MeshData {
    let segments = segments.max(3);
    let hh = height * 0.5;
    // Side normals lean up when the bottom is wider
    let slope = (radius_bottom - radius_top) / height.max(f32::EPSILON);
    let mut out = MeshData::new();

    for i in 0..segments {
        let (a, b) = (rim(i, segments), rim(i + 1, segments));
        let na = Vec3::new(a.x, slope, a.z).normalize();
        let nb = Vec3::new(b.x, slope, b.z).normalize();
        let base = out.vertex_count() as u32;
        push_vert(&mut out.vertices, a * radius_bottom - Vec3::Y * hh, na, color);
        push_vert(&mut out.vertices, b * radius_bottom - Vec3::Y * hh, nb, color);
        push_vert(&mut out.vertices, b * radius_top + Vec3::Y * hh, nb, color);
        push_vert(&mut out.vertices, a * radius_top + Vec3::Y * hh, na, color);
        // Triangle fan collapses to a single triangle at an apex
        if radius_top > 0.0 {
            out.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        } else {
            out.indices.extend_from_slice(&[base, base + 1, base + 2]);
        }
    }

    if radius_top > 0.0 {
        push_disc(&mut out, radius_top, hh, segments, color);
    }
    if radius_bottom > 0.0 {
        push_disc(&mut out, radius_bottom, -hh, segments, color);
    }
    out
}

pub fn cylinder(radius: f32, height: f32, segments: u32, color: [f32; 3]) -> MeshData {
    frustum(radius, radius, height, segments, color)
}

pub fn cone(radius: f32, height: f32, segments: u32, color: [f32; 3]) -> MeshData {
    frustum(0.0, radius, height, segments, color)
}

/// UV sphere; `rings` latitude bands from pole to pole
pub fn sphere(radius: f32, rings: u32, sectors: u32, color: [f32; 3]) -> MeshData {
    let (rings, sectors) = (rings.max(2), sectors.max(3));
    let mut out = MeshData::new();

    for r in 0..=rings {
        let phi = std::f32::consts::PI * r as f32 / rings as f32;
        for s in 0..=sectors {
            let n = rim(s, sectors) * phi.sin() + Vec3::Y * phi.cos();
            push_vert(&mut out.vertices, n * radius, n, color);
        }
    }

    let row = sectors + 1;
    for r in 0..rings {
        for s in 0..sectors {
            let top = r * row + s;
            let bottom = top + row;
            out.indices.extend_from_slice(&[top, bottom, top + 1, top + 1, bottom, bottom + 1]);
        }
    }
    out
}

// ── Floor grid ───────────────────────────────────────────────

/// Grid on the ground plane, `range` cells each way from the origin
pub fn grid(range: i32, cell_size: f32, opacity: f32) -> LineMeshData {
    let color = [0.85_f32, 0.85, 0.85, opacity];
    let extent = range as f32 * cell_size;
    // Above the floor planks' base to avoid z-fighting
    let y = 0.015;
    let mut vertices = Vec::with_capacity((2 * range as usize + 1) * 4 * 7);

    for i in -range..=range {
        let f = i as f32 * cell_size;
        for p in [[f, y, -extent], [f, y, extent], [-extent, y, f], [extent, y, f]] {
            vertices.extend_from_slice(&p);
            vertices.extend_from_slice(&color);
        }
    }
    LineMeshData { vertices }
}

// ── Helpers ──────────────────────────────────────────────────

/// Unit point on the XZ circle at step `i` of `segments`
fn rim(i: u32, segments: u32) -> Vec3 {
    let angle = (i % segments) as f32 * std::f32::consts::TAU / segments as f32;
    Vec3::new(angle.cos(), 0.0, angle.sin())
}

fn push_vert(v: &mut Vec<f32>, p: Vec3, n: Vec3, c: [f32; 3]) {
    v.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z, c[0], c[1], c[2]]);
}

fn push_quad(out: &mut MeshData, corners: [Vec3; 4], normal: Vec3, color: [f32; 3]) {
    let base = out.vertex_count() as u32;
    for p in corners {
        push_vert(&mut out.vertices, p, normal, color);
    }
    out.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}

/// Flat cap at height `y`, facing up when `y > 0` and down otherwise
fn push_disc(out: &mut MeshData, radius: f32, y: f32, segments: u32, color: [f32; 3]) {
    let up = y > 0.0;
    let normal = if up { Vec3::Y } else { Vec3::NEG_Y };
    let center = out.vertex_count() as u32;
    push_vert(&mut out.vertices, Vec3::Y * y, normal, color);
    for i in 0..segments {
        push_vert(&mut out.vertices, rim(i, segments) * radius + Vec3::Y * y, normal, color);
    }
    for i in 0..segments {
        let (a, b) = (center + 1 + i, center + 1 + (i + 1) % segments);
        if up {
            out.indices.extend_from_slice(&[center, b, a]);
        } else {
            out.indices.extend_from_slice(&[center, a, b]);
        }
    }
}

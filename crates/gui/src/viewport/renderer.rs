//! Software fallback for the 3D view when no GL context is available:
//! flat-shaded triangles sorted back to front and painted as one egui mesh.

use egui::{Color32, Rect, Stroke, Ui};
use glam::Vec3;
use studyroom_gui_lib::draw2d::color32;
use studyroom_gui_lib::scene3d::SceneFrame;

use super::camera::OrbitCamera;
use super::mesh::MeshData;

struct ScreenTriangle {
    points: [egui::Pos2; 3],
    depth: f32,
    color: Color32,
}

/// Paint the frame using egui's painter
pub fn paint_viewport(ui: &Ui, rect: Rect, camera: &OrbitCamera, frame: &SceneFrame) {
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, color32(frame.background));

    let eye = camera.eye_position();
    let mut triangles = Vec::new();
    collect_triangles(&mut triangles, &frame.room, camera, rect, eye, frame);
    for inst in &frame.items {
        collect_triangles(&mut triangles, &inst.mesh, camera, rect, eye, frame);
    }
    triangles.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    let mut mesh = egui::Mesh::default();
    for tri in &triangles {
        let base = mesh.vertices.len() as u32;
        for p in tri.points {
            mesh.colored_vertex(p, tri.color);
        }
        mesh.add_triangle(base, base + 1, base + 2);
    }
    painter.add(egui::Shape::mesh(mesh));

    if let Some(ref grid) = frame.grid {
        for seg in grid.vertices.chunks_exact(14) {
            let a = Vec3::new(seg[0], seg[1], seg[2]);
            let b = Vec3::new(seg[7], seg[8], seg[9]);
            let alpha = (seg[6] * 255.0) as u8;
            let stroke = Stroke::new(0.5, Color32::from_rgba_unmultiplied(217, 217, 217, alpha));
            if let (Some(pa), Some(pb)) = (camera.project(a, rect), camera.project(b, rect)) {
                painter.line_segment([pa, pb], stroke);
            }
        }
    }
}

fn collect_triangles(
    out: &mut Vec<ScreenTriangle>,
    mesh: &MeshData,
    camera: &OrbitCamera,
    rect: Rect,
    eye: Vec3,
    frame: &SceneFrame,
) {
    let vertex = |i: u32| {
        let o = i as usize * 9;
        let v = &mesh.vertices[o..o + 9];
        (Vec3::new(v[0], v[1], v[2]), Vec3::new(v[3], v[4], v[5]), [v[6], v[7], v[8]])
    };

    for tri in mesh.indices.chunks_exact(3) {
        let (p0, n0, c0) = vertex(tri[0]);
        let (p1, n1, _) = vertex(tri[1]);
        let (p2, n2, _) = vertex(tri[2]);

        let center = (p0 + p1 + p2) / 3.0;
        let normal = (n0 + n1 + n2).normalize_or_zero();
        if normal.dot(eye - center) <= 0.0 {
            continue;
        }

        let projected = [
            camera.project_with_depth(p0, rect),
            camera.project_with_depth(p1, rect),
            camera.project_with_depth(p2, rect),
        ];
        let [Some((s0, d0)), Some((s1, d1)), Some((s2, d2))] = projected else {
            continue;
        };

        let lit = shade(c0, normal, center, frame);
        out.push(ScreenTriangle {
            points: [s0, s1, s2],
            depth: (d0 + d1 + d2) / 3.0,
            color: Color32::from_rgb(to_channel(lit[0]), to_channel(lit[1]), to_channel(lit[2])),
        });
    }
}

/// Light a surface color the same way the GL shader does
fn shade(color: [f32; 3], normal: Vec3, position: Vec3, frame: &SceneFrame) -> [f32; 3] {
    let rig = &frame.lighting;
    let base = rig.ambient + rig.directional * normal.dot(rig.direction).max(0.0);
    let tint = rig.color.to_unit();
    let mut light = Vec3::from_array(tint) * base;

    for point in &frame.point_lights {
        let to_light = point.position - position;
        let dist = to_light.length();
        let falloff = (1.0 - dist / point.range).clamp(0.0, 1.0);
        let lambert = normal.dot(to_light / dist.max(1e-4)).max(0.0);
        light += Vec3::from_array(point.color.to_unit()) * point.intensity * falloff * falloff * lambert;
    }

    let lit = (Vec3::from_array(color) * light).min(Vec3::ONE);
    lit.to_array()
}

fn to_channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{RoomSettings, ThemeName, ThemeRegistry};
    use studyroom_gui_lib::scene3d::{build_scene, DEFAULT_EYE};

    fn empty_frame(lighting: u8) -> SceneFrame {
        let settings = RoomSettings {
            theme: ThemeName::Warm,
            lighting,
            ..RoomSettings::default()
        };
        build_scene(&[], None, &settings, &ThemeRegistry::builtin(), 0.0, DEFAULT_EYE)
    }

    #[test]
    fn test_shade_dark_room_is_black() {
        let frame = empty_frame(0);
        let lit = shade([1.0, 1.0, 1.0], Vec3::Y, Vec3::ZERO, &frame);
        assert_eq!(lit, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_shade_brighter_with_more_light() {
        let dim = shade([0.5, 0.5, 0.5], Vec3::Y, Vec3::ZERO, &empty_frame(30));
        let bright = shade([0.5, 0.5, 0.5], Vec3::Y, Vec3::ZERO, &empty_frame(90));
        assert!(bright[0] > dim[0]);
        assert!(bright.iter().all(|c| *c <= 1.0));
    }

    #[test]
    fn test_to_channel_clamps() {
        assert_eq!(to_channel(-1.0), 0);
        assert_eq!(to_channel(2.0), 255);
    }
}

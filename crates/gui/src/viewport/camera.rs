use glam::{Mat4, Vec3, Vec4};
use studyroom_gui_lib::scene3d::DEFAULT_EYE;

use super::picking::Ray;

/// Point the camera orbits around
pub const ORBIT_TARGET: Vec3 = Vec3::new(0.0, 3.0, 0.0);
pub const MIN_DISTANCE: f32 = 8.0;
pub const MAX_DISTANCE: f32 = 25.0;
/// Largest angle between the view direction and straight down
pub const MAX_POLAR: f32 = std::f32::consts::PI / 2.2;
const MAX_PITCH: f32 = 1.5;

/// Orbit camera for the room view
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    /// Horizontal rotation angle (radians)
    pub yaw: f32,
    /// Elevation above the horizontal (radians)
    pub pitch: f32,
    /// Distance from target
    pub distance: f32,
    pub target: Vec3,
    /// Vertical field of view (radians)
    pub fov: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitCamera {
    /// Camera looking from the default eye at the orbit target
    pub fn new() -> Self {
        let offset = DEFAULT_EYE - ORBIT_TARGET;
        let distance = offset.length();
        Self {
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).asin(),
            distance: distance.clamp(MIN_DISTANCE, MAX_DISTANCE),
            target: ORBIT_TARGET,
            fov: 50.0_f32.to_radians(),
        }
    }

    /// Pitch never drops below the polar limit, so the eye stays above the floor plane
    fn min_pitch() -> f32 {
        std::f32::consts::FRAC_PI_2 - MAX_POLAR
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx.to_radians();
        self.pitch = (self.pitch + dy.to_radians()).clamp(Self::min_pitch(), MAX_PITCH);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        let offset = self.right_vector() * dx + self.up_vector() * dy;
        self.target += offset;
    }

    /// Camera position in world space
    pub fn eye_position(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(self.distance * cp * sy, self.distance * sp, self.distance * cp * cy)
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, aspect, 0.1, 200.0)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    fn right_vector(&self) -> Vec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        fwd.cross(Vec3::Y).normalize_or_zero()
    }

    fn up_vector(&self) -> Vec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        self.right_vector().cross(fwd).normalize_or_zero()
    }

    /// Project a world point to screen coords, with its clip-space depth
    pub fn project_with_depth(&self, point: Vec3, rect: egui::Rect) -> Option<(egui::Pos2, f32)> {
        let aspect = rect.width() / rect.height();
        let p = self.view_projection(aspect) * Vec4::new(point.x, point.y, point.z, 1.0);
        if p.w <= 0.0 {
            return None;
        }
        let ndc = p.truncate() / p.w;
        let screen_x = rect.center().x + ndc.x * rect.width() * 0.5;
        let screen_y = rect.center().y - ndc.y * rect.height() * 0.5;
        Some((egui::pos2(screen_x, screen_y), p.w))
    }

    /// Project a world point to screen coords (for overlay text)
    pub fn project(&self, point: Vec3, rect: egui::Rect) -> Option<egui::Pos2> {
        self.project_with_depth(point, rect).map(|(pos, _)| pos)
    }

    /// Cast a ray from a screen position into the scene
    pub fn screen_ray(&self, screen_pos: egui::Pos2, rect: egui::Rect) -> Ray {
        let aspect = rect.width() / rect.height();

        let ndc_x = (screen_pos.x - rect.center().x) / (rect.width() * 0.5);
        let ndc_y = -(screen_pos.y - rect.center().y) / (rect.height() * 0.5);

        let vp_inv = self.view_projection(aspect).inverse();
        let near_world = vp_inv * Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
        let far_world = vp_inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);

        let near = near_world.truncate() / near_world.w;
        let far = far_world.truncate() / far_world.w;

        Ray::new(self.eye_position(), far - near)
    }
}

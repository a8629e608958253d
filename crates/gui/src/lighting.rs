//! Theme and lighting modulation shared by the 2D layout and the 3D scene.

use glam::Vec3;
use shared::{ColorError, Rgb, RoomSettings, Theme};

/// Below this lighting level the 2D layout is dimmed with a black overlay
pub const DIM_THRESHOLD: u8 = 50;
/// Overlay alpha at lighting 0
pub const MAX_DIM_ALPHA: f32 = 0.3;
/// Lamp flicker angular rate (radians per second)
pub const FLICKER_RATE: f32 = 5.0;

const AMBIENT_BASE: f32 = 0.4;
const DIRECTIONAL_BASE: f32 = 0.9;
const CEILING_BASE: f32 = 0.3;
/// Range of the recessed ceiling lights in world units
pub const CEILING_RANGE: f32 = 8.0;

/// Recessed ceiling light positions in world space
pub const CEILING_LIGHTS: [Vec3; 4] = [
    Vec3::new(-6.0, 9.5, -3.0),
    Vec3::new(6.0, 9.5, -3.0),
    Vec3::new(-6.0, 9.5, 3.0),
    Vec3::new(6.0, 9.5, 3.0),
];

/// Effective brightness factor: theme baseline scaled by the lighting slider.
pub fn brightness_factor(theme: &Theme, settings: &RoomSettings) -> f32 {
    theme.lighting * (settings.lighting.min(100) as f32 / 100.0)
}

/// Scale every channel of `color` by `factor`, clamped to [0, 255].
pub fn adjust_brightness(color: Rgb, factor: f32) -> Rgb {
    color.scaled(factor)
}

/// Hex-string flavor of [`adjust_brightness`].
pub fn adjust_hex(hex: &str, factor: f32) -> Result<Rgb, ColorError> {
    let color = Rgb::from_hex(hex)?;
    Ok(adjust_brightness(color, factor))
}

/// Alpha of the full-canvas black overlay, or `None` when the room is bright enough.
pub fn dark_overlay_alpha(lighting: u8) -> Option<f32> {
    if lighting >= DIM_THRESHOLD {
        return None;
    }
    let deficit = (DIM_THRESHOLD - lighting) as f32 / DIM_THRESHOLD as f32;
    Some(deficit * MAX_DIM_ALPHA)
}

/// Lamp point-light intensity at `elapsed` seconds. Pure in time: no accumulated state.
pub fn lamp_intensity(factor: f32, elapsed: f32) -> f32 {
    factor * (0.8 + 0.2 * (elapsed * FLICKER_RATE).sin())
}

/// Theme colors after lighting modulation, as used by the 2D layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemePalette {
    pub background: Rgb,
    pub floor: Rgb,
    /// Wall and accent stay unmodulated; decorations adjust them as needed
    pub wall: Rgb,
    pub accent: Rgb,
    pub factor: f32,
}

impl ThemePalette {
    pub fn resolve(theme: &Theme, settings: &RoomSettings) -> Self {
        let factor = brightness_factor(theme, settings);
        Self {
            background: adjust_brightness(theme.background, factor),
            floor: adjust_brightness(theme.floor, factor),
            wall: theme.wall,
            accent: theme.accent,
            factor,
        }
    }
}

/// Light rig of the 3D scene; intensities scale directly with the brightness factor.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLighting {
    pub ambient: f32,
    pub directional: f32,
    /// Unit vector pointing towards the directional light
    pub direction: Vec3,
    pub ceiling: f32,
    pub color: Rgb,
}

impl SceneLighting {
    pub fn new(factor: f32) -> Self {
        let factor = factor.max(0.0);
        Self {
            ambient: AMBIENT_BASE * factor,
            directional: DIRECTIONAL_BASE * factor,
            direction: Vec3::new(10.0, 10.0, 5.0).normalize(),
            ceiling: CEILING_BASE * factor,
            color: Rgb::new(0xff, 0xf8, 0xe7),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{ThemeName, ThemeRegistry};

    fn settings(theme: ThemeName, lighting: u8) -> RoomSettings {
        RoomSettings {
            theme,
            lighting,
            ..RoomSettings::default()
        }
    }

    #[test]
    fn test_overlay_alpha_values() {
        let alpha = dark_overlay_alpha(20).unwrap();
        assert!((alpha - 0.18).abs() < 1e-6);
        assert!((dark_overlay_alpha(0).unwrap() - 0.3).abs() < 1e-6);
        assert_eq!(dark_overlay_alpha(50), None);
        assert_eq!(dark_overlay_alpha(80), None);
        assert_eq!(dark_overlay_alpha(100), None);
    }

    #[test]
    fn test_minimal_theme_factor() {
        let reg = ThemeRegistry::builtin();
        let s = settings(ThemeName::Minimal, 50);
        let factor = brightness_factor(reg.get(ThemeName::Minimal), &s);
        assert!((factor - 0.6).abs() < 1e-6);

        let palette = ThemePalette::resolve(reg.get(ThemeName::Minimal), &s);
        // #f7f7f5 * 0.6 = (148.2, 148.2, 147.0)
        assert_eq!(palette.background, Rgb::new(148, 148, 147));
    }

    #[test]
    fn test_factor_ignores_out_of_range_slider() {
        let reg = ThemeRegistry::builtin();
        let s = settings(ThemeName::Warm, 250);
        assert_eq!(brightness_factor(reg.get(ThemeName::Warm), &s), 1.0);
    }

    #[test]
    fn test_adjust_hex() {
        assert_eq!(adjust_hex("#808080", 2.0).unwrap(), Rgb::new(255, 255, 255));
        assert_eq!(adjust_hex("#808080", 0.0).unwrap(), Rgb::BLACK);
        assert!(adjust_hex("808080", 1.0).is_err());
    }

    #[test]
    fn test_lamp_intensity_is_pure_in_time() {
        let a = lamp_intensity(0.5, 1.25);
        let b = lamp_intensity(0.5, 1.25);
        assert_eq!(a, b);
        assert!((lamp_intensity(1.0, 0.0) - 0.8).abs() < 1e-6);
        for i in 0..100 {
            let v = lamp_intensity(1.0, i as f32 * 0.173);
            assert!((0.6 - 1e-5..=1.0 + 1e-5).contains(&v));
        }
    }

    #[test]
    fn test_scene_lighting_scales_with_factor() {
        let dim = SceneLighting::new(0.5);
        let full = SceneLighting::new(1.0);
        assert!((dim.ambient * 2.0 - full.ambient).abs() < 1e-6);
        assert!((dim.directional * 2.0 - full.directional).abs() < 1e-6);
        assert_eq!(SceneLighting::new(0.0).ambient, 0.0);
        assert!((full.direction.length() - 1.0).abs() < 1e-5);
    }
}

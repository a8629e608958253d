use serde::{Deserialize, Serialize};

/// Ошибки разбора цвета
#[derive(Debug, Clone, PartialEq)]
pub enum ColorError {
    /// Строка не начинается с `#`
    MissingHash(String),
    /// Неверное число цифр (ожидается 3 или 6)
    InvalidLength(String),
    /// Недопустимый символ
    InvalidDigit(String),
}

impl std::fmt::Display for ColorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorError::MissingHash(s) => write!(f, "Color '{}' must start with '#'", s),
            ColorError::InvalidLength(s) => write!(f, "Color '{}' must have 3 or 6 hex digits", s),
            ColorError::InvalidDigit(s) => write!(f, "Color '{}' contains a non-hex digit", s),
        }
    }
}

impl std::error::Error for ColorError {}

/// Цвет RGB, 8 бит на канал
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Цвет по умолчанию для предметов без цвета
    pub const NEUTRAL_GRAY: Rgb = Rgb::new(0x8a, 0x8a, 0xa0);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Разобрать `#rrggbb` или `#rgb`
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(s.to_string()))?;

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigit(s.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| ColorError::InvalidDigit(s.to_string()))
        };

        match digits.len() {
            6 => Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            3 => {
                // #abc == #aabbcc
                let r = channel(0..1)? * 17;
                let g = channel(1..2)? * 17;
                let b = channel(2..3)? * 17;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ColorError::InvalidLength(s.to_string())),
        }
    }

    /// Строка `#rrggbb` (нижний регистр)
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Яркость: каждый канал умножается на `factor`, округляется и ограничивается [0, 255].
    /// NaN и отрицательные множители дают чёрный.
    pub fn scaled(self, factor: f32) -> Self {
        let factor = if factor.is_nan() { 0.0 } else { factor.max(0.0) };
        let channel = |c: u8| (c as f32 * factor).round().clamp(0.0, 255.0) as u8;
        Self::new(channel(self.r), channel(self.g), channel(self.b))
    }

    /// Каналы в диапазоне 0.0–1.0 (для вершинных цветов)
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn from_array(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_six_digits() {
        assert_eq!(Rgb::from_hex("#ffaa00").unwrap(), Rgb::new(255, 170, 0));
        assert_eq!(Rgb::from_hex("#8B4513").unwrap(), Rgb::new(0x8b, 0x45, 0x13));
        assert_eq!(Rgb::from_hex("  #000000 ").unwrap(), Rgb::BLACK);
    }

    #[test]
    fn test_parse_three_digits() {
        assert_eq!(Rgb::from_hex("#fa0").unwrap(), Rgb::new(255, 170, 0));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Rgb::from_hex("ffaa00"), Err(ColorError::MissingHash(_))));
        assert!(matches!(Rgb::from_hex("#ffaa"), Err(ColorError::InvalidLength(_))));
        assert!(matches!(Rgb::from_hex("#gggggg"), Err(ColorError::InvalidDigit(_))));
        assert!(matches!(Rgb::from_hex("#ffé"), Err(ColorError::InvalidDigit(_))));
    }

    #[test]
    fn test_hex_roundtrip() {
        let c = Rgb::new(0x2a, 0x2a, 0x3e);
        assert_eq!(c.to_hex(), "#2a2a3e");
        assert_eq!(Rgb::from_hex(&c.to_hex()).unwrap(), c);
    }

    #[test]
    fn test_scaled_zero_is_black() {
        assert_eq!(Rgb::new(200, 100, 50).scaled(0.0), Rgb::BLACK);
        assert_eq!(Rgb::new(200, 100, 50).scaled(-1.0), Rgb::BLACK);
        assert_eq!(Rgb::new(200, 100, 50).scaled(f32::NAN), Rgb::BLACK);
    }

    #[test]
    fn test_scaled_clamps_at_255() {
        assert_eq!(Rgb::new(200, 100, 50).scaled(2.0), Rgb::new(255, 200, 100));
        assert_eq!(Rgb::new(200, 100, 0).scaled(f32::INFINITY), Rgb::new(255, 255, 0));
    }

    #[test]
    fn test_scaled_is_monotonic() {
        let base = Rgb::new(247, 128, 9);
        let mut prev = base.scaled(0.0);
        for step in 1..=40 {
            let next = base.scaled(step as f32 * 0.05);
            assert!(next.r >= prev.r && next.g >= prev.g && next.b >= prev.b);
            prev = next;
        }
    }

    #[test]
    fn test_scaled_identity() {
        let c = Rgb::new(12, 34, 56);
        assert_eq!(c.scaled(1.0), c);
    }
}

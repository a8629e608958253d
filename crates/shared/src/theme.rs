use serde::{Deserialize, Serialize};

use crate::Rgb;

/// Имя темы оформления
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeName {
    #[default]
    Dark,
    Warm,
    Minimal,
    Nature,
}

impl ThemeName {
    pub fn all() -> &'static [ThemeName] {
        &[ThemeName::Dark, ThemeName::Warm, ThemeName::Minimal, ThemeName::Nature]
    }

    pub fn key(self) -> &'static str {
        match self {
            ThemeName::Dark => "dark",
            ThemeName::Warm => "warm",
            ThemeName::Minimal => "minimal",
            ThemeName::Nature => "nature",
        }
    }

    fn index(self) -> usize {
        match self {
            ThemeName::Dark => 0,
            ThemeName::Warm => 1,
            ThemeName::Minimal => 2,
            ThemeName::Nature => 3,
        }
    }
}

/// Набор базовых цветов темы и базовый множитель освещения
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: ThemeName,
    pub background: Rgb,
    pub floor: Rgb,
    pub wall: Rgb,
    pub accent: Rgb,
    /// Базовый множитель освещения (0.8–1.2)
    pub lighting: f32,
}

/// Неизменяемый реестр тем; передаётся в рендереры явно
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeRegistry {
    themes: [Theme; 4],
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ThemeRegistry {
    /// Встроенные темы
    pub fn builtin() -> Self {
        Self {
            themes: [
                Theme {
                    name: ThemeName::Dark,
                    background: Rgb::new(0x2a, 0x2a, 0x3e),
                    floor: Rgb::new(0x3a, 0x3a, 0x5e),
                    wall: Rgb::new(0x1f, 0x1f, 0x2e),
                    accent: Rgb::new(0xff, 0xaa, 0x00),
                    lighting: 0.8,
                },
                Theme {
                    name: ThemeName::Warm,
                    background: Rgb::new(0x3e, 0x2c, 0x22),
                    floor: Rgb::new(0x8b, 0x5a, 0x2b),
                    wall: Rgb::new(0xf5, 0xe6, 0xd3),
                    accent: Rgb::new(0xff, 0x8c, 0x42),
                    lighting: 1.0,
                },
                Theme {
                    name: ThemeName::Minimal,
                    background: Rgb::new(0xf7, 0xf7, 0xf5),
                    floor: Rgb::new(0xd9, 0xd9, 0xd6),
                    wall: Rgb::new(0xfa, 0xf9, 0xf6),
                    accent: Rgb::new(0x4a, 0x55, 0x68),
                    lighting: 1.2,
                },
                Theme {
                    name: ThemeName::Nature,
                    background: Rgb::new(0x2e, 0x3e, 0x2a),
                    floor: Rgb::new(0x6b, 0x8e, 0x23),
                    wall: Rgb::new(0xe8, 0xf0, 0xe0),
                    accent: Rgb::new(0x22, 0x8b, 0x22),
                    lighting: 1.1,
                },
            ],
        }
    }

    /// Заменить тему с тем же именем (для тестов и пользовательских палитр)
    pub fn with_theme(mut self, theme: Theme) -> Self {
        let idx = theme.name.index();
        self.themes[idx] = theme;
        self
    }

    /// Тема по имени; реестр всегда содержит все имена
    pub fn get(&self, name: ThemeName) -> &Theme {
        &self.themes[name.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Theme> {
        self.themes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_resolves() {
        let reg = ThemeRegistry::builtin();
        for name in ThemeName::all() {
            assert_eq!(reg.get(*name).name, *name);
        }
    }

    #[test]
    fn test_lighting_range() {
        let reg = ThemeRegistry::builtin();
        for theme in reg.iter() {
            assert!((0.8..=1.2).contains(&theme.lighting), "{:?}", theme.name);
        }
        assert_eq!(reg.get(ThemeName::Minimal).lighting, 1.2);
    }

    #[test]
    fn test_with_theme_replaces_entry() {
        let mut custom = ThemeRegistry::builtin().get(ThemeName::Warm).clone();
        custom.lighting = 0.9;
        let reg = ThemeRegistry::builtin().with_theme(custom);
        assert_eq!(reg.get(ThemeName::Warm).lighting, 0.9);
        assert_eq!(reg.get(ThemeName::Dark).lighting, 0.8);
    }

    #[test]
    fn test_theme_name_serde() {
        let json = serde_json::to_string(&ThemeName::Nature).unwrap();
        assert_eq!(json, r#""nature""#);
        let back: ThemeName = serde_json::from_str(r#""minimal""#).unwrap();
        assert_eq!(back, ThemeName::Minimal);
    }
}

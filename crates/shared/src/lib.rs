use serde::{Deserialize, Serialize};

pub mod color;
pub mod theme;

pub use color::{ColorError, Rgb};
pub use theme::{Theme, ThemeName, ThemeRegistry};

/// Разделитель между типом предмета и уникальной частью идентификатора
pub const ID_SEPARATOR: char = '_';

/// Вариант формы предмета: единственный ключ выбора процедуры отрисовки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeVariant {
    Desk,
    Chair,
    Bookshelf,
    Plant,
    Lamp,
    Default,
}

impl ShapeVariant {
    /// Все варианты в порядке таблицы отрисовки
    pub const ALL: [ShapeVariant; 6] = [
        ShapeVariant::Desk,
        ShapeVariant::Chair,
        ShapeVariant::Bookshelf,
        ShapeVariant::Plant,
        ShapeVariant::Lamp,
        ShapeVariant::Default,
    ];

    /// Определить вариант по префиксу идентификатора (`desk_1712345` → `Desk`)
    pub fn from_id(id: &str) -> Self {
        let prefix = id.split(ID_SEPARATOR).next().unwrap_or_default();
        match prefix {
            "desk" => ShapeVariant::Desk,
            "chair" => ShapeVariant::Chair,
            "bookshelf" => ShapeVariant::Bookshelf,
            "plant" => ShapeVariant::Plant,
            "lamp" => ShapeVariant::Lamp,
            _ => ShapeVariant::Default,
        }
    }

    /// Позиция варианта в таблице отрисовки
    pub fn index(self) -> usize {
        match self {
            ShapeVariant::Desk => 0,
            ShapeVariant::Chair => 1,
            ShapeVariant::Bookshelf => 2,
            ShapeVariant::Plant => 3,
            ShapeVariant::Lamp => 4,
            ShapeVariant::Default => 5,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            ShapeVariant::Desk => "desk",
            ShapeVariant::Chair => "chair",
            ShapeVariant::Bookshelf => "bookshelf",
            ShapeVariant::Plant => "plant",
            ShapeVariant::Lamp => "lamp",
            ShapeVariant::Default => "default",
        }
    }
}

/// Предмет мебели, размещённый в комнате (координаты в пространстве раскладки 800×600)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureItem {
    /// Идентификатор с префиксом типа, например `desk_1712345678`
    pub id: String,
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Базовый цвет `#rrggbb`; отсутствующий или неверный цвет заменяется серым
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl FurnitureItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            x,
            y,
            width,
            height,
            color: None,
        }
    }

    pub fn with_color(mut self, hex: impl Into<String>) -> Self {
        self.color = Some(hex.into());
        self
    }

    pub fn variant(&self) -> ShapeVariant {
        ShapeVariant::from_id(&self.id)
    }

    /// Цвет предмета или нейтральный серый, если цвет не задан или не разобран
    pub fn resolved_color(&self) -> Rgb {
        self.color
            .as_deref()
            .and_then(|hex| Rgb::from_hex(hex).ok())
            .unwrap_or(Rgb::NEUTRAL_GRAY)
    }

    /// Есть ли у предмета ненулевая площадь (иначе он не рисуется)
    pub fn has_area(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Попадает ли точка в ограничивающий прямоугольник (границы включительно)
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Фоновый звук (на отрисовку не влияет)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbientSound {
    #[default]
    None,
    Rain,
    Fire,
    Cafe,
    Forest,
}

impl AmbientSound {
    pub fn all() -> &'static [AmbientSound] {
        &[
            AmbientSound::None,
            AmbientSound::Rain,
            AmbientSound::Fire,
            AmbientSound::Cafe,
            AmbientSound::Forest,
        ]
    }
}

/// Настройки комнаты; ядро читает только `theme` и `lighting`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSettings {
    pub theme: ThemeName,
    /// Освещённость 0–100
    pub lighting: u8,
    /// Громкость музыки 0–100
    pub music_volume: u8,
    pub ambient_sound: AmbientSound,
    pub show_grid: bool,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            theme: ThemeName::Dark,
            lighting: 50,
            music_volume: 50,
            ambient_sound: AmbientSound::None,
            show_grid: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_from_prefix() {
        assert_eq!(ShapeVariant::from_id("desk_1712345678"), ShapeVariant::Desk);
        assert_eq!(ShapeVariant::from_id("chair_1"), ShapeVariant::Chair);
        assert_eq!(ShapeVariant::from_id("bookshelf_2"), ShapeVariant::Bookshelf);
        assert_eq!(ShapeVariant::from_id("plant_3"), ShapeVariant::Plant);
        assert_eq!(ShapeVariant::from_id("lamp_4"), ShapeVariant::Lamp);
        assert_eq!(ShapeVariant::from_id("lamp"), ShapeVariant::Lamp);
    }

    #[test]
    fn test_unknown_variant_is_default() {
        assert_eq!(ShapeVariant::from_id("rug_5"), ShapeVariant::Default);
        assert_eq!(ShapeVariant::from_id("coffee_6"), ShapeVariant::Default);
        assert_eq!(ShapeVariant::from_id(""), ShapeVariant::Default);
        // Only the text before the first separator counts.
        assert_eq!(ShapeVariant::from_id("desklamp_7"), ShapeVariant::Default);
    }

    #[test]
    fn test_variant_index_matches_table_order() {
        for (i, v) in ShapeVariant::ALL.iter().enumerate() {
            assert_eq!(v.index(), i);
        }
    }

    #[test]
    fn test_resolved_color_fallback() {
        let item = FurnitureItem::new("desk_1", "Desk", 0.0, 0.0, 80.0, 40.0);
        assert_eq!(item.resolved_color(), Rgb::NEUTRAL_GRAY);

        let item = item.with_color("not-a-color");
        assert_eq!(item.resolved_color(), Rgb::NEUTRAL_GRAY);

        let item = FurnitureItem::new("desk_1", "Desk", 0.0, 0.0, 80.0, 40.0).with_color("#8B4513");
        assert_eq!(item.resolved_color(), Rgb::new(0x8b, 0x45, 0x13));
    }

    #[test]
    fn test_has_area() {
        let mut item = FurnitureItem::new("desk_1", "Desk", 0.0, 0.0, 80.0, 40.0);
        assert!(item.has_area());
        item.width = 0.0;
        assert!(!item.has_area());
        item.width = -3.0;
        assert!(!item.has_area());
        item.width = f32::NAN;
        assert!(!item.has_area());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let item = FurnitureItem::new("desk_1", "Desk", 10.0, 20.0, 50.0, 30.0);
        assert!(item.contains(10.0, 20.0));
        assert!(item.contains(60.0, 50.0));
        assert!(!item.contains(60.1, 50.0));
        assert!(!item.contains(9.9, 25.0));
    }

    #[test]
    fn test_item_serde_camel_case() {
        let item = FurnitureItem::new("plant_1", "Plant", 1.0, 2.0, 25.0, 35.0).with_color("#228B22");
        let json = serde_json::to_string(&item).unwrap();
        let back: FurnitureItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item, back);

        let no_color: FurnitureItem =
            serde_json::from_str(r#"{"id":"rug_1","name":"Rug","x":0,"y":0,"width":120,"height":80}"#).unwrap();
        assert!(no_color.color.is_none());
    }

    #[test]
    fn test_settings_json_field_names() {
        let settings = RoomSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains(r#""musicVolume":50"#));
        assert!(json.contains(r#""ambientSound":"none""#));
        assert!(json.contains(r#""showGrid":false"#));
        assert!(json.contains(r#""theme":"dark""#));
    }
}

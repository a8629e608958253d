use std::sync::atomic::{AtomicU8, Ordering};

use crate::state::Language;

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=En (default)

pub fn lang() -> Language {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Language::Ru,
        _ => Language::En,
    }
}

pub fn set_lang(l: Language) {
    CURRENT_LANG.store(
        match l {
            Language::En => 0,
            Language::Ru => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let ru = lang() == Language::Ru;
    match key {
        // ── Main menus ──────────────────────────────────────
        "menu.room" => if ru { "Комната" } else { "Room" },
        "menu.new_room" => if ru { "Пустая комната" } else { "Empty room" },
        "menu.demo_room" => if ru { "Демо-комната" } else { "Demo room" },
        "menu.quit" => if ru { "Выход" } else { "Quit" },

        "menu.edit" => if ru { "Правка" } else { "Edit" },
        "menu.delete" => if ru { "Удалить  Del" } else { "Delete  Del" },
        "menu.deselect" => if ru { "Снять выделение  Esc" } else { "Deselect  Esc" },

        "menu.view" => if ru { "Вид" } else { "View" },
        "menu.reset_camera" => if ru { "Сбросить камеру" } else { "Reset camera" },
        "menu.language" => if ru { "Язык" } else { "Language" },
        "menu.font_size" => if ru { "Размер шрифта" } else { "Font size" },

        // ── View modes ──────────────────────────────────────
        "view.2d" => if ru { "2D план" } else { "2D plan" },
        "view.3d" => if ru { "3D вид" } else { "3D view" },
        "view.split" => if ru { "Разделённый" } else { "Split" },

        // ── Item library ────────────────────────────────────
        "lib.title" => if ru { "Библиотека" } else { "Library" },
        "lib.add_hint" => if ru { "Нажмите, чтобы добавить" } else { "Click to add" },
        "cat.furniture" => if ru { "Мебель" } else { "Furniture" },
        "cat.decor" => if ru { "Декор" } else { "Decor" },
        "cat.lighting" => if ru { "Освещение" } else { "Lighting" },
        "cat.accessories" => if ru { "Аксессуары" } else { "Accessories" },
        "cat.structure" => if ru { "Конструкция" } else { "Structure" },

        // ── Control panel ───────────────────────────────────
        "tab.room" => if ru { "Комната" } else { "Room" },
        "tab.item" => if ru { "Предмет" } else { "Item" },

        "room.theme" => if ru { "Тема" } else { "Theme" },
        "room.lighting" => if ru { "Освещение" } else { "Lighting" },
        "room.music" => if ru { "Громкость музыки" } else { "Music volume" },
        "room.ambient" => if ru { "Фоновый звук" } else { "Ambient sound" },
        "room.grid" => if ru { "Показывать сетку" } else { "Show grid" },

        "theme.dark" => if ru { "Тёмная" } else { "Dark" },
        "theme.warm" => if ru { "Тёплая" } else { "Warm" },
        "theme.minimal" => if ru { "Минимализм" } else { "Minimal" },
        "theme.nature" => if ru { "Природа" } else { "Nature" },

        "sound.none" => if ru { "Нет" } else { "None" },
        "sound.rain" => if ru { "Дождь" } else { "Rain" },
        "sound.fire" => if ru { "Камин" } else { "Fire" },
        "sound.cafe" => if ru { "Кафе" } else { "Cafe" },
        "sound.forest" => if ru { "Лес" } else { "Forest" },

        "item.none" => if ru { "Ничего не выбрано" } else { "Nothing selected" },
        "item.name" => if ru { "Название" } else { "Name" },
        "item.color" => if ru { "Цвет" } else { "Color" },
        "item.width" => if ru { "Ширина" } else { "Width" },
        "item.height" => if ru { "Высота" } else { "Height" },
        "item.position" => if ru { "Позиция" } else { "Position" },
        "item.delete" => if ru { "Удалить предмет" } else { "Delete item" },

        // ── Status bar ──────────────────────────────────────
        "status.items" => if ru { "Предметов" } else { "Items" },
        "status.selected" => if ru { "Выбрано" } else { "Selected" },
        "status.ready" => if ru { "Готово" } else { "Ready" },
        "status.dragging" => if ru { "Перемещение" } else { "Dragging" },

        // ── Viewport ────────────────────────────────────────
        "viewport.nav_hint" => if ru {
            "ЛКМ: вращение | ПКМ: сдвиг | Колесо: масштаб"
        } else {
            "LMB: orbit | RMB: pan | Scroll: zoom"
        },

        // ── Fallback ────────────────────────────────────────
        _ => "???",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_falls_back() {
        assert_eq!(t("no.such.key"), "???");
    }

    #[test]
    fn test_category_keys_translated() {
        for category in studyroom_gui_lib::catalog::categories() {
            let key = format!("cat.{}", category.key());
            assert_ne!(t(&key), "???", "missing translation for {key}");
        }
    }
}

//! JSON command protocol for scripted sessions against the headless harness.

use serde::{Deserialize, Serialize};
use shared::ThemeName;

use crate::harness::RoomHarness;
use crate::interaction::Report;

/// A command a script can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum RoomCommand {
    /// Spawn a catalog template by kind (`desk`, `rug`, ...)
    AddItem { kind: String },
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp,
    PointerLeave,
    /// Set or clear the selection directly
    Select {
        #[serde(default)]
        index: Option<usize>,
    },
    Delete { index: usize },
    SetTheme { theme: ThemeName },
    SetLighting { lighting: i32 },
    /// List items, selection and settings.
    Inspect,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

fn report_json(report: Option<Report>) -> serde_json::Value {
    match report {
        None => serde_json::Value::Null,
        Some(Report::Select(index)) => serde_json::json!({ "select": index }),
        Some(Report::Move { index, position }) => serde_json::json!({
            "move": { "index": index, "x": position.x, "y": position.y }
        }),
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut RoomHarness, cmd: RoomCommand) -> CommandResponse {
    match cmd {
        RoomCommand::AddItem { kind } => match harness.add_from_catalog(&kind) {
            Some(index) => {
                let id = harness.item(index).map(|i| i.id.clone());
                CommandResponse::ok_with_data(serde_json::json!({ "index": index, "id": id }))
            }
            None => CommandResponse::err(format!("Unknown item kind '{kind}'")),
        },

        RoomCommand::PointerDown { x, y } => {
            CommandResponse::ok_with_data(serde_json::json!({ "report": report_json(harness.pointer_down(x, y)) }))
        }
        RoomCommand::PointerMove { x, y } => {
            CommandResponse::ok_with_data(serde_json::json!({ "report": report_json(harness.pointer_move(x, y)) }))
        }
        RoomCommand::PointerUp => {
            harness.pointer_up();
            CommandResponse::ok()
        }
        RoomCommand::PointerLeave => {
            harness.pointer_leave();
            CommandResponse::ok()
        }

        RoomCommand::Select { index } => {
            if let Some(i) = index {
                if harness.item(i).is_none() {
                    return CommandResponse::err(format!("No item at index {i}"));
                }
            }
            harness.select(index);
            CommandResponse::ok_with_data(serde_json::json!({ "selected": harness.selected() }))
        }

        RoomCommand::Delete { index } => match harness.delete(index) {
            Some(item) => CommandResponse::ok_with_data(serde_json::json!({ "removed": item.id })),
            None => CommandResponse::err(format!("No item at index {index}")),
        },

        RoomCommand::SetTheme { theme } => {
            harness.set_theme(theme);
            CommandResponse::ok()
        }

        RoomCommand::SetLighting { lighting } => {
            harness.set_lighting(lighting);
            CommandResponse::ok_with_data(serde_json::json!({ "lighting": harness.state.room.settings.lighting }))
        }

        RoomCommand::Inspect => {
            let room = &harness.state.room;
            CommandResponse::ok_with_data(serde_json::json!({
                "item_count": room.items.len(),
                "items": room.items,
                "selected": room.selected,
                "settings": room.settings,
            }))
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut RoomHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: RoomCommand = serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(harness: &mut RoomHarness, json: &str) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<RoomCommand> = serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds.into_iter().map(|cmd| execute_command(harness, cmd)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_command_serde_pointer_down() {
        let cmd: RoomCommand = serde_json::from_str(r#"{"command":"pointer_down","x":15,"y":15.5}"#).unwrap();
        match cmd {
            RoomCommand::PointerDown { x, y } => assert_eq!((x, y), (15.0, 15.5)),
            other => panic!("Wrong command: {other:?}"),
        }
    }

    #[test]
    fn test_command_serde_set_theme() {
        let cmd: RoomCommand = serde_json::from_str(r#"{"command":"set_theme","theme":"minimal"}"#).unwrap();
        assert!(matches!(cmd, RoomCommand::SetTheme { theme: ThemeName::Minimal }));
    }

    #[test]
    fn test_select_without_index_clears() {
        let mut h = RoomHarness::with_items(vec![fixtures::desk_at(0.0, 0.0)]);
        h.select(Some(0));
        let resp = execute_json(&mut h, r#"{"command":"select"}"#).unwrap();
        assert!(resp.success);
        assert_eq!(h.selected(), None);
    }

    #[test]
    fn test_execute_drag_reports() {
        let mut h = RoomHarness::with_items(vec![fixtures::boxed("desk_1", 10.0, 10.0, 80.0, 40.0)]);
        let resp = execute_json_batch(
            &mut h,
            r#"[
                {"command":"pointer_down","x":15,"y":15},
                {"command":"pointer_move","x":40,"y":40},
                {"command":"pointer_up"}
            ]"#,
        )
        .unwrap();
        assert!(resp.iter().all(|r| r.success));
        assert_eq!(resp[0].data.as_ref().unwrap()["report"]["select"], 0);
        assert_eq!(resp[1].data.as_ref().unwrap()["report"]["move"]["x"], 35.0);
    }

    #[test]
    fn test_execute_add_unknown_kind() {
        let mut h = RoomHarness::new();
        let resp = execute_json(&mut h, r#"{"command":"add_item","kind":"spaceship"}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.error.unwrap().contains("spaceship"));
    }

    #[test]
    fn test_execute_inspect() {
        let mut h = RoomHarness::with_items(fixtures::sample_room());
        execute_json(&mut h, r#"{"command":"set_lighting","lighting":130}"#).unwrap();
        let resp = execute_json(&mut h, r#"{"command":"inspect"}"#).unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data["item_count"], 6);
        assert_eq!(data["settings"]["lighting"], 100);
        assert_eq!(data["items"][0]["id"], "desk_1");
    }

    #[test]
    fn test_execute_invalid_json() {
        let mut h = RoomHarness::new();
        assert!(execute_json(&mut h, "not json").is_err());
        assert!(execute_json(&mut h, r#"{"command":"fly"}"#).is_err());
    }
}

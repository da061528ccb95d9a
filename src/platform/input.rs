//! Input normalization
//!
//! Host events arrive in client coordinates; the simulation works in CSS
//! pixels relative to the canvas' top-left corner.

use glam::Vec2;

/// What a key press asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ClearNearest,
    Boost,
    ToggleMute,
    Restart,
}

/// Map a `KeyboardEvent.code` / `key` value to an action
pub fn map_key(key: &str) -> Option<KeyAction> {
    match key {
        " " | "Space" | "Spacebar" | "Enter" | "NumpadEnter" => Some(KeyAction::ClearNearest),
        "b" | "B" | "KeyB" => Some(KeyAction::Boost),
        "m" | "M" | "KeyM" => Some(KeyAction::ToggleMute),
        "r" | "R" | "KeyR" => Some(KeyAction::Restart),
        _ => None,
    }
}

/// Convert a client-space position to canvas space given the canvas'
/// bounding rect origin.
pub fn to_viewport(client: Vec2, rect_origin: Vec2) -> Vec2 {
    client - rect_origin
}

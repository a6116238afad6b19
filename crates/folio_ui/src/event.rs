use serde::{Deserialize, Serialize};

/// A position in CSS pixels, relative to whatever element reported it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Keyboard keys (the subset page widgets react to).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    Space,
    #[serde(rename = "ArrowUp")]
    Up,
    #[serde(rename = "ArrowDown")]
    Down,
    #[serde(rename = "ArrowLeft")]
    Left,
    #[serde(rename = "ArrowRight")]
    Right,
    Home,
    End,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value to a key.
    ///
    /// Returns `None` for keys no widget cares about (modifiers, F-keys, ...).
    pub fn from_dom_key(key: &str) -> Option<Self> {
        let key = match key {
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            "Tab" => Key::Tab,
            " " | "Spacebar" => Key::Space,
            "ArrowUp" | "Up" => Key::Up,
            "ArrowDown" | "Down" => Key::Down,
            "ArrowLeft" | "Left" => Key::Left,
            "ArrowRight" | "Right" => Key::Right,
            "Home" => Key::Home,
            "End" => Key::End,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c.to_ascii_lowercase()),
                    _ => return None,
                }
            }
        };
        Some(key)
    }

    /// Short display label, as shown in settings or help text.
    pub fn label(&self) -> String {
        match self {
            Key::Char(c) => c.to_ascii_uppercase().to_string(),
            Key::Enter => "Enter".to_string(),
            Key::Escape => "Esc".to_string(),
            Key::Tab => "Tab".to_string(),
            Key::Space => "Space".to_string(),
            Key::Up => "↑".to_string(),
            Key::Down => "↓".to_string(),
            Key::Left => "←".to_string(),
            Key::Right => "→".to_string(),
            Key::Home => "Home".to_string(),
            Key::End => "End".to_string(),
        }
    }
}

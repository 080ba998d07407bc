//! Input event mapping
//!
//! The game has a single button. Keyboard and touch both collapse into it.

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    ArrowUp,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code` value
    pub fn from_code(code: &str) -> Self {
        match code {
            "Space" => Key::Space,
            "ArrowUp" => Key::ArrowUp,
            _ => Key::Other,
        }
    }
}

/// Raw input from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    TouchStart,
}

impl InputEvent {
    /// Whether this event is a press of the game's button
    pub fn is_press(&self) -> bool {
        match self {
            InputEvent::KeyDown(Key::Space | Key::ArrowUp) => true,
            InputEvent::KeyDown(Key::Other) => false,
            InputEvent::TouchStart => true,
        }
    }
}

/// Mouse button as seen by the capture logic. Only `Left` drives sessions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u8),
}

/// Typed notification pushed by the input listener into the event channel
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Move {
        x: f64,
        y: f64,
    },
    Click {
        x: f64,
        y: f64,
        button: MouseButton,
        pressed: bool,
    },
}

impl InputEvent {
    pub fn left_press(x: f64, y: f64) -> Self {
        Self::Click { x, y, button: MouseButton::Left, pressed: true }
    }

    pub fn left_release(x: f64, y: f64) -> Self {
        Self::Click { x, y, button: MouseButton::Left, pressed: false }
    }
}

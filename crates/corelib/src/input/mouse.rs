use crate::math::Vec2;
use strum_macros::{EnumCount, EnumIter, IntoStaticStr};

#[derive(
    Copy, Clone, Default, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, EnumCount, EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MouseButton {
    #[default]
    Left,
    Middle,
    Right,
    Back,
    Forward,

    // Unknown is the last value
    Unknown,
}

impl MouseButton {
    /// Maps the `MouseEvent.button` code used by the DOM
    pub fn from_dom(code: i16) -> Self {
        match code {
            0 => MouseButton::Left,
            1 => MouseButton::Middle,
            2 => MouseButton::Right,
            3 => MouseButton::Back,
            4 => MouseButton::Forward,
            _ => MouseButton::Unknown,
        }
    }
}

/// Mouse events listened on the canvas
#[derive(
    Copy, Clone, Eq, PartialEq, Hash, Debug, EnumCount, EnumIter, IntoStaticStr,
)]
pub enum MouseEventKind {
    #[strum(to_string = "mousemove")]
    Move,
    #[strum(to_string = "mousedown")]
    Down,
    #[strum(to_string = "mouseup")]
    Up,
}

impl MouseEventKind {
    /// DOM event name
    #[inline]
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Mouse data passed to the canvas handlers.
/// `position` and `movement` are in canvas pixel space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MouseInput {
    pub position: Vec2,
    pub movement: Vec2,
    pub button: MouseButton,
}

impl MouseInput {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_movement(mut self, movement: Vec2) -> Self {
        self.movement = movement;
        self
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }
}

// Hookrs Event Kinds
// Event kind tags and device classes

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Which code namespace an event or binding belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum DeviceClass {
    Keyboard,
    Pointer,
}

/// Kind of a raw input event.
///
/// The numeric tags follow the classic hook numbering, so producers that
/// speak it can be converted with [`EventKind::from_u8`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum EventKind {
    HookEnabled = 1,
    HookDisabled = 2,
    KeyHold = 3,
    KeyDown = 4,
    KeyUp = 5,
    ButtonUp = 6,
    ButtonDown = 7,
    ButtonHold = 8,
    Move = 9,
    Drag = 10,
    Wheel = 11,
    Synthetic = 12,
}

impl EventKind {
    /// Create EventKind from its numeric tag
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(EventKind::HookEnabled),
            2 => Some(EventKind::HookDisabled),
            3 => Some(EventKind::KeyHold),
            4 => Some(EventKind::KeyDown),
            5 => Some(EventKind::KeyUp),
            6 => Some(EventKind::ButtonUp),
            7 => Some(EventKind::ButtonDown),
            8 => Some(EventKind::ButtonHold),
            9 => Some(EventKind::Move),
            10 => Some(EventKind::Drag),
            11 => Some(EventKind::Wheel),
            12 => Some(EventKind::Synthetic),
            _ => None,
        }
    }

    /// Convert to the numeric tag
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Parse either a numeric tag ("4") or a name ("key_down")
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        match s.parse::<u8>() {
            Ok(value) => Self::from_u8(value),
            Err(_) => s.parse().ok(),
        }
    }

    /// Kinds that update state and are matched against bindings
    pub fn is_dispatched(self) -> bool {
        self.is_key() || self.is_button()
    }

    /// KeyDown or KeyUp
    pub fn is_key(self) -> bool {
        matches!(self, EventKind::KeyDown | EventKind::KeyUp)
    }

    /// ButtonDown, ButtonHold or ButtonUp
    pub fn is_button(self) -> bool {
        matches!(
            self,
            EventKind::ButtonDown | EventKind::ButtonHold | EventKind::ButtonUp
        )
    }

    /// Device class of a dispatched kind, `None` for observe-only kinds
    pub fn device_class(self) -> Option<DeviceClass> {
        if self.is_key() {
            Some(DeviceClass::Keyboard)
        } else if self.is_button() {
            Some(DeviceClass::Pointer)
        } else {
            None
        }
    }

    /// Returns true for the kinds that mark a code as held down
    pub fn is_press(self) -> bool {
        matches!(self, EventKind::KeyDown | EventKind::ButtonDown)
    }
}

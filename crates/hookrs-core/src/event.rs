// Hookrs Raw Events
// Events as produced by the native hook collaborator

use std::fmt;
use std::time::SystemTime;

use crate::code::Code;
use crate::kind::{DeviceClass, EventKind};

/// Scroll direction reported with wheel events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelDirection {
    Vertical,
    Horizontal,
}

/// Kind-dependent event data
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Keyboard events: raw device code and the decoded character, if any
    Key { rawcode: Code, keychar: Option<char> },
    /// Pointer button events
    Button { button: Code, clicks: u16, x: i16, y: i16 },
    /// Wheel events
    Wheel {
        amount: u16,
        rotation: i32,
        direction: WheelDirection,
    },
    /// Lifecycle and synthetic events carry no data
    None,
}

/// A single low-level input event.
///
/// Produced by an event source and consumed read-only by the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvent {
    pub kind: EventKind,
    pub when: SystemTime,
    /// Modifier mask as reported by the producer
    pub mask: u16,
    pub payload: Payload,
}

impl RawEvent {
    /// Create an event with an explicit payload, stamped now
    pub fn new(kind: EventKind, payload: Payload) -> Self {
        Self {
            kind,
            when: SystemTime::now(),
            mask: 0,
            payload,
        }
    }

    /// Keyboard event without a decoded character
    pub fn key(kind: EventKind, rawcode: u16) -> Self {
        Self::new(
            kind,
            Payload::Key {
                rawcode: Code(rawcode),
                keychar: None,
            },
        )
    }

    /// Pointer button event at the origin with a single click
    pub fn button(kind: EventKind, button: u16) -> Self {
        Self::new(
            kind,
            Payload::Button {
                button: Code(button),
                clicks: 1,
                x: 0,
                y: 0,
            },
        )
    }

    /// Wheel event
    pub fn wheel(amount: u16, rotation: i32, direction: WheelDirection) -> Self {
        Self::new(
            EventKind::Wheel,
            Payload::Wheel {
                amount,
                rotation,
                direction,
            },
        )
    }

    /// Event with no payload (lifecycle, synthetic, movement without data)
    pub fn bare(kind: EventKind) -> Self {
        Self::new(kind, Payload::None)
    }

    /// Set the decoded character of a keyboard event
    pub fn with_keychar(mut self, c: char) -> Self {
        if let Payload::Key { keychar, .. } = &mut self.payload {
            *keychar = Some(c);
        }
        self
    }

    /// Set the position of a pointer event
    pub fn with_position(mut self, px: i16, py: i16) -> Self {
        if let Payload::Button { x, y, .. } = &mut self.payload {
            *x = px;
            *y = py;
        }
        self
    }

    /// Set the modifier mask
    pub fn with_mask(mut self, mask: u16) -> Self {
        self.mask = mask;
        self
    }

    /// Key rawcode or button code, depending on the payload
    pub fn code(&self) -> Option<Code> {
        match self.payload {
            Payload::Key { rawcode, .. } => Some(rawcode),
            Payload::Button { button, .. } => Some(button),
            _ => None,
        }
    }

    /// Device class for dispatched kinds
    pub fn device_class(&self) -> Option<DeviceClass> {
        self.kind.device_class()
    }
}

impl fmt::Display for RawEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        match &self.payload {
            Payload::Key { rawcode, keychar } => {
                write!(f, " rawcode={}", rawcode.value())?;
                if let Some(c) = keychar {
                    write!(f, " keychar={:?}", c)?;
                }
                Ok(())
            }
            Payload::Button {
                button,
                clicks,
                x,
                y,
            } => write!(
                f,
                " button={} x={} y={} clicks={}",
                button.value(),
                x,
                y,
                clicks
            ),
            Payload::Wheel {
                amount,
                rotation,
                direction,
            } => write!(
                f,
                " amount={} rotation={} direction={:?}",
                amount, rotation, direction
            ),
            Payload::None => Ok(()),
        }
    }
}

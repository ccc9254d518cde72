// Hookrs Dispatch State
// Press state for both device classes plus the spam filter

mod press;
mod spam;

pub use press::PressState;
pub use spam::SpamFilter;

use crate::code::Code;
use crate::kind::{DeviceClass, EventKind};

/// Everything the dispatcher mutates while draining events
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keys: PressState,
    pub buttons: PressState,
    pub spam: SpamFilter,
}

impl InputState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Press state for a device class
    pub fn press(&self, class: DeviceClass) -> &PressState {
        match class {
            DeviceClass::Keyboard => &self.keys,
            DeviceClass::Pointer => &self.buttons,
        }
    }

    /// Apply the press-state effect of a dispatched event kind.
    ///
    /// KeyDown and ButtonDown set the bit. KeyUp, ButtonUp and ButtonHold
    /// clear it; a hold report means the button is no longer counted as
    /// freshly pressed.
    pub fn apply(&mut self, kind: EventKind, code: Code) {
        let pressed = kind.is_press();
        match kind.device_class() {
            Some(DeviceClass::Keyboard) => self.keys.set(code, pressed),
            Some(DeviceClass::Pointer) => self.buttons.set(code, pressed),
            None => {}
        }
    }

    /// Return to the empty state
    pub fn reset(&mut self) {
        self.keys.clear();
        self.buttons.clear();
        self.spam.reset();
    }
}

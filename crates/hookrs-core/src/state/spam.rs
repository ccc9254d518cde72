// Hookrs Spam Filter
// Drops an event identical to the last accepted one of its device class

use crate::event::RawEvent;
use crate::kind::DeviceClass;

/// Remembers the last accepted keyboard and pointer events.
///
/// Native hooks repeat key-down events while a key is held; those repeats
/// are dropped before they reach the press state.
#[derive(Debug, Clone, Default)]
pub struct SpamFilter {
    last_key: Option<RawEvent>,
    last_pointer: Option<RawEvent>,
}

impl SpamFilter {
    /// Create a filter with empty caches
    pub fn new() -> Self {
        Self::default()
    }

    fn last(&self, class: DeviceClass) -> Option<&RawEvent> {
        match class {
            DeviceClass::Keyboard => self.last_key.as_ref(),
            DeviceClass::Pointer => self.last_pointer.as_ref(),
        }
    }

    /// True when `event` repeats the kind and code of the last accepted
    /// event of the same class. Observe-only kinds are never duplicates.
    pub fn is_duplicate(&self, event: &RawEvent) -> bool {
        let Some(class) = event.device_class() else {
            return false;
        };
        self.last(class)
            .is_some_and(|last| last.kind == event.kind && last.code() == event.code())
    }

    /// Record `event` as the last accepted event of its class
    pub fn accept(&mut self, event: &RawEvent) {
        match event.device_class() {
            Some(DeviceClass::Keyboard) => self.last_key = Some(event.clone()),
            Some(DeviceClass::Pointer) => self.last_pointer = Some(event.clone()),
            None => {}
        }
    }

    /// Last accepted keyboard event
    pub fn last_key(&self) -> Option<&RawEvent> {
        self.last_key.as_ref()
    }

    /// Last accepted pointer event
    pub fn last_pointer(&self) -> Option<&RawEvent> {
        self.last_pointer.as_ref()
    }

    /// Forget both cached events
    pub fn reset(&mut self) {
        self.last_key = None;
        self.last_pointer = None;
    }
}

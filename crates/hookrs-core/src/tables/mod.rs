// Hookrs Code Tables
// Name <-> code lookup for the keyboard and pointer namespaces

mod vk;

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::code::Code;
use crate::kind::DeviceClass;

pub use vk::{MOUSE_BUTTONS, VK_CODES};

/// Bidirectional name/code lookup for both device classes.
///
/// Implement this to plug in codes that match a particular native hook.
pub trait CodeTable: Send + Sync {
    /// Resolve a symbolic name to a code
    fn code(&self, class: DeviceClass, name: &str) -> Option<Code>;

    /// Resolve a code back to its preferred name
    fn name(&self, class: DeviceClass, code: Code) -> Option<&str>;

    /// All names known for a class, in table order
    fn names(&self, class: DeviceClass) -> Vec<&str>;
}

/// One namespace of a [`StandardTable`]
#[derive(Debug, Clone, Default)]
struct Namespace {
    by_name: IndexMap<String, Code>,
    by_code: HashMap<Code, String>,
}

impl Namespace {
    fn from_entries(entries: &[(&str, u16)]) -> Self {
        let mut ns = Self::default();
        for &(name, code) in entries {
            let name = name.to_ascii_lowercase();
            ns.by_code.entry(Code(code)).or_insert_with(|| name.clone());
            ns.by_name.insert(name, Code(code));
        }
        ns
    }

    fn code(&self, name: &str) -> Option<Code> {
        self.by_name.get(&name.trim().to_ascii_lowercase()).copied()
    }
}

/// Table backed by static name/code lists.
///
/// The default contents are the Windows virtual-key codes and the classic
/// mouse button map. Lookups are case-insensitive.
#[derive(Debug, Clone)]
pub struct StandardTable {
    keys: Namespace,
    buttons: Namespace,
}

impl StandardTable {
    /// Table with the built-in virtual-key and mouse data
    pub fn new() -> Self {
        Self::from_entries(VK_CODES, MOUSE_BUTTONS)
    }

    /// Table built from custom keyboard and pointer entries
    pub fn from_entries(keys: &[(&str, u16)], buttons: &[(&str, u16)]) -> Self {
        Self {
            keys: Namespace::from_entries(keys),
            buttons: Namespace::from_entries(buttons),
        }
    }

    fn namespace(&self, class: DeviceClass) -> &Namespace {
        match class {
            DeviceClass::Keyboard => &self.keys,
            DeviceClass::Pointer => &self.buttons,
        }
    }
}

impl Default for StandardTable {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeTable for StandardTable {
    fn code(&self, class: DeviceClass, name: &str) -> Option<Code> {
        self.namespace(class).code(name)
    }

    fn name(&self, class: DeviceClass, code: Code) -> Option<&str> {
        self.namespace(class).by_code.get(&code).map(String::as_str)
    }

    fn names(&self, class: DeviceClass) -> Vec<&str> {
        self.namespace(class)
            .by_name
            .keys()
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_lookup() {
        let table = StandardTable::new();
        assert_eq!(table.code(DeviceClass::Keyboard, "a"), Some(Code(0x41)));
        assert_eq!(table.code(DeviceClass::Keyboard, "ctrl"), Some(Code(0x11)));
        assert_eq!(table.code(DeviceClass::Keyboard, "control"), Some(Code(0x11)));
        assert_eq!(table.code(DeviceClass::Keyboard, "F12"), Some(Code(0x7B)));
        assert_eq!(table.code(DeviceClass::Keyboard, "nope"), None);
    }

    #[test]
    fn test_namespaces_are_separate() {
        let table = StandardTable::new();
        // "left" is the arrow key on the keyboard and button 1 on the pointer
        assert_eq!(table.code(DeviceClass::Keyboard, "left"), Some(Code(0x25)));
        assert_eq!(table.code(DeviceClass::Pointer, "left"), Some(Code(1)));
        assert_eq!(table.code(DeviceClass::Pointer, "a"), None);
    }

    #[test]
    fn test_reverse_lookup_prefers_first_name() {
        let table = StandardTable::new();
        assert_eq!(table.name(DeviceClass::Keyboard, Code(0x11)), Some("ctrl"));
        assert_eq!(table.name(DeviceClass::Keyboard, Code(0x1B)), Some("esc"));
        assert_eq!(table.name(DeviceClass::Pointer, Code(5)), Some("wheel_up"));
        assert_eq!(table.name(DeviceClass::Pointer, Code(99)), None);
    }

    #[test]
    fn test_names_in_table_order() {
        let table = StandardTable::new();
        let buttons = table.names(DeviceClass::Pointer);
        assert_eq!(buttons[..3], ["left", "right", "center"]);
        assert!(table.names(DeviceClass::Keyboard).contains(&"kp_enter"));
    }

    #[test]
    fn test_custom_entries() {
        let table = StandardTable::from_entries(&[("Hyper", 200)], &[("Thumb", 8)]);
        assert_eq!(table.code(DeviceClass::Keyboard, "hyper"), Some(Code(200)));
        assert_eq!(table.code(DeviceClass::Pointer, "THUMB"), Some(Code(8)));
    }
}

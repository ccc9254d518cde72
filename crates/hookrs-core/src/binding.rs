// Hookrs Bindings
// Handler capability and symbolic name resolution

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::code::{Code, Combination, MAX_KEYS};
use crate::error::BindingError;
use crate::event::RawEvent;
use crate::kind::{DeviceClass, EventKind};
use crate::tables::CodeTable;

/// Something that reacts to a matched binding.
///
/// Handlers run synchronously on the dispatch thread; a slow handler
/// delays every event queued behind it.
pub trait Handler: Send + Sync {
    fn handle(&self, event: &RawEvent);
}

impl<F> Handler for F
where
    F: Fn(&RawEvent) + Send + Sync,
{
    fn handle(&self, event: &RawEvent) {
        self(event)
    }
}

/// Shared handler reference as stored in the registry
pub type HandlerRef = Arc<dyn Handler>;

/// Resolved registry key of a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKey {
    /// Keyboard combination (KeyDown/KeyUp bindings)
    Keys(Combination),
    /// Single pointer button (ButtonDown/ButtonHold/ButtonUp bindings)
    Button(Code),
}

impl fmt::Display for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingKey::Keys(combo) => write!(f, "keys {}", combo),
            BindingKey::Button(code) => write!(f, "button {}", code),
        }
    }
}

/// Map pointer aliases onto their table names
pub fn canonical_button_name(name: &str) -> &str {
    match name {
        "mleft" | "mouse-left" => "left",
        "mright" | "mouse-right" => "right",
        "mcenter" | "mouse-center" => "center",
        other => other,
    }
}

/// Pointer names that refer to the scroll wheel
pub fn is_wheel_name(name: &str) -> bool {
    name.starts_with("wheel")
}

/// Heuristic used by front-ends to tell pointer bindings from key bindings
pub fn is_pointer_name(name: &str) -> bool {
    let name = name.trim().to_ascii_lowercase();
    canonical_button_name(&name) != name || is_wheel_name(&name)
}

/// Resolve symbolic names into a registry key for `kind`.
///
/// Every name is resolved before anything is returned, so a failing
/// name never leaves a partial binding behind.
pub fn resolve(
    kind: EventKind,
    names: &[&str],
    table: &dyn CodeTable,
) -> Result<BindingKey, BindingError> {
    if names.is_empty() {
        return Err(BindingError::EmptyBinding);
    }

    match kind {
        EventKind::KeyDown | EventKind::KeyUp => {
            if names.len() > MAX_KEYS {
                return Err(BindingError::TooManyKeys { count: names.len() });
            }

            let mut codes: SmallVec<[Code; MAX_KEYS]> = SmallVec::new();
            for name in names {
                let code = table.code(DeviceClass::Keyboard, name).ok_or_else(|| {
                    BindingError::UnknownBinding {
                        name: name.to_string(),
                        class: DeviceClass::Keyboard,
                    }
                })?;
                codes.push(code);
            }

            Ok(BindingKey::Keys(Combination::from_codes(&codes)?))
        }
        EventKind::ButtonDown | EventKind::ButtonHold | EventKind::ButtonUp => {
            if names.len() > MAX_KEYS {
                return Err(BindingError::TooManyKeys { count: names.len() });
            }
            if names.len() > 1 {
                return Err(BindingError::TooManyButtons { count: names.len() });
            }

            let lowered = names[0].trim().to_ascii_lowercase();
            let name = canonical_button_name(&lowered);
            if is_wheel_name(name) && kind == EventKind::ButtonUp {
                return Err(BindingError::UnsupportedKind(kind));
            }

            table
                .code(DeviceClass::Pointer, name)
                .map(BindingKey::Button)
                .ok_or_else(|| BindingError::UnknownBinding {
                    name: names[0].to_string(),
                    class: DeviceClass::Pointer,
                })
        }
        other => Err(BindingError::UnsupportedKind(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::StandardTable;

    #[test]
    fn test_resolve_key_combination() {
        let table = StandardTable::new();
        let key = resolve(EventKind::KeyDown, &["ctrl", "a"], &table).unwrap();
        let expected = Combination::from_codes(&[Code(0x11), Code(0x41)]).unwrap();
        assert_eq!(key, BindingKey::Keys(expected));
    }

    #[test]
    fn test_resolve_too_many_keys() {
        let table = StandardTable::new();
        let result = resolve(EventKind::KeyDown, &["ctrl", "a", "b", "c", "d"], &table);
        assert_eq!(result, Err(BindingError::TooManyKeys { count: 5 }));
        assert!(resolve(EventKind::KeyDown, &["ctrl", "a", "b", "c"], &table).is_ok());
    }

    #[test]
    fn test_resolve_unknown_key() {
        let table = StandardTable::new();
        let result = resolve(EventKind::KeyUp, &["ctrl", "nokey"], &table);
        assert_eq!(
            result,
            Err(BindingError::UnknownBinding {
                name: "nokey".to_string(),
                class: DeviceClass::Keyboard,
            })
        );
    }

    #[test]
    fn test_resolve_empty() {
        let table = StandardTable::new();
        assert_eq!(
            resolve(EventKind::KeyDown, &[], &table),
            Err(BindingError::EmptyBinding)
        );
    }

    #[test]
    fn test_resolve_button_aliases() {
        let table = StandardTable::new();
        for name in ["left", "mleft", "mouse-left", "MLeft"] {
            assert_eq!(
                resolve(EventKind::ButtonDown, &[name], &table),
                Ok(BindingKey::Button(Code(1)))
            );
        }
        assert_eq!(
            resolve(EventKind::ButtonUp, &["mouse-right"], &table),
            Ok(BindingKey::Button(Code(2)))
        );
        assert_eq!(
            resolve(EventKind::ButtonHold, &["mcenter"], &table),
            Ok(BindingKey::Button(Code(3)))
        );
    }

    #[test]
    fn test_resolve_button_arity() {
        let table = StandardTable::new();
        assert_eq!(
            resolve(EventKind::ButtonDown, &["left", "right"], &table),
            Err(BindingError::TooManyButtons { count: 2 })
        );
    }

    #[test]
    fn test_resolve_wheel_only_for_down_and_hold() {
        let table = StandardTable::new();
        assert_eq!(
            resolve(EventKind::ButtonDown, &["wheel_up"], &table),
            Ok(BindingKey::Button(Code(5)))
        );
        assert!(resolve(EventKind::ButtonHold, &["wheel_down"], &table).is_ok());
        assert_eq!(
            resolve(EventKind::ButtonUp, &["wheel_up"], &table),
            Err(BindingError::UnsupportedKind(EventKind::ButtonUp))
        );
    }

    #[test]
    fn test_resolve_unsupported_kinds() {
        let table = StandardTable::new();
        for kind in [EventKind::KeyHold, EventKind::Move, EventKind::Wheel] {
            assert_eq!(
                resolve(kind, &["a"], &table),
                Err(BindingError::UnsupportedKind(kind))
            );
        }
    }

    #[test]
    fn test_is_pointer_name() {
        assert!(is_pointer_name("mleft"));
        assert!(is_pointer_name("mouse-right"));
        assert!(is_pointer_name("wheel_up"));
        assert!(!is_pointer_name("left"));
        assert!(!is_pointer_name("a"));
    }

    #[test]
    fn test_closure_is_handler() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let handler: HandlerRef = Arc::new(move |_: &RawEvent| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        handler.handle(&RawEvent::key(EventKind::KeyDown, 0x41));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}

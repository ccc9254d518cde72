// Hookrs Errors
// Registration and lifecycle error types

use crate::code::MAX_KEYS;
use crate::kind::{DeviceClass, EventKind};

/// Errors that can occur while registering a binding
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    #[error("too many keys: {count} given, max {max}", max = MAX_KEYS)]
    TooManyKeys { count: usize },

    #[error("pointer bindings take exactly one button, got {count}")]
    TooManyButtons { count: usize },

    #[error("binding has no keys")]
    EmptyBinding,

    #[error("unknown {class} name: '{name}'")]
    UnknownBinding { name: String, class: DeviceClass },

    #[error("event kind {0} cannot be bound")]
    UnsupportedKind(EventKind),
}

impl BindingError {
    /// Whether a batch of registrations should stop on this error.
    ///
    /// Unknown names only skip the binding they appear in.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, BindingError::UnknownBinding { .. })
    }
}

/// Result type for hook lifecycle operations
pub type HookResult<T> = Result<T, HookError>;

/// Errors that can occur while starting, feeding or stopping a hook
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("hook is already running")]
    AlreadyRunning,

    #[error("event queue is closed")]
    Closed,

    #[error("event source error: {0}")]
    Source(String),

    #[error("failed to spawn thread: {0}")]
    Spawn(std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_binding_is_not_fatal() {
        let err = BindingError::UnknownBinding {
            name: "nope".to_string(),
            class: DeviceClass::Keyboard,
        };
        assert!(!err.is_fatal());
        assert!(BindingError::TooManyKeys { count: 5 }.is_fatal());
        assert!(BindingError::EmptyBinding.is_fatal());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            BindingError::TooManyKeys { count: 5 }.to_string(),
            "too many keys: 5 given, max 4"
        );
        let err = BindingError::UnknownBinding {
            name: "mfoo".to_string(),
            class: DeviceClass::Pointer,
        };
        assert_eq!(err.to_string(), "unknown pointer name: 'mfoo'");
        assert_eq!(
            BindingError::UnsupportedKind(EventKind::Move).to_string(),
            "event kind move cannot be bound"
        );
    }
}

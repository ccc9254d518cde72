// Hookrs Code Types
// Key/button codes and fixed-size key combinations

use std::fmt;

use crate::error::BindingError;

/// Maximum number of keys in a single combination
pub const MAX_KEYS: usize = 4;

/// Represents a single key or pointer-button code.
///
/// Keyboard codes and pointer-button codes live in separate namespaces;
/// the numeric values are whatever the code table in use assigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Code(pub u16);

impl Code {
    /// Reserved "no code" value, also used for unused combination slots
    pub const NONE: Code = Code(0);

    /// Get the raw numeric value
    pub fn value(self) -> u16 {
        self.0
    }

    /// Returns true for the reserved zero code
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl From<u16> for Code {
    fn from(code: u16) -> Self {
        Code(code)
    }
}

impl From<Code> for u16 {
    fn from(code: Code) -> Self {
        code.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

/// An ordered, fixed-capacity key combination.
///
/// Unused trailing slots hold [`Code::NONE`]. Equality and hashing are
/// positional: `[ctrl, a]` and `[a, ctrl]` are different combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Combination([Code; MAX_KEYS]);

impl Combination {
    /// Build a combination from up to [`MAX_KEYS`] codes, padding with zeros
    pub fn from_codes(codes: &[Code]) -> Result<Self, BindingError> {
        if codes.len() > MAX_KEYS {
            return Err(BindingError::TooManyKeys { count: codes.len() });
        }

        let mut slots = [Code::NONE; MAX_KEYS];
        slots[..codes.len()].copy_from_slice(codes);
        Ok(Self(slots))
    }

    /// Build a combination directly from its four slots
    pub const fn from_slots(slots: [Code; MAX_KEYS]) -> Self {
        Self(slots)
    }

    /// All four slots, including unused ones
    pub fn slots(&self) -> &[Code; MAX_KEYS] {
        &self.0
    }

    /// Iterate over the used (non-zero) slots
    pub fn keys(&self) -> impl Iterator<Item = Code> + '_ {
        self.0.iter().copied().filter(|code| !code.is_none())
    }

    /// Number of used slots
    pub fn len(&self) -> usize {
        self.keys().count()
    }

    /// True when every slot is zero
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|code| code.is_none())
    }

    /// Check whether a code occupies any slot
    pub fn contains(&self, code: Code) -> bool {
        !code.is_none() && self.0.contains(&code)
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_codes_pads_with_zero() {
        let combo = Combination::from_codes(&[Code(0x11), Code(0x41)]).unwrap();
        assert_eq!(
            combo.slots(),
            &[Code(0x11), Code(0x41), Code::NONE, Code::NONE]
        );
        assert_eq!(combo.len(), 2);
    }

    #[test]
    fn test_from_codes_rejects_five() {
        let codes = [Code(1), Code(2), Code(3), Code(4), Code(5)];
        assert_eq!(
            Combination::from_codes(&codes),
            Err(BindingError::TooManyKeys { count: 5 })
        );
    }

    #[test]
    fn test_from_codes_accepts_four() {
        let codes = [Code(1), Code(2), Code(3), Code(4)];
        let combo = Combination::from_codes(&codes).unwrap();
        assert_eq!(combo.len(), 4);
    }

    #[test]
    fn test_positional_equality() {
        let a = Combination::from_codes(&[Code(0x11), Code(0x41)]).unwrap();
        let b = Combination::from_codes(&[Code(0x41), Code(0x11)]).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, Combination::from_codes(&[Code(0x11), Code(0x41)]).unwrap());
    }

    #[test]
    fn test_empty_combination() {
        let combo = Combination::default();
        assert!(combo.is_empty());
        assert_eq!(combo.keys().count(), 0);
        assert!(!combo.contains(Code::NONE));
    }

    #[test]
    fn test_display() {
        let combo = Combination::from_codes(&[Code(0x41)]).unwrap();
        assert_eq!(combo.to_string(), "[0x41, 0x00, 0x00, 0x00]");
    }
}

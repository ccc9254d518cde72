// Hookrs Press State
// Per-code "currently held" flags for one device class

use std::collections::HashMap;

use crate::code::{Code, Combination};

/// Tracks which codes of one device class are held down.
///
/// Codes that were never seen count as not pressed.
#[derive(Debug, Clone, Default)]
pub struct PressState {
    pressed: HashMap<Code, bool>,
}

impl PressState {
    /// Create a new empty press state
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the press bit of a code
    pub fn set(&mut self, code: Code, pressed: bool) {
        self.pressed.insert(code, pressed);
    }

    /// Get the press bit of a code
    pub fn get(&self, code: Code) -> bool {
        self.pressed.get(&code).copied().unwrap_or(false)
    }

    /// True iff every used slot of `combo` is pressed.
    ///
    /// Zero slots are ignored, so an empty combination is vacuously pressed.
    pub fn all_pressed(&self, combo: &Combination) -> bool {
        combo.keys().all(|code| self.get(code))
    }

    /// True iff no used slot of `combo` is pressed
    pub fn all_unpressed(&self, combo: &Combination) -> bool {
        combo.keys().all(|code| !self.get(code))
    }

    /// Codes whose bit is currently set, sorted
    pub fn pressed_codes(&self) -> Vec<Code> {
        let mut codes: Vec<Code> = self
            .pressed
            .iter()
            .filter(|(_, pressed)| **pressed)
            .map(|(code, _)| *code)
            .collect();
        codes.sort();
        codes
    }

    /// Forget every code
    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combo(codes: &[u16]) -> Combination {
        let codes: Vec<Code> = codes.iter().copied().map(Code).collect();
        Combination::from_codes(&codes).unwrap()
    }

    #[test]
    fn test_absent_is_not_pressed() {
        let state = PressState::new();
        assert!(!state.get(Code(0x41)));
    }

    #[test]
    fn test_set_and_get() {
        let mut state = PressState::new();
        state.set(Code(0x41), true);
        assert!(state.get(Code(0x41)));
        state.set(Code(0x41), false);
        assert!(!state.get(Code(0x41)));
    }

    #[test]
    fn test_all_pressed() {
        let mut state = PressState::new();
        let ctrl_a = combo(&[0x11, 0x41]);

        state.set(Code(0x11), true);
        assert!(!state.all_pressed(&ctrl_a));

        state.set(Code(0x41), true);
        assert!(state.all_pressed(&ctrl_a));
    }

    #[test]
    fn test_all_unpressed() {
        let mut state = PressState::new();
        let ctrl_a = combo(&[0x11, 0x41]);
        assert!(state.all_unpressed(&ctrl_a));

        state.set(Code(0x41), true);
        assert!(!state.all_unpressed(&ctrl_a));
        assert!(!state.all_pressed(&ctrl_a));

        state.set(Code(0x41), false);
        assert!(state.all_unpressed(&ctrl_a));
    }

    #[test]
    fn test_zero_slots_are_ignored() {
        let mut state = PressState::new();
        // A pressed zero code must not influence matching either way
        state.set(Code::NONE, true);
        state.set(Code(0x41), true);
        let a = combo(&[0x41]);
        assert!(state.all_pressed(&a));

        state.set(Code(0x41), false);
        assert!(state.all_unpressed(&a));
    }

    #[test]
    fn test_empty_combination_is_vacuous() {
        let mut state = PressState::new();
        let empty = Combination::default();
        assert!(state.all_pressed(&empty));
        assert!(state.all_unpressed(&empty));
        state.set(Code(0x41), true);
        assert!(state.all_pressed(&empty));
        assert!(state.all_unpressed(&empty));
    }

    #[test]
    fn test_every_subset_of_four_keys() {
        let codes = [0x10u16, 0x11, 0x12, 0x41];
        let full = combo(&codes);
        for mask in 0u8..16 {
            let mut state = PressState::new();
            for (i, code) in codes.iter().enumerate() {
                state.set(Code(*code), mask & (1 << i) != 0);
            }
            assert_eq!(state.all_pressed(&full), mask == 0b1111, "mask {:#06b}", mask);
            assert_eq!(state.all_unpressed(&full), mask == 0, "mask {:#06b}", mask);
        }
    }

    #[test]
    fn test_pressed_codes_and_clear() {
        let mut state = PressState::new();
        state.set(Code(0x41), true);
        state.set(Code(0x11), true);
        state.set(Code(0x12), false);
        assert_eq!(state.pressed_codes(), vec![Code(0x11), Code(0x41)]);

        state.clear();
        assert!(state.pressed_codes().is_empty());
    }
}

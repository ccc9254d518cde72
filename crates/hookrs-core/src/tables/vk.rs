// Hookrs Standard Code Data
// Windows virtual-key codes and the classic mouse button map

/// Keyboard names and their virtual-key codes.
///
/// Several names may share a code ("ctrl" and "control"); reverse lookup
/// returns the first one listed.
pub const VK_CODES: &[(&str, u16)] = &[
    // Letters
    ("a", 0x41), ("b", 0x42), ("c", 0x43), ("d", 0x44), ("e", 0x45),
    ("f", 0x46), ("g", 0x47), ("h", 0x48), ("i", 0x49), ("j", 0x4A),
    ("k", 0x4B), ("l", 0x4C), ("m", 0x4D), ("n", 0x4E), ("o", 0x4F),
    ("p", 0x50), ("q", 0x51), ("r", 0x52), ("s", 0x53), ("t", 0x54),
    ("u", 0x55), ("v", 0x56), ("w", 0x57), ("x", 0x58), ("y", 0x59),
    ("z", 0x5A),
    // Digits
    ("0", 0x30), ("1", 0x31), ("2", 0x32), ("3", 0x33), ("4", 0x34),
    ("5", 0x35), ("6", 0x36), ("7", 0x37), ("8", 0x38), ("9", 0x39),
    // Function keys
    ("f1", 0x70), ("f2", 0x71), ("f3", 0x72), ("f4", 0x73),
    ("f5", 0x74), ("f6", 0x75), ("f7", 0x76), ("f8", 0x77),
    ("f9", 0x78), ("f10", 0x79), ("f11", 0x7A), ("f12", 0x7B),
    // Navigation
    ("insert", 0x2D), ("delete", 0x2E), ("home", 0x24), ("end", 0x23),
    ("page_up", 0x21), ("page_down", 0x22),
    ("up", 0x26), ("down", 0x28), ("left", 0x25), ("right", 0x27),
    // Modifiers and editing
    ("shift", 0x10), ("ctrl", 0x11), ("control", 0x11), ("alt", 0x12),
    ("tab", 0x09), ("enter", 0x0D), ("esc", 0x1B), ("escape", 0x1B),
    ("backspace", 0x08), ("space", 0x20),
    // Locks and system keys
    ("caps_lock", 0x14), ("num_lock", 0x90), ("scroll_lock", 0x91),
    ("print_screen", 0x2C), ("pause", 0x13),
    // Punctuation
    ("minus", 0xBD), ("equals", 0xBB), ("comma", 0xBC), ("period", 0xBE),
    ("slash", 0xBF), ("backslash", 0xDC), ("semicolon", 0xBA),
    ("quote", 0xDE), ("grave", 0xC0),
    ("open_bracket", 0xDB), ("close_bracket", 0xDD),
    // Keypad
    ("kp_0", 0x60), ("kp_1", 0x61), ("kp_2", 0x62), ("kp_3", 0x63),
    ("kp_4", 0x64), ("kp_5", 0x65), ("kp_6", 0x66), ("kp_7", 0x67),
    ("kp_8", 0x68), ("kp_9", 0x69),
    ("kp_multiply", 0x6A), ("kp_add", 0x6B), ("kp_separator", 0x6C),
    ("kp_subtract", 0x6D), ("kp_decimal", 0x6E), ("kp_divide", 0x6F),
    ("kp_enter", 0xE0),
    // Sided modifiers
    ("left_shift", 0xA0), ("right_shift", 0xA1),
    ("left_control", 0xA2), ("right_control", 0xA3),
    ("left_alt", 0xA4), ("right_alt", 0xA5),
    ("left_gui", 0x5B), ("right_gui", 0x5C),
];

/// Pointer button names and codes
pub const MOUSE_BUTTONS: &[(&str, u16)] = &[
    ("left", 1),
    ("right", 2),
    ("center", 3),
    ("wheel_down", 4),
    ("wheel_up", 5),
    ("wheel_left", 6),
    ("wheel_right", 7),
];

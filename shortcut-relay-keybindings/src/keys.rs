//! Key code tables.
//!
//! Contains:
//! - Key code constants for the named keys servers bind shortcuts to
//! - Name alias table (string → key code) used by the parsers
//! - Human-readable and design-attribute names (key code → string)
//!
//! Letters and digits use their uppercase ASCII value as key code.

/// Platform key codes of the named keys.
pub mod key_code {
    pub const BACKSPACE: u32 = 8;
    pub const TAB: u32 = 9;
    pub const ENTER: u32 = 13;
    pub const ESCAPE: u32 = 27;
    pub const SPACEBAR: u32 = 32;
    pub const PAGE_UP: u32 = 33;
    pub const PAGE_DOWN: u32 = 34;
    pub const END: u32 = 35;
    pub const HOME: u32 = 36;
    pub const ARROW_LEFT: u32 = 37;
    pub const ARROW_UP: u32 = 38;
    pub const ARROW_RIGHT: u32 = 39;
    pub const ARROW_DOWN: u32 = 40;
    pub const INSERT: u32 = 45;
    pub const DELETE: u32 = 46;
    pub const F1: u32 = 112;
    pub const F12: u32 = 123;
}

/// Named keys: (key code, human name, design-attribute name).
const NAMED_KEYS: &[(u32, &str, &str)] = &[
    (key_code::BACKSPACE, "Backspace", "backspace"),
    (key_code::TAB, "Tab", "tab"),
    (key_code::ENTER, "Enter", "enter"),
    (key_code::ESCAPE, "Escape", "escape"),
    (key_code::SPACEBAR, "Space", "spacebar"),
    (key_code::PAGE_UP, "PageUp", "pageup"),
    (key_code::PAGE_DOWN, "PageDown", "pagedown"),
    (key_code::END, "End", "end"),
    (key_code::HOME, "Home", "home"),
    (key_code::ARROW_LEFT, "Left", "left"),
    (key_code::ARROW_UP, "Up", "up"),
    (key_code::ARROW_RIGHT, "Right", "right"),
    (key_code::ARROW_DOWN, "Down", "down"),
    (key_code::INSERT, "Insert", "insert"),
    (key_code::DELETE, "Delete", "delete"),
];

/// Resolve a key name (case-insensitive) to its key code.
///
/// Accepts single letters and digits, named keys with their common aliases,
/// `F1`-`F12`, and `#<code>` for a raw key code.
pub fn code_for_name(name: &str) -> Option<u32> {
    if let Some(raw) = name.strip_prefix('#') {
        return raw.parse::<u32>().ok().filter(|&code| code != 0);
    }

    let mut chars = name.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return char_code(ch);
    }

    let lower = name.to_lowercase();
    let code = match lower.as_str() {
        "enter" | "return" => key_code::ENTER,
        "escape" | "esc" => key_code::ESCAPE,
        "space" | "spacebar" => key_code::SPACEBAR,
        "tab" => key_code::TAB,
        "backspace" => key_code::BACKSPACE,
        "delete" | "del" => key_code::DELETE,
        "insert" | "ins" => key_code::INSERT,
        "home" => key_code::HOME,
        "end" => key_code::END,
        "pageup" | "pgup" => key_code::PAGE_UP,
        "pagedown" | "pgdn" => key_code::PAGE_DOWN,
        "up" | "arrowup" => key_code::ARROW_UP,
        "down" | "arrowdown" => key_code::ARROW_DOWN,
        "left" | "arrowleft" => key_code::ARROW_LEFT,
        "right" | "arrowright" => key_code::ARROW_RIGHT,
        _ => return function_key(&lower),
    };
    Some(code)
}

/// Key code for a letter or digit character.
pub fn char_code(ch: char) -> Option<u32> {
    if ch.is_ascii_alphanumeric() {
        Some(ch.to_ascii_uppercase() as u32)
    } else {
        None
    }
}

/// Human-readable name, e.g. "Enter", "F5", "S", or "#188" for codes
/// without a name.
pub fn display_name(code: u32) -> String {
    if let Some((_, name, _)) = NAMED_KEYS.iter().find(|(c, _, _)| *c == code) {
        return (*name).to_string();
    }
    if let Some(n) = function_key_number(code) {
        return format!("F{}", n);
    }
    match alphanumeric_char(code) {
        Some(ch) => ch.to_string(),
        None => format!("#{}", code),
    }
}

/// Design-attribute name, e.g. "enter", "f5", "s". `None` when the key has
/// no name in that format.
pub fn design_name(code: u32) -> Option<String> {
    if let Some((_, _, name)) = NAMED_KEYS.iter().find(|(c, _, _)| *c == code) {
        return Some((*name).to_string());
    }
    if let Some(n) = function_key_number(code) {
        return Some(format!("f{}", n));
    }
    alphanumeric_char(code).map(|ch| ch.to_ascii_lowercase().to_string())
}

fn function_key(lower: &str) -> Option<u32> {
    let n: u32 = lower.strip_prefix('f')?.parse().ok()?;
    (1..=12).contains(&n).then(|| key_code::F1 + n - 1)
}

fn function_key_number(code: u32) -> Option<u32> {
    (key_code::F1..=key_code::F12)
        .contains(&code)
        .then(|| code - key_code::F1 + 1)
}

fn alphanumeric_char(code: u32) -> Option<char> {
    char::from_u32(code).filter(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit())
}

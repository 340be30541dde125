//! Key combination parser.
//!
//! Parses key strings into [`KeyCombination`] values. Two text forms are
//! accepted:
//! - human form, as shown in menus: "Ctrl+Shift+S", "Alt+F4", "Enter"
//! - design-attribute form: "ctrl-shift-s", "alt-f4", "pageup"
//!
//! Shorthand captions ("&Save", "^_Print") are handled by
//! [`parse_shorthand_caption`].

use crate::keys;
use crate::modifiers::ModifierMask;
use shortcut_relay_config::RawAction;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for key parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Empty key combination")]
    Empty,
    #[error("Key combination ends with modifier, no key specified")]
    MissingKey,
    #[error("Multiple keys specified: already have '{first}', found '{second}'")]
    MultipleKeys { first: String, second: String },
    #[error("Unknown key: '{0}'")]
    UnknownKey(String),
}

/// A primary key code plus a modifier mask.
///
/// Equality is structural. A combination with key code 0 never matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombination {
    key_code: u32,
    modifiers: ModifierMask,
}

impl KeyCombination {
    pub const fn new(key_code: u32, modifiers: ModifierMask) -> Self {
        Self {
            key_code,
            modifiers,
        }
    }

    /// Build from a key code and raw wire modifier codes.
    pub fn from_raw(key_code: u32, raw_modifiers: Option<&[i64]>) -> Self {
        let modifiers = raw_modifiers
            .map(ModifierMask::from_raw_codes)
            .unwrap_or_default();
        Self::new(key_code, modifiers)
    }

    pub const fn key_code(&self) -> u32 {
        self.key_code
    }

    pub const fn modifiers(&self) -> ModifierMask {
        self.modifiers
    }

    /// Key code 0 denotes "no key".
    pub const fn is_valid(&self) -> bool {
        self.key_code != 0
    }

    /// Check whether a key press equals this combination.
    pub fn matches(&self, key_code: u32, modifiers: ModifierMask) -> bool {
        self.is_valid() && self.key_code == key_code && self.modifiers == modifiers
    }

    /// Render as a raw action descriptor for the given action id.
    pub fn to_raw_action(&self, id: impl Into<String>, caption: impl Into<String>) -> RawAction {
        let raw = RawAction::new(self.key_code, id).with_caption(caption);
        if self.modifiers.is_empty() {
            raw
        } else {
            raw.with_modifiers(self.modifiers.to_raw_codes())
        }
    }

    /// Design-attribute form, e.g. "ctrl-shift-s".
    ///
    /// Returns `None` when the key has no name in that format.
    pub fn to_design_string(&self) -> Option<String> {
        let key = keys::design_name(self.key_code)?;
        let mut parts: Vec<String> = modifier_names(self.modifiers)
            .map(str::to_lowercase)
            .collect();
        parts.push(key);
        Some(parts.join("-"))
    }
}

fn modifier_names(mask: ModifierMask) -> impl Iterator<Item = &'static str> {
    [
        (ModifierMask::CTRL, "Ctrl"),
        (ModifierMask::ALT, "Alt"),
        (ModifierMask::SHIFT, "Shift"),
        (ModifierMask::META, "Meta"),
    ]
    .into_iter()
    .filter(move |(bit, _)| mask.contains(*bit))
    .map(|(_, name)| name)
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = modifier_names(self.modifiers)
            .map(str::to_string)
            .collect();
        parts.push(keys::display_name(self.key_code));
        write!(f, "{}", parts.join("+"))
    }
}

impl FromStr for KeyCombination {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key_combination(s)
    }
}

/// Parse a key combination string.
///
/// Supported format: "Modifier+Modifier+Key" or "modifier-modifier-key".
///
/// Modifiers:
/// - `Ctrl`, `Control` - Control key
/// - `Alt`, `Option` - Alt/Option key
/// - `Shift` - Shift key
/// - `Meta`, `Cmd`, `Command`, `Super`, `Win` - Meta key
///
/// Keys:
/// - Single letters and digits: `A`, `s`, `1`
/// - Named keys: `F1`-`F12`, `Enter`, `Escape`, `Space`/`spacebar`, `Tab`,
///   `PageUp`, arrows, ...
/// - Raw key codes: `#188`
pub fn parse_key_combination(s: &str) -> Result<KeyCombination, ParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ParseError::Empty);
    }

    let parts: Vec<&str> = s.split(['+', '-']).map(str::trim).collect();
    let mut modifiers = ModifierMask::empty();
    let mut key_part: Option<&str> = None;

    for (i, part) in parts.iter().enumerate() {
        let is_last = i == parts.len() - 1;

        match modifier_for_name(part) {
            Some(bit) => {
                if is_last {
                    return Err(ParseError::MissingKey);
                }
                modifiers |= bit;
            }
            None => {
                if let Some(first) = key_part {
                    return Err(ParseError::MultipleKeys {
                        first: first.to_string(),
                        second: part.to_string(),
                    });
                }
                key_part = Some(part);
            }
        }
    }

    let key_str = key_part.ok_or(ParseError::MissingKey)?;
    if key_str.is_empty() {
        return Err(ParseError::UnknownKey(s.to_string()));
    }
    let key_code =
        keys::code_for_name(key_str).ok_or_else(|| ParseError::UnknownKey(key_str.to_string()))?;

    Ok(KeyCombination::new(key_code, modifiers))
}

fn modifier_for_name(name: &str) -> Option<ModifierMask> {
    match name.to_lowercase().as_str() {
        "ctrl" | "control" => Some(ModifierMask::CTRL),
        "alt" | "option" => Some(ModifierMask::ALT),
        "shift" => Some(ModifierMask::SHIFT),
        "meta" | "cmd" | "command" | "super" | "win" => Some(ModifierMask::META),
        _ => None,
    }
}

/// Marker characters of the shorthand caption notation.
const SHORTHAND_ALT: char = '&';
const SHORTHAND_SHIFT: char = '_';
const SHORTHAND_CTRL: char = '^';

fn shorthand_modifier(ch: char) -> Option<ModifierMask> {
    match ch {
        SHORTHAND_ALT => Some(ModifierMask::ALT),
        SHORTHAND_SHIFT => Some(ModifierMask::SHIFT),
        SHORTHAND_CTRL => Some(ModifierMask::CTRL),
        _ => None,
    }
}

/// Result of reading a shorthand caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShorthandCaption {
    /// Combination declared by the caption, if any
    pub combination: Option<KeyCombination>,
    /// Caption text with the markers removed
    pub caption: String,
}

/// Read a caption written in shorthand notation.
///
/// `&` marks Alt, `_` Shift and `^` Ctrl. The first run of markers that
/// precedes a letter or digit declares the shortcut: "^_Print" is
/// Ctrl+Shift+P with caption "Print". A doubled marker is a literal ("Fish &&
/// Chips" keeps one `&`), and markers not followed by a letter or digit are
/// left as text. Marker runs after the first shortcut are stripped.
pub fn parse_shorthand_caption(text: &str) -> ShorthandCaption {
    let chars: Vec<char> = text.chars().collect();
    let mut caption = String::with_capacity(text.len());
    let mut combination = None;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if shorthand_modifier(ch).is_none() {
            caption.push(ch);
            i += 1;
            continue;
        }
        if chars.get(i + 1) == Some(&ch) {
            caption.push(ch);
            i += 2;
            continue;
        }

        let start = i;
        let mut mask = ModifierMask::empty();
        while let Some(bit) = chars.get(i).copied().and_then(shorthand_modifier) {
            if chars.get(i + 1) == Some(&chars[i]) {
                break;
            }
            mask |= bit;
            i += 1;
        }

        match chars.get(i).copied().and_then(keys::char_code) {
            Some(code) => {
                if combination.is_none() {
                    combination = Some(KeyCombination::new(code, mask));
                }
            }
            None => caption.extend(&chars[start..i]),
        }
    }

    ShorthandCaption {
        combination,
        caption,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let combo = parse_key_combination("Ctrl+Shift+S").unwrap();
        assert_eq!(combo.key_code(), 83);
        assert_eq!(combo.modifiers(), ModifierMask::CTRL | ModifierMask::SHIFT);
    }

    #[test]
    fn test_parse_design_form() {
        assert_eq!(
            parse_key_combination("ctrl-shift-s").unwrap(),
            parse_key_combination("Ctrl+Shift+S").unwrap()
        );
        assert_eq!(
            parse_key_combination("alt-f4").unwrap(),
            KeyCombination::new(115, ModifierMask::ALT)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_key_combination("  "), Err(ParseError::Empty));
        assert_eq!(parse_key_combination("Ctrl+Shift"), Err(ParseError::MissingKey));
        assert!(matches!(
            parse_key_combination("A+B"),
            Err(ParseError::MultipleKeys { .. })
        ));
        assert_eq!(
            parse_key_combination("Ctrl+Banana"),
            Err(ParseError::UnknownKey("Banana".to_string()))
        );
        assert!(parse_key_combination("Ctrl++").is_err());
    }

    #[test]
    fn test_display_and_design_string() {
        let combo = KeyCombination::new(83, ModifierMask::SHIFT | ModifierMask::CTRL);
        assert_eq!(combo.to_string(), "Ctrl+Shift+S");
        assert_eq!(combo.to_design_string().as_deref(), Some("ctrl-shift-s"));

        let enter = KeyCombination::new(13, ModifierMask::empty());
        assert_eq!(enter.to_string(), "Enter");
        assert_eq!(enter.to_design_string().as_deref(), Some("enter"));

        let comma = KeyCombination::new(188, ModifierMask::META);
        assert_eq!(comma.to_string(), "Meta+#188");
        assert_eq!(comma.to_design_string(), None);
        assert_eq!(parse_key_combination(&comma.to_string()).unwrap(), comma);
    }

    #[test]
    fn test_zero_key_never_matches() {
        let combo = KeyCombination::new(0, ModifierMask::empty());
        assert!(!combo.is_valid());
        assert!(!combo.matches(0, ModifierMask::empty()));
    }

    #[test]
    fn test_from_raw() {
        let combo = KeyCombination::from_raw(65, Some(&[17]));
        assert_eq!(combo, KeyCombination::new(65, ModifierMask::CTRL));
        assert_eq!(
            KeyCombination::from_raw(65, None),
            KeyCombination::new(65, ModifierMask::empty())
        );
    }

    #[test]
    fn test_to_raw_action() {
        let raw = KeyCombination::new(65, ModifierMask::CTRL).to_raw_action("selectAll", "All");
        assert_eq!(raw.key_code, 65);
        assert_eq!(raw.modifiers, Some(vec![17]));
        assert_eq!(raw.id, "selectAll");
        assert_eq!(raw.caption, "All");

        let plain = KeyCombination::new(13, ModifierMask::empty()).to_raw_action("submit", "");
        assert_eq!(plain.modifiers, None);
    }

    #[test]
    fn test_shorthand_single_marker() {
        let parsed = parse_shorthand_caption("&Save");
        assert_eq!(
            parsed.combination,
            Some(KeyCombination::new(83, ModifierMask::ALT))
        );
        assert_eq!(parsed.caption, "Save");
    }

    #[test]
    fn test_shorthand_marker_run() {
        let parsed = parse_shorthand_caption("^_Print");
        assert_eq!(
            parsed.combination,
            Some(KeyCombination::new(
                80,
                ModifierMask::CTRL | ModifierMask::SHIFT
            ))
        );
        assert_eq!(parsed.caption, "Print");
    }

    #[test]
    fn test_shorthand_mid_word_lowercase() {
        let parsed = parse_shorthand_caption("Save &as...");
        assert_eq!(
            parsed.combination,
            Some(KeyCombination::new(65, ModifierMask::ALT))
        );
        assert_eq!(parsed.caption, "Save as...");
    }

    #[test]
    fn test_shorthand_literals() {
        let parsed = parse_shorthand_caption("Fish && Chips");
        assert_eq!(parsed.combination, None);
        assert_eq!(parsed.caption, "Fish & Chips");

        let parsed = parse_shorthand_caption("Tom & Jerry");
        assert_eq!(parsed.combination, None);
        assert_eq!(parsed.caption, "Tom & Jerry");
    }

    #[test]
    fn test_shorthand_first_run_wins() {
        let parsed = parse_shorthand_caption("&Open ^Recent");
        assert_eq!(
            parsed.combination,
            Some(KeyCombination::new(79, ModifierMask::ALT))
        );
        assert_eq!(parsed.caption, "Open Recent");
    }

    #[test]
    fn test_plain_caption() {
        let parsed = parse_shorthand_caption("Close");
        assert_eq!(parsed.combination, None);
        assert_eq!(parsed.caption, "Close");
    }
}

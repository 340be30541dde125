//! Configuration and wire types.

use serde::{Deserialize, Serialize};

// ============================================================================
// Action descriptor types
// ============================================================================

/// Raw modifier key as encoded in action descriptors pushed by the server.
///
/// The numeric codes are the platform key codes of the modifier keys
/// themselves, not bit positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKey {
    /// Shift key (code 16)
    Shift,
    /// Control key (code 17)
    Ctrl,
    /// Alt/Option key (code 18)
    Alt,
    /// Meta/Cmd/Windows key (code 91)
    Meta,
}

impl ModifierKey {
    pub const SHIFT_CODE: i64 = 16;
    pub const CTRL_CODE: i64 = 17;
    pub const ALT_CODE: i64 = 18;
    pub const META_CODE: i64 = 91;

    /// Raw wire code for this modifier.
    pub const fn code(self) -> i64 {
        match self {
            ModifierKey::Shift => Self::SHIFT_CODE,
            ModifierKey::Ctrl => Self::CTRL_CODE,
            ModifierKey::Alt => Self::ALT_CODE,
            ModifierKey::Meta => Self::META_CODE,
        }
    }

    /// Look up a raw wire code. Unknown codes yield `None`.
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            Self::SHIFT_CODE => Some(ModifierKey::Shift),
            Self::CTRL_CODE => Some(ModifierKey::Ctrl),
            Self::ALT_CODE => Some(ModifierKey::Alt),
            Self::META_CODE => Some(ModifierKey::Meta),
            _ => None,
        }
    }
}

/// A shortcut action descriptor as pushed by the host for one owner.
///
/// Field names follow the server's action-list attributes:
/// `{"kc": 65, "mk": [17], "key": "selectAll", "caption": "Select all"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAction {
    /// Platform key code of the primary key
    #[serde(rename = "kc")]
    pub key_code: u32,
    /// Raw modifier codes (see [`ModifierKey`]); unknown codes are ignored later
    #[serde(
        rename = "mk",
        default,
        deserialize_with = "deserialize_modifier_codes",
        skip_serializing_if = "Option::is_none"
    )]
    pub modifiers: Option<Vec<i64>>,
    /// Opaque action identifier, meaningful only to the server
    #[serde(rename = "key")]
    pub id: String,
    /// Menu caption; not used for matching
    #[serde(default)]
    pub caption: String,
}

/// Read `mk` leniently: any element that is not an integer code is skipped
/// instead of rejecting the whole descriptor.
fn deserialize_modifier_codes<'de, D>(deserializer: D) -> Result<Option<Vec<i64>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Array(items)) => {
            Some(items.iter().filter_map(serde_json::Value::as_i64).collect())
        }
        Some(serde_json::Value::Null) | None => None,
        Some(other) => {
            log::debug!("Ignoring non-list modifier codes: {}", other);
            None
        }
    })
}

impl RawAction {
    /// Create a descriptor with no modifiers and an empty caption.
    pub fn new(key_code: u32, id: impl Into<String>) -> Self {
        Self {
            key_code,
            modifiers: None,
            id: id.into(),
            caption: String::new(),
        }
    }

    /// Builder-style helper to attach raw modifier codes.
    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = i64>) -> Self {
        self.modifiers = Some(modifiers.into_iter().collect());
        self
    }

    /// Builder-style helper to attach a caption.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }
}

// ============================================================================
// Keymap file types
// ============================================================================

/// A keymap entry in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeymapEntry {
    /// Key combination string, e.g. "Ctrl+Shift+S" or "ctrl-shift-s".
    ///
    /// When absent the combination is taken from a shorthand caption
    /// such as "^_Print".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Action identifier reported when the shortcut fires
    pub action: String,
    /// Menu caption, optionally carrying shorthand markers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// Log level configuration
///
/// Controls the verbosity of log output written to the debug log file.
/// Environment variable `RUST_LOG` and the `--log-level` CLI flag take precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging (log file not created)
    #[default]
    Off,
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Most verbose
    Trace,
}

impl LogLevel {
    /// Convert to the `log` crate's filter.
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

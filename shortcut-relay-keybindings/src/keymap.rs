//! Keymap entries → raw action descriptors.

use crate::parser::{KeyCombination, parse_key_combination, parse_shorthand_caption};
use shortcut_relay_config::{KeymapEntry, RawAction};

/// Resolve the combination and display caption of one keymap entry.
///
/// An explicit `key` wins over a shorthand caption; the caption is always
/// shown with its shorthand markers removed.
pub fn resolve_entry(entry: &KeymapEntry) -> Option<(KeyCombination, String)> {
    let shorthand = entry.caption.as_deref().map(parse_shorthand_caption);
    let caption = shorthand
        .as_ref()
        .map(|s| s.caption.clone())
        .unwrap_or_default();

    let combination = match &entry.key {
        Some(key) => match parse_key_combination(key) {
            Ok(combination) => combination,
            Err(e) => {
                log::warn!(
                    "Invalid shortcut '{}' for action '{}': {}",
                    key,
                    entry.action,
                    e
                );
                return None;
            }
        },
        None => match shorthand.and_then(|s| s.combination) {
            Some(combination) => combination,
            None => {
                log::warn!(
                    "Action '{}' has no key and its caption declares no shortcut",
                    entry.action
                );
                return None;
            }
        },
    };

    Some((combination, caption))
}

/// Build the raw action list for a keymap, preserving entry order.
///
/// Entries whose key cannot be resolved are logged and skipped.
pub fn raw_actions_from_keymap(entries: &[KeymapEntry]) -> Vec<RawAction> {
    log::info!("Building shortcut actions from {} keymap entries", entries.len());

    let actions: Vec<RawAction> = entries
        .iter()
        .filter_map(|entry| {
            let (combination, caption) = resolve_entry(entry)?;
            log::debug!("Keymap shortcut: {} -> {}", combination, entry.action);
            Some(combination.to_raw_action(entry.action.as_str(), caption))
        })
        .collect();

    log::info!("Keymap produced {} shortcut actions", actions.len());
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifiers::ModifierMask;

    fn entry(key: Option<&str>, action: &str, caption: Option<&str>) -> KeymapEntry {
        KeymapEntry {
            key: key.map(str::to_string),
            action: action.to_string(),
            caption: caption.map(str::to_string),
        }
    }

    #[test]
    fn test_explicit_key() {
        let actions = raw_actions_from_keymap(&[entry(Some("Ctrl+S"), "save", Some("Save"))]);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].key_code, 83);
        assert_eq!(actions[0].modifiers, Some(vec![17]));
        assert_eq!(actions[0].caption, "Save");
    }

    #[test]
    fn test_shorthand_caption_supplies_key() {
        let (combination, caption) = resolve_entry(&entry(None, "print", Some("^_Print"))).unwrap();
        assert_eq!(
            combination,
            KeyCombination::new(80, ModifierMask::CTRL | ModifierMask::SHIFT)
        );
        assert_eq!(caption, "Print");
    }

    #[test]
    fn test_explicit_key_wins_over_shorthand() {
        let (combination, caption) =
            resolve_entry(&entry(Some("F2"), "rename", Some("&Rename"))).unwrap();
        assert_eq!(combination, KeyCombination::new(113, ModifierMask::empty()));
        assert_eq!(caption, "Rename");
    }

    #[test]
    fn test_invalid_entries_skipped() {
        let actions = raw_actions_from_keymap(&[
            entry(Some("Ctrl+Banana"), "bad", None),
            entry(None, "nokey", Some("Plain")),
            entry(Some("escape"), "cancel", None),
        ]);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].id, "cancel");
        assert_eq!(actions[0].key_code, 27);
        assert_eq!(actions[0].modifiers, None);
    }
}

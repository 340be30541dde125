//! Decoding of the action-list payload pushed by the host.

use crate::error::ConfigError;
use crate::types::RawAction;

/// Decode a JSON action list into raw descriptors.
///
/// The payload must be a JSON array. Entries that do not decode as a
/// [`RawAction`] (missing `key`, negative `kc`, ...) are logged and dropped;
/// the remaining entries keep their original order. Modifier codes that are
/// not integers are skipped without dropping their entry.
pub fn parse_action_list(payload: &str) -> Result<Vec<RawAction>, ConfigError> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(payload)?;
    let mut actions = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<RawAction>(entry) {
            Ok(action) => actions.push(action),
            Err(e) => {
                log::warn!("Dropping malformed action descriptor at index {}: {}", index, e);
            }
        }
    }

    Ok(actions)
}

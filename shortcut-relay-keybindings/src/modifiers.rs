//! Modifier bitmask.

use bitflags::bitflags;
use shortcut_relay_config::ModifierKey;

bitflags! {
    /// Modifier keys held during a key press.
    ///
    /// Bit values match the client event layer: Shift=1, Ctrl=2, Alt=4, Meta=8.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct ModifierMask: u8 {
        const SHIFT = 1;
        const CTRL = 2;
        const ALT = 4;
        const META = 8;
    }
}

impl ModifierMask {
    /// Fold raw wire modifier codes into a mask.
    ///
    /// Unrecognized codes are ignored.
    pub fn from_raw_codes(codes: &[i64]) -> Self {
        codes
            .iter()
            .filter_map(|&code| ModifierKey::from_code(code))
            .fold(Self::empty(), |mask, key| mask | Self::from(key))
    }

    /// Raw wire codes for the set bits, in Shift, Ctrl, Alt, Meta order.
    pub fn to_raw_codes(self) -> Vec<i64> {
        [
            (Self::SHIFT, ModifierKey::Shift),
            (Self::CTRL, ModifierKey::Ctrl),
            (Self::ALT, ModifierKey::Alt),
            (Self::META, ModifierKey::Meta),
        ]
        .into_iter()
        .filter(|(bit, _)| self.contains(*bit))
        .map(|(_, key)| key.code())
        .collect()
    }
}

impl From<ModifierKey> for ModifierMask {
    fn from(key: ModifierKey) -> Self {
        match key {
            ModifierKey::Shift => Self::SHIFT,
            ModifierKey::Ctrl => Self::CTRL,
            ModifierKey::Alt => Self::ALT,
            ModifierKey::Meta => Self::META,
        }
    }
}

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use crate::error::ParseHotkeyError;

/// Identifier of one hotkey registration.
///
/// Issued sequentially from 1 by a [`HotkeyManager`](crate::HotkeyManager) and used as the
/// correlation key with the OS registrar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HotkeyId(u32);

impl HotkeyId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The id in the signed form Win32 `RegisterHotKey` expects.
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self.0 as i32
    }
}

impl fmt::Display for HotkeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Set of modifier keys that must be held, in the Win32 `MOD_*` bit encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModifierSet(u32);

impl ModifierSet {
    pub const NONE: ModifierSet = ModifierSet(0);
    pub const ALT: ModifierSet = ModifierSet(0x0001);
    pub const CONTROL: ModifierSet = ModifierSet(0x0002);
    pub const SHIFT: ModifierSet = ModifierSet(0x0004);
    pub const META: ModifierSet = ModifierSet(0x0008);
    /// Suppress auto-repeat notifications. Registration-only; never reported back.
    pub const NO_REPEAT: ModifierSet = ModifierSet(0x4000);

    const KEYS: ModifierSet = ModifierSet(0x000F);

    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 & Self::KEYS.0 == 0
    }

    #[inline]
    pub const fn contains(self, other: ModifierSet) -> bool {
        self.0 & other.0 == other.0
    }

    /// The modifier keys only, without registration flags such as [`Self::NO_REPEAT`].
    #[inline]
    pub const fn keys(self) -> Self {
        Self(self.0 & Self::KEYS.0)
    }
}

impl BitOr for ModifierSet {
    type Output = ModifierSet;

    fn bitor(self, rhs: Self) -> Self::Output {
        ModifierSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for ModifierSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("None");
        }

        let names = [
            (ModifierSet::CONTROL, "Ctrl"),
            (ModifierSet::ALT, "Alt"),
            (ModifierSet::SHIFT, "Shift"),
            (ModifierSet::META, "Win"),
        ];

        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    f.write_str("+")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Virtual key code (Win32 virtual-key range).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const BACKSPACE: KeyCode = KeyCode(0x08);
    pub const TAB: KeyCode = KeyCode(0x09);
    pub const ENTER: KeyCode = KeyCode(0x0D);
    pub const ESCAPE: KeyCode = KeyCode(0x1B);
    pub const SPACE: KeyCode = KeyCode(0x20);
    pub const END: KeyCode = KeyCode(0x23);
    pub const HOME: KeyCode = KeyCode(0x24);
    pub const INSERT: KeyCode = KeyCode(0x2D);
    pub const DELETE: KeyCode = KeyCode(0x2E);
    pub const C: KeyCode = KeyCode(0x43);
    pub const S: KeyCode = KeyCode(0x53);
    pub const V: KeyCode = KeyCode(0x56);
    pub const X: KeyCode = KeyCode(0x58);
    pub const F1: KeyCode = KeyCode(0x70);
    pub const F24: KeyCode = KeyCode(0x87);

    const NAMED: [(KeyCode, &'static str); 9] = [
        (KeyCode::BACKSPACE, "Backspace"),
        (KeyCode::TAB, "Tab"),
        (KeyCode::ENTER, "Enter"),
        (KeyCode::ESCAPE, "Escape"),
        (KeyCode::SPACE, "Space"),
        (KeyCode::END, "End"),
        (KeyCode::HOME, "Home"),
        (KeyCode::INSERT, "Insert"),
        (KeyCode::DELETE, "Delete"),
    ];

    /// Virtual key for an ASCII letter or digit. Letters map to their upper-case code.
    pub fn from_char(ch: char) -> Option<KeyCode> {
        let ch = ch.to_ascii_uppercase();
        if ch.is_ascii_uppercase() || ch.is_ascii_digit() {
            Some(KeyCode(ch as u32))
        } else {
            None
        }
    }

    /// Function key `F{n}` for `n` in `1..=24`.
    pub fn function(n: u32) -> Option<KeyCode> {
        (1..=24).contains(&n).then(|| KeyCode(Self::F1.0 + n - 1))
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = self.0;
        if let Some((_, name)) = Self::NAMED.iter().find(|(k, _)| k.0 == code) {
            return f.write_str(name);
        }
        match code {
            c if (Self::F1.0..=Self::F24.0).contains(&c) => write!(f, "F{}", c - Self::F1.0 + 1),
            c if (u32::from(b'A')..=u32::from(b'Z')).contains(&c)
                || (u32::from(b'0')..=u32::from(b'9')).contains(&c) =>
            {
                write!(f, "{}", char::from_u32(c).unwrap_or('?'))
            }
            c => write!(f, "Key{c}"),
        }
    }
}

impl FromStr for KeyCode {
    type Err = ParseHotkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let mut chars = token.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return KeyCode::from_char(ch).ok_or_else(|| ParseHotkeyError::UnknownKey(s.into()));
        }

        if let Some((key, _)) = Self::NAMED
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(token))
        {
            return Ok(*key);
        }

        let lower = token.to_ascii_lowercase();
        if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u32>().ok()) {
            return KeyCode::function(n).ok_or_else(|| ParseHotkeyError::UnknownKey(s.into()));
        }
        if let Some(n) = lower.strip_prefix("key").and_then(|n| n.parse::<u32>().ok()) {
            return Ok(KeyCode(n));
        }

        Err(ParseHotkeyError::UnknownKey(s.into()))
    }
}

/// A modifier + key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub modifiers: ModifierSet,
    pub key: KeyCode,
}

impl Hotkey {
    #[inline]
    pub const fn new(modifiers: ModifierSet, key: KeyCode) -> Self {
        Self { modifiers, key }
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}+{}", self.modifiers, self.key)
        }
    }
}

impl FromStr for Hotkey {
    type Err = ParseHotkeyError;

    /// Parse strings such as `"Ctrl+Alt+S"`, `"win + v"` or `"F9"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ParseHotkeyError::Empty);
        }

        let mut modifiers = ModifierSet::NONE;
        let mut key = None;

        for part in s.split('+').map(str::trim) {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= ModifierSet::CONTROL,
                "alt" => modifiers |= ModifierSet::ALT,
                "shift" => modifiers |= ModifierSet::SHIFT,
                "win" | "meta" | "super" => modifiers |= ModifierSet::META,
                _ => {
                    if key.is_some() {
                        return Err(ParseHotkeyError::MultipleKeys(s.into()));
                    }
                    key = Some(part.parse::<KeyCode>()?);
                }
            }
        }

        let key = key.ok_or_else(|| ParseHotkeyError::MissingKey(s.into()))?;
        Ok(Hotkey { modifiers, key })
    }
}

/// Application-level "hotkey pressed" event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPressed {
    /// Id the OS reported with the notification.
    pub id: HotkeyId,
    pub modifiers: ModifierSet,
    pub key: KeyCode,
}

impl KeyPressed {
    #[inline]
    pub fn hotkey(&self) -> Hotkey {
        Hotkey::new(self.modifiers, self.key)
    }

    /// `true` if this press is for the given combination.
    #[inline]
    pub fn matches(&self, hotkey: Hotkey) -> bool {
        self.modifiers.keys() == hotkey.modifiers.keys() && self.key == hotkey.key
    }
}

/// Decode a `WM_HOTKEY` notification.
///
/// `wparam` carries the registration id; `lparam` packs the modifiers in its low word and the
/// virtual key in its high word.
pub fn decode_notification(wparam: usize, lparam: isize) -> KeyPressed {
    let packed = lparam as u32;
    KeyPressed {
        id: HotkeyId::new(wparam as u32),
        modifiers: ModifierSet::from_bits(packed & 0xFFFF),
        key: KeyCode((packed >> 16) & 0xFFFF),
    }
}

// src/engine/mode.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Sub};

/// Bitmaske der aktiven Werkzeug-Modi.
///
/// Mehrere Modi können gleichzeitig aktiv sein; `Mode::ALL` ist der
/// Standardzustand einer frischen Engine. Der Wert `Mode::NONE`
/// deaktiviert sämtliche Mutationen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mode(u8);

impl Mode {
    /// Kein Modus aktiv, alle Mutationen sind No-Ops.
    pub const NONE: Mode = Mode(0);
    /// Neue Polygone dürfen angelegt werden.
    pub const CREATE: Mode = Mode(1 << 0);
    /// Bestehende Vertices dürfen verschoben werden.
    pub const EDIT: Mode = Mode(1 << 1);
    /// Vertices und ganze Polygone dürfen gelöscht werden.
    pub const DELETE: Mode = Mode(1 << 2);
    /// Neue Vertices dürfen auf Kanten eingefügt werden.
    pub const APPEND: Mode = Mode(1 << 3);
    /// Kombination aus `EDIT` und `APPEND`.
    pub const EDIT_APPEND: Mode = Mode((1 << 1) | (1 << 3));
    /// Alle Modi gleichzeitig.
    pub const ALL: Mode = Mode((1 << 0) | (1 << 1) | (1 << 2) | (1 << 3));

    /// Erstellt eine Maske aus rohen Bits; unbekannte Bits werden verworfen.
    pub const fn from_bits(bits: u8) -> Self {
        Mode(bits & Self::ALL.0)
    }

    /// Rohe Bit-Repräsentation.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Prüft ob alle Bits von `other` gesetzt sind.
    pub const fn contains(self, other: Mode) -> bool {
        self.0 & other.0 == other.0
    }

    /// Prüft ob mindestens ein Bit von `other` gesetzt ist.
    pub const fn intersects(self, other: Mode) -> bool {
        self.0 & other.0 != 0
    }

    /// Kopie mit zusätzlich gesetzten Bits.
    pub const fn with(self, other: Mode) -> Mode {
        Mode(self.0 | other.0)
    }

    /// Kopie ohne die Bits von `other`.
    pub const fn without(self, other: Mode) -> Mode {
        Mode(self.0 & !other.0)
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::ALL
    }
}

impl BitOr for Mode {
    type Output = Mode;

    fn bitor(self, rhs: Mode) -> Mode {
        self.with(rhs)
    }
}

impl BitOrAssign for Mode {
    fn bitor_assign(&mut self, rhs: Mode) {
        *self = self.with(rhs);
    }
}

impl BitAnd for Mode {
    type Output = Mode;

    fn bitand(self, rhs: Mode) -> Mode {
        Mode(self.0 & rhs.0)
    }
}

impl Sub for Mode {
    type Output = Mode;

    fn sub(self, rhs: Mode) -> Mode {
        self.without(rhs)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return write!(f, "none");
        }
        let mut first = true;
        for (bit, name) in [
            (Mode::CREATE, "create"),
            (Mode::EDIT, "edit"),
            (Mode::DELETE, "delete"),
            (Mode::APPEND, "append"),
        ] {
            if self.contains(bit) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{}", name)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_requires_all_bits() {
        let mode = Mode::CREATE | Mode::EDIT;
        assert!(mode.contains(Mode::CREATE));
        assert!(mode.contains(Mode::EDIT));
        assert!(!mode.contains(Mode::EDIT_APPEND));
        assert!(mode.intersects(Mode::EDIT_APPEND));
    }

    #[test]
    fn without_clears_only_named_bits() {
        let mode = Mode::ALL.without(Mode::DELETE);
        assert!(mode.contains(Mode::CREATE));
        assert!(mode.contains(Mode::EDIT_APPEND));
        assert!(!mode.contains(Mode::DELETE));
    }

    #[test]
    fn from_bits_discards_unknown_bits() {
        let mode = Mode::from_bits(0b1111_0101);
        assert_eq!(mode, Mode::CREATE | Mode::DELETE);
    }

    #[test]
    fn display_lists_active_modes() {
        assert_eq!(Mode::NONE.to_string(), "none");
        assert_eq!(Mode::EDIT_APPEND.to_string(), "edit|append");
    }
}

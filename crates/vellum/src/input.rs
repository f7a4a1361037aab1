//! Pointer and keyboard input types delivered to element handlers.

use bitflags::bitflags;
use num_enum::{IntoPrimitive, TryFromPrimitive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u32)]
pub enum MouseButton {
    #[default]
    Unknown = 0,
    Left = 1,
    Right = 2,
    Middle = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u32)]
pub enum ScrollAxis {
    Horizontal = 0,
    Vertical = 1,
}

bitflags! {
    /// Keyboard modifier mask, matching the usual XKB bit positions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u32 {
        const SHIFT = 1 << 0;
        const CAPS  = 1 << 1;
        const CTRL  = 1 << 2;
        const ALT   = 1 << 3;
        const MOD2  = 1 << 4;
        const MOD3  = 1 << 5;
        const META  = 1 << 6;
        const MOD5  = 1 << 7;
    }
}

/// A single key press or release as seen by a window.
#[derive(Debug, Clone, Default)]
pub struct KeyEvent {
    pub keysym: u32,
    pub down: bool,
    pub repeated: bool,
    pub utf8: String,
    pub mods: Modifiers,
}

impl KeyEvent {
    pub fn has_modifier(&self, modifier: Modifiers) -> bool {
        self.mods.contains(modifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_mask() {
        let ev = KeyEvent {
            keysym: 0xff0d,
            down: true,
            mods: Modifiers::CTRL | Modifiers::SHIFT,
            ..Default::default()
        };
        assert!(ev.has_modifier(Modifiers::CTRL));
        assert!(ev.has_modifier(Modifiers::SHIFT));
        assert!(!ev.has_modifier(Modifiers::ALT));
    }

    #[test]
    fn button_from_raw() {
        assert_eq!(MouseButton::try_from(1u32).unwrap(), MouseButton::Left);
        assert!(MouseButton::try_from(9u32).is_err());
    }
}

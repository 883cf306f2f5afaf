//! # Controller Styles and Logical Ids
//!
//! [`NpadStyleSet`] describes which controller form-factors the process
//! is willing to accept; [`NpadIdType`] names the logical slot a physical
//! or virtual controller occupies. Styles are negotiated once per
//! process, before any controller is opened.

use bitflags::bitflags;

bitflags! {
    /// Set of controller form-factors accepted by the application.
    ///
    /// Passed to the native layer exactly once per process via
    /// [`configure_input`](crate::pad::configure_input); re-negotiating
    /// after a controller has been opened is unsupported.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NpadStyleSet: u32 {
        /// Pro Controller
        const FULL_KEY = 1 << 0;
        /// Joy-Con pair docked to the console (handheld mode)
        const HANDHELD = 1 << 1;
        /// Joy-Con pair in dual mode
        const JOY_DUAL = 1 << 2;
        /// Left Joy-Con in single mode
        const JOY_LEFT = 1 << 3;
        /// Right Joy-Con in single mode
        const JOY_RIGHT = 1 << 4;
        /// GameCube controller
        const GC = 1 << 5;
        /// Palma controller
        const PALMA = 1 << 6;
        /// NES-style controller
        const LARK = 1 << 7;
        /// NES-style controller in handheld mode
        const HANDHELD_LARK = 1 << 8;
        /// SNES-style controller
        const LUCIA = 1 << 9;
        /// N64-style controller
        const LAGON = 1 << 10;
        /// Genesis-style controller
        const LAGER = 1 << 11;
        /// Generic external controller
        const SYSTEM_EXT = 1 << 29;
        /// Generic controller
        const SYSTEM = 1 << 30;

        /// Styles carrying the full control set
        const FULL_CTRL = Self::FULL_KEY.bits() | Self::HANDHELD.bits() | Self::JOY_DUAL.bits();
        /// All standard styles
        const STANDARD = Self::FULL_CTRL.bits() | Self::JOY_LEFT.bits() | Self::JOY_RIGHT.bits();
    }
}

impl NpadStyleSet {
    /// Look up a single style (or preset) by its configuration name.
    ///
    /// Returns `None` for unknown names; the config layer turns that
    /// into an error before anything reaches the native layer.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "full-key" => Some(Self::FULL_KEY),
            "handheld" => Some(Self::HANDHELD),
            "joy-dual" => Some(Self::JOY_DUAL),
            "joy-left" => Some(Self::JOY_LEFT),
            "joy-right" => Some(Self::JOY_RIGHT),
            "gc" => Some(Self::GC),
            "palma" => Some(Self::PALMA),
            "lark" => Some(Self::LARK),
            "handheld-lark" => Some(Self::HANDHELD_LARK),
            "lucia" => Some(Self::LUCIA),
            "lagon" => Some(Self::LAGON),
            "lager" => Some(Self::LAGER),
            "system-ext" => Some(Self::SYSTEM_EXT),
            "system" => Some(Self::SYSTEM),
            "full-ctrl" => Some(Self::FULL_CTRL),
            "standard" => Some(Self::STANDARD),
            _ => None,
        }
    }
}

/// Logical identity of a controller slot.
///
/// The discriminant doubles as the bit position in the init mask handed
/// to the native layer (`1 << id`), so the values are fixed by the
/// platform, not by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NpadIdType {
    /// Player 1 controller
    No1 = 0,
    /// Player 2 controller
    No2 = 1,
    /// Player 3 controller
    No3 = 2,
    /// Player 4 controller
    No4 = 3,
    /// Player 5 controller
    No5 = 4,
    /// Player 6 controller
    No6 = 5,
    /// Player 7 controller
    No7 = 6,
    /// Player 8 controller
    No8 = 7,
    /// Other controller
    Other = 0x10,
    /// Handheld mode controls
    Handheld = 0x20,
}

impl NpadIdType {
    /// Look up a logical id by its configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "no1" => Some(Self::No1),
            "no2" => Some(Self::No2),
            "no3" => Some(Self::No3),
            "no4" => Some(Self::No4),
            "no5" => Some(Self::No5),
            "no6" => Some(Self::No6),
            "no7" => Some(Self::No7),
            "no8" => Some(Self::No8),
            "other" => Some(Self::Other),
            "handheld" => Some(Self::Handheld),
            _ => None,
        }
    }

    /// Bit position of this id in the init mask.
    pub fn mask_bit(self) -> u64 {
        1 << (self as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_is_union_of_base_styles() {
        // The relationship must survive refactors of the individual bits
        assert_eq!(
            NpadStyleSet::STANDARD,
            NpadStyleSet::FULL_KEY
                | NpadStyleSet::HANDHELD
                | NpadStyleSet::JOY_DUAL
                | NpadStyleSet::JOY_LEFT
                | NpadStyleSet::JOY_RIGHT
        );
    }

    #[test]
    fn test_full_ctrl_is_union_of_base_styles() {
        assert_eq!(
            NpadStyleSet::FULL_CTRL,
            NpadStyleSet::FULL_KEY | NpadStyleSet::HANDHELD | NpadStyleSet::JOY_DUAL
        );
    }

    #[test]
    fn test_standard_contains_full_ctrl() {
        assert!(NpadStyleSet::STANDARD.contains(NpadStyleSet::FULL_CTRL));
        assert!(!NpadStyleSet::STANDARD.contains(NpadStyleSet::GC));
    }

    #[test]
    fn test_style_from_name() {
        assert_eq!(NpadStyleSet::from_name("full-key"), Some(NpadStyleSet::FULL_KEY));
        assert_eq!(NpadStyleSet::from_name("standard"), Some(NpadStyleSet::STANDARD));
        assert_eq!(NpadStyleSet::from_name("joy-dual"), Some(NpadStyleSet::JOY_DUAL));
        assert_eq!(NpadStyleSet::from_name("dualshock"), None);
        assert_eq!(NpadStyleSet::from_name(""), None);
    }

    #[test]
    fn test_id_discriminants_are_platform_values() {
        assert_eq!(NpadIdType::No1 as u8, 0);
        assert_eq!(NpadIdType::No8 as u8, 7);
        assert_eq!(NpadIdType::Other as u8, 0x10);
        assert_eq!(NpadIdType::Handheld as u8, 0x20);
    }

    #[test]
    fn test_id_mask_bit() {
        assert_eq!(NpadIdType::No1.mask_bit(), 1);
        assert_eq!(NpadIdType::No3.mask_bit(), 1 << 2);
        assert_eq!(NpadIdType::Handheld.mask_bit(), 1 << 0x20);
    }

    #[test]
    fn test_id_from_name() {
        assert_eq!(NpadIdType::from_name("no1"), Some(NpadIdType::No1));
        assert_eq!(NpadIdType::from_name("handheld"), Some(NpadIdType::Handheld));
        assert_eq!(NpadIdType::from_name("other"), Some(NpadIdType::Other));
        assert_eq!(NpadIdType::from_name("no9"), None);
        assert_eq!(NpadIdType::from_name("player1"), None);
    }
}

//! Core Types for the indicator controller
//!
//! Data structures without hardware dependencies

/// Operating mode of the indicator controller
///
/// Exactly one mode is active at any time. The controller matches on it
/// exhaustively every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Idle: breathing animation with slow hue drift
    #[default]
    Normal,
    /// Layer 1 held
    Layer1,
    /// Layer 2 held
    Layer2,
    /// Korean input active, shows the Korean flag
    Korean,
    /// Switched back to English, shows the Canadian flag for a while
    EnglishTransition,
    /// Push-to-talk key held, blinks one LED at a time
    PushToTalk,
}

impl Mode {
    /// All modes, in declaration order
    pub const ALL: [Mode; 6] = [
        Mode::Normal,
        Mode::Layer1,
        Mode::Layer2,
        Mode::Korean,
        Mode::EnglishTransition,
        Mode::PushToTalk,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Mode::Normal => "Normal",
            Mode::Layer1 => "Layer1",
            Mode::Layer2 => "Layer2",
            Mode::Korean => "Korean",
            Mode::EnglishTransition => "EnglishTransition",
            Mode::PushToTalk => "PushToTalk",
        }
    }
}

/// Hue / saturation / value, all on a 0..=255 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hsv {
    pub hue: u8,
    pub sat: u8,
    pub val: u8,
}

impl Hsv {
    pub const fn new(hue: u8, sat: u8, val: u8) -> Self {
        Self { hue, sat, val }
    }
}

/// Animation mode of the lighting driver
///
/// Numbering follows the classic `rgblight` mode ids: 1 is static light,
/// 3 is the breathing effect used while idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationMode {
    /// Solid colour, per-LED overrides stay visible
    #[default]
    StaticLight,
    /// Value pulses up and down at the current hue
    Breathing,
    /// Whole strip cycles through the hue wheel
    RainbowMood,
    /// Hue wheel spread across the strip and rotated
    RainbowSwirl,
}

impl AnimationMode {
    pub const fn id(self) -> u8 {
        match self {
            AnimationMode::StaticLight => 1,
            AnimationMode::Breathing => 3,
            AnimationMode::RainbowMood => 6,
            AnimationMode::RainbowSwirl => 9,
        }
    }

    /// Next mode for the "mode step" lighting key
    pub const fn next(self) -> Self {
        match self {
            AnimationMode::StaticLight => AnimationMode::Breathing,
            AnimationMode::Breathing => AnimationMode::RainbowMood,
            AnimationMode::RainbowMood => AnimationMode::RainbowSwirl,
            AnimationMode::RainbowSwirl => AnimationMode::StaticLight,
        }
    }
}

/// Lighting control keys (the `RGB_*` row of layer 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RgbAction {
    Toggle,
    ModeStep,
    ModeBreathing,
    ModeRainbow,
    ModeSwirl,
    HueUp,
    HueDown,
    SatUp,
    SatDown,
    ValUp,
    ValDown,
}

/// Macros bound in the keymap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MacroId {
    /// Toggle the host input language (RAlt + Up)
    SwitchLanguage,
    /// Force the indicators back to Normal
    ResetIndicators,
}

impl MacroId {
    pub const fn id(self) -> u8 {
        match self {
            MacroId::SwitchLanguage => 10,
            MacroId::ResetIndicators => 20,
        }
    }

    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            10 => Some(MacroId::SwitchLanguage),
            20 => Some(MacroId::ResetIndicators),
            _ => None,
        }
    }
}

/// Highest active overlay layer, as reported on a layer change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HighestLayer {
    /// No overlay active
    #[default]
    Base,
    Layer1,
    Layer2,
}

impl HighestLayer {
    pub const fn from_index(layer: u8) -> Self {
        match layer {
            1 => HighestLayer::Layer1,
            2 => HighestLayer::Layer2,
            _ => HighestLayer::Base,
        }
    }
}

/// A physical key transition from the matrix scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyEvent {
    pub row: u8,
    pub col: u8,
    pub pressed: bool,
}

impl KeyEvent {
    pub const fn press(row: u8, col: u8) -> Self {
        Self {
            row,
            col,
            pressed: true,
        }
    }

    pub const fn release(row: u8, col: u8) -> Self {
        Self {
            row,
            col,
            pressed: false,
        }
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for Mode {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.name())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Hsv {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "Hsv {{ h: {}, s: {}, v: {} }}",
            self.hue,
            self.sat,
            self.val
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AnimationMode {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "AnimationMode({})", self.id())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MacroId {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "M({})", self.id())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for HighestLayer {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            HighestLayer::Base => defmt::write!(fmt, "Base"),
            HighestLayer::Layer1 => defmt::write!(fmt, "Layer1"),
            HighestLayer::Layer2 => defmt::write!(fmt, "Layer2"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for KeyEvent {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "KeyEvent {{ row: {}, col: {}, pressed: {} }}",
            self.row,
            self.col,
            self.pressed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macro_id_round_trip_known_ids() {
        assert_eq!(MacroId::from_id(10), Some(MacroId::SwitchLanguage));
        assert_eq!(MacroId::from_id(20), Some(MacroId::ResetIndicators));
        assert_eq!(MacroId::SwitchLanguage.id(), 10);
    }

    #[test]
    fn test_macro_id_unknown() {
        assert_eq!(MacroId::from_id(0), None);
        assert_eq!(MacroId::from_id(11), None);
    }

    #[test]
    fn test_highest_layer_from_index() {
        assert_eq!(HighestLayer::from_index(0), HighestLayer::Base);
        assert_eq!(HighestLayer::from_index(1), HighestLayer::Layer1);
        assert_eq!(HighestLayer::from_index(2), HighestLayer::Layer2);
        assert_eq!(HighestLayer::from_index(7), HighestLayer::Base);
    }

    #[test]
    fn test_animation_mode_step_cycles() {
        let mut mode = AnimationMode::StaticLight;
        for _ in 0..4 {
            mode = mode.next();
        }
        assert_eq!(mode, AnimationMode::StaticLight);
        assert_eq!(AnimationMode::Breathing.id(), 3);
    }
}

//! Hardware Abstraction Traits
//!
//! These traits describe the lighting hardware and the lighting driver
//! without a concrete implementation.

use rgb::RGB8;

use crate::types::{AnimationMode, Hsv, RgbAction};

/// Error type for LED strip writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedError {
    WriteFailed,
}

/// Access to a chain of SmartLEDs (WS2812/Neopixel)
///
/// # Implementations
/// - **Production:** RmtLedWriter (ESP32 RMT peripheral)
/// - **Testing:** MockLedWriter (in-memory mock)
pub trait SmartLedWriter: Send {
    /// Writes one frame, `colors[i]` goes to LED `i`
    ///
    /// # Error handling
    /// Returns `LedError::WriteFailed` when the hardware access fails
    fn write(&mut self, colors: &[RGB8]) -> Result<(), LedError>;
}

/// Commands the indicator controller issues to the lighting driver
///
/// Every command is fire-and-forget. Implementations must accept any input,
/// out-of-range slots are ignored.
pub trait LightingDriver {
    /// Sets a single LED, bypassing the animation
    fn set_rgb_at(&mut self, slot: usize, color: RGB8);

    /// Switches the whole strip to an animation mode
    fn set_mode(&mut self, mode: AnimationMode);

    /// Sets the colour and stores it as the persisted setting
    fn set_hsv(&mut self, hsv: Hsv);

    /// Sets the colour without touching the persisted setting
    fn set_hsv_noeeprom(&mut self, hsv: Hsv);

    /// Restores colour and mode from the persisted setting
    fn reload_from_eeprom(&mut self);

    /// Advances the hue by one step and persists it
    fn increase_hue(&mut self);

    /// Handles a lighting key from the keymap
    fn apply(&mut self, action: RgbAction);
}

impl<T: LightingDriver + ?Sized> LightingDriver for &mut T {
    fn set_rgb_at(&mut self, slot: usize, color: RGB8) {
        (**self).set_rgb_at(slot, color)
    }

    fn set_mode(&mut self, mode: AnimationMode) {
        (**self).set_mode(mode)
    }

    fn set_hsv(&mut self, hsv: Hsv) {
        (**self).set_hsv(hsv)
    }

    fn set_hsv_noeeprom(&mut self, hsv: Hsv) {
        (**self).set_hsv_noeeprom(hsv)
    }

    fn reload_from_eeprom(&mut self) {
        (**self).reload_from_eeprom()
    }

    fn increase_hue(&mut self) {
        (**self).increase_hue()
    }

    fn apply(&mut self, action: RgbAction) {
        (**self).apply(action)
    }
}

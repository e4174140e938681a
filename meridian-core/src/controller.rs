//! Indicator controller
//!
//! Polling state machine that turns layer activity, the language macro and
//! the push-to-talk key into LED behaviour. One instance per keyboard, driven
//! once per tick from the firmware loop. Key and layer callbacks arrive on
//! the same execution context between ticks.

use rgb::RGB8;

use crate::keymap::KeyCode;
use crate::traits::LightingDriver;
use crate::types::{AnimationMode, HighestLayer, Hsv, MacroId, Mode};

/// Ticks between two hue steps while Normal
pub const HUE_CYCLE_TICKS: u16 = 5000;
/// Ticks the Canadian flag stays up after switching back to English
pub const ENGLISH_TRANSITION_TICKS: u16 = 3000;
/// Ticks each LED stays lit while push-to-talk is held
pub const PUSH_TO_TALK_BLINK_TICKS: u16 = 500;

/// Number of indicator LEDs
pub const INDICATOR_SLOTS: usize = 3;

/// Key that enters push-to-talk, on whatever layer it is reached
pub const PUSH_TO_TALK_KEY: KeyCode = KeyCode::F24;

/// Korean input: red, blue, off
pub const KOREAN_FLAG: [RGB8; INDICATOR_SLOTS] = [
    RGB8 { r: 255, g: 26, b: 38 },
    RGB8 { r: 0, g: 71, b: 255 },
    RGB8 { r: 0, g: 0, b: 0 },
];

/// Back to English: red, white, red
pub const CANADIAN_FLAG: [RGB8; INDICATOR_SLOTS] = [
    RGB8 { r: 255, g: 0, b: 0 },
    RGB8 { r: 255, g: 255, b: 255 },
    RGB8 { r: 255, g: 0, b: 0 },
];

/// The single lit LED while push-to-talk is held
pub const PUSH_TO_TALK_COLOR: RGB8 = RGB8 {
    r: 255,
    g: 255,
    b: 255,
};

const OFF: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

/// Set directly on layer 1, never persisted
pub const LAYER1_HSV: Hsv = Hsv::new(130, 255, 255);
/// Set directly on layer 2, never persisted
pub const LAYER2_HSV: Hsv = Hsv::new(212, 255, 255);
/// Purple the keyboard boots into
pub const STARTUP_HSV: Hsv = Hsv::new(175, 180, 255);

/// One host key transition emitted by a macro
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MacroStep {
    Press(KeyCode),
    Release(KeyCode),
}

/// RAlt + Up, the host's input-language shortcut
pub const SWITCH_LANGUAGE_SEQUENCE: [MacroStep; 4] = [
    MacroStep::Press(KeyCode::RAlt),
    MacroStep::Press(KeyCode::Up),
    MacroStep::Release(KeyCode::RAlt),
    MacroStep::Release(KeyCode::Up),
];

/// Indicator state machine
///
/// Owns the lighting driver and all mode/timer state. None of its
/// operations can fail.
pub struct IndicatorController<L: LightingDriver> {
    driver: L,
    mode: Mode,
    previous_mode: Mode,
    hue_timer: u16,
    transition_timer: u16,
    push_to_talk_timer: u16,
    push_to_talk_index: u8,
}

impl<L: LightingDriver> IndicatorController<L> {
    pub fn new(driver: L) -> Self {
        Self {
            driver,
            mode: Mode::Normal,
            previous_mode: Mode::Normal,
            hue_timer: 0,
            transition_timer: 0,
            push_to_talk_timer: 0,
            push_to_talk_index: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Mode restored when push-to-talk is released
    pub fn previous_mode(&self) -> Mode {
        self.previous_mode
    }

    pub fn push_to_talk_index(&self) -> u8 {
        self.push_to_talk_index
    }

    pub fn push_to_talk_timer(&self) -> u16 {
        self.push_to_talk_timer
    }

    pub fn transition_timer(&self) -> u16 {
        self.transition_timer
    }

    pub fn hue_timer(&self) -> u16 {
        self.hue_timer
    }

    pub fn driver(&self) -> &L {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut L {
        &mut self.driver
    }

    pub fn into_driver(self) -> L {
        self.driver
    }

    // ------------------------------------------------------------------------
    // Lifecycle hooks
    // ------------------------------------------------------------------------

    /// Runs before the lighting driver is brought up: all indicators off
    pub fn pre_init(&mut self) {
        for slot in 0..INDICATOR_SLOTS {
            self.driver.set_rgb_at(slot, OFF);
        }
    }

    /// Runs once the lighting driver is up: breathing purple
    pub fn post_init(&mut self) {
        self.driver.set_mode(AnimationMode::Breathing);
        self.driver.set_hsv(STARTUP_HSV);
    }

    /// Per-tick step
    pub fn housekeeping(&mut self) {
        match self.mode {
            Mode::Normal => {
                if self.hue_timer > HUE_CYCLE_TICKS {
                    self.driver.increase_hue();
                    self.hue_timer = 0;
                } else {
                    self.hue_timer += 1;
                }
            }
            Mode::Korean => self.paint(&KOREAN_FLAG),
            Mode::EnglishTransition => {
                self.transition_timer += 1;
                if self.transition_timer > ENGLISH_TRANSITION_TICKS {
                    self.transition_timer = 0;
                    self.driver.set_mode(AnimationMode::Breathing);
                    self.mode = Mode::Normal;
                }
                // Painted on the expiry tick as well
                self.paint(&CANADIAN_FLAG);
            }
            Mode::PushToTalk => self.blink_push_to_talk(),
            Mode::Layer1 => self.driver.set_hsv_noeeprom(LAYER1_HSV),
            Mode::Layer2 => self.driver.set_hsv_noeeprom(LAYER2_HSV),
        }
    }

    // ------------------------------------------------------------------------
    // Framework callbacks
    // ------------------------------------------------------------------------

    /// The highest active layer changed
    pub fn on_layer_change(&mut self, highest: HighestLayer) {
        match highest {
            HighestLayer::Layer1 => {
                self.driver.set_mode(AnimationMode::StaticLight);
                self.mode = Mode::Layer1;
            }
            HighestLayer::Layer2 => {
                self.driver.set_mode(AnimationMode::StaticLight);
                self.mode = Mode::Layer2;
            }
            HighestLayer::Base => {
                self.driver.reload_from_eeprom();
                self.driver.set_mode(AnimationMode::Breathing);
                self.mode = Mode::Normal;
            }
        }
    }

    /// A macro key changed state
    ///
    /// Returns the host key sequence the macro types, if any. Only presses
    /// act.
    pub fn on_macro(&mut self, id: MacroId, pressed: bool) -> &'static [MacroStep] {
        if !pressed {
            return &[];
        }
        match id {
            MacroId::SwitchLanguage => {
                self.toggle_language();
                &SWITCH_LANGUAGE_SEQUENCE
            }
            MacroId::ResetIndicators => {
                self.hard_reset();
                &[]
            }
        }
    }

    /// Every processed keycode passes through here, layer already resolved
    pub fn on_key(&mut self, keycode: KeyCode, pressed: bool) {
        if keycode != PUSH_TO_TALK_KEY {
            return;
        }
        if pressed {
            if self.mode != Mode::PushToTalk {
                self.previous_mode = self.mode;
            }
            self.mode = Mode::PushToTalk;
        } else {
            self.mode = self.previous_mode;
            self.push_to_talk_index = 0;
            self.push_to_talk_timer = 0;
        }
    }

    /// Normal goes to Korean, everything else to the English transition
    pub fn toggle_language(&mut self) {
        match self.mode {
            Mode::Normal => self.mode = Mode::Korean,
            Mode::EnglishTransition => {}
            Mode::Layer1 | Mode::Layer2 | Mode::Korean | Mode::PushToTalk => {
                self.transition_timer = 0;
                self.mode = Mode::EnglishTransition;
            }
        }
        self.driver.set_mode(AnimationMode::StaticLight);
    }

    /// Back to Normal from anywhere
    pub fn hard_reset(&mut self) {
        self.mode = Mode::Normal;
        self.driver.set_mode(AnimationMode::Breathing);
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn paint(&mut self, colors: &[RGB8; INDICATOR_SLOTS]) {
        for (slot, color) in colors.iter().enumerate() {
            self.driver.set_rgb_at(slot, *color);
        }
    }

    fn blink_push_to_talk(&mut self) {
        if self.previous_mode == Mode::Korean {
            // Slot 0 glitches when it is cleared and lit again in the same
            // tick, so it is only cleared once the blink has moved on.
            if self.push_to_talk_index != 0 {
                self.driver.set_rgb_at(0, OFF);
            }
            self.driver.set_rgb_at(1, OFF);
            self.driver.set_rgb_at(2, OFF);
        }
        self.driver
            .set_rgb_at(self.push_to_talk_index as usize, PUSH_TO_TALK_COLOR);

        self.push_to_talk_timer += 1;
        if self.push_to_talk_timer > PUSH_TO_TALK_BLINK_TICKS {
            self.push_to_talk_timer = 0;
            self.push_to_talk_index = (self.push_to_talk_index + 1) % INDICATOR_SLOTS as u8;
        }
    }
}

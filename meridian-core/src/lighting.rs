//! Software lighting driver
//!
//! `rgblight`-style driver for a short WS2812 chain. Keeps a frame buffer,
//! the live colour/mode and a stored copy of them that stands in for the
//! persisted settings. Frames only go out through [SmartLedWriter] on
//! [RgbLight::flush], and only when they changed.

use rgb::RGB8;

use crate::logic::{breathe_level, hsv_to_rgb, scale};
use crate::traits::{LedError, LightingDriver, SmartLedWriter};
use crate::types::{AnimationMode, Hsv, RgbAction};

/// Hue change per step
pub const HUE_STEP: u8 = 8;
/// Saturation change per step
pub const SAT_STEP: u8 = 17;
/// Value change per step
pub const VAL_STEP: u8 = 17;
/// Ticks between two animation frames
pub const ANIMATION_INTERVAL_TICKS: u16 = 20;

const OFF: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

/// Settings that survive `reload_from_eeprom`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LightSettings {
    pub hsv: Hsv,
    pub mode: AnimationMode,
    pub enabled: bool,
}

impl Default for LightSettings {
    fn default() -> Self {
        Self {
            hsv: Hsv::new(0, 255, 255),
            mode: AnimationMode::StaticLight,
            enabled: true,
        }
    }
}

/// Lighting driver for `N` LEDs behind a [SmartLedWriter]
pub struct RgbLight<W: SmartLedWriter, const N: usize> {
    writer: W,
    frame: [RGB8; N],
    live: LightSettings,
    stored: LightSettings,
    phase: u8,
    ticks: u16,
    dirty: bool,
}

impl<W: SmartLedWriter, const N: usize> RgbLight<W, N> {
    pub fn new(writer: W) -> Self {
        Self::with_settings(writer, LightSettings::default())
    }

    /// Starts from previously stored settings
    pub fn with_settings(writer: W, settings: LightSettings) -> Self {
        let mut light = Self {
            writer,
            frame: [OFF; N],
            live: settings,
            stored: settings,
            phase: 0,
            ticks: 0,
            dirty: true,
        };
        light.repaint();
        light
    }

    pub fn frame(&self) -> &[RGB8; N] {
        &self.frame
    }

    pub fn settings(&self) -> LightSettings {
        self.live
    }

    pub fn stored_settings(&self) -> LightSettings {
        self.stored
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// True when the frame changed since the last successful flush
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Advances animated modes, call once per tick
    pub fn animate(&mut self) {
        if !self.live.enabled || self.live.mode == AnimationMode::StaticLight {
            return;
        }
        self.ticks += 1;
        if self.ticks >= ANIMATION_INTERVAL_TICKS {
            self.ticks = 0;
            self.phase = self.phase.wrapping_add(1);
            self.repaint();
        }
    }

    /// Pushes the frame to the LEDs if it changed
    pub fn flush(&mut self) -> Result<(), LedError> {
        if !self.dirty {
            return Ok(());
        }
        self.writer.write(&self.frame)?;
        self.dirty = false;
        Ok(())
    }

    fn persist(&mut self) {
        self.stored = self.live;
    }

    fn restart_animation(&mut self) {
        self.phase = 0;
        self.ticks = 0;
    }

    /// Recomputes every LED from the live settings
    fn repaint(&mut self) {
        let LightSettings { hsv, mode, enabled } = self.live;
        for (i, led) in self.frame.iter_mut().enumerate() {
            let color = if !enabled {
                OFF
            } else {
                match mode {
                    AnimationMode::StaticLight => hsv_to_rgb(hsv),
                    AnimationMode::Breathing => hsv_to_rgb(Hsv {
                        val: scale(hsv.val, breathe_level(self.phase)),
                        ..hsv
                    }),
                    AnimationMode::RainbowMood => hsv_to_rgb(Hsv {
                        hue: hsv.hue.wrapping_add(self.phase),
                        ..hsv
                    }),
                    AnimationMode::RainbowSwirl => {
                        let offset = (i * 256 / N) as u8;
                        hsv_to_rgb(Hsv {
                            hue: hsv.hue.wrapping_add(self.phase).wrapping_add(offset),
                            ..hsv
                        })
                    }
                }
            };
            if *led != color {
                *led = color;
                self.dirty = true;
            }
        }
    }
}

impl<W: SmartLedWriter, const N: usize> LightingDriver for RgbLight<W, N> {
    fn set_rgb_at(&mut self, slot: usize, color: RGB8) {
        if !self.live.enabled {
            return;
        }
        if let Some(led) = self.frame.get_mut(slot) {
            if *led != color {
                *led = color;
                self.dirty = true;
            }
        }
    }

    fn set_mode(&mut self, mode: AnimationMode) {
        self.live.mode = mode;
        self.persist();
        self.restart_animation();
        self.repaint();
    }

    fn set_hsv(&mut self, hsv: Hsv) {
        self.live.hsv = hsv;
        self.persist();
        self.repaint();
    }

    fn set_hsv_noeeprom(&mut self, hsv: Hsv) {
        self.live.hsv = hsv;
        self.repaint();
    }

    fn reload_from_eeprom(&mut self) {
        self.live = self.stored;
        self.repaint();
    }

    fn increase_hue(&mut self) {
        let hsv = self.live.hsv;
        self.set_hsv(Hsv {
            hue: hsv.hue.wrapping_add(HUE_STEP),
            ..hsv
        });
    }

    fn apply(&mut self, action: RgbAction) {
        let hsv = self.live.hsv;
        match action {
            RgbAction::Toggle => {
                self.live.enabled = !self.live.enabled;
                self.persist();
                self.repaint();
            }
            RgbAction::ModeStep => self.set_mode(self.live.mode.next()),
            RgbAction::ModeBreathing => self.set_mode(AnimationMode::Breathing),
            RgbAction::ModeRainbow => self.set_mode(AnimationMode::RainbowMood),
            RgbAction::ModeSwirl => self.set_mode(AnimationMode::RainbowSwirl),
            RgbAction::HueUp => self.increase_hue(),
            RgbAction::HueDown => self.set_hsv(Hsv {
                hue: hsv.hue.wrapping_sub(HUE_STEP),
                ..hsv
            }),
            RgbAction::SatUp => self.set_hsv(Hsv {
                sat: hsv.sat.saturating_add(SAT_STEP),
                ..hsv
            }),
            RgbAction::SatDown => self.set_hsv(Hsv {
                sat: hsv.sat.saturating_sub(SAT_STEP),
                ..hsv
            }),
            RgbAction::ValUp => self.set_hsv(Hsv {
                val: hsv.val.saturating_add(VAL_STEP),
                ..hsv
            }),
            RgbAction::ValDown => self.set_hsv(Hsv {
                val: hsv.val.saturating_sub(VAL_STEP),
                ..hsv
            }),
        }
    }
}

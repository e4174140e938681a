//! Key router
//!
//! Resolves matrix events against [crate::keymap::KEYMAP] and feeds the
//! result into the indicator controller and the lighting driver.
//!
//! Lookup walks from the highest active layer down to the base layer,
//! skipping transparent positions. The layer a press resolved on is cached
//! per position, so the release always hits the same action even if the
//! layer state changed in between.

use crate::controller::{IndicatorController, MacroStep};
use crate::keymap::{COLS, KeyAction, KeyCode, NUM_LAYERS, ROWS, action_at};
use crate::traits::LightingDriver;
use crate::types::{HighestLayer, KeyEvent, MacroId, RgbAction};

/// Bitmask of active layers, bit 0 is the always-on base layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerState(u8);

impl LayerState {
    pub const fn new() -> Self {
        Self(1)
    }

    pub fn activate(&mut self, layer: u8) {
        if (layer as usize) < NUM_LAYERS {
            self.0 |= 1 << layer;
        }
    }

    pub fn deactivate(&mut self, layer: u8) {
        if layer != 0 && (layer as usize) < NUM_LAYERS {
            self.0 &= !(1 << layer);
        }
    }

    pub fn is_active(&self, layer: u8) -> bool {
        (layer as usize) < NUM_LAYERS && self.0 & (1 << layer) != 0
    }

    /// Index of the highest active layer
    pub fn highest_index(&self) -> u8 {
        (7 - self.0.leading_zeros()) as u8
    }

    pub fn highest(&self) -> HighestLayer {
        HighestLayer::from_index(self.highest_index())
    }
}

impl Default for LayerState {
    fn default() -> Self {
        Self::new()
    }
}

/// What a key event turned into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyOutcome {
    /// Nothing to do
    None,
    /// Regular key for the HID reporter
    Key { code: KeyCode, pressed: bool },
    /// A momentary layer key changed the highest active layer
    LayerChanged(HighestLayer),
    /// A momentary layer key changed, highest layer unaffected
    LayerHeld,
    Macro { id: MacroId, pressed: bool },
    /// Lighting key, acts on press only
    Rgb(RgbAction),
}

/// Tracks layer state and the per-position layer cache
pub struct KeyRouter {
    layers: LayerState,
    layer_cache: [[u8; COLS]; ROWS],
}

impl KeyRouter {
    pub const fn new() -> Self {
        Self {
            layers: LayerState::new(),
            layer_cache: [[0; COLS]; ROWS],
        }
    }

    pub fn layers(&self) -> LayerState {
        self.layers
    }

    /// Resolves one matrix event
    pub fn process(&mut self, event: KeyEvent) -> KeyOutcome {
        let (row, col) = (event.row as usize, event.col as usize);
        if row >= ROWS || col >= COLS {
            return KeyOutcome::None;
        }

        let action = if event.pressed {
            self.resolve_press(row, col)
        } else {
            let layer = self.layer_cache[row][col];
            self.layer_cache[row][col] = 0;
            action_at(layer as usize, row, col)
        };

        match action {
            KeyAction::No | KeyAction::Transparent => KeyOutcome::None,
            KeyAction::Key(code) => KeyOutcome::Key {
                code,
                pressed: event.pressed,
            },
            KeyAction::MomentaryLayer(layer) => {
                let before = self.layers.highest();
                if event.pressed {
                    self.layers.activate(layer);
                } else {
                    self.layers.deactivate(layer);
                }
                let after = self.layers.highest();
                if before != after {
                    KeyOutcome::LayerChanged(after)
                } else {
                    KeyOutcome::LayerHeld
                }
            }
            KeyAction::Macro(id) => KeyOutcome::Macro {
                id,
                pressed: event.pressed,
            },
            KeyAction::Rgb(rgb) if event.pressed => KeyOutcome::Rgb(rgb),
            KeyAction::Rgb(_) => KeyOutcome::None,
        }
    }

    fn resolve_press(&mut self, row: usize, col: usize) -> KeyAction {
        for layer in (0..NUM_LAYERS as u8).rev() {
            if !self.layers.is_active(layer) {
                continue;
            }
            let action = action_at(layer as usize, row, col);
            if action == KeyAction::Transparent {
                continue;
            }
            self.layer_cache[row][col] = layer;
            return action;
        }
        KeyAction::No
    }
}

impl Default for KeyRouter {
    fn default() -> Self {
        Self::new()
    }
}

/// Routes one matrix event through the keymap into the controller
///
/// Layer changes, macros and keycodes go to the matching controller
/// callback, lighting keys straight to the driver. Returns the outcome for
/// the HID side together with any host keys a macro wants typed.
pub fn dispatch<L: LightingDriver>(
    controller: &mut IndicatorController<L>,
    router: &mut KeyRouter,
    event: KeyEvent,
) -> (KeyOutcome, &'static [MacroStep]) {
    const NO_STEPS: &[MacroStep] = &[];

    let outcome = router.process(event);
    let steps = match outcome {
        KeyOutcome::None | KeyOutcome::LayerHeld => NO_STEPS,
        KeyOutcome::Key { code, pressed } => {
            controller.on_key(code, pressed);
            NO_STEPS
        }
        KeyOutcome::LayerChanged(highest) => {
            controller.on_layer_change(highest);
            NO_STEPS
        }
        KeyOutcome::Macro { id, pressed } => controller.on_macro(id, pressed),
        KeyOutcome::Rgb(action) => {
            controller.driver_mut().apply(action);
            NO_STEPS
        }
    };
    (outcome, steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_state_base_only() {
        let state = LayerState::new();
        assert!(state.is_active(0));
        assert_eq!(state.highest(), HighestLayer::Base);
    }

    #[test]
    fn test_layer_state_highest_wins() {
        let mut state = LayerState::new();
        state.activate(1);
        state.activate(2);
        assert_eq!(state.highest(), HighestLayer::Layer2);
        state.deactivate(2);
        assert_eq!(state.highest(), HighestLayer::Layer1);
    }

    #[test]
    fn test_base_layer_cannot_be_deactivated() {
        let mut state = LayerState::new();
        state.deactivate(0);
        assert!(state.is_active(0));
    }

    #[test]
    fn test_layer_state_ignores_unknown_layers() {
        let mut state = LayerState::new();
        state.activate(5);
        assert_eq!(state, LayerState::new());
    }

    #[test]
    fn test_plain_key() {
        let mut router = KeyRouter::new();
        assert_eq!(
            router.process(KeyEvent::press(1, 1)),
            KeyOutcome::Key {
                code: KeyCode::Q,
                pressed: true
            }
        );
    }

    #[test]
    fn test_out_of_matrix_is_ignored() {
        let mut router = KeyRouter::new();
        assert_eq!(router.process(KeyEvent::press(9, 0)), KeyOutcome::None);
    }
}

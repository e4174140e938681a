//! Integration tests for the keymap and key router
//!
//! These tests run on the host (x86_64) and drive the router with matrix
//! events, optionally through the indicator controller

use meridian_core::controller::{INDICATOR_SLOTS, SWITCH_LANGUAGE_SEQUENCE};
use meridian_core::keymap::{COLS, KEYMAP, NUM_LAYERS, ROWS, action_at};
use meridian_core::lighting::HUE_STEP;
use meridian_core::{
    HighestLayer, IndicatorController, KeyAction, KeyCode, KeyEvent, KeyOutcome, KeyRouter,
    LedError, MacroId, Mode, RgbAction, RgbLight, SmartLedWriter, dispatch,
};
use rgb::RGB8;

// Positions on the matrix
const LAYER1_KEY: (u8, u8) = (2, 0);
const LAYER2_KEY: (u8, u8) = (3, 13);
const PUSH_TO_TALK: (u8, u8) = (4, 6);
const SWITCH_LANG: (u8, u8) = (4, 7);
const RESET: (u8, u8) = (0, 13);

fn press(pos: (u8, u8)) -> KeyEvent {
    KeyEvent::press(pos.0, pos.1)
}

fn release(pos: (u8, u8)) -> KeyEvent {
    KeyEvent::release(pos.0, pos.1)
}

// ============================================================================
// Null LED Writer
// ============================================================================

#[derive(Default)]
pub struct NullLedWriter;

impl SmartLedWriter for NullLedWriter {
    fn write(&mut self, _colors: &[RGB8]) -> Result<(), LedError> {
        Ok(())
    }
}

type Controller = IndicatorController<RgbLight<NullLedWriter, INDICATOR_SLOTS>>;

fn controller() -> Controller {
    IndicatorController::new(RgbLight::new(NullLedWriter))
}

// ============================================================================
// Tests: keymap layout
// ============================================================================

#[test]
fn test_keymap_dimensions() {
    assert_eq!(KEYMAP.len(), NUM_LAYERS);
    for layer in KEYMAP.iter() {
        assert_eq!(layer.len(), ROWS);
        for row in layer.iter() {
            assert_eq!(row.len(), COLS);
        }
    }
}

#[test]
fn test_base_layer_has_no_transparent_keys() {
    for row in 0..ROWS {
        for col in 0..COLS {
            assert_ne!(action_at(0, row, col), KeyAction::Transparent);
        }
    }
}

#[test]
fn test_momentary_layers_only_target_existing_layers() {
    for layer in 0..NUM_LAYERS {
        for row in 0..ROWS {
            for col in 0..COLS {
                if let KeyAction::MomentaryLayer(target) = action_at(layer, row, col) {
                    assert!((target as usize) < NUM_LAYERS);
                }
            }
        }
    }
}

#[test]
fn test_action_outside_keymap_is_no() {
    assert_eq!(action_at(NUM_LAYERS, 0, 0), KeyAction::No);
    assert_eq!(action_at(0, ROWS, 0), KeyAction::No);
    assert_eq!(action_at(0, 0, COLS), KeyAction::No);
}

// ============================================================================
// Tests: router
// ============================================================================

#[test]
fn test_plain_key_on_base_layer() {
    let mut router = KeyRouter::new();
    assert_eq!(
        router.process(KeyEvent::press(1, 1)),
        KeyOutcome::Key {
            code: KeyCode::Q,
            pressed: true
        }
    );
    assert_eq!(
        router.process(KeyEvent::release(1, 1)),
        KeyOutcome::Key {
            code: KeyCode::Q,
            pressed: false
        }
    );
}

#[test]
fn test_layer1_overrides_and_falls_through() {
    let mut router = KeyRouter::new();
    assert_eq!(
        router.process(press(LAYER1_KEY)),
        KeyOutcome::LayerChanged(HighestLayer::Layer1)
    );

    // Overridden on layer 1
    assert_eq!(
        router.process(KeyEvent::press(1, 2)),
        KeyOutcome::Key {
            code: KeyCode::Up,
            pressed: true
        }
    );
    // Transparent on layer 1, falls through to the base layer
    assert_eq!(
        router.process(KeyEvent::press(3, 1)),
        KeyOutcome::Key {
            code: KeyCode::Z,
            pressed: true
        }
    );

    assert_eq!(
        router.process(release(LAYER1_KEY)),
        KeyOutcome::LayerChanged(HighestLayer::Base)
    );
}

#[test]
fn test_release_uses_layer_of_press() {
    let mut router = KeyRouter::new();
    router.process(press(LAYER1_KEY));
    router.process(KeyEvent::press(1, 2));
    router.process(release(LAYER1_KEY));

    // Layer 1 is gone, the release still reports the key the press produced
    assert_eq!(
        router.process(KeyEvent::release(1, 2)),
        KeyOutcome::Key {
            code: KeyCode::Up,
            pressed: false
        }
    );
    // And the cache is back to the base layer
    assert_eq!(
        router.process(KeyEvent::press(1, 2)),
        KeyOutcome::Key {
            code: KeyCode::W,
            pressed: true
        }
    );
}

#[test]
fn test_highest_layer_wins_and_lower_layer_release_is_silent() {
    let mut router = KeyRouter::new();
    router.process(press(LAYER2_KEY));
    assert_eq!(router.layers().highest(), HighestLayer::Layer2);

    assert_eq!(router.process(press(LAYER1_KEY)), KeyOutcome::LayerHeld);
    assert_eq!(router.layers().highest(), HighestLayer::Layer2);

    assert_eq!(router.process(release(LAYER1_KEY)), KeyOutcome::LayerHeld);
    assert_eq!(
        router.process(release(LAYER2_KEY)),
        KeyOutcome::LayerChanged(HighestLayer::Base)
    );
}

#[test]
fn test_push_to_talk_reachable_on_every_layer() {
    for layer_key in [None, Some(LAYER1_KEY), Some(LAYER2_KEY)] {
        let mut router = KeyRouter::new();
        if let Some(pos) = layer_key {
            router.process(press(pos));
        }
        assert_eq!(
            router.process(press(PUSH_TO_TALK)),
            KeyOutcome::Key {
                code: KeyCode::F24,
                pressed: true
            }
        );
    }
}

#[test]
fn test_lighting_keys_act_on_press_only() {
    let mut router = KeyRouter::new();
    router.process(press(LAYER2_KEY));
    assert_eq!(
        router.process(KeyEvent::press(1, 3)),
        KeyOutcome::Rgb(RgbAction::HueUp)
    );
    assert_eq!(router.process(KeyEvent::release(1, 3)), KeyOutcome::None);
}

#[test]
fn test_out_of_range_event_is_dropped() {
    let mut router = KeyRouter::new();
    assert_eq!(
        router.process(KeyEvent::press(ROWS as u8, 0)),
        KeyOutcome::None
    );
    assert_eq!(
        router.process(KeyEvent::release(0, COLS as u8)),
        KeyOutcome::None
    );
}

// ============================================================================
// Tests: dispatch into the controller
// ============================================================================

#[test]
fn test_dispatch_language_macro_types_shortcut() {
    let mut c = controller();
    let mut router = KeyRouter::new();

    let (outcome, steps) = dispatch(&mut c, &mut router, press(SWITCH_LANG));
    assert_eq!(
        outcome,
        KeyOutcome::Macro {
            id: MacroId::SwitchLanguage,
            pressed: true
        }
    );
    assert_eq!(steps, &SWITCH_LANGUAGE_SEQUENCE);
    assert_eq!(c.mode(), Mode::Korean);

    let (_, steps) = dispatch(&mut c, &mut router, release(SWITCH_LANG));
    assert!(steps.is_empty());
    assert_eq!(c.mode(), Mode::Korean);
}

#[test]
fn test_dispatch_layer_keys_drive_modes() {
    let mut c = controller();
    let mut router = KeyRouter::new();

    dispatch(&mut c, &mut router, press(LAYER1_KEY));
    assert_eq!(c.mode(), Mode::Layer1);
    dispatch(&mut c, &mut router, release(LAYER1_KEY));
    assert_eq!(c.mode(), Mode::Normal);

    dispatch(&mut c, &mut router, press(LAYER2_KEY));
    assert_eq!(c.mode(), Mode::Layer2);
    dispatch(&mut c, &mut router, release(LAYER2_KEY));
    assert_eq!(c.mode(), Mode::Normal);
}

#[test]
fn test_dispatch_push_to_talk_on_layer() {
    let mut c = controller();
    let mut router = KeyRouter::new();

    dispatch(&mut c, &mut router, press(LAYER2_KEY));
    dispatch(&mut c, &mut router, press(PUSH_TO_TALK));
    assert_eq!(c.mode(), Mode::PushToTalk);
    assert_eq!(c.previous_mode(), Mode::Layer2);

    dispatch(&mut c, &mut router, release(PUSH_TO_TALK));
    assert_eq!(c.mode(), Mode::Layer2);
}

#[test]
fn test_dispatch_reset_macro_on_layer2() {
    let mut c = controller();
    let mut router = KeyRouter::new();

    dispatch(&mut c, &mut router, press(SWITCH_LANG));
    assert_eq!(c.mode(), Mode::Korean);

    dispatch(&mut c, &mut router, press(LAYER2_KEY));
    let (outcome, steps) = dispatch(&mut c, &mut router, press(RESET));
    assert_eq!(
        outcome,
        KeyOutcome::Macro {
            id: MacroId::ResetIndicators,
            pressed: true
        }
    );
    assert!(steps.is_empty());
    assert_eq!(c.mode(), Mode::Normal);
}

#[test]
fn test_dispatch_lighting_key_reaches_driver() {
    let mut c = controller();
    let mut router = KeyRouter::new();
    let hue = c.driver().settings().hsv.hue;

    dispatch(&mut c, &mut router, press(LAYER2_KEY));
    dispatch(&mut c, &mut router, KeyEvent::press(1, 3));
    assert_eq!(c.driver().settings().hsv.hue, hue.wrapping_add(HUE_STEP));
    assert_eq!(c.mode(), Mode::Layer2);
}

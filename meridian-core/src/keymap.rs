//! Keymap of the Meridian (5 x 15 matrix, 3 layers)
//!
//! Static data only. [crate::router] resolves key events against it.

use crate::types::{MacroId, RgbAction};

/// HID keyboard usage codes used by this layout
///
/// Values follow the USB HID usage tables (keyboard page 0x07, consumer keys
/// in the QMK-compatible 0xA8.. range).
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyCode {
    A = 0x04,
    B = 0x05,
    C = 0x06,
    D = 0x07,
    E = 0x08,
    F = 0x09,
    G = 0x0A,
    H = 0x0B,
    I = 0x0C,
    J = 0x0D,
    K = 0x0E,
    L = 0x0F,
    M = 0x10,
    N = 0x11,
    O = 0x12,
    P = 0x13,
    Q = 0x14,
    R = 0x15,
    S = 0x16,
    T = 0x17,
    U = 0x18,
    V = 0x19,
    W = 0x1A,
    X = 0x1B,
    Y = 0x1C,
    Z = 0x1D,
    Kc1 = 0x1E,
    Kc2 = 0x1F,
    Kc3 = 0x20,
    Kc4 = 0x21,
    Kc5 = 0x22,
    Kc6 = 0x23,
    Kc7 = 0x24,
    Kc8 = 0x25,
    Kc9 = 0x26,
    Kc0 = 0x27,
    Enter = 0x28,
    Escape = 0x29,
    Backspace = 0x2A,
    Tab = 0x2B,
    Space = 0x2C,
    Minus = 0x2D,
    Equal = 0x2E,
    LeftBracket = 0x2F,
    RightBracket = 0x30,
    Backslash = 0x31,
    Semicolon = 0x33,
    Quote = 0x34,
    Grave = 0x35,
    Comma = 0x36,
    Dot = 0x37,
    Slash = 0x38,
    F1 = 0x3A,
    F2 = 0x3B,
    F3 = 0x3C,
    F4 = 0x3D,
    F5 = 0x3E,
    F6 = 0x3F,
    F7 = 0x40,
    F8 = 0x41,
    F9 = 0x42,
    F10 = 0x43,
    F11 = 0x44,
    F12 = 0x45,
    PrintScreen = 0x46,
    Home = 0x4A,
    PageUp = 0x4B,
    End = 0x4D,
    PageDown = 0x4E,
    Right = 0x4F,
    Left = 0x50,
    Down = 0x51,
    Up = 0x52,
    F24 = 0x73,
    KbVolumeUp = 0x80,
    KbVolumeDown = 0x81,
    MediaNextTrack = 0xAB,
    MediaPrevTrack = 0xAC,
    MediaStop = 0xAD,
    MediaPlayPause = 0xAE,
    LCtrl = 0xE0,
    LShift = 0xE1,
    LAlt = 0xE2,
    LGui = 0xE3,
    RCtrl = 0xE4,
    RShift = 0xE5,
    RAlt = 0xE6,
}

impl KeyCode {
    pub const fn usage(self) -> u16 {
        self as u16
    }

    pub const fn is_modifier(self) -> bool {
        self.usage() >= KeyCode::LCtrl.usage()
    }
}

/// What a key position does on one layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyAction {
    /// Dead position
    No,
    /// Fall through to the next lower active layer
    Transparent,
    Key(KeyCode),
    /// Layer active while held
    MomentaryLayer(u8),
    Macro(MacroId),
    Rgb(RgbAction),
}

/// How many matrix rows there are
pub const ROWS: usize = 5;
/// How many matrix columns there are
pub const COLS: usize = 15;
/// How many layers the keymap has
pub const NUM_LAYERS: usize = 3;

pub type Row = [KeyAction; COLS];
pub type Layer = [Row; ROWS];

const NO: KeyAction = KeyAction::No;
const TRNS: KeyAction = KeyAction::Transparent;

const fn k(code: KeyCode) -> KeyAction {
    KeyAction::Key(code)
}

const fn mo(layer: u8) -> KeyAction {
    assert!((layer as usize) < NUM_LAYERS);
    KeyAction::MomentaryLayer(layer)
}

const fn rgb(action: RgbAction) -> KeyAction {
    KeyAction::Rgb(action)
}

const SWITCH_LANG: KeyAction = KeyAction::Macro(MacroId::SwitchLanguage);
const RESET_INDICATORS: KeyAction = KeyAction::Macro(MacroId::ResetIndicators);

use KeyCode::*;
use RgbAction::*;

/// Base layer
#[rustfmt::skip]
pub const LAYER_BASE: Layer = [
    [k(Escape), k(Kc1), k(Kc2), k(Kc3), k(Kc4), k(Kc5), k(Kc6), k(Kc7), k(Kc8), k(Kc9), k(Kc0), k(Minus), k(Equal), k(Backspace), NO],
    [k(Tab), k(Q), k(W), k(E), k(R), k(T), k(Y), k(U), k(I), k(O), k(P), k(LeftBracket), k(RightBracket), k(Backslash), NO],
    [mo(1), k(A), k(S), k(D), k(F), k(G), k(H), k(J), k(K), k(L), k(Semicolon), k(Quote), k(Enter), NO, NO],
    [k(LShift), k(Z), k(X), k(C), k(V), k(B), k(B), k(N), k(M), k(Comma), k(Dot), k(Slash), k(RShift), mo(2), NO],
    [k(LCtrl), k(LAlt), k(LGui), k(Space), k(Space), k(RAlt), k(F24), SWITCH_LANG, k(RCtrl), NO, NO, NO, NO, NO, NO],
];

/// Function keys and arrows, held on the caps position
#[rustfmt::skip]
pub const LAYER_NAVIGATION: Layer = [
    [k(Grave), k(F1), k(F2), k(F3), k(F4), k(F5), k(F6), k(F7), k(F8), k(F9), k(F10), k(F11), k(F12), k(Backspace), NO],
    [TRNS, k(Home), k(Up), k(End), k(PageUp), TRNS, TRNS, TRNS, k(Up), TRNS, TRNS, TRNS, TRNS, TRNS, NO],
    [TRNS, k(Left), k(Down), k(Right), k(PageDown), TRNS, TRNS, k(Left), k(Down), k(Right), TRNS, TRNS, TRNS, NO, NO],
    [TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, k(PrintScreen), NO],
    [TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, NO, NO, NO, NO, NO, NO],
];

/// Lighting, media and the indicator reset, held on the right of right shift
#[rustfmt::skip]
pub const LAYER_LIGHTING: Layer = [
    [TRNS, rgb(ModeBreathing), rgb(ModeRainbow), rgb(ModeSwirl), TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, RESET_INDICATORS, NO],
    [TRNS, rgb(HueDown), rgb(ValUp), rgb(HueUp), TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, NO],
    [TRNS, rgb(SatDown), rgb(ValDown), rgb(SatUp), TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, k(KbVolumeDown), k(KbVolumeUp), k(MediaPlayPause), NO, NO],
    [TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, k(MediaPrevTrack), k(MediaNextTrack), k(MediaStop), TRNS, NO],
    [TRNS, TRNS, TRNS, rgb(ModeStep), rgb(Toggle), TRNS, TRNS, TRNS, TRNS, NO, NO, NO, NO, NO, NO],
];

pub const KEYMAP: [Layer; NUM_LAYERS] = [LAYER_BASE, LAYER_NAVIGATION, LAYER_LIGHTING];

/// Action at one position on one layer, `No` outside the keymap
pub fn action_at(layer: usize, row: usize, col: usize) -> KeyAction {
    KEYMAP
        .get(layer)
        .and_then(|l| l.get(row))
        .and_then(|r| r.get(col))
        .copied()
        .unwrap_or(KeyAction::No)
}

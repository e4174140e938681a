//! Meridian Core - Platform-agnostic keymap, indicator logic and traits
//!
//! This crate contains NO hardware dependencies.
//! Hardware is reached only through [SmartLedWriter] and [LightingDriver].

#![no_std]

pub mod controller;
pub mod keymap;
pub mod lighting;
pub mod logic;
pub mod router;
pub mod traits;
pub mod types;

// Re-exports for convenient access
pub use controller::{IndicatorController, MacroStep};
pub use keymap::{KeyAction, KeyCode};
pub use lighting::{LightSettings, RgbLight};
pub use logic::hsv_to_rgb;
pub use router::{KeyOutcome, KeyRouter, LayerState, dispatch};
pub use traits::{LedError, LightingDriver, SmartLedWriter};
pub use types::{AnimationMode, HighestLayer, Hsv, KeyEvent, MacroId, Mode, RgbAction};

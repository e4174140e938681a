// Library root: reusable firmware modules
// No standard library (embedded system)
#![no_std]

// Modules
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports from meridian-core
pub use meridian_core::{
    IndicatorController, KeyEvent, KeyOutcome, KeyRouter, LedError, MacroStep, Mode, RgbLight,
    SmartLedWriter, dispatch,
};

// Embassy channel types
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

use crate::config::KEY_EVENT_CHANNEL_SIZE;

/// Capacity of the macro output channel (one language switch is 4 steps)
pub const MACRO_OUTPUT_CHANNEL_SIZE: usize = 8;

// ============================================================================
// Channels shared with the keyboard framework
// ============================================================================
//
// The matrix scanner pushes key transitions into KEY_EVENTS, the indicator
// task drains them once per tick. Host keys typed by macros come back out
// through MACRO_OUTPUT for the HID reporter.

/// Key transitions from the matrix scanner to the indicator task
pub static KEY_EVENTS: KeyEventChannel = Channel::new();

/// Host key steps from macros to the HID reporter
pub static MACRO_OUTPUT: MacroOutputChannel = Channel::new();

// ============================================================================
// Type aliases for channel types
// ============================================================================
//
// Instead of:  Receiver<'static, CriticalSectionRawMutex, KeyEvent, 16>
// Use:         KeyEventReceiver

/// Channel for key events (matrix scanner -> indicator task)
pub type KeyEventChannel = Channel<CriticalSectionRawMutex, KeyEvent, KEY_EVENT_CHANNEL_SIZE>;

/// Sender for key events, handed to the matrix scanner
pub type KeyEventSender = Sender<'static, CriticalSectionRawMutex, KeyEvent, KEY_EVENT_CHANNEL_SIZE>;

/// Receiver for key events, owned by the indicator task
pub type KeyEventReceiver =
    Receiver<'static, CriticalSectionRawMutex, KeyEvent, KEY_EVENT_CHANNEL_SIZE>;

/// Channel for macro host keys (indicator task -> HID reporter)
pub type MacroOutputChannel =
    Channel<CriticalSectionRawMutex, MacroStep, MACRO_OUTPUT_CHANNEL_SIZE>;

/// Sender for macro host keys, owned by the indicator task
pub type MacroOutputSender =
    Sender<'static, CriticalSectionRawMutex, MacroStep, MACRO_OUTPUT_CHANNEL_SIZE>;

/// Receiver for macro host keys, handed to the HID reporter
pub type MacroOutputReceiver =
    Receiver<'static, CriticalSectionRawMutex, MacroStep, MACRO_OUTPUT_CHANNEL_SIZE>;

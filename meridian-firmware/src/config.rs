// Project configuration: constants and hardware assignments
#![allow(dead_code)]

// ============================================================================
// LED configuration
// ============================================================================

/// GPIO pin driving the indicator LED chain (WS2812/Neopixel)
pub const LED_GPIO_PIN: u8 = 8;

/// RMT clock frequency in MHz
/// 80 MHz is the right base for WS2812 timing
pub const RMT_CLOCK_MHZ: u32 = 80;

/// Number of indicator LEDs in the chain
pub const LED_COUNT: usize = meridian_core::controller::INDICATOR_SLOTS;

/// RMT pulse buffer size: 24 bits per LED plus the reset code
pub const LED_BUFFER_SIZE: usize = LED_COUNT * 24 + 1;

// ============================================================================
// Tick configuration
// ============================================================================

/// Length of one controller tick in microseconds
///
/// All indicator timing is counted in ticks: at 1 ms a hue step is ~5 s,
/// the Canadian flag stays ~3 s and the push-to-talk blink moves every ~0.5 s.
pub const TICK_INTERVAL_MICROS: u64 = 1_000;

/// Ticks between two "still alive" log lines
pub const HEARTBEAT_TICKS: u32 = 60_000;

// ============================================================================
// Key event channel
// ============================================================================

/// Capacity of the channel the matrix scanner feeds key events into
/// A few events per tick is plenty, the indicator task drains it every tick
pub const KEY_EVENT_CHANNEL_SIZE: usize = 16;

/// Maximum key events handled within a single tick
pub const MAX_EVENTS_PER_TICK: usize = KEY_EVENT_CHANNEL_SIZE;

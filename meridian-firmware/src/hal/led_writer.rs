// SmartLED writer for the indicator chain
//
// Implements the core SmartLedWriter trait on top of the ESP32 RMT
// peripheral. Everything above this file is hardware-free.

use esp_hal::Blocking;
use esp_hal::rmt::Rmt;
use esp_hal::time::Rate;
use esp_hal_smartled::SmartLedsAdapter;
use meridian_core::{LedError, SmartLedWriter};
use rgb::RGB8;
use smart_leds_trait::SmartLedsWrite;

use crate::config::LED_BUFFER_SIZE;

/// Real hardware LED writer
///
/// Drives the WS2812 chain through the RMT peripheral.
///
/// Note: the pulse buffer has to outlive the writer, so it is created in
/// the task and passed in instead of being allocated by the constructor.
pub struct RmtLedWriter<'a> {
    led: SmartLedsAdapter<'a, LED_BUFFER_SIZE>,
}

impl<'a> RmtLedWriter<'a> {
    /// Creates a new RmtLedWriter
    ///
    /// # Parameters
    /// - `gpio8`: GPIO8 peripheral, data line of the LED chain
    /// - `rmt_peripheral`: RMT peripheral
    /// - `rmt_clock_mhz`: RMT clock frequency in MHz (e.g. 80)
    /// - `buffer`: pulse buffer (created with the `smart_led_buffer!` macro)
    pub fn new(
        gpio8: esp_hal::peripherals::GPIO8<'a>,
        rmt_peripheral: esp_hal::peripherals::RMT<'a>,
        rmt_clock_mhz: u32,
        buffer: &'a mut [esp_hal::rmt::PulseCode; LED_BUFFER_SIZE],
    ) -> Result<Self, LedError> {
        let rmt: Rmt<'a, Blocking> = Rmt::new(rmt_peripheral, Rate::from_mhz(rmt_clock_mhz))
            .map_err(|_| LedError::WriteFailed)?;

        let led = SmartLedsAdapter::new(rmt.channel0, gpio8, buffer);

        Ok(Self { led })
    }
}

impl<'a> SmartLedWriter for RmtLedWriter<'a> {
    fn write(&mut self, colors: &[RGB8]) -> Result<(), LedError> {
        self.led
            .write(colors.iter().copied())
            .map_err(|_| LedError::WriteFailed)
    }
}

// No standard library (embedded system)
#![no_std]
// No regular main() entry point (provided by esp_rtos)
#![no_main]
// Forbid mem::forget - dangerous with ESP HAL types holding DMA buffers
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Forbid large stack frames (stack is limited on embedded systems)
#![deny(clippy::large_stack_frames)]

// Embassy async runtime
use defmt::info;
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::timer::timg::TimerGroup;

// Backtrace on panic and defmt output
use {esp_backtrace as _, esp_println as _};

// Project modules and channels
use meridian_indicator::config::{LED_COUNT, LED_GPIO_PIN, TICK_INTERVAL_MICROS};
use meridian_indicator::tasks::indicator_task;
use meridian_indicator::{KEY_EVENTS, MACRO_OUTPUT};

// ESP-IDF app descriptor - required by the bootloader!
// Without it flashing fails with "ESP-IDF App Descriptor missing"
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initializes the hardware, starts the Embassy runtime and spawns the
/// indicator task. After that main() sleeps - all work runs in tasks.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 configuration: CPU at maximum clock (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Initialize the Embassy runtime (timer + software interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    info!(
        "Meridian indicator: {} LEDs on GPIO{}, tick {} us",
        LED_COUNT, LED_GPIO_PIN, TICK_INTERVAL_MICROS
    );

    // Spawn the indicator task
    // KEY_EVENTS is fed by the matrix scanner, MACRO_OUTPUT read by the HID reporter
    spawner
        .spawn(indicator_task(
            peripherals.GPIO8,
            peripherals.RMT,
            KEY_EVENTS.receiver(),
            MACRO_OUTPUT.sender(),
        ))
        .unwrap();

    // Main loop: sleeps (all work runs in tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}

// Indicator Task - runs the indicator controller and drives the LED chain
use defmt::{debug, error, info, warn};
use embassy_time::{Duration, Ticker};
use esp_hal_smartled::smart_led_buffer;

use crate::config::{
    HEARTBEAT_TICKS, LED_COUNT, MAX_EVENTS_PER_TICK, RMT_CLOCK_MHZ, TICK_INTERVAL_MICROS,
};
use crate::hal::RmtLedWriter;
use crate::{
    IndicatorController, KeyEventReceiver, KeyRouter, MacroOutputSender, Mode, RgbLight,
    SmartLedWriter, dispatch,
};

/// Indicator Logic - the tick loop without hardware dependencies
///
/// Every tick:
/// - drains pending key events and routes them through the keymap
/// - runs one controller step (`housekeeping`)
/// - advances the LED animation and flushes the frame if it changed
///
/// # Trait-based abstraction
/// The generic parameter `W: SmartLedWriter` allows:
/// - real hardware (RmtLedWriter) in production code
/// - a mock writer in host tests
///
/// # Parameters
/// - `writer`: LED writer (hardware or mock)
/// - `key_events`: channel receiver fed by the matrix scanner
/// - `macro_output`: channel sender for host keys typed by macros
pub async fn indicator_logic<W: SmartLedWriter>(
    writer: W,
    key_events: KeyEventReceiver,
    macro_output: MacroOutputSender,
) {
    let light: RgbLight<W, LED_COUNT> = RgbLight::new(writer);
    let mut controller = IndicatorController::new(light);
    let mut router = KeyRouter::new();

    controller.pre_init();
    if let Err(e) = controller.driver_mut().flush() {
        error!("Failed to blank LEDs: {}", e);
    }
    controller.post_init();
    info!(
        "Indicator controller up: mode {}, {}",
        controller.mode(),
        controller.driver().settings().hsv
    );

    let mut ticker = Ticker::every(Duration::from_micros(TICK_INTERVAL_MICROS));
    let mut ticks: u32 = 0;
    // Only report the first failure of a streak, not one per tick
    let mut write_failing = false;

    loop {
        // Key events from the framework (non-blocking)
        for _ in 0..MAX_EVENTS_PER_TICK {
            let Ok(event) = key_events.try_receive() else {
                break;
            };
            let before = controller.mode();
            let (outcome, steps) = dispatch(&mut controller, &mut router, event);
            debug!("{} -> {}", event, outcome);

            for step in steps {
                if macro_output.try_send(*step).is_err() {
                    warn!("Macro output full, dropped {}", step);
                }
            }
            log_transition(before, controller.mode());
        }

        let before = controller.mode();
        controller.housekeeping();
        log_transition(before, controller.mode());

        let light = controller.driver_mut();
        light.animate();
        match light.flush() {
            Ok(()) => write_failing = false,
            Err(e) => {
                if !write_failing {
                    error!("Failed to write LEDs: {}", e);
                }
                write_failing = true;
            }
        }

        ticks = ticks.wrapping_add(1);
        if ticks % HEARTBEAT_TICKS == 0 {
            debug!(
                "Tick {}: mode {}, layers {}",
                ticks,
                controller.mode(),
                router.layers().highest()
            );
        }

        // Async delay: hands the CPU back to other tasks
        ticker.next().await;
    }
}

fn log_transition(before: Mode, after: Mode) {
    if before != after {
        info!("Indicator mode: {} -> {}", before, after);
    }
}

/// Indicator Task - Embassy task for parallel execution
///
/// Initializes the RMT hardware and then runs the testable
/// `indicator_logic()` function.
///
/// # Parameters
/// - `gpio8`: GPIO8 peripheral, data line of the LED chain
/// - `rmt_peripheral`: RMT peripheral for precise pulse timing
/// - `key_events`: channel receiver fed by the matrix scanner
/// - `macro_output`: channel sender for host keys typed by macros
#[embassy_executor::task]
pub async fn indicator_task(
    gpio8: esp_hal::peripherals::GPIO8<'static>,
    rmt_peripheral: esp_hal::peripherals::RMT<'static>,
    key_events: KeyEventReceiver,
    macro_output: MacroOutputSender,
) {
    // Pulse buffer for the LED chain
    // The macro allocates memory in the layout RMT expects
    let mut rmt_buffer = smart_led_buffer!(LED_COUNT);

    match RmtLedWriter::new(gpio8, rmt_peripheral, RMT_CLOCK_MHZ, &mut rmt_buffer) {
        Ok(led) => indicator_logic(led, key_events, macro_output).await,
        Err(e) => error!("Failed to initialize RMT: {}", e),
    }
}

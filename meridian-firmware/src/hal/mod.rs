// Hardware Abstraction Layer (HAL) module
//
// Wraps hardware access behind the core traits so the indicator logic
// stays testable on the host.

pub mod led_writer;

pub use led_writer::RmtLedWriter;

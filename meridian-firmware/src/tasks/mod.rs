// Task module: all Embassy tasks
//
// The indicator task owns the controller and the LED chain. Other code talks
// to it only through the channels in the crate root.

pub mod indicator;

// Re-export tasks for easy import
pub use indicator::indicator_task;

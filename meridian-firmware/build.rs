// Build script: runs before compilation
// Configures the linker for the ESP32-C6 firmware

fn main() {
    linker_hints();

    // defmt.x - symbols of defmt's binary log format
    println!("cargo:rustc-link-arg=-Tdefmt.x");

    // linkall.x - ESP32 flash/RAM layout and startup code, must come last
    println!("cargo:rustc-link-arg=-Tlinkall.x");
}

// Registers this build script as the linker's error handler, and prints a
// hint when it is invoked back as "--error-handling-script"
fn linker_hints() {
    let args: Vec<String> = std::env::args().collect();

    if let [_, kind, what, ..] = args.as_slice() {
        if kind == "undefined-symbol" {
            let hint = if what.starts_with("_defmt_") {
                Some("`defmt` symbols missing - is `defmt.x` linked and `esp_println` (defmt-espflash) used?")
            } else if what == "_stack_start" {
                Some("Is the linker script `linkall.x` missing?")
            } else if what.starts_with("esp_rtos_") {
                Some("`esp-rtos` is not started - call `esp_rtos::start` before spawning tasks")
            } else {
                None
            };
            if let Some(hint) = hint {
                eprintln!();
                eprintln!("💡 {hint}");
                eprintln!();
            }
            std::process::exit(0);
        }
        // nothing helpful for "missing-lib" yet
        std::process::exit(1);
    }

    if let Ok(exe) = std::env::current_exe() {
        println!(
            "cargo:rustc-link-arg=--error-handling-script={}",
            exe.display()
        );
    }
}

//! Build script for swingservo-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates servo.toml at compile time
//! - Generates the configuration constants compiled into the firmware

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use report::format_error_lines;
use swingservo_core::config::ControllerConfig;

#[path = "build/report.rs"]
mod report;

/// Baud rate used when `[serial]` is omitted
const DEFAULT_BAUDRATE: u32 = 115_200;

/// Layout of servo.toml
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ServoToml {
    servo: ControllerConfig,
    serial: SerialSection,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SerialSection {
    baudrate: u32,
}

impl Default for SerialSection {
    fn default() -> Self {
        Self {
            baudrate: DEFAULT_BAUDRATE,
        }
    }
}

fn main() {
    setup_linker();
    let config = load_config();
    generate_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=build/report.rs");
}

/// Read and validate servo.toml
fn load_config() -> ServoToml {
    println!("cargo:rerun-if-changed=servo.toml");

    let config_path = Path::new("servo.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: servo.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a servo.toml configuration file.          ║\n\
            ║  Please create one in the swingservo-firmware directory.         ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read servo.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: ServoToml = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid servo.toml                                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    let mut errors = Vec::new();
    if let Err(e) = config.servo.validate() {
        errors.push(format!("[servo] {:?}", e));
    }
    if config.serial.baudrate == 0 {
        errors.push("[serial] baudrate must be greater than 0".to_string());
    }
    if !(0..=180).contains(&config.servo.center_deg) {
        println!(
            "cargo:warning=center_deg {} is outside 0-180, duty will be extrapolated",
            config.servo.center_deg
        );
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: servo.toml validation failed                             ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=servo.toml validated successfully");
    config
}

/// Write servo_config.rs with the validated values
fn generate_config(config: &ServoToml) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let servo = &config.servo;

    let source = format!(
        "/// Configuration compiled from servo.toml\n\
        pub const CONTROLLER_CONFIG: ControllerConfig = ControllerConfig {{\n    \
            center_deg: {center},\n    \
            calibration: ServoCalibration {{\n        \
                pwm_frequency_hz: {freq},\n        \
                min_duty: {min_duty},\n        \
                max_duty: {max_duty},\n    \
            }},\n    \
            swing: SwingConfig {{\n        \
                low_deg: {low},\n        \
                high_deg: {high},\n        \
                duration_ms: {duration},\n        \
                steps: {steps},\n    \
            }},\n    \
            timing: LoopTiming {{\n        \
                settle_ms: {settle},\n        \
                idle_ms: {idle},\n        \
                continuous_pause_ms: {pause},\n    \
            }},\n\
        }};\n\n\
        /// UART baud rate compiled from servo.toml\n\
        pub const SERIAL_BAUDRATE: u32 = {baud};\n",
        center = servo.center_deg,
        freq = servo.calibration.pwm_frequency_hz,
        min_duty = servo.calibration.min_duty,
        max_duty = servo.calibration.max_duty,
        low = servo.swing.low_deg,
        high = servo.swing.high_deg,
        duration = servo.swing.duration_ms,
        steps = servo.swing.steps,
        settle = servo.timing.settle_ms,
        idle = servo.timing.idle_ms,
        pause = servo.timing.continuous_pause_ms,
        baud = config.serial.baudrate,
    );

    fs::write(out_dir.join("servo_config.rs"), source).unwrap();
}

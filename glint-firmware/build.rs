//! Build script for glint-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates panel.toml and turns it into Rust constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    let config = validate_config();
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
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate panel.toml at compile time
fn validate_config() -> toml::Value {
    println!("cargo:rerun-if-changed=panel.toml");

    let config_path = Path::new("panel.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: panel.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a panel.toml configuration file.          ║\n\
            ║  Please create one in the glint-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read panel.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in panel.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_display(&config, &mut errors);
    validate_touch(&config, &mut errors);
    validate_ui(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid values in panel.toml                             ║\n\
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

    println!("cargo:warning=panel.toml validated successfully");
    config
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn int(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

/// Required positive integer
fn require_positive(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) {
    match int(config, section, key) {
        None => errors.push(format!("[{}] {} is missing or not an integer", section, key)),
        Some(v) if v <= 0 => errors.push(format!("[{}] {} must be > 0 (got {})", section, key, v)),
        Some(_) => {}
    }
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    if config.get("display").is_none() {
        errors.push("Missing [display] section".to_string());
        return;
    }
    for key in ["width", "height", "max_transfer", "spi_frequency_hz"] {
        require_positive(config, "display", key, errors);
    }
    for key in ["width", "height"] {
        if let Some(v) = int(config, "display", key) {
            if v > i64::from(u16::MAX) {
                errors.push(format!("[display] {} must fit in 16 bits (got {})", key, v));
            }
        }
    }
    // 0 selects the plain on/off backlight
    match int(config, "display", "backlight_pwm_hz") {
        None => errors.push("[display] backlight_pwm_hz is missing or not an integer".to_string()),
        Some(v) if !(0..=i64::from(u32::MAX)).contains(&v) => {
            errors.push(format!("[display] backlight_pwm_hz out of range (got {})", v))
        }
        Some(_) => {}
    }
}

fn validate_touch(config: &toml::Value, errors: &mut Vec<String>) {
    if config.get("touch").is_none() {
        errors.push("Missing [touch] section".to_string());
        return;
    }
    for key in ["x_min", "x_max", "y_min", "y_max"] {
        if int(config, "touch", key).is_none() {
            errors.push(format!("[touch] {} is missing or not an integer", key));
        }
    }
    for (min, max) in [("x_min", "x_max"), ("y_min", "y_max")] {
        if let (Some(lo), Some(hi)) = (int(config, "touch", min), int(config, "touch", max)) {
            if lo >= hi {
                errors.push(format!("[touch] {} ({}) must be below {} ({})", min, lo, max, hi));
            }
        }
    }
    let swap = config.get("touch").and_then(|t| t.get("swap_axes"));
    if swap.is_some_and(|v| v.as_bool().is_none()) {
        errors.push("[touch] swap_axes must be true or false".to_string());
    }
    require_positive(config, "touch", "spi_frequency_hz", errors);
}

fn validate_ui(config: &toml::Value, errors: &mut Vec<String>) {
    if config.get("ui").is_none() {
        errors.push("Missing [ui] section".to_string());
        return;
    }
    require_positive(config, "ui", "frame_period_ms", errors);
    require_positive(config, "ui", "stop_timeout_ms", errors);
}

/// Write `panel_config.rs` into OUT_DIR
fn generate_config(config: &toml::Value) {
    let get = |section: &str, key: &str| int(config, section, key).unwrap_or_default();
    let swap_axes = config
        .get("touch")
        .and_then(|t| t.get("swap_axes"))
        .and_then(toml::Value::as_bool)
        .unwrap_or(false);

    let source = format!(
        "// Generated from panel.toml by build.rs\n\
         \n\
         pub const PANEL: PanelConfig = PanelConfig {{\n\
         \x20   width: {width},\n\
         \x20   height: {height},\n\
         \x20   max_transfer: {max_transfer},\n\
         \x20   spi_frequency_hz: {spi},\n\
         \x20   touch: TouchCalibration::new({x_min}, {x_max}, {y_min}, {y_max}, {swap_axes}),\n\
         }};\n\
         \n\
         pub const BACKLIGHT_PWM_HZ: u32 = {backlight};\n\
         pub const TOUCH_SPI_FREQUENCY_HZ: u32 = {touch_spi};\n\
         pub const FRAME_PERIOD_MS: u64 = {frame};\n\
         pub const STOP_TIMEOUT_MS: u64 = {stop};\n",
        width = get("display", "width"),
        height = get("display", "height"),
        max_transfer = get("display", "max_transfer"),
        spi = get("display", "spi_frequency_hz"),
        backlight = get("display", "backlight_pwm_hz"),
        x_min = get("touch", "x_min"),
        x_max = get("touch", "x_max"),
        y_min = get("touch", "y_min"),
        y_max = get("touch", "y_max"),
        swap_axes = swap_axes,
        touch_spi = get("touch", "spi_frequency_hz"),
        frame = get("ui", "frame_period_ms"),
        stop = get("ui", "stop_timeout_ms"),
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("panel_config.rs"), source).unwrap();
}

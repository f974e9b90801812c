//! Glint - Media Panel Firmware
//!
//! Drives a 2.8" ILI9341 panel with an ADS7846 resistive touch layer from
//! an RP2350. Two tasks share nothing but the touch bus in `channels`:
//!
//! - render: owns the panel, redraws and pushes a full frame each period
//! - touch: owns the touch controller, classifies presses, fires regions
//!
//! # Wiring
//!
//! | Signal      | Pin  | Signal      | Pin  |
//! |-------------|------|-------------|------|
//! | LCD SCK     | GP10 | TP SCK      | GP18 |
//! | LCD MOSI    | GP11 | TP MOSI     | GP19 |
//! | LCD CS      | GP9  | TP MISO     | GP16 |
//! | LCD DC      | GP8  | TP CS       | GP17 |
//! | LCD RST     | GP15 | TP IRQ      | GP20 |
//! | LCD BL PWM  | GP13 |             |      |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::{self, Spi};
use embassy_time::Delay;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_hal_bus::spi::ExclusiveDevice;
use glint_core::touch::CoordinateMapper;
use glint_display::Surface;
use glint_drivers::touch::{discover, Ads7846, TouchSampler};
use glint_drivers::DisplayDriver;
use glint_hal::spi::{Phase, Polarity};
use glint_hal::{SpiConfig, SpiTransport};
use static_cell::ConstStaticCell;
use {defmt_rtt as _, panic_probe as _};

mod backlight;
mod channels;
mod config;
mod tasks;
mod ui;

use crate::channels::TOUCH;
use crate::config::{FRAME_BYTES, PANEL, PIXELS, TOUCH_SPI_FREQUENCY_HZ};
use crate::tasks::touch::TouchDevice;
use crate::ui::TouchLog;

// Framebuffer and encode buffer live in .bss, never on the stack
static PIXEL_BUF: ConstStaticCell<[Rgb888; PIXELS]> =
    ConstStaticCell::new([Rgb888::new(0, 0, 0); PIXELS]);
static ENCODE_BUF: ConstStaticCell<[u8; FRAME_BYTES]> = ConstStaticCell::new([0; FRAME_BYTES]);

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Glint firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Display: SPI1, TX only
    let panel_cfg = SpiConfig {
        frequency: PANEL.spi_frequency_hz,
        max_transfer: PANEL.max_transfer,
        ..SpiConfig::default()
    };
    let panel_spi = Spi::new_txonly(
        p.SPI1,
        p.PIN_10,
        p.PIN_11,
        p.DMA_CH0,
        rp_spi_config(&panel_cfg),
    );
    let panel_dev = match ExclusiveDevice::new(panel_spi, Output::new(p.PIN_9, Level::High), Delay) {
        Ok(dev) => dev,
        Err(never) => match never {},
    };
    let transport = SpiTransport::with_max_transfer(
        panel_dev,
        Output::new(p.PIN_8, Level::Low),
        Output::new(p.PIN_15, Level::High),
        panel_cfg.max_transfer,
    );
    let backlight = backlight::setup(p.PWM_SLICE6, p.PIN_13);

    let panel = DisplayDriver::new(
        transport,
        backlight,
        Delay,
        ENCODE_BUF.take(),
        PANEL.width,
        PANEL.height,
    );
    let surface = match Surface::new(PIXEL_BUF.take(), PANEL.width, PANEL.height) {
        Ok(surface) => surface,
        Err(e) => {
            error!("Framebuffer does not fit the panel: {:?}", Debug2Format(&e));
            return;
        }
    };
    info!(
        "Display {}x{} at {} Hz, {} byte transfers",
        PANEL.width, PANEL.height, panel_cfg.frequency, panel_cfg.max_transfer
    );

    // Touch: SPI0, full duplex
    let touch_cfg = SpiConfig {
        frequency: TOUCH_SPI_FREQUENCY_HZ,
        ..SpiConfig::default()
    };
    let touch_spi = Spi::new(
        p.SPI0,
        p.PIN_18,
        p.PIN_19,
        p.PIN_16,
        p.DMA_CH1,
        p.DMA_CH2,
        rp_spi_config(&touch_cfg),
    );
    let touch_dev = match ExclusiveDevice::new(touch_spi, Output::new(p.PIN_17, Level::High), Delay) {
        Ok(dev) => dev,
        Err(never) => match never {},
    };
    let ads = Ads7846::new(touch_dev, Input::new(p.PIN_20, Pull::Up), Delay);

    match setup_touch(ads).await {
        Some(sampler) => match spawner.spawn(tasks::touch_task(sampler)) {
            Ok(()) => info!("Touch task spawned"),
            Err(_) => error!("Failed to spawn touch task"),
        },
        None => warn!("Running without touch"),
    }

    if spawner.spawn(tasks::render_task(panel, surface)).is_err() {
        error!("Failed to spawn render task");
        return;
    }
    info!("All tasks spawned, firmware running");
}

/// Probe the controller and build the sampler; `None` disables touch
async fn setup_touch(ads: TouchDevice) -> Option<TouchSampler<TouchDevice, TouchLog>> {
    let mut ads = match discover([ads]) {
        Ok(dev) => dev,
        Err(e) => {
            warn!("Touch discovery failed: {:?}", Debug2Format(&e));
            return None;
        }
    };
    if let Err(e) = ads.probe().await {
        warn!("Touch controller not responding: {:?}", Debug2Format(&e));
        return None;
    }

    let mapper = match CoordinateMapper::new(PANEL.touch, PANEL.width, PANEL.height) {
        Ok(mapper) => mapper,
        Err(e) => {
            warn!("Bad touch calibration: {:?}", Debug2Format(&e));
            return None;
        }
    };

    if let Err(e) = ui::register_buttons(&TOUCH.regions) {
        warn!("Button registration failed: {:?}", Debug2Format(&e));
    }

    Some(TouchSampler::new(ads, mapper, TouchLog))
}

/// Translate the board-agnostic SPI config into embassy-rp's
fn rp_spi_config(cfg: &SpiConfig) -> spi::Config {
    let (polarity, phase): (Polarity, Phase) = cfg.mode.into();
    let mut config = spi::Config::default();
    config.frequency = cfg.frequency;
    config.polarity = match polarity {
        Polarity::IdleLow => spi::Polarity::IdleLow,
        Polarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    config.phase = match phase {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    config
}

//! Render task
//!
//! Sole owner of the display. Every frame period it applies queued UI
//! commands, reads the touch snapshot, redraws the surface and pushes it.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI1;
use embassy_rp::spi::{Async, Spi};
use embassy_time::{Delay, Duration, Ticker, Timer};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_hal_bus::spi::ExclusiveDevice;
use glint_display::{FrameSink, Surface};
use glint_drivers::DisplayDriver;
use glint_hal::SpiTransport;

use crate::backlight::Backlight;
use crate::channels::{TOUCH, UI_COMMANDS};
use crate::config::{FRAME_BYTES, FRAME_PERIOD_MS, PIXELS, STOP_TIMEOUT_MS};
use crate::ui::{self, UiState};

pub type PanelSpi = ExclusiveDevice<Spi<'static, SPI1, Async>, Output<'static>, Delay>;
pub type PanelTransport = SpiTransport<PanelSpi, Output<'static>, Output<'static>>;
pub type Panel = DisplayDriver<
    PanelTransport,
    Backlight,
    Delay,
    &'static mut [u8; FRAME_BYTES],
>;
pub type FrameSurface = Surface<&'static mut [Rgb888; PIXELS]>;

/// Initialize attempts before giving up on the display
const INIT_ATTEMPTS: u8 = 5;

/// Consecutive failed pushes before the display is given up
const MAX_PUSH_FAILURES: u8 = 10;

/// Render task - owns the panel and the framebuffer
#[embassy_executor::task]
pub async fn render_task(mut panel: Panel, mut surface: FrameSurface) {
    info!("Render task started");
    run(&mut panel, &mut surface).await;

    // Display is gone; touch keeps running with nothing to show it
    if let Err(e) = panel.close() {
        warn!("Display close failed: {:?}", Debug2Format(&e));
    }
    if TOUCH
        .stop(Duration::from_millis(STOP_TIMEOUT_MS))
        .await
        .is_err()
    {
        warn!("Touch sampler did not acknowledge stop");
    }
    info!("Render task finished");
}

async fn bring_up<S: FrameSink>(sink: &mut S) -> bool {
    for attempt in 1..=INIT_ATTEMPTS {
        match sink.initialize().await {
            Ok(()) => {
                let (w, h) = sink.size();
                info!("Display ready: {}x{}", w, h);
                return true;
            }
            Err(e) => {
                warn!(
                    "Display init attempt {}/{} failed: {:?}",
                    attempt,
                    INIT_ATTEMPTS,
                    Debug2Format(&e)
                );
                Timer::after_millis(500).await;
            }
        }
    }
    error!("Display unavailable, giving up");
    false
}

async fn run<S: FrameSink>(sink: &mut S, surface: &mut FrameSurface) {
    if !bring_up(sink).await {
        return;
    }

    let mut state = UiState::default();
    let mut failures: u8 = 0;
    let mut ticker = Ticker::every(Duration::from_millis(FRAME_PERIOD_MS));

    loop {
        while let Ok(command) = UI_COMMANDS.try_receive() {
            info!("UI command: {}", command);
            state.apply(command);
        }
        while let Ok(event) = TOUCH.events.try_receive() {
            trace!("Touch event: {:?}", Debug2Format(&event));
        }

        // Drawing into RAM cannot fail
        ui::draw(surface, &state, TOUCH.state.snapshot()).ok();

        match sink.push_frame(&*surface).await {
            Ok(()) => failures = 0,
            Err(e) => {
                failures += 1;
                warn!("Frame push failed: {:?}", Debug2Format(&e));
                if failures >= MAX_PUSH_FAILURES {
                    error!("Display not responding");
                    return;
                }
            }
        }

        ticker.next().await;
    }
}

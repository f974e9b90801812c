//! Touch sampling task
//!
//! Runs the sampler until the source fails. A failed source only
//! disables touch; the render task keeps going.

use defmt::*;
use embassy_rp::gpio::{Input, Output};
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Async, Spi};
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use glint_drivers::touch::{Ads7846, TouchSampler};

use crate::channels::TOUCH;
use crate::ui::TouchLog;

pub type TouchSpi = ExclusiveDevice<Spi<'static, SPI0, Async>, Output<'static>, Delay>;
pub type TouchDevice = Ads7846<TouchSpi, Input<'static>, Delay>;

/// Touch task - owns the ADS7846 and the classifier
#[embassy_executor::task]
pub async fn touch_task(mut sampler: TouchSampler<TouchDevice, TouchLog>) {
    info!("Touch task started");

    match sampler.run(&TOUCH).await {
        Ok(()) => info!("Touch sampler stopped"),
        Err(e) => warn!("Touch disabled: {:?}", Debug2Format(&e)),
    }
}

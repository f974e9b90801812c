//! Backlight bring-up on GP13
//!
//! GP13 is PWM slice 6 channel B. When `backlight_pwm_hz` cannot be
//! reached from the system clock the pin is driven as a plain switch.

use defmt::*;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{PIN_13, PWM_SLICE6};
use embassy_rp::pwm::{Config as PwmConfig, Pwm, PwmOutput};
use embassy_rp::Peri;
use glint_hal::backlight::pwm_top;
use glint_hal::{PanelBacklight, PwmBacklight, SwitchedBacklight};

use crate::config::BACKLIGHT_PWM_HZ;

pub type Backlight = PanelBacklight<PwmOutput<'static>, Output<'static>>;

/// Dimmable when PWM comes up, switched otherwise; starts dark
pub fn setup(slice: Peri<'static, PWM_SLICE6>, pin: Peri<'static, PIN_13>) -> Backlight {
    let Some(top) = pwm_top(clk_sys_freq(), BACKLIGHT_PWM_HZ) else {
        warn!(
            "Backlight PWM at {} Hz not available, using on/off",
            BACKLIGHT_PWM_HZ
        );
        return PanelBacklight::Switched(SwitchedBacklight::new(Output::new(pin, Level::Low)));
    };

    let mut config = PwmConfig::default();
    config.top = top;
    config.compare_b = 0;

    match Pwm::new_output_b(slice, pin, config).split() {
        (_, Some(output)) => {
            info!("Backlight PWM at {} Hz, top {}", BACKLIGHT_PWM_HZ, top);
            PanelBacklight::Dimmable(PwmBacklight::new(output))
        }
        (_, None) => {
            error!("Backlight PWM output missing, backlight left uncontrolled");
            PanelBacklight::Fixed
        }
    }
}

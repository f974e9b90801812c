//! Backlight control
//!
//! Panels wire the LED line either to a PWM-capable pin or to a plain
//! GPIO. Both present the same [`Backlight`] surface; the driver asks
//! [`Backlight::supports_brightness`] once at construction.

use embedded_hal::digital::{Error as _, OutputPin};
use embedded_hal::pwm::{Error as _, SetDutyCycle};

use crate::transport::TransportError;

/// Backlight output
pub trait Backlight {
    /// Whether intermediate brightness levels are honoured
    fn supports_brightness(&self) -> bool;

    /// Switch the backlight; `brightness` is only used when on
    fn apply(&mut self, on: bool, brightness: f32) -> Result<(), TransportError>;
}

/// Clamp a requested level to `[0.0, 1.0]`; NaN reads as off
pub fn clamp_brightness(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}

/// PWM-dimmed backlight
pub struct PwmBacklight<P> {
    pwm: P,
}

impl<P: SetDutyCycle> PwmBacklight<P> {
    pub fn new(pwm: P) -> Self {
        Self { pwm }
    }

    /// Duty cycle for a brightness level
    pub fn duty_for(&self, brightness: f32) -> u16 {
        let max = self.pwm.max_duty_cycle();
        (clamp_brightness(brightness) * f32::from(max)) as u16
    }

    pub fn release(self) -> P {
        self.pwm
    }
}

impl<P: SetDutyCycle> Backlight for PwmBacklight<P> {
    fn supports_brightness(&self) -> bool {
        true
    }

    fn apply(&mut self, on: bool, brightness: f32) -> Result<(), TransportError> {
        let result = if on {
            let duty = self.duty_for(brightness);
            self.pwm.set_duty_cycle(duty)
        } else {
            self.pwm.set_duty_cycle_fully_off()
        };
        result.map_err(|e| TransportError::Pwm(e.kind()))
    }
}

/// On/off backlight on a plain GPIO
///
/// Any non-zero brightness lights the panel fully.
pub struct SwitchedBacklight<P> {
    pin: P,
}

impl<P: OutputPin> SwitchedBacklight<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> Backlight for SwitchedBacklight<P> {
    fn supports_brightness(&self) -> bool {
        false
    }

    fn apply(&mut self, on: bool, brightness: f32) -> Result<(), TransportError> {
        let lit = on && clamp_brightness(brightness) > 0.0;
        let result = if lit {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|e| TransportError::Pin(e.kind()))
    }
}

/// Counter wrap value for a PWM at `target_hz` with an undivided clock
///
/// `None` when the frequency cannot be reached with a 16-bit counter.
pub fn pwm_top(clock_hz: u32, target_hz: u32) -> Option<u16> {
    if target_hz == 0 {
        return None;
    }
    let period = clock_hz / target_hz;
    if period < 2 {
        return None;
    }
    u16::try_from(period - 1).ok()
}

/// Backlight chosen at boot from what the board could set up
pub enum PanelBacklight<P, G> {
    Dimmable(PwmBacklight<P>),
    Switched(SwitchedBacklight<G>),
    /// LED tied to the supply, nothing to drive
    Fixed,
}

impl<P: SetDutyCycle, G: OutputPin> Backlight for PanelBacklight<P, G> {
    fn supports_brightness(&self) -> bool {
        match self {
            Self::Dimmable(bl) => bl.supports_brightness(),
            Self::Switched(bl) => bl.supports_brightness(),
            Self::Fixed => false,
        }
    }

    fn apply(&mut self, on: bool, brightness: f32) -> Result<(), TransportError> {
        match self {
            Self::Dimmable(bl) => bl.apply(on, brightness),
            Self::Switched(bl) => bl.apply(on, brightness),
            Self::Fixed => Ok(()),
        }
    }
}

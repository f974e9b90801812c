//! Glint Hardware Abstraction Layer
//!
//! This crate defines the hardware seams the panel drivers are written
//! against, plus adapters that implement them on top of `embedded-hal`
//! 1.0 peripherals. Chip HALs (embassy-rp, linux-embedded-hal, ...) only
//! have to provide `embedded-hal` types.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Panel driver (glint-drivers)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  glint-hal (this crate - seams)         │
//! │  Transport, Backlight                   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  embedded-hal / embedded-hal-async      │
//! │  SpiDevice, OutputPin, SetDutyCycle     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`transport::Transport`] - Command/data framed byte stream plus control lines
//! - [`backlight::Backlight`] - Backlight with an explicit brightness capability

#![no_std]
#![deny(unsafe_code)]
#![allow(async_fn_in_trait)]

pub mod backlight;
pub mod spi;
pub mod transport;

// Re-export key traits at crate root for convenience
pub use backlight::{Backlight, PanelBacklight, PwmBacklight, SwitchedBacklight};
pub use spi::SpiConfig;
pub use transport::{SpiTransport, Transport, TransportError};

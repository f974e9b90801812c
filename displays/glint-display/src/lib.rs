//! Display abstraction for Glint panels
//!
//! This crate provides:
//! - [`Surface`], an RGB888 framebuffer the UI draws into with
//!   `embedded-graphics`
//! - [`PixelSurface`], the read-only view a driver consumes during a push
//! - [`FrameSink`], the driver surface used by the UI layer
//! - [`DisplayError`], the error taxonomy surfaced to the UI layer
//!
//! # Ownership
//!
//! The UI owns its surface for the whole program. A push borrows it
//! immutably for the duration of the call and never keeps a reference.

#![no_std]
#![deny(unsafe_code)]
#![allow(async_fn_in_trait)]

pub mod backend;
pub mod error;
pub mod surface;

// Re-export key types
pub use backend::FrameSink;
pub use error::DisplayError;
pub use surface::{PixelSurface, Surface};

pub use embedded_graphics_core::pixelcolor::Rgb888;

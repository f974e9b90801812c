//! Hardware driver implementations
//!
//! This crate provides concrete implementations on top of the seams in
//! glint-hal and the pure logic in glint-core:
//!
//! - ILI9341 protocol engine and whole-frame display driver
//! - Touch sampler task body with shared touch state and regions
//! - ADS7846 / XPT2046 resistive touch event source
//!
//! # Concurrency
//!
//! The display driver belongs to the render loop. The sampler runs on its
//! own task and only ever touches [`touch::TouchShared`], whose state is
//! guarded by a blocking mutex held for a copy, never across I/O.

#![no_std]
#![deny(unsafe_code)]
#![allow(async_fn_in_trait)]

pub mod display;
pub mod touch;

pub use display::{DisplayDriver, Ili9341};
pub use touch::{Ads7846, TouchSampler, TouchShared};

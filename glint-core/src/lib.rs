//! Board-agnostic core logic for Glint panels
//!
//! This crate contains everything above the wire that does not touch
//! hardware:
//!
//! - Panel and touch calibration configuration
//! - Display driver lifecycle state machine
//! - Touch pipeline: sample accumulation, coordinate mapping,
//!   down/move/up classification, named hit regions
//! - Touch device discovery
//! - Input source traits

#![no_std]
#![deny(unsafe_code)]
#![allow(async_fn_in_trait)]

pub mod config;
pub mod state;
pub mod touch;
pub mod traits;

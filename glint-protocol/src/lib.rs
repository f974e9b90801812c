//! Glint panel wire protocol
//!
//! Everything here is pure data and bit manipulation: the ILI9341 command
//! set and power-on table, address-window encoding, the RGB565
//! framebuffer codec with transfer chunking, and the vocabulary of the
//! touch input event stream.
//!
//! # Frame path
//!
//! ```text
//! ┌──────────────┐  encode   ┌─────────────┐  chunks(m)  ┌──────────────┐
//! │ [Rgb888]     │ ────────► │ PackedFrame │ ──────────► │ &[u8] <= m   │
//! │ w*h pixels   │           │ 2*w*h bytes │             │ per transfer │
//! └──────────────┘           └─────────────┘             └──────────────┘
//! ```
//!
//! No hardware is touched in this crate; the engine in `glint-drivers`
//! turns these bytes into bus traffic.

#![no_std]
#![deny(unsafe_code)]

pub mod cmd;
pub mod events;
pub mod init;
pub mod rgb565;
pub mod window;

pub use events::InputEvent;
pub use init::{InitStep, INIT_SEQUENCE};
pub use rgb565::{pack, unpack, CodecError, FrameEncoder, PackedFrame};
pub use window::{AddressWindow, WindowError};

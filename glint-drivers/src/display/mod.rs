//! ILI9341 panel
//!
//! - `ili9341`: protocol engine (framing, reset, init table, windows)
//! - `driver`: lifecycle-checked whole-frame driver on top of it

pub mod driver;
pub mod ili9341;

pub use driver::DisplayDriver;
pub use ili9341::Ili9341;

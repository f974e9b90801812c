//! Touch input
//!
//! - `ads7846`: polled resistive controller as a [`TouchEventSource`]
//! - `sampler`: task body turning raw events into classified touches
//! - `shared`: state, regions and event channel the UI side reads
//!
//! [`TouchEventSource`]: glint_core::traits::TouchEventSource

pub mod ads7846;
pub mod sampler;
pub mod shared;

pub use ads7846::{Ads7846, Ads7846Error};
pub use sampler::{discover, TouchSampler};
pub use shared::{SharedRegions, SharedTouchState, TouchShared};

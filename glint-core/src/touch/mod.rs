//! Touch pipeline
//!
//! ```text
//! InputEvent ─► SampleAccumulator ─► RawTouchSample
//!                                        │
//!                                        ▼
//!               CoordinateMapper ◄── TouchClassifier ─► TouchEvent
//!                                        │                  │
//!                                        ▼                  ▼
//!                                   TouchState      RegionTable hit (on Down)
//! ```
//!
//! All stages are synchronous and allocation-free; the async sampler in
//! `glint-drivers` drives them from an event source.

pub mod classifier;
pub mod discovery;
pub mod handler;
pub mod mapper;
pub mod regions;
pub mod sample;

pub use classifier::TouchClassifier;
pub use discovery::select_device;
pub use handler::TouchHandler;
pub use mapper::CoordinateMapper;
pub use regions::{Region, RegionCallback, RegionError, RegionTable, MAX_REGION_NAME};
pub use sample::{RawTouchSample, SampleAccumulator};

/// Touch subsystem errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError {
    /// No touch input source matched during discovery
    DeviceNotFound,
    /// Input source failed mid-stream
    Io,
    /// Sampler was asked to stop
    Stopped,
    /// Sampler did not acknowledge a stop request in time
    StopTimeout,
}

/// Point in display pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScreenPoint {
    pub x: u16,
    pub y: u16,
}

impl ScreenPoint {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Latest contact snapshot, shared with the render loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchState {
    /// Last mapped position (kept after release)
    pub point: ScreenPoint,
    /// Contact currently active
    pub touching: bool,
}

impl TouchState {
    /// No contact, origin
    pub const IDLE: Self = Self {
        point: ScreenPoint::new(0, 0),
        touching: false,
    };
}

/// Classified touch event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchEvent {
    /// Contact started
    Down(ScreenPoint),
    /// Contact moved to a new pixel
    Move(ScreenPoint),
    /// Contact ended at the last known pixel
    Up(ScreenPoint),
}

impl TouchEvent {
    pub fn point(&self) -> ScreenPoint {
        match *self {
            TouchEvent::Down(p) | TouchEvent::Move(p) | TouchEvent::Up(p) => p,
        }
    }

    /// Route to the matching handler slot
    pub fn dispatch_to<H: TouchHandler + ?Sized>(&self, handler: &mut H) {
        match *self {
            TouchEvent::Down(p) => handler.on_down(p),
            TouchEvent::Move(p) => handler.on_move(p),
            TouchEvent::Up(p) => handler.on_up(p),
        }
    }
}

//! Hardware abstraction traits
//!
//! These traits define the interface between the touch pipeline and
//! hardware-specific input sources.

pub mod touch;

pub use touch::TouchEventSource;

//! Display driver lifecycle state machine

pub mod lifecycle;

pub use lifecycle::{DriverOp, DriverState, InvalidTransition};

//! Display errors

use glint_core::state::{DriverOp, DriverState, InvalidTransition};
use glint_hal::TransportError;
use glint_protocol::{CodecError, WindowError};

/// Errors surfaced by display drivers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus, control line or backlight failure
    Transport(TransportError),
    /// Operation not allowed in the driver's current state
    InvalidState { state: DriverState, op: DriverOp },
    /// Surface dimensions differ from the panel
    SurfaceMismatch,
    /// Encode buffer or surface storage shorter than required
    BufferTooSmall,
    /// Address window outside the panel or inverted
    InvalidWindow(WindowError),
}

impl From<TransportError> for DisplayError {
    fn from(e: TransportError) -> Self {
        DisplayError::Transport(e)
    }
}

impl From<InvalidTransition> for DisplayError {
    fn from(e: InvalidTransition) -> Self {
        DisplayError::InvalidState {
            state: e.state,
            op: e.op,
        }
    }
}

impl From<CodecError> for DisplayError {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::BufferTooSmall { .. } => DisplayError::BufferTooSmall,
        }
    }
}

impl From<WindowError> for DisplayError {
    fn from(e: WindowError) -> Self {
        DisplayError::InvalidWindow(e)
    }
}

impl DisplayError {
    /// Hardware I/O failed (as opposed to a caller mistake)
    pub fn is_transport(&self) -> bool {
        matches!(self, DisplayError::Transport(_))
    }
}

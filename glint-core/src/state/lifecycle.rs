//! Display driver lifecycle
//!
//! A driver is brought up once, serves frames while ready and is closed
//! exactly once. Closing is always allowed and repeated closes are
//! no-ops; every other out-of-order call is a contract violation.

/// Driver states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverState {
    /// Constructed, hardware not yet brought up
    Uninitialized,
    /// Panel initialized and accepting frames
    Ready,
    /// Hardware released; terminal
    Closed,
}

/// Operations gated by the lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverOp {
    Reset,
    Initialize,
    PushFrame,
    SetWindow,
    SetBacklight,
    Close,
}

/// Operation not permitted in the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidTransition {
    pub state: DriverState,
    pub op: DriverOp,
}

impl DriverState {
    /// Hardware is held (not yet released)
    pub fn holds_hardware(&self) -> bool {
        !matches!(self, DriverState::Closed)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, DriverState::Ready)
    }

    /// State after `op` succeeds
    pub fn transition(self, op: DriverOp) -> Result<Self, InvalidTransition> {
        use DriverOp::*;
        use DriverState::*;

        match (self, op) {
            (Uninitialized, Reset) => Ok(Uninitialized),
            (Uninitialized, Initialize) => Ok(Ready),

            (Ready, PushFrame) | (Ready, SetWindow) | (Ready, SetBacklight) => Ok(Ready),

            // Close from anywhere; already closed stays closed
            (_, Close) => Ok(Closed),

            (state, op) => Err(InvalidTransition { state, op }),
        }
    }

    /// Check `op` without advancing
    pub fn check(self, op: DriverOp) -> Result<(), InvalidTransition> {
        self.transition(op).map(|_| ())
    }
}

//! Touch input event stream
//!
//! Resistive touch controllers report axis updates and a contact key,
//! grouped into coherent frames by a sync marker.

/// One event from a touch input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Raw X axis position
    AbsX(i32),
    /// Raw Y axis position
    AbsY(i32),
    /// Contact key pressed (`true`) or released
    Contact(bool),
    /// End of a coherent sample
    Sync,
}

//! Touch input source trait

use glint_protocol::InputEvent;

/// Stream of raw touch input events
///
/// Implementations may block (await) indefinitely while the panel is
/// untouched; the sampler races every read against its stop signal.
pub trait TouchEventSource {
    type Error;

    /// Human-readable device name, used for discovery
    fn name(&self) -> &str;

    /// Wait for the next event
    async fn next_event(&mut self) -> Result<InputEvent, Self::Error>;
}

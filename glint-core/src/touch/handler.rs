//! Down / move / up callback slots
//!
//! Handlers run on the sampling context. They must not do blocking
//! hardware I/O; anything that needs the display goes through a channel
//! to the render loop.

use super::ScreenPoint;

/// Receiver for classified touch events
///
/// Every slot defaults to a no-op, so implementors only override what
/// they care about.
pub trait TouchHandler {
    fn on_down(&mut self, _point: ScreenPoint) {}

    fn on_move(&mut self, _point: ScreenPoint) {}

    fn on_up(&mut self, _point: ScreenPoint) {}
}

/// No callbacks installed
impl TouchHandler for () {}

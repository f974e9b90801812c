//! Sync-framed raw samples
//!
//! Axis and contact updates arrive one at a time. The accumulator keeps
//! the latest value of each and releases a coherent triple only at the
//! sync marker, so a fresh X is never paired with a stale Y.

use glint_protocol::InputEvent;

/// One coherent reading from the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawTouchSample {
    pub x: i32,
    pub y: i32,
    pub contact: bool,
}

impl RawTouchSample {
    pub const fn new(x: i32, y: i32, contact: bool) -> Self {
        Self { x, y, contact }
    }
}

/// Latest-value accumulator
#[derive(Debug, Clone, Default)]
pub struct SampleAccumulator {
    pending: RawTouchSample,
}

impl SampleAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event in; returns a sample at each sync boundary
    pub fn feed(&mut self, event: InputEvent) -> Option<RawTouchSample> {
        match event {
            InputEvent::AbsX(v) => self.pending.x = v,
            InputEvent::AbsY(v) => self.pending.y = v,
            InputEvent::Contact(down) => self.pending.contact = down,
            InputEvent::Sync => return Some(self.pending),
        }
        None
    }

    /// Values gathered since start, including an unsynced partial frame
    pub fn pending(&self) -> RawTouchSample {
        self.pending
    }

    pub fn reset(&mut self) {
        self.pending = RawTouchSample::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emits_only_on_sync() {
        let mut acc = SampleAccumulator::new();
        assert_eq!(acc.feed(InputEvent::AbsX(100)), None);
        assert_eq!(acc.feed(InputEvent::Contact(true)), None);
        assert_eq!(acc.feed(InputEvent::AbsY(200)), None);
        assert_eq!(
            acc.feed(InputEvent::Sync),
            Some(RawTouchSample::new(100, 200, true))
        );
    }

    #[test]
    fn test_axes_persist_across_frames() {
        let mut acc = SampleAccumulator::new();
        acc.feed(InputEvent::AbsX(10));
        acc.feed(InputEvent::AbsY(20));
        acc.feed(InputEvent::Sync);

        // Only X changes in the next frame
        acc.feed(InputEvent::AbsX(15));
        assert_eq!(acc.pending(), RawTouchSample::new(15, 20, false));
        assert_eq!(
            acc.feed(InputEvent::Sync),
            Some(RawTouchSample::new(15, 20, false))
        );
    }

    #[test]
    fn test_reset_clears() {
        let mut acc = SampleAccumulator::new();
        acc.feed(InputEvent::Contact(true));
        acc.reset();
        assert_eq!(acc.feed(InputEvent::Sync), Some(RawTouchSample::default()));
    }
}

//! Press / drag / release classification
//!
//! ```text
//!            contact && !touching
//!   ┌──────┐ ──────────────────► ┌──────┐ ─┐ contact, point changed: Move
//!   │ Idle │                     │ Down │  │ contact, same point: -
//!   └──────┘ ◄────────────────── └──────┘ ◄┘
//!            !contact: Up(last point)
//! ```

use super::mapper::CoordinateMapper;
use super::sample::RawTouchSample;
use super::{TouchEvent, TouchState};

/// Single-point touch classifier
#[derive(Debug, Clone)]
pub struct TouchClassifier {
    mapper: CoordinateMapper,
    state: TouchState,
}

impl TouchClassifier {
    pub fn new(mapper: CoordinateMapper) -> Self {
        Self {
            mapper,
            state: TouchState::IDLE,
        }
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Current contact snapshot
    pub fn state(&self) -> TouchState {
        self.state
    }

    /// Advance with one synced sample
    pub fn process(&mut self, sample: RawTouchSample) -> Option<TouchEvent> {
        match (self.state.touching, sample.contact) {
            (false, true) => {
                let point = self.mapper.map(sample.x, sample.y);
                self.state = TouchState {
                    point,
                    touching: true,
                };
                Some(TouchEvent::Down(point))
            }
            (true, true) => {
                let point = self.mapper.map(sample.x, sample.y);
                if point == self.state.point {
                    return None;
                }
                self.state.point = point;
                Some(TouchEvent::Move(point))
            }
            (true, false) => {
                self.state.touching = false;
                Some(TouchEvent::Up(self.state.point))
            }
            (false, false) => None,
        }
    }

    /// Drop any contact in progress
    pub fn reset(&mut self) {
        self.state = TouchState::IDLE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TouchCalibration;
    use crate::touch::ScreenPoint;

    fn classifier() -> TouchClassifier {
        let cal = TouchCalibration::ADS7846_WAVESHARE_28.with_swap(false);
        TouchClassifier::new(CoordinateMapper::new(cal, 240, 320).unwrap())
    }

    #[test]
    fn test_down_near_center() {
        let mut c = classifier();
        assert_eq!(c.process(RawTouchSample::new(198, 292, false)), None);

        let event = c.process(RawTouchSample::new(1938, 2046, true));
        let Some(TouchEvent::Down(p)) = event else {
            panic!("expected down, got {:?}", event);
        };
        assert!(p.x.abs_diff(120) <= 1 && p.y.abs_diff(160) <= 1);
        assert!(c.state().touching);
    }

    #[test]
    fn test_identical_points_deduplicated() {
        let mut c = classifier();
        let events = [
            c.process(RawTouchSample::new(1000, 1000, true)),
            c.process(RawTouchSample::new(1000, 1000, true)),
        ];
        assert!(matches!(events[0], Some(TouchEvent::Down(_))));
        assert_eq!(events[1], None);
    }

    #[test]
    fn test_subpixel_jitter_is_not_a_move() {
        let mut c = classifier();
        c.process(RawTouchSample::new(1000, 1000, true));
        // One raw count is well under a pixel on this panel
        assert_eq!(c.process(RawTouchSample::new(1001, 1000, true)), None);
    }

    #[test]
    fn test_drag_then_release() {
        let mut c = classifier();
        c.process(RawTouchSample::new(1000, 1000, true));

        let moved = c.process(RawTouchSample::new(2000, 2000, true));
        let Some(TouchEvent::Move(p)) = moved else {
            panic!("expected move, got {:?}", moved);
        };

        // Release reports the last mapped point, not the release sample's
        assert_eq!(
            c.process(RawTouchSample::new(0, 0, false)),
            Some(TouchEvent::Up(p))
        );
        assert_eq!(
            c.state(),
            TouchState {
                point: p,
                touching: false
            }
        );
        assert_eq!(c.process(RawTouchSample::new(0, 0, false)), None);
    }

    #[test]
    fn test_reset_forgets_contact() {
        let mut c = classifier();
        c.process(RawTouchSample::new(1000, 1000, true));
        c.reset();
        assert_eq!(c.state(), TouchState::IDLE);
        assert_eq!(c.state().point, ScreenPoint::new(0, 0));
    }
}

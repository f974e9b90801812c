//! Touch sampler task body
//!
//! Owns the input source and the classifier. Each raw event goes through
//! the sample accumulator; synced samples are classified and the result
//! is published in this order:
//!
//! 1. shared [`TouchState`](glint_core::touch::TouchState)
//! 2. the down / move / up handler
//! 3. region dispatch (down only)
//! 4. the touch event channel (dropped with a warning when full)
//!
//! Every read is raced against the stop signal, so a source that never
//! produces another event cannot keep the task alive.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use glint_core::touch::{
    select_device, CoordinateMapper, SampleAccumulator, TouchClassifier, TouchError, TouchEvent,
    TouchHandler,
};
use glint_core::traits::TouchEventSource;
use glint_protocol::InputEvent;

use super::shared::TouchShared;

#[cfg(feature = "defmt")]
use defmt::{info, warn};

/// Pick the touch source to sample from among the candidates
///
/// Returns [`TouchError::DeviceNotFound`] when none qualifies; the caller
/// keeps running without touch.
pub fn discover<S: TouchEventSource, const N: usize>(sources: [S; N]) -> Result<S, TouchError> {
    let index = {
        let names = sources.each_ref().map(|s| s.name());
        select_device(&names)
    };
    let index = match index {
        Ok(index) => index,
        Err(e) => {
            #[cfg(feature = "defmt")]
            warn!("no touch device found, touch disabled");
            return Err(e);
        }
    };
    let source = sources
        .into_iter()
        .nth(index)
        .ok_or(TouchError::DeviceNotFound)?;

    #[cfg(feature = "defmt")]
    info!("touch device found: {=str}", source.name());

    Ok(source)
}

/// Raw events in, classified touch events out
pub struct TouchSampler<S, H> {
    source: S,
    accumulator: SampleAccumulator,
    classifier: TouchClassifier,
    handler: H,
}

impl<S: TouchEventSource, H: TouchHandler> TouchSampler<S, H> {
    pub fn new(source: S, mapper: CoordinateMapper, handler: H) -> Self {
        Self {
            source,
            accumulator: SampleAccumulator::new(),
            classifier: TouchClassifier::new(mapper),
            handler,
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Sample until stopped or the source fails
    ///
    /// A stop request returns `Ok(())`. A source error is logged and
    /// returns [`TouchError::Io`]. Either way the shared state is back to
    /// idle and the stop request, if any, is acknowledged on return.
    pub async fn run<M: RawMutex, const R: usize, const E: usize>(
        &mut self,
        shared: &TouchShared<'_, M, R, E>,
    ) -> Result<(), TouchError> {
        shared.begin();

        #[cfg(feature = "defmt")]
        info!("touch sampler started on {=str}", self.source.name());

        let result = loop {
            match select(shared.stop_requested(), self.source.next_event()).await {
                Either::First(()) => break Ok(()),
                Either::Second(Ok(event)) => self.handle(event, shared),
                Either::Second(Err(_)) => {
                    #[cfg(feature = "defmt")]
                    warn!("touch source read failed, sampler exiting");
                    break Err(TouchError::Io);
                }
            }
        };

        self.accumulator.reset();
        self.classifier.reset();
        shared.finish();

        #[cfg(feature = "defmt")]
        info!("touch sampler stopped");

        result
    }

    fn handle<M: RawMutex, const R: usize, const E: usize>(
        &mut self,
        event: InputEvent,
        shared: &TouchShared<'_, M, R, E>,
    ) {
        let Some(sample) = self.accumulator.feed(event) else {
            return;
        };
        let Some(touch) = self.classifier.process(sample) else {
            return;
        };

        shared.state.set(self.classifier.state());
        touch.dispatch_to(&mut self.handler);
        if let TouchEvent::Down(point) = touch {
            shared.regions.dispatch(point);
        }
        if !shared.publish(touch) {
            #[cfg(feature = "defmt")]
            warn!("touch event channel full, dropped {}", touch);
        }
    }

    pub fn release(self) -> (S, H) {
        (self.source, self.handler)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use core::sync::atomic::{AtomicU32, Ordering};
    use embassy_futures::block_on;
    use embassy_futures::join::join;
    use embassy_futures::select::{select, Either};
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use embassy_time::{Duration, Timer};
    use glint_core::config::TouchCalibration;
    use glint_core::touch::{Region, ScreenPoint, TouchState};
    use std::collections::VecDeque;
    use std::vec::Vec;

    type Shared<'r> = TouchShared<'r, CriticalSectionRawMutex, 4, 8>;

    /// Replays a script, then either blocks forever or fails
    struct Scripted {
        name: &'static str,
        script: VecDeque<Result<InputEvent, ()>>,
    }

    impl Scripted {
        fn new(name: &'static str, events: &[InputEvent]) -> Self {
            Self {
                name,
                script: events.iter().copied().map(Ok).collect(),
            }
        }

        fn then_fail(mut self) -> Self {
            self.script.push_back(Err(()));
            self
        }
    }

    impl TouchEventSource for Scripted {
        type Error = ();

        fn name(&self) -> &str {
            self.name
        }

        async fn next_event(&mut self) -> Result<InputEvent, ()> {
            match self.script.pop_front() {
                Some(next) => next,
                None => core::future::pending().await,
            }
        }
    }

    #[derive(Default)]
    struct Recorder {
        seen: Vec<TouchEvent>,
    }

    impl TouchHandler for Recorder {
        fn on_down(&mut self, point: ScreenPoint) {
            self.seen.push(TouchEvent::Down(point));
        }

        fn on_move(&mut self, point: ScreenPoint) {
            self.seen.push(TouchEvent::Move(point));
        }

        fn on_up(&mut self, point: ScreenPoint) {
            self.seen.push(TouchEvent::Up(point));
        }
    }

    /// Raw units equal screen pixels
    fn identity() -> CoordinateMapper {
        CoordinateMapper::new(TouchCalibration::new(0, 240, 0, 320, false), 240, 320).unwrap()
    }

    fn frame(x: i32, y: i32, contact: bool) -> [InputEvent; 4] {
        [
            InputEvent::AbsX(x),
            InputEvent::AbsY(y),
            InputEvent::Contact(contact),
            InputEvent::Sync,
        ]
    }

    fn script(frames: &[[InputEvent; 4]]) -> Vec<InputEvent> {
        frames.iter().flatten().copied().collect()
    }

    fn run_until_stopped<H: TouchHandler>(
        sampler: &mut TouchSampler<Scripted, H>,
        shared: &Shared<'_>,
    ) -> (Result<(), TouchError>, Result<(), TouchError>) {
        block_on(join(
            sampler.run(shared),
            shared.stop(Duration::from_millis(500)),
        ))
    }

    #[test]
    fn test_press_drag_release() {
        let events = script(&[
            frame(10, 20, true),
            frame(10, 20, true),
            frame(30, 40, true),
            frame(30, 40, false),
        ]);
        let shared = Shared::new();
        let mut sampler = TouchSampler::new(
            Scripted::new("ADS7846 Touchscreen", &events),
            identity(),
            Recorder::default(),
        );

        let (ran, stopped) = run_until_stopped(&mut sampler, &shared);
        assert_eq!(ran, Ok(()));
        assert_eq!(stopped, Ok(()));

        let expected = [
            TouchEvent::Down(ScreenPoint::new(10, 20)),
            TouchEvent::Move(ScreenPoint::new(30, 40)),
            TouchEvent::Up(ScreenPoint::new(30, 40)),
        ];
        assert_eq!(sampler.handler().seen, expected);
        for ev in expected {
            assert_eq!(shared.events.try_receive(), Ok(ev));
        }
        assert!(shared.events.try_receive().is_err());
        assert_eq!(shared.state.snapshot(), TouchState::IDLE);
    }

    #[test]
    fn test_partial_frame_is_not_acted_on() {
        // X updated but never synced
        let events = [InputEvent::AbsX(50), InputEvent::Contact(true)];
        let shared = Shared::new();
        let mut sampler = TouchSampler::new(Scripted::new("touch", &events), identity(), ());

        let (ran, _) = run_until_stopped(&mut sampler, &shared);
        assert_eq!(ran, Ok(()));
        assert!(shared.events.try_receive().is_err());
    }

    #[test]
    fn test_read_error_exits_with_io() {
        let events = script(&[frame(5, 5, true)]);
        let shared = Shared::new();
        let mut sampler = TouchSampler::new(
            Scripted::new("touch", &events).then_fail(),
            identity(),
            (),
        );

        assert_eq!(block_on(sampler.run(&shared)), Err(TouchError::Io));
        assert_eq!(
            shared.events.try_receive(),
            Ok(TouchEvent::Down(ScreenPoint::new(5, 5)))
        );
        // Contact was active when the source died; state is cleared anyway
        assert_eq!(shared.state.snapshot(), TouchState::IDLE);
        // The exit already acknowledged, so a late stop returns promptly
        assert_eq!(block_on(shared.stop(Duration::from_millis(50))), Ok(()));
    }

    #[test]
    fn test_regions_fire_on_down_only() {
        let hits = AtomicU32::new(0);
        let on_hit = |name: &str, _: ScreenPoint| {
            assert_eq!(name, "play");
            hits.fetch_add(1, Ordering::Relaxed);
        };

        let shared = Shared::new();
        shared
            .regions
            .register("play", Region::new(0, 0, 50, 50), &on_hit)
            .unwrap();

        // Down outside, drag inside, release, then press inside
        let events = script(&[
            frame(100, 100, true),
            frame(10, 10, true),
            frame(10, 10, false),
            frame(20, 20, true),
        ]);
        let mut sampler = TouchSampler::new(Scripted::new("touch", &events), identity(), ());

        let (ran, _) = run_until_stopped(&mut sampler, &shared);
        assert_eq!(ran, Ok(()));
        assert_eq!(hits.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_full_channel_drops_instead_of_blocking() {
        let shared: TouchShared<'_, CriticalSectionRawMutex, 1, 2> = TouchShared::new();
        let events = script(&[
            frame(1, 1, true),
            frame(2, 2, true),
            frame(3, 3, true),
            frame(3, 3, false),
        ]);
        let mut sampler = TouchSampler::new(
            Scripted::new("touch", &events),
            identity(),
            Recorder::default(),
        );

        let (ran, stopped) = block_on(join(
            sampler.run(&shared),
            shared.stop(Duration::from_millis(500)),
        ));
        assert_eq!(ran, Ok(()));
        assert_eq!(stopped, Ok(()));

        // Handler saw everything, the channel kept the first two
        assert_eq!(sampler.handler().seen.len(), 4);
        assert_eq!(
            shared.events.try_receive(),
            Ok(TouchEvent::Down(ScreenPoint::new(1, 1)))
        );
        assert_eq!(
            shared.events.try_receive(),
            Ok(TouchEvent::Move(ScreenPoint::new(2, 2)))
        );
        assert!(shared.events.try_receive().is_err());
    }

    #[test]
    fn test_sampler_can_restart_after_stop() {
        let shared = Shared::new();
        let events = script(&[frame(7, 7, true)]);
        let mut sampler = TouchSampler::new(Scripted::new("touch", &events), identity(), ());

        assert_eq!(run_until_stopped(&mut sampler, &shared), (Ok(()), Ok(())));
        assert_eq!(run_until_stopped(&mut sampler, &shared), (Ok(()), Ok(())));
    }

    #[test]
    fn test_timed_out_stop_does_not_end_next_run() {
        let shared = Shared::new();
        // Nobody is sampling, so nothing acknowledges
        assert_eq!(
            block_on(shared.stop(Duration::from_millis(10))),
            Err(TouchError::StopTimeout)
        );

        let events = script(&[frame(7, 7, true)]);
        let mut sampler = TouchSampler::new(Scripted::new("touch", &events), identity(), ());
        let outcome = block_on(select(sampler.run(&shared), Timer::after_millis(50)));
        assert!(matches!(outcome, Either::Second(())));
        assert_eq!(
            shared.events.try_receive(),
            Ok(TouchEvent::Down(ScreenPoint::new(7, 7)))
        );
    }

    #[test]
    fn test_stop_after_io_exit_does_not_end_next_run() {
        let shared = Shared::new();
        let mut failing =
            TouchSampler::new(Scripted::new("touch", &[]).then_fail(), identity(), ());
        assert_eq!(block_on(failing.run(&shared)), Err(TouchError::Io));
        assert_eq!(block_on(shared.stop(Duration::from_millis(50))), Ok(()));

        let mut sampler = TouchSampler::new(Scripted::new("touch", &[]), identity(), ());
        let outcome = block_on(select(sampler.run(&shared), Timer::after_millis(50)));
        assert!(matches!(outcome, Either::Second(())));

        // A real stop still ends it
        assert_eq!(run_until_stopped(&mut sampler, &shared), (Ok(()), Ok(())));
    }

    #[test]
    fn test_discover_prefers_ads7846() {
        let picked = discover([
            Scripted::new("Generic Touch Panel", &[]),
            Scripted::new("ADS7846 Touchscreen", &[]),
        ])
        .unwrap();
        assert_eq!(picked.name(), "ADS7846 Touchscreen");
    }

    #[test]
    fn test_discover_falls_back_then_gives_up() {
        let picked = discover([
            Scripted::new("gpio-keys", &[]),
            Scripted::new("Generic Touch Panel", &[]),
        ])
        .unwrap();
        assert_eq!(picked.name(), "Generic Touch Panel");

        let none = discover([Scripted::new("gpio-keys", &[])]);
        assert!(matches!(none, Err(TouchError::DeviceNotFound)));
    }
}

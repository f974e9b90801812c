//! State shared between the touch sampler and the render loop
//!
//! Everything here lives in a `static` on firmware. Locks are blocking
//! mutexes held only for a copy or a table edit; region callbacks run
//! after the lock is released.

use core::cell::{Cell, RefCell};

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use embassy_time::{with_timeout, Duration};
use glint_core::touch::{
    Region, RegionCallback, RegionError, RegionTable, ScreenPoint, TouchError, TouchEvent,
    TouchState, MAX_REGION_NAME,
};
use heapless::String;

#[cfg(feature = "defmt")]
use defmt::warn;

/// Latest contact snapshot, never torn
pub struct SharedTouchState<M: RawMutex> {
    inner: Mutex<M, Cell<TouchState>>,
}

impl<M: RawMutex> SharedTouchState<M> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(TouchState::IDLE)),
        }
    }

    pub fn snapshot(&self) -> TouchState {
        self.inner.lock(|s| s.get())
    }

    pub fn set(&self, state: TouchState) {
        self.inner.lock(|s| s.set(state));
    }

    pub fn reset(&self) {
        self.set(TouchState::IDLE);
    }
}

impl<M: RawMutex> Default for SharedTouchState<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Region table behind a lock
pub struct SharedRegions<'r, M: RawMutex, const R: usize> {
    table: Mutex<M, RefCell<RegionTable<'r, R>>>,
}

impl<'r, M: RawMutex, const R: usize> SharedRegions<'r, M, R> {
    pub const fn new() -> Self {
        Self {
            table: Mutex::new(RefCell::new(RegionTable::new())),
        }
    }

    pub fn register(
        &self,
        name: &str,
        region: Region,
        callback: RegionCallback<'r>,
    ) -> Result<(), RegionError> {
        self.table
            .lock(|t| t.borrow_mut().register(name, region, callback))
    }

    pub fn unregister(&self, name: &str) -> bool {
        self.table.lock(|t| t.borrow_mut().unregister(name))
    }

    pub fn clear(&self) {
        self.table.lock(|t| t.borrow_mut().clear());
    }

    pub fn len(&self) -> usize {
        self.table.lock(|t| t.borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fire the first region containing `point`; returns its name
    ///
    /// The callback runs outside the lock, so it may register or
    /// unregister regions itself.
    pub fn dispatch(&self, point: ScreenPoint) -> Option<String<MAX_REGION_NAME>> {
        let (name, callback) = self.table.lock(|t| {
            let table = t.borrow();
            let (name, callback) = table.hit_test(point)?;
            let mut owned = String::new();
            // Names are capped at MAX_REGION_NAME on register
            owned.push_str(name).ok()?;
            Some((owned, callback))
        })?;
        callback(&name, point);
        Some(name)
    }
}

impl<M: RawMutex, const R: usize> Default for SharedRegions<'_, M, R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the sampler publishes and the UI reads
///
/// - `R`: region slots
/// - `E`: touch event channel depth
pub struct TouchShared<'r, M: RawMutex, const R: usize, const E: usize> {
    pub state: SharedTouchState<M>,
    pub regions: SharedRegions<'r, M, R>,
    pub events: Channel<M, TouchEvent, E>,
    stop: Signal<M, ()>,
    done: Signal<M, ()>,
}

impl<'r, M: RawMutex, const R: usize, const E: usize> TouchShared<'r, M, R, E> {
    pub const fn new() -> Self {
        Self {
            state: SharedTouchState::new(),
            regions: SharedRegions::new(),
            events: Channel::new(),
            stop: Signal::new(),
            done: Signal::new(),
        }
    }

    /// Ask the sampler to exit and wait up to `timeout` for it
    pub async fn stop(&self, timeout: Duration) -> Result<(), TouchError> {
        self.stop.signal(());
        match with_timeout(timeout, self.done.wait()).await {
            Ok(()) => Ok(()),
            Err(_) => {
                #[cfg(feature = "defmt")]
                warn!("touch sampler did not stop in {} ms", timeout.as_millis());
                Err(TouchError::StopTimeout)
            }
        }
    }

    /// Publish without blocking; returns false when the channel is full
    pub fn publish(&self, event: TouchEvent) -> bool {
        self.events.try_send(event).is_ok()
    }

    pub(crate) async fn stop_requested(&self) {
        self.stop.wait().await
    }

    /// Clears a stop left over from a run that already ended
    pub(crate) fn begin(&self) {
        self.stop.reset();
        self.done.reset();
    }

    pub(crate) fn finish(&self) {
        self.state.reset();
        self.done.signal(());
    }
}

impl<M: RawMutex, const R: usize, const E: usize> Default for TouchShared<'_, M, R, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicU32, Ordering};
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

    type Shared<'r> = TouchShared<'r, CriticalSectionRawMutex, 4, 4>;

    #[test]
    fn test_state_snapshot_roundtrips() {
        let shared = Shared::new();
        assert_eq!(shared.state.snapshot(), TouchState::IDLE);

        let pressed = TouchState {
            point: ScreenPoint::new(10, 20),
            touching: true,
        };
        shared.state.set(pressed);
        assert_eq!(shared.state.snapshot(), pressed);

        shared.state.reset();
        assert_eq!(shared.state.snapshot(), TouchState::IDLE);
    }

    #[test]
    fn test_dispatch_releases_lock_before_callback() {
        static SHARED: TouchShared<'static, CriticalSectionRawMutex, 4, 4> = TouchShared::new();
        static HITS: AtomicU32 = AtomicU32::new(0);
        static ONE_SHOT: fn(&str, ScreenPoint) = |name, _| {
            HITS.fetch_add(1, Ordering::Relaxed);
            // Re-entering the table from a callback must not deadlock
            SHARED.regions.unregister(name);
        };

        SHARED
            .regions
            .register("once", Region::new(0, 0, 10, 10), &ONE_SHOT)
            .unwrap();

        let hit = SHARED.regions.dispatch(ScreenPoint::new(5, 5));
        assert_eq!(hit.as_deref(), Some("once"));
        assert_eq!(HITS.load(Ordering::Relaxed), 1);
        assert!(SHARED.regions.is_empty());
        assert_eq!(SHARED.regions.dispatch(ScreenPoint::new(5, 5)), None);
    }

    #[test]
    fn test_overlapping_regions_first_registered_wins() {
        let a = AtomicU32::new(0);
        let b = AtomicU32::new(0);
        let on_a = |_: &str, _: ScreenPoint| {
            a.fetch_add(1, Ordering::Relaxed);
        };
        let on_b = |_: &str, _: ScreenPoint| {
            b.fetch_add(1, Ordering::Relaxed);
        };

        let shared = Shared::new();
        shared
            .regions
            .register("a", Region::new(0, 0, 100, 100), &on_a)
            .unwrap();
        shared
            .regions
            .register("b", Region::new(50, 50, 100, 100), &on_b)
            .unwrap();

        assert_eq!(
            shared.regions.dispatch(ScreenPoint::new(60, 60)).as_deref(),
            Some("a")
        );
        assert_eq!(a.load(Ordering::Relaxed), 1);
        assert_eq!(b.load(Ordering::Relaxed), 0);

        shared.regions.clear();
        assert_eq!(shared.regions.dispatch(ScreenPoint::new(60, 60)), None);
    }

    #[test]
    fn test_stop_without_sampler_times_out() {
        let shared = Shared::new();
        let result = block_on(shared.stop(Duration::from_millis(20)));
        assert_eq!(result, Err(TouchError::StopTimeout));
    }

    #[test]
    fn test_finish_acknowledges_stop_and_clears_state() {
        let shared = Shared::new();
        shared.state.set(TouchState {
            point: ScreenPoint::new(1, 2),
            touching: true,
        });
        shared.finish();

        assert_eq!(block_on(shared.stop(Duration::from_millis(20))), Ok(()));
        assert_eq!(shared.state.snapshot(), TouchState::IDLE);
    }

    #[test]
    fn test_publish_reports_full_channel() {
        let shared = Shared::new();
        let ev = TouchEvent::Down(ScreenPoint::new(0, 0));
        for _ in 0..4 {
            assert!(shared.publish(ev));
        }
        assert!(!shared.publish(ev));
        assert_eq!(shared.events.try_receive(), Ok(ev));
    }
}

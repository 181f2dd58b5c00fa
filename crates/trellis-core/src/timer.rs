//! Timer system for Trellis.
//!
//! Each window owns a [`TimerManager`]. The read loop keeps exactly one idle
//! timer alive through [`IdleTimer`], which bounds how long a blocked read
//! sleeps before it re-checks its conditions. Repeating timers started by the
//! caller produce keyed window events.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use slotmap::{SlotMap, new_key_type};

use crate::error::TimerError;
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

/// The type of timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Fires once after the specified duration.
    OneShot,
    /// Fires repeatedly at the specified interval.
    Repeating,
}

#[derive(Debug)]
struct TimerData {
    next_fire: Instant,
    interval: Duration,
    kind: TimerKind,
}

/// Manages the timers of one window.
///
/// Pending fires sit in a min-heap ordered by fire time. Stopping a timer
/// only removes it from the slot map; its heap entry is discarded lazily when
/// it reaches the top.
#[derive(Debug, Default)]
pub struct TimerManager {
    timers: SlotMap<TimerId, TimerData>,
    queue: BinaryHeap<Reverse<(Instant, TimerId)>>,
}

impl TimerManager {
    /// Create a new timer manager.
    pub fn new() -> Self {
        Self::default()
    }

    fn start(&mut self, interval: Duration, kind: TimerKind) -> TimerId {
        let next_fire = Instant::now() + interval;
        let id = self.timers.insert(TimerData {
            next_fire,
            interval,
            kind,
        });
        self.queue.push(Reverse((next_fire, id)));
        tracing::trace!(target: targets::TIMER, ?id, ?kind, ?interval, "timer started");
        id
    }

    /// Start a timer that fires once after `duration`.
    pub fn start_one_shot(&mut self, duration: Duration) -> TimerId {
        self.start(duration, TimerKind::OneShot)
    }

    /// Start a timer that fires every `interval`, first after one interval.
    pub fn start_repeating(&mut self, interval: Duration) -> TimerId {
        self.start(interval, TimerKind::Repeating)
    }

    /// Stop and remove a timer.
    pub fn stop(&mut self, id: TimerId) -> Result<(), TimerError> {
        self.timers
            .remove(id)
            .map(|_| ())
            .ok_or(TimerError::InvalidTimerId)
    }

    /// Check if a timer is still scheduled.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    fn is_current(&self, fire_time: Instant, id: TimerId) -> bool {
        self.timers
            .get(id)
            .is_some_and(|timer| timer.next_fire == fire_time)
    }

    /// Get the duration until the next timer fires.
    ///
    /// Returns `None` if no timer is scheduled.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        while let Some(&Reverse((fire_time, id))) = self.queue.peek() {
            if self.is_current(fire_time, id) {
                return Some(fire_time.saturating_duration_since(Instant::now()));
            }
            self.queue.pop();
        }
        None
    }

    /// Fire every timer that is due, in fire-time order.
    ///
    /// One-shot timers are removed; repeating timers are rescheduled one
    /// interval from now.
    #[tracing::instrument(skip(self), target = "trellis_core::timer", level = "trace")]
    pub fn process_expired(&mut self) -> Vec<TimerId> {
        let now = Instant::now();
        let mut fired = Vec::new();

        while let Some(&Reverse((fire_time, id))) = self.queue.peek() {
            if fire_time > now {
                break;
            }
            self.queue.pop();
            if !self.is_current(fire_time, id) {
                continue;
            }

            tracing::trace!(target: targets::TIMER, ?id, "timer fired");
            fired.push(id);

            let Some(timer) = self.timers.get_mut(id) else {
                continue;
            };
            match timer.kind {
                TimerKind::OneShot => {
                    self.timers.remove(id);
                }
                TimerKind::Repeating => {
                    timer.next_fire = now + timer.interval;
                    self.queue.push(Reverse((timer.next_fire, id)));
                }
            }
        }

        fired
    }

    /// Get the number of scheduled timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }
}

/// The single idle wake source of a read loop.
///
/// Every read cycle calls [`IdleTimer::reschedule`], which cancels the
/// previous handle before starting a new one, so wake sources never stack.
#[derive(Debug, Default)]
pub struct IdleTimer {
    current: Option<TimerId>,
}

impl IdleTimer {
    /// Create an idle timer with no handle scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the current handle, if any, and schedule a new one.
    pub fn reschedule(&mut self, timers: &mut TimerManager, tick: Duration) -> TimerId {
        self.cancel(timers);
        let id = timers.start_one_shot(tick);
        self.current = Some(id);
        id
    }

    /// Cancel the current handle.
    pub fn cancel(&mut self, timers: &mut TimerManager) {
        if let Some(id) = self.current.take() {
            // Already gone if it fired since the last cycle.
            let _ = timers.stop(id);
        }
    }

    /// Whether `id` is the idle handle.
    pub fn is(&self, id: TimerId) -> bool {
        self.current == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_one_shot_fires_once() {
        let mut timers = TimerManager::new();
        let id = timers.start_one_shot(Duration::ZERO);
        assert_eq!(timers.process_expired(), vec![id]);
        assert!(timers.process_expired().is_empty());
        assert!(!timers.is_active(id));
    }

    #[test]
    fn test_repeating_reschedules() {
        let mut timers = TimerManager::new();
        let id = timers.start_repeating(Duration::from_millis(5));
        thread::sleep(Duration::from_millis(10));
        assert_eq!(timers.process_expired(), vec![id]);
        assert!(timers.is_active(id));
        assert!(timers.time_until_next().is_some());
    }

    #[test]
    fn test_stopped_timer_never_fires() {
        let mut timers = TimerManager::new();
        let id = timers.start_one_shot(Duration::ZERO);
        timers.stop(id).unwrap();
        assert_eq!(timers.stop(id), Err(TimerError::InvalidTimerId));
        assert!(timers.process_expired().is_empty());
        assert_eq!(timers.time_until_next(), None);
    }

    #[test]
    fn test_idle_reschedule_keeps_single_handle() {
        let mut timers = TimerManager::new();
        let mut idle = IdleTimer::new();
        let first = idle.reschedule(&mut timers, Duration::from_millis(10));
        let second = idle.reschedule(&mut timers, Duration::from_millis(10));
        assert!(!timers.is_active(first));
        assert!(idle.is(second));
        assert_eq!(timers.active_count(), 1);
    }

    #[test]
    fn test_time_until_next_skips_stopped_entries() {
        let mut timers = TimerManager::new();
        let early = timers.start_one_shot(Duration::from_millis(1));
        timers.start_one_shot(Duration::from_secs(60));
        timers.stop(early).unwrap();
        let wait = timers.time_until_next().unwrap();
        assert!(wait > Duration::from_secs(30));
    }
}

//! Scheduling port the session uses for its countdown and pacing delays.
//!
//! The session never sleeps. It asks a [`Scheduler`] for a timer, keeps the returned
//! [`TimerHandle`] next to the work it wants done, and the host calls
//! [`GameSession::fire`](crate::GameSession::fire) once the timer elapses.

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Opaque identifier handed out by a [`Scheduler`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Repeat {
    Once,
    Every,
}

pub trait Scheduler {
    /// Arms a timer firing after `delay_ms`, and then every `delay_ms` for [`Repeat::Every`].
    fn schedule(&mut self, delay_ms: u32, repeat: Repeat) -> TimerHandle;

    /// Disarms a timer. Unknown or already fired handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

impl<S: Scheduler + ?Sized> Scheduler for &mut S {
    fn schedule(&mut self, delay_ms: u32, repeat: Repeat) -> TimerHandle {
        (**self).schedule(delay_ms, repeat)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        (**self).cancel(handle)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct ManualTimer {
    handle: TimerHandle,
    due_at: u64,
    period: Option<u64>,
}

/// Simulated clock: timers only elapse when [`ManualScheduler::next_due`] is asked for them.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now: u64,
    next_handle: u64,
    timers: Vec<ManualTimer>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds elapsed on the simulated clock.
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn armed_count(&self) -> usize {
        self.timers.len()
    }

    pub fn is_armed(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|timer| timer.handle == handle)
    }

    /// Pops the earliest timer due at or before `until`, moving the clock to its deadline.
    ///
    /// Ties fire in the order the timers were armed. Repeating timers are re-armed one period
    /// later.
    pub fn next_due(&mut self, until: u64) -> Option<TimerHandle> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due_at <= until)
            .min_by_key(|(_, timer)| (timer.due_at, timer.handle))
            .map(|(index, _)| index)?;

        let timer = self.timers[index];
        self.now = self.now.max(timer.due_at);
        match timer.period {
            Some(period) => self.timers[index].due_at += period,
            None => {
                self.timers.remove(index);
            }
        }
        Some(timer.handle)
    }

    /// Moves the clock forward without firing anything.
    pub fn set_now(&mut self, now: u64) {
        self.now = self.now.max(now);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay_ms: u32, repeat: Repeat) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        // a zero period would re-arm forever at the same instant
        let delay = u64::from(delay_ms.max(1));
        self.timers.push(ManualTimer {
            handle,
            due_at: self.now + delay,
            period: matches!(repeat, Repeat::Every).then_some(delay),
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|timer| timer.handle != handle);
    }
}

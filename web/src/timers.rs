use std::collections::HashMap;

use alchemy_core::{Repeat, Scheduler, TimerHandle};
use gloo::timers::callback::{Interval, Timeout};
use yew::Callback;

/// Keeps the browser timer alive; dropping it cancels the timer.
enum ArmedTimer {
    Once(#[allow(dead_code)] Timeout),
    Every(#[allow(dead_code)] Interval),
}

/// [`Scheduler`] backed by `setTimeout`/`setInterval`. Elapsed timers are reported through
/// `on_fire`, normally a component callback that hands the handle back to the session.
pub(crate) struct GlooScheduler {
    on_fire: Callback<TimerHandle>,
    next_handle: u64,
    timers: HashMap<TimerHandle, ArmedTimer>,
}

impl GlooScheduler {
    pub(crate) fn new(on_fire: Callback<TimerHandle>) -> Self {
        Self {
            on_fire,
            next_handle: 0,
            timers: HashMap::new(),
        }
    }
}

impl Scheduler for GlooScheduler {
    fn schedule(&mut self, delay_ms: u32, repeat: Repeat) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;

        let on_fire = self.on_fire.clone();
        let timer = match repeat {
            Repeat::Once => ArmedTimer::Once(Timeout::new(delay_ms, move || on_fire.emit(handle))),
            Repeat::Every => {
                ArmedTimer::Every(Interval::new(delay_ms, move || on_fire.emit(handle)))
            }
        };
        log::trace!("armed {:?} ({:?}, {}ms)", handle, repeat, delay_ms);
        self.timers.insert(handle, timer);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if self.timers.remove(&handle).is_some() {
            log::trace!("disarmed {:?}", handle);
        }
    }
}

impl Drop for GlooScheduler {
    fn drop(&mut self) {
        if !self.timers.is_empty() {
            log::debug!("dropping {} armed timers", self.timers.len());
        }
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Scheduling port between drawables and their host.
//!
//! Drawables never own timers. They ask the host to redraw, or to call them
//! back at a given time through a [`ScheduleToken`], and the host delivers
//! due tokens on its own update loop.

use super::Clock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Identifies one pending callback of one drawable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleToken(u64);

impl ScheduleToken {
    /// Allocates a process-unique token.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

/// Host-side services a drawable may request.
pub trait Scheduler {
    /// Asks for a redraw on the next frame.
    fn request_redraw(&mut self);

    /// Arranges for `token` to be delivered once the clock reaches `at`.
    /// Re-scheduling a pending token replaces its deadline.
    fn schedule(&mut self, token: ScheduleToken, at: Duration);

    /// Drops a pending `token`. No-op when it is not pending.
    fn unschedule(&mut self, token: ScheduleToken);
}

/// Clock and scheduler handed to every drawable lifecycle call.
pub struct Context<'a> {
    clock: &'a dyn Clock,
    scheduler: &'a mut dyn Scheduler,
}

impl<'a> Context<'a> {
    pub fn new(clock: &'a dyn Clock, scheduler: &'a mut dyn Scheduler) -> Self {
        Self { clock, scheduler }
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn invalidate(&mut self) {
        self.scheduler.request_redraw();
    }

    /// Schedules `token` to fire `delay` from now.
    pub fn schedule(&mut self, token: ScheduleToken, delay: Duration) {
        let at = self.clock.now() + delay;
        self.scheduler.schedule(token, at);
    }

    pub fn unschedule(&mut self, token: ScheduleToken) {
        self.scheduler.unschedule(token);
    }
}

/// In-memory [`Scheduler`] polled by the host on every tick.
#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: Vec<(ScheduleToken, Duration)>,
    redraw_requested: bool,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the tokens due at `now`, earliest first.
    pub fn take_due(&mut self, now: Duration) -> Vec<ScheduleToken> {
        let mut due: Vec<(ScheduleToken, Duration)> = Vec::new();
        self.pending.retain(|&(token, at)| {
            if at <= now {
                due.push((token, at));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(_, at)| at);
        due.into_iter().map(|(token, _)| token).collect()
    }

    /// Returns whether a redraw was requested since the last call, and
    /// clears the request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    #[must_use]
    pub fn is_pending(&self, token: ScheduleToken) -> bool {
        self.pending.iter().any(|&(pending, _)| pending == token)
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Scheduler for TimerQueue {
    fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    fn schedule(&mut self, token: ScheduleToken, at: Duration) {
        self.unschedule(token);
        self.pending.push((token, at));
    }

    fn unschedule(&mut self, token: ScheduleToken) {
        self.pending.retain(|&(pending, _)| pending != token);
    }
}

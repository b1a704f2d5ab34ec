// SPDX-License-Identifier: MPL-2.0
//! Time-driven animation primitives shared by every indicator.

mod animator;
mod clock;
mod scheduler;

pub use animator::{Sample, ValueAnimator};
pub use clock::{Clock, ManualClock, SystemClock};
pub use scheduler::{Context, ScheduleToken, Scheduler, TimerQueue};

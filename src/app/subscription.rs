// SPDX-License-Identifier: MPL-2.0
//! Frame tick subscription.

use super::Message;
use iced::{time, Subscription};
use std::time::Duration;

/// Interval between animation ticks (about 60 frames per second).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Ticks only while something is animating or a frame change is scheduled,
/// so an idle window does not wake up.
pub fn create_tick_subscription(animating: bool) -> Subscription<Message> {
    if animating {
        time::every(FRAME_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}

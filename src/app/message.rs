// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the demo.

use crate::config::Config;
use std::time::Instant;

/// Messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// The loading button was clicked.
    Pressed,
    /// The simulated work started by [`Message::Pressed`] is done.
    LoadingFinished,
    /// Animation frame tick while the indicator is running.
    Tick(Instant),
}

/// Runtime flags passed from `main.rs` into the application.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Configuration with command-line overrides already applied.
    pub config: Config,
}

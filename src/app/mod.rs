// SPDX-License-Identifier: MPL-2.0
//! Demo application hosting a single loading button.
//!
//! Clicking the button disables it and puts it into the loading state; after
//! the configured delay it is re-enabled and loading stops. The app owns the
//! clock and timer queue the indicator animates against, and drives them
//! from a frame tick subscription.

mod message;
mod subscription;

pub use message::{Flags, Message};

use crate::animation::{Clock, Context, SystemClock, TimerQueue};
use crate::config::{Config, DEFAULT_BUTTON_HEIGHT, DEFAULT_BUTTON_WIDTH};
use crate::error::Error;
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::widget::LoadingButton;
use iced::widget::{column, container, text};
use iced::{window, Element, Length, Subscription, Task, Theme};
use std::fmt;
use std::time::Duration;

pub const WINDOW_DEFAULT_WIDTH: f32 = 480.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 320.0;

pub struct App {
    /// `None` when the configured indicator could not be built.
    button: Option<LoadingButton>,
    error: Option<Error>,
    clock: SystemClock,
    timers: TimerQueue,
    loading_duration: Duration,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("button", &self.button)
            .field("error", &self.error)
            .field("pending_timers", &self.timers.pending_count())
            .finish()
    }
}

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires an Fn boot closure; flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        (Self::from_config(&flags.config), Task::none())
    }

    fn from_config(config: &Config) -> Self {
        let clock = SystemClock::new();
        let mut timers = TimerQueue::new();
        let (button, error) = match LoadingButton::new(config.label(), &config.indicator) {
            Ok(mut button) => {
                button.on_measure(
                    DEFAULT_BUTTON_WIDTH,
                    DEFAULT_BUTTON_HEIGHT,
                    &mut Context::new(&clock, &mut timers),
                );
                (Some(button), None)
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to create loading button");
                (None, Some(err))
            }
        };

        Self {
            button,
            error,
            clock,
            timers,
            loading_duration: config.loading_duration(),
        }
    }

    fn title(&self) -> String {
        "Loading Button".to_string()
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }

    /// An eagerly started indicator is not drawn until loading, so idle
    /// animation does not need frame ticks.
    fn is_animating(&self) -> bool {
        self.button
            .as_ref()
            .is_some_and(|button| button.is_loading() && button.is_animating())
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create_tick_subscription(self.is_animating())
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let Some(button) = self.button.as_mut() else {
            return Task::none();
        };
        let due = if matches!(message, Message::Tick(_)) {
            self.timers.take_due(self.clock.now())
        } else {
            Vec::new()
        };
        let mut ctx = Context::new(&self.clock, &mut self.timers);

        let task = match message {
            Message::Pressed => {
                button.set_enabled(false);
                button.set_loading(true, &mut ctx);
                let delay = self.loading_duration;
                Task::perform(
                    async move { tokio::time::sleep(delay).await },
                    |()| Message::LoadingFinished,
                )
            }
            Message::LoadingFinished => {
                button.set_enabled(true);
                button.set_loading(false, &mut ctx);
                Task::none()
            }
            Message::Tick(_) => {
                for token in due {
                    button.on_scheduled(token, &mut ctx);
                }
                button.tick(&mut ctx);
                Task::none()
            }
        };

        button.prepare(&mut ctx);
        // iced redraws after every update; drain the request.
        self.timers.take_redraw();
        task
    }

    fn view(&self) -> Element<'_, Message> {
        let content: Element<'_, Message> = match (&self.button, &self.error) {
            (Some(button), _) => column![
                crate::ui::view(
                    button,
                    Message::Pressed,
                    DEFAULT_BUTTON_WIDTH,
                    DEFAULT_BUTTON_HEIGHT
                ),
                text("Click to start loading").size(typography::CAPTION),
            ]
            .spacing(spacing::MD)
            .align_x(iced::Alignment::Center)
            .into(),
            (None, Some(err)) => text(err.to_string())
                .size(typography::LABEL)
                .color(palette::GRAY_700)
                .into(),
            (None, None) => text("").into(),
        };

        container(content)
            .padding(spacing::XL)
            .center(Length::Fill)
            .into()
    }
}

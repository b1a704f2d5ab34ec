// SPDX-License-Identifier: MPL-2.0
//! Self-drawing, self-animating indicator graphics.
//!
//! A [`Drawable`] knows its bounds and how to render into a [`Surface`].
//! Drawables that move also expose the [`Animatable`] capability; they pull
//! time from the [`Context`] clock on every [`Drawable::tick`] and ask the
//! host for redraws and delayed callbacks through the same context.

pub mod arc_spinner;
pub mod frame_animation;
pub mod image;
pub mod rotation;
pub mod surface;

pub use arc_spinner::ArcSpinner;
pub use frame_animation::{AnimationFrame, FrameAnimation};
pub use image::{Image, ImageFile, StaticImage};
pub use rotation::RotationAdapter;
pub use surface::{ArcStroke, Command, RecordingSurface, Saved, Surface};

use crate::animation::{Context, ScheduleToken};
use iced::Point;

/// Axis-aligned rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    #[must_use]
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle at the origin with the given size.
    #[must_use]
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Width, or zero when the rectangle is inverted.
    #[must_use]
    pub fn width(&self) -> f32 {
        (self.right - self.left).max(0.0)
    }

    /// Height, or zero when the rectangle is inverted.
    #[must_use]
    pub fn height(&self) -> f32 {
        (self.bottom - self.top).max(0.0)
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// True when there is nothing to draw into.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Shrinks every side by `amount`.
    #[must_use]
    pub fn inset(&self, amount: f32) -> Self {
        Self::new(
            self.left + amount,
            self.top + amount,
            self.right - amount,
            self.bottom - amount,
        )
    }
}

/// Compositing hint reported by a drawable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opacity {
    /// Draws nothing outside its strokes.
    Transparent,
    /// Covers its bounds with partially transparent pixels.
    Translucent,
    /// Covers its bounds completely.
    Opaque,
}

/// Start/stop capability of animated drawables.
///
/// Both calls must be idempotent: starting a running animation and stopping
/// an idle one change nothing.
pub trait Animatable {
    fn start(&mut self, ctx: &mut Context<'_>);

    /// Stops synchronously: once this returns, ticks and scheduled callbacks
    /// no longer mutate state.
    fn stop(&mut self, ctx: &mut Context<'_>);

    fn is_running(&self) -> bool;
}

/// An indicator graphic hosted by the loading button.
pub trait Drawable {
    fn draw(&self, surface: &mut dyn Surface);

    fn set_bounds(&mut self, bounds: Bounds);

    fn bounds(&self) -> Bounds;

    fn opacity(&self) -> Opacity {
        Opacity::Transparent
    }

    /// Advances time-driven state to the context clock.
    fn tick(&mut self, _ctx: &mut Context<'_>) {}

    /// Delivers a callback previously requested with
    /// [`Context::schedule`]. Returns `true` when the token belonged to
    /// this drawable.
    fn on_scheduled(&mut self, _token: ScheduleToken, _ctx: &mut Context<'_>) -> bool {
        false
    }

    fn as_animatable(&self) -> Option<&dyn Animatable> {
        None
    }

    fn as_animatable_mut(&mut self) -> Option<&mut dyn Animatable> {
        None
    }

    /// Running state, `false` for drawables that cannot animate.
    fn is_animating(&self) -> bool {
        self.as_animatable().is_some_and(Animatable::is_running)
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Continuous counter-clockwise rotation around any drawable.

use super::{Animatable, Bounds, Drawable, Opacity, Saved, Surface};
use crate::animation::{Context, ScheduleToken, ValueAnimator};
use std::time::Duration;

/// Default time for one full turn.
pub const DEFAULT_ROTATION_DURATION: Duration = Duration::from_millis(1000);

/// Spins the wrapped drawable about the centre of its bounds, one full turn
/// (0 → -360°) per `duration`.
pub struct RotationAdapter {
    inner: Box<dyn Drawable>,
    animator: ValueAnimator,
    angle: f32,
}

impl RotationAdapter {
    #[must_use]
    pub fn new(inner: Box<dyn Drawable>) -> Self {
        Self::with_duration(inner, DEFAULT_ROTATION_DURATION)
    }

    #[must_use]
    pub fn with_duration(inner: Box<dyn Drawable>, duration: Duration) -> Self {
        Self {
            inner,
            animator: ValueAnimator::new(0.0, -360.0, duration),
            angle: 0.0,
        }
    }

    /// Current rotation in degrees (zero or negative).
    #[must_use]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[must_use]
    pub fn inner(&self) -> &dyn Drawable {
        self.inner.as_ref()
    }
}

impl Animatable for RotationAdapter {
    /// Starts the rotation, and the wrapped drawable's own animation if it
    /// has one.
    fn start(&mut self, ctx: &mut Context<'_>) {
        if let Some(inner) = self.inner.as_animatable_mut() {
            inner.start(ctx);
        }
        if self.animator.is_running() {
            return;
        }
        self.animator.start(ctx.now());
        self.angle = self.animator.value();
        ctx.invalidate();
    }

    fn stop(&mut self, ctx: &mut Context<'_>) {
        if let Some(inner) = self.inner.as_animatable_mut() {
            inner.stop(ctx);
        }
        if !self.animator.is_running() {
            return;
        }
        self.animator.cancel();
        ctx.invalidate();
    }

    fn is_running(&self) -> bool {
        self.animator.is_running()
    }
}

impl Drawable for RotationAdapter {
    fn draw(&self, surface: &mut dyn Surface) {
        let pivot = self.inner.bounds().center();
        let mut saved = Saved::new(surface);
        saved.rotate_about(self.angle, pivot);
        self.inner.draw(&mut *saved);
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.inner.set_bounds(bounds);
    }

    fn bounds(&self) -> Bounds {
        self.inner.bounds()
    }

    fn opacity(&self) -> Opacity {
        Opacity::Transparent
    }

    fn tick(&mut self, ctx: &mut Context<'_>) {
        self.inner.tick(ctx);
        if let Some(sample) = self.animator.sample(ctx.now()) {
            self.angle = sample.value;
            ctx.invalidate();
        }
    }

    fn on_scheduled(&mut self, token: ScheduleToken, ctx: &mut Context<'_>) -> bool {
        self.inner.on_scheduled(token, ctx)
    }

    fn as_animatable(&self) -> Option<&dyn Animatable> {
        Some(self)
    }

    fn as_animatable_mut(&mut self) -> Option<&mut dyn Animatable> {
        Some(self)
    }
}

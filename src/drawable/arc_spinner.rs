// SPDX-License-Identifier: MPL-2.0
//! Arc spinner: a stroked arc that rotates while growing and shrinking.
//!
//! Two independent linear animations drive the arc. The angle animation
//! rotates the arc's reference point once per second; the sweep animation
//! runs `0 → 360 - 2·MIN_SWEEP` once per second. Each time the sweep
//! animation repeats, the spinner flips between a growing and a shrinking
//! phase, and entering the shrinking phase shifts the reference by
//! `2·MIN_SWEEP` so the arc's tail picks up where its head stopped.

use super::{Animatable, ArcStroke, Bounds, Drawable, Opacity, Surface};
use crate::animation::{Context, ValueAnimator};
use iced::Color;
use std::time::Duration;

/// Shortest visible arc, in degrees.
pub const MIN_SWEEP: f32 = 60.0;

/// Upper bound of the animated sweep, in degrees.
pub const MAX_SWEEP: f32 = 360.0 - 2.0 * MIN_SWEEP;

pub const ANGLE_ANIMATION_DURATION: Duration = Duration::from_millis(1000);
pub const SWEEP_ANIMATION_DURATION: Duration = Duration::from_millis(1000);

/// Start angle and length of the arc drawn for the current state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub start: f32,
    pub sweep: f32,
}

/// Animated arc indicator.
#[derive(Debug, Clone)]
pub struct ArcSpinner {
    stroke: ArcStroke,
    bounds: Bounds,
    arc_bounds: Bounds,
    angle_animator: ValueAnimator,
    sweep_animator: ValueAnimator,
    current_angle: f32,
    current_sweep: f32,
    angle_offset: f32,
    decreasing: bool,
    running: bool,
}

impl ArcSpinner {
    /// Creates an idle spinner. Color and stroke width are fixed for the
    /// spinner's lifetime.
    #[must_use]
    pub fn new(color: Color, border_width: f32) -> Self {
        Self {
            stroke: ArcStroke {
                color,
                width: border_width,
            },
            bounds: Bounds::default(),
            arc_bounds: Bounds::default(),
            angle_animator: ValueAnimator::new(0.0, 360.0, ANGLE_ANIMATION_DURATION),
            sweep_animator: ValueAnimator::new(0.0, MAX_SWEEP, SWEEP_ANIMATION_DURATION),
            current_angle: 0.0,
            current_sweep: 0.0,
            angle_offset: 0.0,
            decreasing: false,
            running: false,
        }
    }

    #[must_use]
    pub fn stroke(&self) -> ArcStroke {
        self.stroke
    }

    #[must_use]
    pub fn current_angle(&self) -> f32 {
        self.current_angle
    }

    #[must_use]
    pub fn current_sweep(&self) -> f32 {
        self.current_sweep
    }

    #[must_use]
    pub fn angle_offset(&self) -> f32 {
        self.angle_offset
    }

    #[must_use]
    pub fn is_decreasing(&self) -> bool {
        self.decreasing
    }

    /// Rectangle the arc is stroked in: the bounds pulled in by half the
    /// stroke plus half a pixel, so the stroke never gets clipped.
    #[must_use]
    pub fn arc_bounds(&self) -> Bounds {
        self.arc_bounds
    }

    /// Geometry of the arc for the current animation state.
    #[must_use]
    pub fn segment(&self) -> ArcSegment {
        if self.decreasing {
            ArcSegment {
                start: self.current_angle - self.angle_offset,
                sweep: self.current_sweep + MIN_SWEEP,
            }
        } else {
            ArcSegment {
                start: self.current_angle + self.current_sweep - self.angle_offset,
                sweep: 360.0 - self.current_sweep - MIN_SWEEP,
            }
        }
    }

    /// Applies `repeats` completed sweep passes.
    ///
    /// Every pass flips the phase; only passes that enter the shrinking
    /// phase move the offset.
    fn complete_sweep_passes(&mut self, repeats: u64) {
        if repeats == 0 {
            return;
        }
        let entering_decrease = if self.decreasing {
            repeats / 2
        } else {
            repeats.div_ceil(2)
        };
        #[allow(clippy::cast_precision_loss)]
        let shift = (entering_decrease % 3) as f32 * 2.0 * MIN_SWEEP;
        self.angle_offset = (self.angle_offset + shift) % 360.0;
        if repeats % 2 == 1 {
            self.decreasing = !self.decreasing;
        }
    }
}

impl Animatable for ArcSpinner {
    fn start(&mut self, ctx: &mut Context<'_>) {
        if self.running {
            return;
        }
        let now = ctx.now();
        self.running = true;
        self.angle_animator.start(now);
        self.sweep_animator.start(now);
        self.current_angle = self.angle_animator.value();
        self.current_sweep = self.sweep_animator.value();
        ctx.invalidate();
    }

    fn stop(&mut self, ctx: &mut Context<'_>) {
        if !self.running {
            return;
        }
        self.running = false;
        self.angle_animator.cancel();
        self.sweep_animator.cancel();
        ctx.invalidate();
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

impl Drawable for ArcSpinner {
    fn draw(&self, surface: &mut dyn Surface) {
        if self.arc_bounds.is_empty() {
            return;
        }
        let segment = self.segment();
        surface.stroke_arc(self.arc_bounds, segment.start, segment.sweep, self.stroke);
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.arc_bounds = bounds.inset(self.stroke.width / 2.0 + 0.5);
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn opacity(&self) -> Opacity {
        Opacity::Transparent
    }

    fn tick(&mut self, ctx: &mut Context<'_>) {
        if !self.running {
            return;
        }
        let now = ctx.now();
        if let Some(sample) = self.angle_animator.sample(now) {
            self.current_angle = sample.value;
        }
        if let Some(sample) = self.sweep_animator.sample(now) {
            self.complete_sweep_passes(sample.repeats);
            self.current_sweep = sample.value;
        }
        ctx.invalidate();
    }

    fn as_animatable(&self) -> Option<&dyn Animatable> {
        Some(self)
    }

    fn as_animatable_mut(&mut self) -> Option<&mut dyn Animatable> {
        Some(self)
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Flip-book indicator: a sequence of bitmaps shown one after another.
//!
//! Frame changes are not driven by the clock tick. Each frame asks the host
//! to call back after its duration through [`Context::schedule`], and the
//! host delivers the token to [`Drawable::on_scheduled`].

use super::image::{loader_frames, Image};
use super::{Animatable, Bounds, Drawable, Opacity, Surface};
use crate::animation::{Context, ScheduleToken};
use crate::error::Result;
use std::time::Duration;

/// Number of frames in the built-in sequence.
pub const LOADER_FRAME_COUNT: usize = 12;

/// One bitmap and how long it stays on screen.
#[derive(Debug, Clone)]
pub struct AnimationFrame {
    pub image: Image,
    pub duration: Duration,
}

#[derive(Debug, Clone)]
pub struct FrameAnimation {
    frames: Vec<AnimationFrame>,
    current: usize,
    one_shot: bool,
    running: bool,
    token: ScheduleToken,
    bounds: Bounds,
}

impl FrameAnimation {
    /// Creates an idle, looping animation over `frames`.
    #[must_use]
    pub fn new(frames: Vec<AnimationFrame>) -> Self {
        Self {
            frames,
            current: 0,
            one_shot: false,
            running: false,
            token: ScheduleToken::next(),
            bounds: Bounds::default(),
        }
    }

    /// The built-in loader graphic turned into a rotating flip-book.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded graphic cannot be rasterized.
    pub fn loader(frame_duration: Duration) -> Result<Self> {
        let frames = loader_frames(LOADER_FRAME_COUNT)?
            .into_iter()
            .map(|image| AnimationFrame {
                image,
                duration: frame_duration,
            })
            .collect();
        Ok(Self::new(frames))
    }

    /// Stops on the last frame instead of looping.
    #[must_use]
    pub fn one_shot(mut self, one_shot: bool) -> Self {
        self.one_shot = one_shot;
        self
    }

    #[must_use]
    pub fn is_one_shot(&self) -> bool {
        self.one_shot
    }

    /// How long frame `index` stays on screen.
    #[must_use]
    pub fn frame_duration(&self, index: usize) -> Option<Duration> {
        self.frames.get(index).map(|frame| frame.duration)
    }

    #[must_use]
    pub fn current_frame(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Token this animation schedules its frame changes under.
    #[must_use]
    pub fn token(&self) -> ScheduleToken {
        self.token
    }

    fn schedule_current(&self, ctx: &mut Context<'_>) {
        if let Some(frame) = self.frames.get(self.current) {
            ctx.schedule(self.token, frame.duration);
        }
    }
}

impl Animatable for FrameAnimation {
    /// Starts from the first frame. A single-frame sequence is shown
    /// without scheduling anything.
    fn start(&mut self, ctx: &mut Context<'_>) {
        if self.running {
            return;
        }
        self.running = true;
        self.current = 0;
        if self.frames.len() > 1 {
            self.schedule_current(ctx);
        }
        ctx.invalidate();
    }

    fn stop(&mut self, ctx: &mut Context<'_>) {
        if !self.running {
            return;
        }
        self.running = false;
        ctx.unschedule(self.token);
        ctx.invalidate();
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

impl Drawable for FrameAnimation {
    fn draw(&self, surface: &mut dyn Surface) {
        if self.bounds.is_empty() {
            return;
        }
        if let Some(frame) = self.frames.get(self.current) {
            surface.draw_image(&frame.image, self.bounds);
        }
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn opacity(&self) -> Opacity {
        Opacity::Translucent
    }

    fn on_scheduled(&mut self, token: ScheduleToken, ctx: &mut Context<'_>) -> bool {
        if token != self.token {
            return false;
        }
        if !self.running {
            return true;
        }

        let next = self.current + 1;
        if next >= self.frames.len() {
            if self.one_shot {
                self.running = false;
                return true;
            }
            self.current = 0;
        } else {
            self.current = next;
        }
        self.schedule_current(ctx);
        ctx.invalidate();
        true
    }

    fn as_animatable(&self) -> Option<&dyn Animatable> {
        Some(self)
    }

    fn as_animatable_mut(&mut self) -> Option<&mut dyn Animatable> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Clock, ManualClock, TimerQueue};
    use crate::drawable::{Command, RecordingSurface};

    fn frames(count: u32) -> Vec<AnimationFrame> {
        (1..=count)
            .map(|width| AnimationFrame {
                image: Image::from_rgba(width, 1, vec![0; width as usize * 4]),
                duration: Duration::from_millis(100),
            })
            .collect()
    }

    /// Fires every due token at `at` into `animation`.
    fn run_to(animation: &mut FrameAnimation, clock: &ManualClock, queue: &mut TimerQueue, at: u64) {
        clock.set(Duration::from_millis(at));
        for token in queue.take_due(clock.now()) {
            animation.on_scheduled(token, &mut Context::new(clock, &mut *queue));
        }
    }

    #[test]
    fn start_schedules_first_frame_change() {
        let clock = ManualClock::new();
        let mut queue = TimerQueue::new();
        let mut animation = FrameAnimation::new(frames(3));
        animation.start(&mut Context::new(&clock, &mut queue));

        assert!(animation.is_running());
        assert!(queue.is_pending(animation.token()));
        assert!(queue.take_redraw());
    }

    #[test]
    fn frames_advance_and_loop() {
        let clock = ManualClock::new();
        let mut queue = TimerQueue::new();
        let mut animation = FrameAnimation::new(frames(3));
        animation.start(&mut Context::new(&clock, &mut queue));

        run_to(&mut animation, &clock, &mut queue, 100);
        assert_eq!(animation.current_frame(), 1);
        run_to(&mut animation, &clock, &mut queue, 200);
        assert_eq!(animation.current_frame(), 2);
        run_to(&mut animation, &clock, &mut queue, 300);
        assert_eq!(animation.current_frame(), 0);
    }

    #[test]
    fn one_shot_stops_on_last_frame() {
        let clock = ManualClock::new();
        let mut queue = TimerQueue::new();
        let mut animation = FrameAnimation::new(frames(2)).one_shot(true);
        animation.start(&mut Context::new(&clock, &mut queue));

        run_to(&mut animation, &clock, &mut queue, 100);
        run_to(&mut animation, &clock, &mut queue, 200);

        assert_eq!(animation.current_frame(), 1);
        assert!(!animation.is_running());
        assert_eq!(queue.pending_count(), 0);
    }

    #[test]
    fn stop_cancels_pending_frame() {
        let clock = ManualClock::new();
        let mut queue = TimerQueue::new();
        let mut animation = FrameAnimation::new(frames(3));
        animation.start(&mut Context::new(&clock, &mut queue));
        animation.stop(&mut Context::new(&clock, &mut queue));

        assert!(!queue.is_pending(animation.token()));
        run_to(&mut animation, &clock, &mut queue, 500);
        assert_eq!(animation.current_frame(), 0);
    }

    #[test]
    fn foreign_tokens_are_ignored() {
        let clock = ManualClock::new();
        let mut queue = TimerQueue::new();
        let mut animation = FrameAnimation::new(frames(3));
        animation.start(&mut Context::new(&clock, &mut queue));

        let handled = animation.on_scheduled(ScheduleToken::next(), &mut Context::new(&clock, &mut queue));
        assert!(!handled);
        assert_eq!(animation.current_frame(), 0);
    }

    #[test]
    fn single_frame_schedules_nothing() {
        let clock = ManualClock::new();
        let mut queue = TimerQueue::new();
        let mut animation = FrameAnimation::new(frames(1));
        animation.start(&mut Context::new(&clock, &mut queue));

        assert_eq!(queue.pending_count(), 0);
        assert!(animation.is_running());
    }

    #[test]
    fn draws_current_frame() {
        let clock = ManualClock::new();
        let mut queue = TimerQueue::new();
        let mut animation = FrameAnimation::new(frames(3));
        animation.set_bounds(Bounds::from_size(10.0, 10.0));
        animation.start(&mut Context::new(&clock, &mut queue));
        run_to(&mut animation, &clock, &mut queue, 100);

        let mut surface = RecordingSurface::new();
        animation.draw(&mut surface);
        assert_eq!(
            surface.commands(),
            &[Command::DrawImage {
                width: 2,
                height: 1,
                bounds: Bounds::from_size(10.0, 10.0),
            }]
        );
    }

    #[test]
    fn loader_builds_default_sequence() {
        let animation = FrameAnimation::loader(Duration::from_millis(80)).expect("loader frames");
        assert_eq!(animation.frame_count(), LOADER_FRAME_COUNT);
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Drawing surface port.
//!
//! Drawables render through [`Surface`] only; the iced adapter lives in
//! `crate::ui::canvas_surface` and [`RecordingSurface`] captures calls for
//! tests and benchmarks.

use super::{Bounds, Image};
use iced::{Color, Point};
use std::ops::{Deref, DerefMut};

/// Stroke parameters of an arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcStroke {
    pub color: Color,
    pub width: f32,
}

/// Canvas-like drawing target.
///
/// Angles are in degrees, measured clockwise from the positive x axis (three
/// o'clock), matching screen coordinates where y grows downwards.
pub trait Surface {
    /// Pushes the current transform.
    fn save(&mut self);

    /// Pops the transform pushed by the matching [`Surface::save`].
    fn restore(&mut self);

    fn translate(&mut self, dx: f32, dy: f32);

    /// Rotates subsequent drawing about the current origin.
    fn rotate(&mut self, degrees: f32);

    /// Strokes the part of the oval inscribed in `oval` that starts at
    /// `start` and extends `sweep` degrees.
    fn stroke_arc(&mut self, oval: Bounds, start: f32, sweep: f32, stroke: ArcStroke);

    fn draw_image(&mut self, image: &Image, bounds: Bounds);

    /// Rotates subsequent drawing about `pivot`.
    fn rotate_about(&mut self, degrees: f32, pivot: Point) {
        self.translate(pivot.x, pivot.y);
        self.rotate(degrees);
        self.translate(-pivot.x, -pivot.y);
    }
}

/// Scoped transform: saves on creation, restores on drop.
///
/// Dropping happens on every exit path, unwinding included, so a panicking
/// delegate cannot leave the surface rotated.
pub struct Saved<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: Surface + ?Sized> Saved<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: Surface + ?Sized> Deref for Saved<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &*self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for Saved<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut *self.surface
    }
}

impl<S: Surface + ?Sized> Drop for Saved<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Save,
    Restore,
    Translate { dx: f32, dy: f32 },
    Rotate { degrees: f32 },
    StrokeArc {
        oval: Bounds,
        start: f32,
        sweep: f32,
        stroke: ArcStroke,
    },
    DrawImage { width: u32, height: u32, bounds: Bounds },
}

/// Surface that records every call instead of rasterizing.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<Command>,
    depth: usize,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Number of saves not yet matched by a restore.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Arcs stroked so far, as `(start, sweep)` pairs.
    #[must_use]
    pub fn arcs(&self) -> Vec<(f32, f32)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                Command::StrokeArc { start, sweep, .. } => Some((*start, *sweep)),
                _ => None,
            })
            .collect()
    }

    /// Sum of the rotations recorded so far.
    #[must_use]
    pub fn total_rotation(&self) -> f32 {
        self.commands
            .iter()
            .filter_map(|command| match command {
                Command::Rotate { degrees } => Some(*degrees),
                _ => None,
            })
            .sum()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.depth = 0;
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.depth += 1;
        self.commands.push(Command::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(Command::Restore);
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.commands.push(Command::Translate { dx, dy });
    }

    fn rotate(&mut self, degrees: f32) {
        self.commands.push(Command::Rotate { degrees });
    }

    fn stroke_arc(&mut self, oval: Bounds, start: f32, sweep: f32, stroke: ArcStroke) {
        self.commands.push(Command::StrokeArc {
            oval,
            start,
            sweep,
            stroke,
        });
    }

    fn draw_image(&mut self, image: &Image, bounds: Bounds) {
        self.commands.push(Command::DrawImage {
            width: image.width(),
            height: image.height(),
            bounds,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_guard_restores_on_drop() {
        let mut surface = RecordingSurface::new();
        {
            let mut saved = Saved::new(&mut surface);
            saved.rotate(45.0);
            assert_eq!(saved.depth(), 1);
        }
        assert_eq!(surface.depth(), 0);
        assert_eq!(
            surface.commands(),
            &[Command::Save, Command::Rotate { degrees: 45.0 }, Command::Restore]
        );
    }

    #[test]
    fn saved_guard_restores_while_unwinding() {
        let mut surface = RecordingSurface::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut saved = Saved::new(&mut surface);
            saved.rotate(10.0);
            panic!("delegate failed");
        }));

        assert!(result.is_err());
        assert_eq!(surface.depth(), 0);
        assert_eq!(surface.commands().last(), Some(&Command::Restore));
    }

    #[test]
    fn rotate_about_brackets_rotation_with_translations() {
        let mut surface = RecordingSurface::new();
        surface.rotate_about(-90.0, Point::new(20.0, 10.0));

        assert_eq!(
            surface.commands(),
            &[
                Command::Translate { dx: 20.0, dy: 10.0 },
                Command::Rotate { degrees: -90.0 },
                Command::Translate { dx: -20.0, dy: -10.0 },
            ]
        );
    }
}

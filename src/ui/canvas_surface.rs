// SPDX-License-Identifier: MPL-2.0
//! [`Surface`] implementation on top of an iced canvas frame.

use crate::drawable::{ArcStroke, Bounds, Image, Surface};
use iced::widget::canvas::{self, path, Frame, Path, Stroke};
use iced::{Point, Rectangle, Size, Vector};

/// Largest angle, in degrees, covered by one line segment of an arc.
const ARC_STEP_DEGREES: f32 = 6.0;

/// Points along the oval inscribed in `oval`, from `start` through
/// `start + sweep` degrees.
///
/// Angles run clockwise from three o'clock. Always yields at least two
/// points so that tiny sweeps still produce a visible stroke.
#[must_use]
pub fn arc_points(oval: Bounds, start: f32, sweep: f32) -> Vec<Point> {
    let center = oval.center();
    let rx = oval.width() / 2.0;
    let ry = oval.height() / 2.0;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let segments = (sweep.abs() / ARC_STEP_DEGREES).ceil().max(1.0) as usize;

    (0..=segments)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f32 / segments as f32;
            let angle = (start + sweep * t).to_radians();
            Point::new(center.x + rx * angle.cos(), center.y + ry * angle.sin())
        })
        .collect()
}

/// Borrows a canvas frame for one draw pass.
pub struct FrameSurface<'a> {
    frame: &'a mut Frame,
}

impl<'a> FrameSurface<'a> {
    pub fn new(frame: &'a mut Frame) -> Self {
        Self { frame }
    }
}

impl Surface for FrameSurface<'_> {
    fn save(&mut self) {
        self.frame.push_transform();
    }

    fn restore(&mut self) {
        self.frame.pop_transform();
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.frame.translate(Vector::new(dx, dy));
    }

    fn rotate(&mut self, degrees: f32) {
        self.frame.rotate(degrees.to_radians());
    }

    fn stroke_arc(&mut self, oval: Bounds, start: f32, sweep: f32, stroke: ArcStroke) {
        let points = arc_points(oval, start, sweep);
        let Some((first, rest)) = points.split_first() else {
            return;
        };

        let mut builder = path::Builder::new();
        builder.move_to(*first);
        for point in rest {
            builder.line_to(*point);
        }
        let arc: Path = builder.build();

        self.frame.stroke(
            &arc,
            Stroke::default()
                .with_width(stroke.width)
                .with_color(stroke.color)
                .with_line_cap(canvas::LineCap::Square),
        );
    }

    fn draw_image(&mut self, image: &Image, bounds: Bounds) {
        let rectangle = Rectangle::new(
            Point::new(bounds.left, bounds.top),
            Size::new(bounds.width(), bounds.height()),
        );
        self.frame
            .draw_image(rectangle, canvas::Image::new(image.handle().clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn arc_points_start_at_three_oclock() {
        let points = arc_points(Bounds::from_size(20.0, 20.0), 0.0, 90.0);
        let first = points[0];
        assert_abs_diff_eq!(first.x, 20.0, epsilon = 1e-4);
        assert_abs_diff_eq!(first.y, 10.0, epsilon = 1e-4);
    }

    #[test]
    fn positive_sweep_runs_clockwise_on_screen() {
        let points = arc_points(Bounds::from_size(20.0, 20.0), 0.0, 90.0);
        let last = points[points.len() - 1];
        // Six o'clock: y grows downwards.
        assert_abs_diff_eq!(last.x, 10.0, epsilon = 1e-4);
        assert_abs_diff_eq!(last.y, 20.0, epsilon = 1e-4);
    }

    #[test]
    fn segment_count_follows_sweep() {
        assert_eq!(arc_points(Bounds::from_size(10.0, 10.0), 0.0, 60.0).len(), 11);
        assert_eq!(arc_points(Bounds::from_size(10.0, 10.0), 0.0, 0.0).len(), 2);
    }

    #[test]
    fn oval_bounds_produce_ellipse() {
        let points = arc_points(Bounds::from_size(40.0, 20.0), 90.0, 0.0);
        assert_abs_diff_eq!(points[0].x, 20.0, epsilon = 1e-4);
        assert_abs_diff_eq!(points[0].y, 20.0, epsilon = 1e-4);
    }
}

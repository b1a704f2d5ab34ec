// SPDX-License-Identifier: MPL-2.0
//! iced view of a [`LoadingButton`].
//!
//! The button's content is a stack: the label text underneath and a canvas
//! on top that renders the indicator through [`FrameSurface`].

use super::canvas_surface::FrameSurface;
use crate::ui::design_tokens::typography;
use crate::ui::styles;
use crate::widget::LoadingButton;
use iced::widget::canvas::{self, Canvas, Frame, Geometry};
use iced::widget::{button, container, stack, text};
use iced::{mouse, Element, Length, Rectangle, Renderer, Theme};

/// Canvas program drawing the button's indicator.
pub struct IndicatorCanvas<'a> {
    button: &'a LoadingButton,
}

impl<'a> IndicatorCanvas<'a> {
    #[must_use]
    pub fn new(button: &'a LoadingButton) -> Self {
        Self { button }
    }
}

impl<Message> canvas::Program<Message> for IndicatorCanvas<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        if !self.button.is_loading() {
            return Vec::new();
        }
        let mut frame = Frame::new(renderer, bounds.size());
        self.button
            .draw_indicator(&mut FrameSurface::new(&mut frame));
        vec![frame.into_geometry()]
    }
}

/// Renders `loading_button` as a `width` x `height` iced button.
///
/// `on_press` is only attached while the button is enabled.
pub fn view<'a, Message: Clone + 'a>(
    loading_button: &'a LoadingButton,
    on_press: Message,
    width: f32,
    height: f32,
) -> Element<'a, Message> {
    let label = container(text(loading_button.label()).size(typography::LABEL))
        .center(Length::Fill);
    let indicator = Canvas::new(IndicatorCanvas::new(loading_button))
        .width(Length::Fill)
        .height(Length::Fill);

    button(stack![label, indicator])
        .padding(0)
        .width(Length::Fixed(width))
        .height(Length::Fixed(height))
        .style(styles::button::primary)
        .on_press_maybe(loading_button.is_enabled().then_some(on_press))
        .into()
}

// SPDX-License-Identifier: MPL-2.0
//! iced rendering of the loading button.
//!
//! - [`canvas_surface`] - [`crate::drawable::Surface`] backed by a canvas frame
//! - [`loading_button`] - Button view with the label and indicator layers
//! - [`styles`] - Centralized styling
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)

pub mod canvas_surface;
pub mod design_tokens;
pub mod loading_button;
pub mod styles;

pub use canvas_surface::FrameSurface;
pub use loading_button::{view, IndicatorCanvas};

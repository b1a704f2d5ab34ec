// SPDX-License-Identifier: MPL-2.0
//! The loading button and its indicator factory.

pub mod indicator;
pub mod loading_button;

pub use indicator::{IndicatorKind, IndicatorSpec};
pub use loading_button::{indicator_bounds, LoadingButton};

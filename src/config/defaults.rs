// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Indicator**: Loader selection and layout
//! - **Arc**: Arc spinner stroke
//! - **Frames**: Flip-book timing
//! - **Demo**: Demo host behavior

// ==========================================================================
// Indicator Defaults
// ==========================================================================

/// Indicator selector used when none is configured (arc spinner).
pub const DEFAULT_INDICATOR_TYPE: i64 = 0;

/// Inset, in pixels, between the button's content box and the indicator.
pub const DEFAULT_PADDING: f32 = 30.0;

/// Whether image indicators rotate by default.
pub const DEFAULT_AUTO_ROTATE: bool = false;

/// Whether a freshly built indicator starts animating before the button is
/// first put into the loading state.
pub const DEFAULT_START_ON_BUILD: bool = true;

// ==========================================================================
// Arc Defaults
// ==========================================================================

/// Arc color as a hex string (gray).
pub const DEFAULT_ARC_COLOR: &str = "#888888";

/// Arc stroke width in pixels.
pub const DEFAULT_ARC_STROKE_WIDTH: f32 = 5.0;

// ==========================================================================
// Frames Defaults
// ==========================================================================

/// Time each frame of the built-in flip-book stays on screen.
pub const DEFAULT_FRAME_DURATION_MS: u64 = 100;

/// Whether flip-books stop on their last frame instead of looping.
pub const DEFAULT_FRAME_ONE_SHOT: bool = false;

// ==========================================================================
// Demo Defaults
// ==========================================================================

/// Label shown on the demo button.
pub const DEFAULT_LABEL: &str = "Submit";

/// How long the demo keeps the button loading after a press.
pub const DEFAULT_LOADING_SECS: u64 = 7;

/// Demo button size in pixels.
pub const DEFAULT_BUTTON_WIDTH: f32 = 240.0;
pub const DEFAULT_BUTTON_HEIGHT: f32 = 100.0;

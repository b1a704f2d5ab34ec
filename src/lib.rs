// SPDX-License-Identifier: MPL-2.0
//! `loading_button` is a button widget for the Iced GUI toolkit that swaps
//! its label for an animated loading indicator.
//!
//! The indicator is a self-animating [`drawable::Drawable`]: an arc spinner,
//! a frame-by-frame flip-book, or a still or rotating image. The
//! [`widget::LoadingButton`] controller owns one indicator, positions it
//! inside the button and starts or stops it with the loading state. Time
//! and redraw requests flow through [`animation::Context`], so everything
//! below [`ui`] runs headless in tests.

#![doc(html_root_url = "https://docs.rs/loading_button/0.1.0")]

pub mod animation;
pub mod app;
pub mod config;
pub mod drawable;
pub mod error;
pub mod ui;
pub mod widget;

#[cfg(test)]
mod test_utils;

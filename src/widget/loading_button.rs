// SPDX-License-Identifier: MPL-2.0
//! Loading button controller.
//!
//! Owns the label, the loading flag and exactly one indicator. While
//! loading, the label is blanked and the indicator is drawn in its place;
//! otherwise the label captured at construction is shown again.
//!
//! The built-in indicator is described by an [`IndicatorSpec`] and built the
//! first time it is needed. Custom indicators can replace it at any time with
//! [`LoadingButton::set_new_loader_drawable`].

use super::indicator::{IndicatorKind, IndicatorSpec};
use crate::animation::{Context, ScheduleToken};
use crate::config::IndicatorConfig;
use crate::drawable::{Bounds, Drawable, RotationAdapter, Surface};
use crate::error::Result;

/// Where the indicator goes inside a `width` x `height` content box: a
/// square of side `height - 2 * padding`, centred horizontally.
///
/// Boxes narrower than they are tall are not guarded against; the square
/// then overflows the box horizontally.
#[must_use]
pub fn indicator_bounds(width: f32, height: f32, padding: f32) -> Bounds {
    let offset = (width - height) / 2.0;
    Bounds::new(
        offset + padding,
        padding,
        width - offset - padding,
        height - padding,
    )
}

enum IndicatorSlot {
    /// Not built yet.
    Pending(IndicatorSpec),
    Ready(Box<dyn Drawable>),
    /// Only observable while the pending spec is being turned into a drawable.
    Building,
}

pub struct LoadingButton {
    button_text: String,
    label: String,
    loading: bool,
    enabled: bool,
    padding: f32,
    start_on_build: bool,
    width: f32,
    height: f32,
    radius: f32,
    slot: IndicatorSlot,
}

impl std::fmt::Debug for LoadingButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadingButton")
            .field("button_text", &self.button_text)
            .field("loading", &self.loading)
            .field("enabled", &self.enabled)
            .field("indicator_built", &self.indicator().is_some())
            .finish()
    }
}

impl LoadingButton {
    /// Creates a button showing `label`.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::error::Error::InvalidParameter`] when the
    /// configured indicator type is unknown, and with config or image errors
    /// when the indicator's resources cannot be prepared. No button is
    /// produced in that case.
    pub fn new(label: impl Into<String>, config: &IndicatorConfig) -> Result<Self> {
        let spec = IndicatorSpec::from_config(config)?;
        let button_text = label.into();
        tracing::debug!(kind = %spec.kind(), padding = config.padding(), "loading button created");

        Ok(Self {
            label: button_text.clone(),
            button_text,
            loading: false,
            enabled: true,
            padding: config.padding(),
            start_on_build: config.start_on_build(),
            width: 0.0,
            height: 0.0,
            radius: 0.0,
            slot: IndicatorSlot::Pending(spec),
        })
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Enters or leaves the loading state.
    ///
    /// Starts or stops an animatable indicator to match, then requests a
    /// redraw. Setting the current value again re-issues the start/stop,
    /// which indicators treat as a no-op.
    pub fn set_loading(&mut self, loading: bool, ctx: &mut Context<'_>) {
        self.ensure_built(ctx);
        if let Some(animatable) = self.indicator_mut().and_then(Drawable::as_animatable_mut) {
            if loading {
                animatable.start(ctx);
            } else {
                animatable.stop(ctx);
            }
        }
        if self.loading != loading {
            tracing::debug!(loading, "loading state changed");
        }
        self.loading = loading;
        ctx.invalidate();
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Label currently shown: empty while loading once a draw pass has run.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Label captured at construction.
    #[must_use]
    pub fn button_text(&self) -> &str {
        &self.button_text
    }

    #[must_use]
    pub fn padding(&self) -> f32 {
        self.padding
    }

    /// Half the measured width.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Kind of the pending built-in indicator, `None` once an indicator has
    /// been built or replaced.
    #[must_use]
    pub fn pending_kind(&self) -> Option<IndicatorKind> {
        match &self.slot {
            IndicatorSlot::Pending(spec) => Some(spec.kind()),
            IndicatorSlot::Ready(_) | IndicatorSlot::Building => None,
        }
    }

    /// The built indicator, if any.
    #[must_use]
    pub fn indicator(&self) -> Option<&dyn Drawable> {
        match &self.slot {
            IndicatorSlot::Ready(drawable) => Some(drawable.as_ref()),
            IndicatorSlot::Pending(_) | IndicatorSlot::Building => None,
        }
    }

    fn indicator_mut(&mut self) -> Option<&mut dyn Drawable> {
        match &mut self.slot {
            IndicatorSlot::Ready(drawable) => Some(drawable.as_mut()),
            IndicatorSlot::Pending(_) | IndicatorSlot::Building => None,
        }
    }

    /// Whether the indicator is built and animating.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.indicator().is_some_and(Drawable::is_animating)
    }

    /// Records the content box size after layout.
    ///
    /// The first measure builds the indicator and, with `start_on_build`,
    /// starts it before the button is ever put into the loading state.
    pub fn on_measure(&mut self, width: f32, height: f32, ctx: &mut Context<'_>) {
        self.width = width;
        self.height = height;
        self.radius = width / 2.0;
        self.ensure_built(ctx);
        let bounds = self.layout();
        if let Some(indicator) = self.indicator_mut() {
            indicator.set_bounds(bounds);
        }
    }

    /// Updates the visible label and builds the indicator if loading.
    pub fn prepare(&mut self, ctx: &mut Context<'_>) {
        if self.loading {
            self.label.clear();
            self.ensure_built(ctx);
        } else if self.label != self.button_text {
            self.label.clone_from(&self.button_text);
        }
    }

    /// Draws the indicator when loading. The label is rendered by the host.
    pub fn draw_indicator(&self, surface: &mut dyn Surface) {
        if !self.loading {
            return;
        }
        if let Some(indicator) = self.indicator() {
            indicator.draw(surface);
        }
    }

    /// One draw pass: label switch, then indicator.
    pub fn on_draw(&mut self, surface: &mut dyn Surface, ctx: &mut Context<'_>) {
        self.prepare(ctx);
        self.draw_indicator(surface);
    }

    /// Advances the indicator's animation to the context clock.
    pub fn tick(&mut self, ctx: &mut Context<'_>) {
        if let Some(indicator) = self.indicator_mut() {
            indicator.tick(ctx);
        }
    }

    /// Routes a due scheduler token to the indicator.
    pub fn on_scheduled(&mut self, token: ScheduleToken, ctx: &mut Context<'_>) -> bool {
        self.indicator_mut()
            .is_some_and(|indicator| indicator.on_scheduled(token, ctx))
    }

    /// Replaces the indicator with a custom drawable.
    ///
    /// The current indicator is stopped before it is dropped, so it cannot
    /// keep scheduling frames or requesting redraws. The new drawable is
    /// positioned with the current padding. With `auto_rotate` it is wrapped
    /// in a [`RotationAdapter`], which starts spinning when the button is (or
    /// next becomes) loading; without it, an animatable drawable is started
    /// right away.
    ///
    /// Bitmaps rasterized from SVG are plain images here and are safe to
    /// pass; the drawable itself must not assume it is drawn on any
    /// particular thread other than the UI thread.
    pub fn set_new_loader_drawable(
        &mut self,
        drawable: Box<dyn Drawable>,
        auto_rotate: bool,
        ctx: &mut Context<'_>,
    ) {
        if let Some(previous) = self.indicator_mut().and_then(Drawable::as_animatable_mut) {
            previous.stop(ctx);
        }

        let mut drawable: Box<dyn Drawable> = if auto_rotate {
            Box::new(RotationAdapter::new(drawable))
        } else {
            drawable
        };
        drawable.set_bounds(self.layout());

        let start_now = !auto_rotate || self.loading;
        if start_now {
            if let Some(animatable) = drawable.as_animatable_mut() {
                animatable.start(ctx);
            }
        }

        tracing::debug!(auto_rotate, "loader drawable replaced");
        self.slot = IndicatorSlot::Ready(drawable);
        ctx.invalidate();
    }

    fn layout(&self) -> Bounds {
        indicator_bounds(self.width, self.height, self.padding)
    }

    fn ensure_built(&mut self, ctx: &mut Context<'_>) {
        let spec = match std::mem::replace(&mut self.slot, IndicatorSlot::Building) {
            IndicatorSlot::Pending(spec) => spec,
            built => {
                self.slot = built;
                return;
            }
        };
        let kind = spec.kind();
        let mut drawable = spec.build();
        drawable.set_bounds(self.layout());
        if self.start_on_build {
            if let Some(animatable) = drawable.as_animatable_mut() {
                animatable.start(ctx);
            }
        }
        tracing::debug!(%kind, "indicator built");
        self.slot = IndicatorSlot::Ready(drawable);
    }
}

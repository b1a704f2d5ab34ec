// SPDX-License-Identifier: MPL-2.0
//! Built-in indicator variants and the factory that builds them.

use crate::config::IndicatorConfig;
use crate::drawable::image::{loader_image, ImageFile};
use crate::drawable::{ArcSpinner, Drawable, FrameAnimation, Image, RotationAdapter, StaticImage};
use crate::error::{Error, Result};
use iced::Color;
use std::fmt;
use std::str::FromStr;

/// Which built-in indicator a button shows while loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndicatorKind {
    #[default]
    ArcSpinner,
    FrameAnimation,
    /// A bitmap or an animated GIF/WebP, shown as is or spun by a
    /// [`RotationAdapter`].
    Image,
}

impl IndicatorKind {
    /// Numeric selector used in configuration files.
    #[must_use]
    pub fn selector(self) -> i64 {
        match self {
            IndicatorKind::ArcSpinner => 0,
            IndicatorKind::FrameAnimation => 1,
            IndicatorKind::Image => 2,
        }
    }
}

impl TryFrom<i64> for IndicatorKind {
    type Error = Error;

    fn try_from(selector: i64) -> Result<Self> {
        match selector {
            0 => Ok(IndicatorKind::ArcSpinner),
            1 => Ok(IndicatorKind::FrameAnimation),
            2 => Ok(IndicatorKind::Image),
            other => Err(Error::InvalidParameter(format!(
                "unknown indicator type {other}"
            ))),
        }
    }
}

impl FromStr for IndicatorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "arc" | "arc-spinner" => Ok(IndicatorKind::ArcSpinner),
            "frames" | "frame-animation" => Ok(IndicatorKind::FrameAnimation),
            "image" => Ok(IndicatorKind::Image),
            other => other
                .parse::<i64>()
                .map_err(|_| Error::InvalidParameter(format!("unknown indicator type {other}")))
                .and_then(IndicatorKind::try_from),
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorKind::ArcSpinner => write!(f, "arc"),
            IndicatorKind::FrameAnimation => write!(f, "frames"),
            IndicatorKind::Image => write!(f, "image"),
        }
    }
}

/// Everything needed to build an indicator, resolved from configuration.
///
/// Resources (images, frames) are loaded when the recipe is created so
/// that configuration problems surface at button construction.
#[derive(Debug, Clone)]
pub enum IndicatorSpec {
    ArcSpinner { color: Color, stroke_width: f32 },
    FrameAnimation(FrameAnimation),
    Image { image: Image, auto_rotate: bool },
    /// Multi-frame `image_source`, played with the file's own frame delays.
    AnimatedImage {
        animation: FrameAnimation,
        auto_rotate: bool,
    },
}

impl IndicatorSpec {
    /// # Errors
    ///
    /// - [`Error::InvalidParameter`] for an unknown indicator selector
    /// - [`Error::Config`] for an unparsable arc color
    /// - image loading errors for a bad `image_source`
    pub fn from_config(config: &IndicatorConfig) -> Result<Self> {
        match IndicatorKind::try_from(config.indicator_type())? {
            IndicatorKind::ArcSpinner => Ok(IndicatorSpec::ArcSpinner {
                color: config.arc_color()?,
                stroke_width: config.arc_stroke_width(),
            }),
            IndicatorKind::FrameAnimation => Ok(IndicatorSpec::FrameAnimation(
                FrameAnimation::loader(config.frame_duration())?.one_shot(config.frame_one_shot()),
            )),
            IndicatorKind::Image => {
                let auto_rotate = config.auto_rotate();
                let file = match &config.image_source {
                    Some(path) => ImageFile::load(path, config.frame_duration())?,
                    None => ImageFile::Still(loader_image()?),
                };
                Ok(match file {
                    ImageFile::Still(image) => IndicatorSpec::Image { image, auto_rotate },
                    ImageFile::Animated(frames) => IndicatorSpec::AnimatedImage {
                        animation: FrameAnimation::new(frames).one_shot(config.frame_one_shot()),
                        auto_rotate,
                    },
                })
            }
        }
    }

    #[must_use]
    pub fn kind(&self) -> IndicatorKind {
        match self {
            IndicatorSpec::ArcSpinner { .. } => IndicatorKind::ArcSpinner,
            IndicatorSpec::FrameAnimation(_) => IndicatorKind::FrameAnimation,
            IndicatorSpec::Image { .. } | IndicatorSpec::AnimatedImage { .. } => {
                IndicatorKind::Image
            }
        }
    }

    /// Builds the (unpositioned, idle) drawable.
    #[must_use]
    pub fn build(self) -> Box<dyn Drawable> {
        match self {
            IndicatorSpec::ArcSpinner {
                color,
                stroke_width,
            } => Box::new(ArcSpinner::new(color, stroke_width)),
            IndicatorSpec::FrameAnimation(animation) => Box::new(animation),
            IndicatorSpec::Image { image, auto_rotate } => {
                rotated(Box::new(StaticImage::new(image)), auto_rotate)
            }
            IndicatorSpec::AnimatedImage {
                animation,
                auto_rotate,
            } => rotated(Box::new(animation), auto_rotate),
        }
    }
}

fn rotated(drawable: Box<dyn Drawable>, auto_rotate: bool) -> Box<dyn Drawable> {
    if auto_rotate {
        Box::new(RotationAdapter::new(drawable))
    } else {
        drawable
    }
}

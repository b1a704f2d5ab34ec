// SPDX-License-Identifier: MPL-2.0
//! Bitmap indicators.
//!
//! Raster files are decoded with `image`; SVG sources are rasterized with
//! `resvg` so vector artwork can be used anywhere a bitmap is expected. The
//! built-in loader graphic is an embedded SVG rendered at runtime. Animated
//! GIF and WebP files keep all their frames so they can play as a flip-book.

use super::frame_animation::AnimationFrame;
use super::{Bounds, Drawable, Opacity, Surface};
use crate::error::{Error, Result};
use iced::widget::image::Handle;
use image_rs::codecs::gif::GifDecoder;
use image_rs::codecs::webp::WebPDecoder;
use image_rs::{AnimationDecoder, ImageFormat};
use resvg::usvg;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

const LOADER_SVG: &str = include_str!("../../assets/loader.svg");

/// Edge length, in pixels, the built-in loader graphic is rasterized at.
pub const LOADER_SIZE: u32 = 96;

/// Decoded RGBA bitmap ready for the renderer.
#[derive(Debug, Clone)]
pub struct Image {
    handle: Handle,
    width: u32,
    height: u32,
}

impl Image {
    /// Wraps unpremultiplied RGBA pixels.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            handle: Handle::from_rgba(width, height, pixels),
            width,
            height,
        }
    }

    /// Decodes an encoded raster image (PNG, JPEG, GIF, ...).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Image`] when the bytes are not a supported format.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let rgba = image_rs::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self::from_rgba(width, height, rgba.into_vec()))
    }

    /// Rasterizes SVG markup into a `size` x `size` bitmap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Svg`] when parsing fails or the canvas cannot be
    /// allocated.
    pub fn from_svg(data: &[u8], size: u32) -> Result<Self> {
        let tree = parse_svg(data)?;
        rasterize(&tree, size, 0.0)
    }

    /// Loads an image file, rasterizing `.svg` files at their intrinsic size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read and
    /// [`Error::Image`]/[`Error::Svg`] when it cannot be decoded.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        Self::from_file_bytes(path, &bytes)
    }

    fn from_file_bytes(path: &Path, bytes: &[u8]) -> Result<Self> {
        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        if extension.eq_ignore_ascii_case("svg") {
            let tree = parse_svg(bytes)?;
            let size = tree.size().to_int_size();
            let edge = size.width().max(size.height());
            if edge == 0 {
                return Err(Error::Svg("SVG has empty dimensions".into()));
            }
            rasterize(&tree, edge, 0.0)
        } else {
            Self::decode(bytes)
        }
    }

    #[must_use]
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Contents of an image file: one bitmap, or every frame of an animation.
#[derive(Debug, Clone)]
pub enum ImageFile {
    Still(Image),
    Animated(Vec<AnimationFrame>),
}

impl ImageFile {
    /// Loads `path`, keeping all frames of a multi-frame GIF or WebP.
    /// Frames that carry no delay are shown for `fallback_delay`.
    ///
    /// # Errors
    ///
    /// Same as [`Image::load`].
    pub fn load<P: AsRef<Path>>(path: P, fallback_delay: Duration) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        match decode_animation(&bytes, fallback_delay)? {
            Some(frames) => Ok(ImageFile::Animated(frames)),
            None => Image::from_file_bytes(path, &bytes).map(ImageFile::Still),
        }
    }
}

/// Decodes every frame of an animated GIF or WebP. `None` for other formats
/// and for single-frame files.
fn decode_animation(bytes: &[u8], fallback_delay: Duration) -> Result<Option<Vec<AnimationFrame>>> {
    let frames = match image_rs::guess_format(bytes) {
        Ok(ImageFormat::Gif) => GifDecoder::new(Cursor::new(bytes))?
            .into_frames()
            .collect_frames()?,
        Ok(ImageFormat::WebP) => {
            let decoder = WebPDecoder::new(Cursor::new(bytes))?;
            if !decoder.has_animation() {
                return Ok(None);
            }
            decoder.into_frames().collect_frames()?
        }
        _ => return Ok(None),
    };
    if frames.len() < 2 {
        return Ok(None);
    }

    let frames = frames
        .into_iter()
        .map(|frame| {
            let delay = Duration::from(frame.delay());
            let buffer = frame.into_buffer();
            let (width, height) = buffer.dimensions();
            AnimationFrame {
                image: Image::from_rgba(width, height, buffer.into_raw()),
                duration: if delay.is_zero() { fallback_delay } else { delay },
            }
        })
        .collect();
    Ok(Some(frames))
}

/// The built-in loader graphic.
///
/// # Errors
///
/// Only fails if the embedded SVG cannot be rasterized.
pub fn loader_image() -> Result<Image> {
    Image::from_svg(LOADER_SVG.as_bytes(), LOADER_SIZE)
}

/// The built-in loader graphic rendered at `count` evenly spaced rotations,
/// used as the default frame sequence.
///
/// # Errors
///
/// Only fails if the embedded SVG cannot be rasterized.
pub fn loader_frames(count: usize) -> Result<Vec<Image>> {
    let tree = parse_svg(LOADER_SVG.as_bytes())?;
    let count = count.max(1);
    (0..count)
        .map(|index| {
            #[allow(clippy::cast_precision_loss)]
            let degrees = 360.0 * index as f32 / count as f32;
            rasterize(&tree, LOADER_SIZE, degrees)
        })
        .collect()
}

fn parse_svg(data: &[u8]) -> Result<usvg::Tree> {
    usvg::Tree::from_data(data, &usvg::Options::default()).map_err(|e| Error::Svg(e.to_string()))
}

/// Renders `tree` scaled into a square of `size` pixels, rotated about its
/// centre by `degrees`.
fn rasterize(tree: &usvg::Tree, size: u32, degrees: f32) -> Result<Image> {
    let mut pixmap = tiny_skia::Pixmap::new(size, size)
        .ok_or_else(|| Error::Svg("Failed to allocate SVG pixmap".into()))?;

    #[allow(clippy::cast_precision_loss)]
    let edge = size as f32;
    let intrinsic = tree.size();
    let center = edge / 2.0;
    let transform = tiny_skia::Transform::from_rotate_at(degrees, center, center)
        .pre_scale(edge / intrinsic.width(), edge / intrinsic.height());

    resvg::render(tree, transform, &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha; the renderer expects straight.
    let pixels = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect();

    Ok(Image::from_rgba(size, size, pixels))
}

/// Non-animated bitmap indicator.
#[derive(Debug, Clone)]
pub struct StaticImage {
    image: Image,
    bounds: Bounds,
}

impl StaticImage {
    #[must_use]
    pub fn new(image: Image) -> Self {
        Self {
            image,
            bounds: Bounds::default(),
        }
    }

    #[must_use]
    pub fn image(&self) -> &Image {
        &self.image
    }
}

impl Drawable for StaticImage {
    fn draw(&self, surface: &mut dyn Surface) {
        if self.bounds.is_empty() {
            return;
        }
        surface.draw_image(&self.image, self.bounds);
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawable::{Command, RecordingSurface};
    use crate::test_utils::encoded_gif;
    use tempfile::tempdir;

    fn encoded_png(width: u32, height: u32) -> Vec<u8> {
        let buffer = image_rs::RgbaImage::from_pixel(width, height, image_rs::Rgba([255, 0, 0, 255]));
        let mut bytes = std::io::Cursor::new(Vec::new());
        buffer
            .write_to(&mut bytes, image_rs::ImageFormat::Png)
            .expect("failed to encode png");
        bytes.into_inner()
    }

    #[test]
    fn decode_reads_dimensions() {
        let image = Image::decode(&encoded_png(7, 3)).expect("decode should succeed");
        assert_eq!((image.width(), image.height()), (7, 3));
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = Image::decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, Error::Image(_)));
    }

    #[test]
    fn loader_image_is_square() {
        let image = loader_image().expect("embedded loader should rasterize");
        assert_eq!((image.width(), image.height()), (LOADER_SIZE, LOADER_SIZE));
    }

    #[test]
    fn loader_frames_produces_requested_count() {
        let frames = loader_frames(4).expect("embedded loader should rasterize");
        assert_eq!(frames.len(), 4);
    }

    #[test]
    fn load_rasterizes_svg_files() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("ring.svg");
        fs::write(&path, LOADER_SVG).expect("failed to write svg");

        let image = Image::load(&path).expect("svg should load");
        assert_eq!((image.width(), image.height()), (48, 48));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempdir().expect("failed to create temp dir");
        let err = Image::load(dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn invalid_svg_is_an_svg_error() {
        let err = Image::from_svg(b"<svg", 16).unwrap_err();
        assert!(matches!(err, Error::Svg(_)));
    }

    #[test]
    fn animated_gif_keeps_frames_and_delays() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("loader.gif");
        fs::write(&path, encoded_gif(3, 100)).expect("failed to write gif");

        match ImageFile::load(&path, Duration::from_millis(40)).expect("gif should load") {
            ImageFile::Animated(frames) => {
                assert_eq!(frames.len(), 3);
                assert!(frames.iter().all(|f| f.duration == Duration::from_millis(100)));
                assert_eq!((frames[0].image.width(), frames[0].image.height()), (4, 4));
            }
            ImageFile::Still(_) => panic!("expected animated frames"),
        }
    }

    #[test]
    fn undelayed_gif_frames_use_fallback_delay() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("loader.gif");
        fs::write(&path, encoded_gif(2, 0)).expect("failed to write gif");

        match ImageFile::load(&path, Duration::from_millis(40)).expect("gif should load") {
            ImageFile::Animated(frames) => {
                assert!(frames.iter().all(|f| f.duration == Duration::from_millis(40)));
            }
            ImageFile::Still(_) => panic!("expected animated frames"),
        }
    }

    #[test]
    fn single_frame_files_load_still() {
        let dir = tempdir().expect("failed to create temp dir");
        let gif = dir.path().join("still.gif");
        let png = dir.path().join("still.png");
        fs::write(&gif, encoded_gif(1, 100)).expect("failed to write gif");
        fs::write(&png, encoded_png(3, 3)).expect("failed to write png");

        for path in [gif, png] {
            assert!(matches!(
                ImageFile::load(&path, Duration::from_millis(40)),
                Ok(ImageFile::Still(_))
            ));
        }
    }

    #[test]
    fn static_image_skips_empty_bounds() {
        let drawable = StaticImage::new(Image::from_rgba(1, 1, vec![0; 4]));
        let mut surface = RecordingSurface::new();
        drawable.draw(&mut surface);
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn static_image_draws_into_bounds() {
        let mut drawable = StaticImage::new(Image::from_rgba(2, 2, vec![0; 16]));
        drawable.set_bounds(Bounds::from_size(20.0, 20.0));
        let mut surface = RecordingSurface::new();
        drawable.draw(&mut surface);

        assert_eq!(
            surface.commands(),
            &[Command::DrawImage {
                width: 2,
                height: 2,
                bounds: Bounds::from_size(20.0, 20.0),
            }]
        );
        assert!(!drawable.is_animating());
    }
}

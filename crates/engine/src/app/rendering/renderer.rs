use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::ImageReader;
use pixels::{Pixels, SurfaceTexture, TextureError};
use thiserror::Error;
use tracing::warn;
use winit::dpi::PhysicalPosition;
use winit::window::Window;

use crate::app::canvas::{DrawCommand, DrawList, ImageAnchor, ImageDraw, ImageExtent, Rect, Vec2};
use crate::asset_keys::AssetKey;

use super::raster::{
    blit_image, clear_frame, draw_text_blocks, fill_rect, stroke_rect, LoadedImage, PixelRect,
};
use super::ColorGrade;

#[derive(Debug, Error)]
pub enum RendererError {
    #[error("pixel surface error: {0}")]
    Pixels(#[from] pixels::Error),
    #[error("surface resize failed: {0}")]
    Resize(#[from] TextureError),
}

type ImageCacheKey = (AssetKey, Option<[u32; 4]>);

/// Decoded images keyed by asset and colour grade. A failed load is cached as
/// `None` so the file system is probed once per key.
struct ImageStore {
    asset_root: PathBuf,
    cache: HashMap<ImageCacheKey, Option<LoadedImage>>,
    warned_keys: HashSet<AssetKey>,
}

impl ImageStore {
    fn new(asset_root: PathBuf) -> Self {
        Self {
            asset_root,
            cache: HashMap::new(),
            warned_keys: HashSet::new(),
        }
    }

    fn resolve(&mut self, key: &AssetKey, grade: Option<ColorGrade>) -> Option<&LoadedImage> {
        let cache_key = (key.clone(), grade.map(|grade| grade.cache_tag()));
        let asset_root = self.asset_root.as_path();
        let warned_keys = &mut self.warned_keys;
        self.cache
            .entry(cache_key)
            .or_insert_with(|| match load_image_rgba(asset_root, key, grade) {
                Ok(image) => Some(image),
                Err(reason) => {
                    warn_image_load_once(warned_keys, key, reason.as_str());
                    None
                }
            })
            .as_ref()
    }
}

/// Presents a [`DrawList`] through a fixed-size pixel buffer scaled to the window.
pub struct Renderer {
    pixels: Pixels<'static>,
    canvas_width: u32,
    canvas_height: u32,
    images: ImageStore,
}

impl Renderer {
    pub fn new(
        window: Arc<Window>,
        asset_root: PathBuf,
        canvas_width: u32,
        canvas_height: u32,
    ) -> Result<Self, RendererError> {
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width.max(1), size.height.max(1), window);
        let pixels = Pixels::new(canvas_width, canvas_height, surface)?;
        Ok(Self {
            pixels,
            canvas_width,
            canvas_height,
            images: ImageStore::new(asset_root),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), RendererError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels.resize_surface(width, height)?;
        Ok(())
    }

    /// Maps a window cursor position to canvas pixels; `None` when it falls in
    /// the letterbox outside the canvas.
    pub fn window_pos_to_canvas(&self, position: PhysicalPosition<f64>) -> Option<Vec2> {
        self.pixels
            .window_pos_to_pixel((position.x as f32, position.y as f32))
            .ok()
            .map(|(x, y)| Vec2::new(x as f32, y as f32))
    }

    pub fn render(&mut self, list: &DrawList) -> Result<(), RendererError> {
        let width = self.canvas_width;
        let height = self.canvas_height;
        let Self { pixels, images, .. } = self;
        let frame = pixels.frame_mut();
        for command in list.commands() {
            draw_command(frame, width, height, command, images);
        }
        pixels.render()?;
        Ok(())
    }
}

fn draw_command(
    frame: &mut [u8],
    width: u32,
    height: u32,
    command: &DrawCommand,
    images: &mut ImageStore,
) {
    match command {
        DrawCommand::Clear(color) => clear_frame(frame, *color),
        DrawCommand::FillRect { rect, color } => {
            fill_rect(frame, width, height, PixelRect::from_rect(*rect), *color);
        }
        DrawCommand::StrokeRect {
            rect,
            color,
            thickness,
        } => {
            stroke_rect(frame, width, height, PixelRect::from_rect(*rect), *color, *thickness);
        }
        DrawCommand::Image(draw) => draw_image(frame, width, height, draw, images),
        DrawCommand::Text {
            text,
            position,
            size,
            anchor,
            color,
        } => draw_text_blocks(frame, width, height, text, *position, *size, *anchor, *color),
    }
}

fn draw_image(
    frame: &mut [u8],
    width: u32,
    height: u32,
    draw: &ImageDraw,
    images: &mut ImageStore,
) {
    match images.resolve(&draw.key, draw.grade) {
        Some(image) => {
            let dest = image_destination(draw, image.width, image.height);
            blit_image(frame, width, height, image, PixelRect::from_rect(dest), draw.mirror_x);
        }
        None => {
            if let (Some(color), ImageExtent::Exact { .. }) = (draw.fallback, draw.extent) {
                let dest = image_destination(draw, 0, 0);
                fill_rect(frame, width, height, PixelRect::from_rect(dest), color);
            }
        }
    }
}

fn image_destination(draw: &ImageDraw, native_width: u32, native_height: u32) -> Rect {
    let (w, h) = match draw.extent {
        ImageExtent::Exact { width, height } => (width, height),
        ImageExtent::Scaled { x, y } => (
            native_width as f32 * normalized_scale(x),
            native_height as f32 * normalized_scale(y),
        ),
    };
    match draw.anchor {
        ImageAnchor::TopLeft => Rect::new(draw.position.x, draw.position.y, w, h),
        ImageAnchor::Center => Rect::centered(draw.position.x, draw.position.y, w, h),
    }
}

fn normalized_scale(scale: f32) -> f32 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

fn resolve_image_path(asset_root: &Path, key: &AssetKey) -> Result<PathBuf, String> {
    key.candidate_paths(asset_root)
        .into_iter()
        .find(|path| path.is_file())
        .ok_or_else(|| "file_not_found".to_string())
}

fn load_image_rgba(
    asset_root: &Path,
    key: &AssetKey,
    grade: Option<ColorGrade>,
) -> Result<LoadedImage, String> {
    let path = resolve_image_path(asset_root, key)?;
    let reader = ImageReader::open(&path).map_err(|error| format!("file_open_failed:{error}"))?;
    let decoded = reader
        .decode()
        .map_err(|error| format!("decode_failed:{error}"))?;
    let image = decoded.to_rgba8();
    let width = image.width();
    let height = image.height();
    let mut rgba = image.into_raw();
    if let Some(grade) = grade {
        grade.apply(&mut rgba);
    }
    Ok(LoadedImage {
        width,
        height,
        rgba,
    })
}

fn warn_image_load_once(warned_keys: &mut HashSet<AssetKey>, key: &AssetKey, reason: &str) {
    if !warned_keys.insert(key.clone()) {
        return;
    }
    warn!(
        asset_key = key.as_str(),
        reason = reason,
        "renderer_image_load_failed_using_fallback"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::canvas::Rgba;
    use tempfile::TempDir;

    fn key(raw: &str) -> AssetKey {
        AssetKey::parse(raw).expect("key")
    }

    fn write_png(dir: &Path, name: &str, rgba: [u8; 4]) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("mkdir");
        }
        let image = image::RgbaImage::from_pixel(2, 2, image::Rgba(rgba));
        image.save(&path).expect("save png");
    }

    #[test]
    fn missing_image_is_cached_as_none_and_warned_once() {
        let temp = TempDir::new().expect("temp");
        let mut store = ImageStore::new(temp.path().to_path_buf());
        let missing = key("backgrounds/nowhere");

        assert!(store.resolve(&missing, None).is_none());
        assert!(store.resolve(&missing, None).is_none());
        assert_eq!(store.cache.len(), 1);
        assert_eq!(store.warned_keys.len(), 1);
    }

    #[test]
    fn images_are_found_by_extension_and_graded_per_cache_entry() {
        let temp = TempDir::new().expect("temp");
        write_png(temp.path(), "character/idle_1.png", [200, 100, 50, 255]);
        let mut store = ImageStore::new(temp.path().to_path_buf());
        let idle = key("character/idle_1");

        let plain = store.resolve(&idle, None).expect("plain image");
        assert_eq!(&plain.rgba[0..4], &[200, 100, 50, 255]);

        let dark = ColorGrade {
            blackness: 1.0,
            ..ColorGrade::IDENTITY
        };
        let graded = store.resolve(&idle, Some(dark)).expect("graded image");
        assert_eq!(&graded.rgba[0..4], &[0, 0, 0, 255]);
        assert_eq!(store.cache.len(), 2);
    }

    #[test]
    fn missing_backdrop_paints_fallback_colour() {
        let temp = TempDir::new().expect("temp");
        let mut store = ImageStore::new(temp.path().to_path_buf());
        let mut frame = vec![0u8; 4 * 4 * 4];
        let draw = ImageDraw::backdrop(key("backgrounds/game"), 4.0, 4.0, Rgba::rgb(10, 20, 30));

        draw_image(&mut frame, 4, 4, &draw, &mut store);
        assert_eq!(&frame[0..4], &[10, 20, 30, 255]);
        assert_eq!(&frame[60..64], &[10, 20, 30, 255]);
    }

    #[test]
    fn centered_scaled_destination_uses_native_size() {
        let draw = ImageDraw {
            key: key("character/walk_3"),
            position: Vec2::new(100.0, 50.0),
            anchor: ImageAnchor::Center,
            extent: ImageExtent::Scaled { x: 0.5, y: 0.5 },
            mirror_x: true,
            grade: None,
            fallback: None,
        };
        let dest = image_destination(&draw, 200, 400);
        assert_eq!(dest, Rect::new(50.0, -50.0, 100.0, 200.0));
    }
}

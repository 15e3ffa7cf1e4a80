use crate::asset_keys::AssetKey;

use super::rendering::ColorGrade;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const BLACK: Self = Self([0, 0, 0, 255]);
    pub const WHITE: Self = Self([255, 255, 255, 255]);
    pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self([self.0[0], self.0[1], self.0[2], alpha])
    }

    pub const fn alpha(self) -> u8 {
        self.0[3]
    }
}

/// Axis-aligned rectangle in canvas pixels, stored by its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle from its centre, the way buttons and prompts are laid out.
    pub fn centered(center_x: f32, center_y: f32, width: f32, height: f32) -> Self {
        Self {
            x: center_x - width * 0.5,
            y: center_y - height * 0.5,
            width,
            height,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2 {
            x: self.x + self.width * 0.5,
            y: self.y + self.height * 0.5,
        }
    }

    /// Strict containment: a point on the border is outside.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.x
            && point.x < self.x + self.width
            && point.y > self.y
            && point.y < self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageExtent {
    /// Destination size in canvas pixels.
    Exact { width: f32, height: f32 },
    /// Multiplier applied to the image's native size.
    Scaled { x: f32, y: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageAnchor {
    TopLeft,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageDraw {
    pub key: AssetKey,
    pub position: Vec2,
    pub anchor: ImageAnchor,
    pub extent: ImageExtent,
    pub mirror_x: bool,
    pub grade: Option<ColorGrade>,
    /// Flat colour painted over the destination when the image is unavailable.
    /// Only meaningful for `ImageExtent::Exact`.
    pub fallback: Option<Rgba>,
}

impl ImageDraw {
    pub fn backdrop(key: AssetKey, width: f32, height: f32, fallback: Rgba) -> Self {
        Self {
            key,
            position: Vec2::default(),
            anchor: ImageAnchor::TopLeft,
            extent: ImageExtent::Exact { width, height },
            mirror_x: false,
            grade: None,
            fallback: Some(fallback),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    TopCenter,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgba),
    FillRect {
        rect: Rect,
        color: Rgba,
    },
    StrokeRect {
        rect: Rect,
        color: Rgba,
        thickness: f32,
    },
    Image(ImageDraw),
    Text {
        text: String,
        position: Vec2,
        size: f32,
        anchor: TextAnchor,
        color: Rgba,
    },
}

/// Drawing primitives available to scenes. Results are never inspected by callers.
pub trait Canvas {
    fn size(&self) -> (u32, u32);
    fn clear(&mut self, color: Rgba);
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
    fn stroke_rect(&mut self, rect: Rect, color: Rgba, thickness: f32);
    fn draw_image(&mut self, image: ImageDraw);
    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, anchor: TextAnchor, color: Rgba);

    fn width(&self) -> f32 {
        self.size().0 as f32
    }

    fn height(&self) -> f32 {
        self.size().1 as f32
    }
}

/// Canvas that records commands for the renderer to rasterise later.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|text| text.contains(needle))
    }

    pub fn images(&self) -> impl Iterator<Item = &ImageDraw> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Image(image) => Some(image),
            _ => None,
        })
    }
}

impl Canvas for DrawList {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        if color.alpha() == 0 {
            return;
        }
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba, thickness: f32) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            color,
            thickness,
        });
    }

    fn draw_image(&mut self, image: ImageDraw) {
        self.commands.push(DrawCommand::Image(image));
    }

    fn draw_text(
        &mut self,
        text: &str,
        position: Vec2,
        size: f32,
        anchor: TextAnchor,
        color: Rgba,
    ) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            size,
            anchor,
            color,
        });
    }
}

use engine::{
    AssetKey, Canvas, Character, ColorGrade, ImageAnchor, ImageDraw, ImageExtent, Rect, Rgba,
    TextAnchor, Vec2,
};

use super::tuning::WalkTuning;

const PROMPT_FILL: Rgba = Rgba::rgba(0, 0, 0, 170);
const PROMPT_BORDER: Rgba = Rgba::WHITE;
const PROMPT_TEXT_SIZE: f32 = 18.0;
const BUTTON_FILL: Rgba = Rgba::rgb(40, 40, 48);
const BUTTON_FILL_HOVER: Rgba = Rgba::rgb(80, 80, 96);

/// Contextual box shown while its predicate holds; also a click target.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PromptBox {
    pub rect: Rect,
    pub label: &'static str,
}

impl PromptBox {
    pub fn centered(cx: f32, cy: f32, width: f32, height: f32, label: &'static str) -> Self {
        Self {
            rect: Rect::centered(cx, cy, width, height),
            label,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.rect.contains(point)
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.rect, PROMPT_FILL);
        canvas.stroke_rect(self.rect, PROMPT_BORDER, 2.0);
        canvas.draw_text(
            self.label,
            self.rect.center(),
            PROMPT_TEXT_SIZE,
            TextAnchor::Center,
            Rgba::WHITE,
        );
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Button {
    pub rect: Rect,
    pub label: &'static str,
    pub text_size: f32,
}

impl Button {
    pub fn centered(cx: f32, cy: f32, width: f32, height: f32, label: &'static str) -> Self {
        Self {
            rect: Rect::centered(cx, cy, width, height),
            label,
            text_size: (height * 0.4).max(12.0),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.rect.contains(point)
    }

    pub fn is_hovered(&self, cursor: Option<Vec2>) -> bool {
        cursor.is_some_and(|point| self.contains(point))
    }

    /// Draws the button at `opacity` (0..=255), brightened while hovered.
    pub fn draw(&self, canvas: &mut dyn Canvas, cursor: Option<Vec2>, opacity: u8) {
        if opacity == 0 {
            return;
        }
        let fill = if self.is_hovered(cursor) {
            BUTTON_FILL_HOVER
        } else {
            BUTTON_FILL
        };
        canvas.fill_rect(self.rect, fill.with_alpha(opacity));
        canvas.stroke_rect(self.rect, Rgba::WHITE.with_alpha(opacity), 3.0);
        canvas.draw_text(
            self.label,
            self.rect.center(),
            self.text_size,
            TextAnchor::Center,
            Rgba::WHITE.with_alpha(opacity),
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClipState {
    Stopped,
    Playing,
    Finished,
}

/// Tick-counted stand-in for a video background. It shows a single still
/// frame and tracks how far playback has progressed.
#[derive(Debug, Clone)]
pub(crate) struct ClipPlayer {
    frame: AssetKey,
    length_ticks: u32,
    looping: bool,
    elapsed_ticks: u32,
    state: ClipState,
}

impl ClipPlayer {
    pub fn new(frame: AssetKey, length_ticks: u32) -> Self {
        Self {
            frame,
            length_ticks: length_ticks.max(1),
            looping: false,
            elapsed_ticks: 0,
            state: ClipState::Stopped,
        }
    }

    pub fn looping(frame: AssetKey) -> Self {
        Self {
            looping: true,
            ..Self::new(frame, u32::MAX)
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == ClipState::Playing
    }

    pub fn elapsed_ticks(&self) -> u32 {
        self.elapsed_ticks
    }

    pub fn play(&mut self) {
        self.elapsed_ticks = 0;
        self.state = ClipState::Playing;
    }

    pub fn stop(&mut self) {
        self.elapsed_ticks = 0;
        self.state = ClipState::Stopped;
    }

    /// Advances playback. Returns `true` on the tick the clip reaches its end.
    pub fn tick(&mut self) -> bool {
        if self.state != ClipState::Playing {
            return false;
        }
        self.elapsed_ticks = self.elapsed_ticks.saturating_add(1);
        if self.looping || self.elapsed_ticks < self.length_ticks {
            return false;
        }
        self.state = ClipState::Finished;
        true
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, fallback: Rgba) {
        let (width, height) = (canvas.width(), canvas.height());
        canvas.draw_image(ImageDraw::backdrop(self.frame.clone(), width, height, fallback));
    }
}

/// Pose of a character sprite that is independent of the walk state.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SpritePose {
    pub baseline_y: f32,
    pub scale: f32,
    pub vertical_stretch: f32,
    pub grade: ColorGrade,
}

impl SpritePose {
    pub fn from_tuning(tuning: &WalkTuning, grade: ColorGrade) -> Self {
        Self {
            baseline_y: tuning.baseline_y,
            scale: tuning.sprite_scale,
            vertical_stretch: tuning.vertical_stretch,
            grade,
        }
    }
}

pub(crate) fn draw_character(
    canvas: &mut dyn Canvas,
    character: &Character,
    frames: &[AssetKey],
    pose: SpritePose,
) {
    let Some(key) = frames.get(character.current_frame()) else {
        return;
    };
    canvas.draw_image(ImageDraw {
        key: key.clone(),
        position: Vec2::new(character.position(), pose.baseline_y),
        anchor: ImageAnchor::Center,
        extent: ImageExtent::Scaled {
            x: pose.scale,
            y: pose.scale * pose.vertical_stretch,
        },
        mirror_x: character.mirrored(),
        grade: Some(pose.grade),
        fallback: None,
    });
}

pub(crate) fn draw_caption(canvas: &mut dyn Canvas, text: &str, center: Vec2, size: f32) {
    canvas.draw_text(text, center, size, TextAnchor::Center, Rgba::WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{DrawCommand, DrawList, Facing, WalkCycleConfig};

    fn key(raw: &str) -> AssetKey {
        AssetKey::parse(raw).expect("key")
    }

    #[test]
    fn clip_finishes_once_at_its_length() {
        let mut clip = ClipPlayer::new(key("clips/title"), 3);
        assert!(!clip.tick(), "stopped clips do not advance");
        clip.play();
        assert!(!clip.tick());
        assert!(!clip.tick());
        assert!(clip.tick());
        assert_eq!(clip.state, ClipState::Finished);
        assert!(!clip.tick());
    }

    #[test]
    fn looping_clip_never_finishes() {
        let mut clip = ClipPlayer::looping(key("clips/scene2"));
        clip.play();
        for _ in 0..10_000 {
            assert!(!clip.tick());
        }
        assert!(clip.is_playing());
    }

    #[test]
    fn button_skips_drawing_when_invisible() {
        let mut canvas = DrawList::new(800, 800);
        let button = Button::centered(680.0, 740.0, 100.0, 40.0, "SKIP");
        button.draw(&mut canvas, None, 0);
        assert!(canvas.commands().is_empty());
        button.draw(&mut canvas, Some(Vec2::new(680.0, 740.0)), 255);
        assert!(canvas.contains_text("SKIP"));
        assert!(matches!(
            canvas.commands().first(),
            Some(DrawCommand::FillRect { color, .. }) if *color == BUTTON_FILL_HOVER
        ));
    }

    #[test]
    fn character_sprite_mirrors_when_facing_right() {
        let frames = vec![key("character/1")];
        let character = Character::new(WalkCycleConfig::default(), 400.0, Facing::Right);
        let pose = SpritePose::from_tuning(&WalkTuning::GAME, ColorGrade::IDENTITY);
        let mut canvas = DrawList::new(800, 800);
        draw_character(&mut canvas, &character, &frames, pose);

        let image = canvas.images().next().expect("sprite");
        assert!(image.mirror_x);
        assert_eq!(image.position, Vec2::new(400.0, 575.0));
        assert_eq!(image.extent, ImageExtent::Scaled { x: 0.30, y: 0.30 * 1.1 });
    }
}

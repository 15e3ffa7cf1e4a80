use engine::{Canvas, InputAction, Rect, Rgba, Scene, SceneCommand, SceneKey, Vec2};
use tracing::info;

use super::walker::Walker;
use crate::app::ui::{draw_caption, Button, ClipPlayer, PromptBox};

const BACKGROUND_FALLBACK: Rgba = Rgba::rgb(100, 150, 200);
const BACK_PROMPT_MAX_X: f32 = 120.0;
const INTERACTION_CENTER_X: f32 = 400.0;
const INTERACTION_RADIUS: f32 = 80.0;
const ENDING_FADE_STEP: u8 = 5;
const ENDING_MESSAGE_ALPHA: u8 = 200;
const ENDING_HOLD_TICKS: u32 = 120;
const ENDING_MESSAGE: &str = "They didn't like that, you were SQUASHED";

/// Overlay sequence for the "grab their leg" ending. Once latched it fades
/// to black, holds the message, then hands control back to the title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SquashedEnding {
    active: bool,
    alpha: u8,
    timer: u32,
}

impl SquashedEnding {
    fn start(&mut self) {
        *self = Self {
            active: true,
            alpha: 0,
            timer: 0,
        };
    }

    /// Returns `true` once the hold time has elapsed; the ending is reset by then.
    fn advance(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.alpha = self.alpha.saturating_add(ENDING_FADE_STEP);
        if self.alpha > ENDING_MESSAGE_ALPHA {
            self.timer += 1;
            if self.timer > ENDING_HOLD_TICKS {
                *self = Self::default();
                return true;
            }
        }
        false
    }

    fn message_visible(&self) -> bool {
        self.active && self.alpha > ENDING_MESSAGE_ALPHA
    }
}

pub(crate) struct Scene2 {
    walker: Walker,
    clip: ClipPlayer,
    back_prompt: PromptBox,
    option_a: Button,
    option_b: Button,
    menu_open: bool,
    ending: SquashedEnding,
}

impl Scene2 {
    pub(crate) fn new(walker: Walker, clip: ClipPlayer) -> Self {
        Self {
            walker,
            clip,
            back_prompt: PromptBox::centered(110.0, 400.0, 200.0, 60.0, "Go back (E)"),
            option_a: Button::centered(400.0, 330.0, 360.0, 45.0, "Grab Their LEG"),
            option_b: Button::centered(
                400.0,
                410.0,
                360.0,
                45.0,
                "Will you be my mount, Walking Thing?",
            ),
            menu_open: false,
            ending: SquashedEnding::default(),
        }
    }

    fn back_prompt_visible(&self) -> bool {
        self.walker.position() < BACK_PROMPT_MAX_X
    }

    fn interaction_available(&self) -> bool {
        (self.walker.position() - INTERACTION_CENTER_X).abs() < INTERACTION_RADIUS
    }

    fn reset(&mut self) {
        self.walker.reset();
        self.clip.play();
        self.menu_open = false;
        self.ending = SquashedEnding::default();
    }

    fn draw_menu(&self, canvas: &mut dyn Canvas, cursor: Option<Vec2>) {
        let panel = Rect::centered(400.0, 370.0, 400.0, 150.0);
        canvas.fill_rect(panel, Rgba::rgba(0, 0, 0, 200));
        canvas.stroke_rect(panel, Rgba::WHITE, 2.0);
        self.option_a.draw(canvas, cursor, 255);
        self.option_b.draw(canvas, cursor, 255);
    }
}

impl Scene for Scene2 {
    fn load(&mut self) {
        self.reset();
    }

    fn tick(&mut self, canvas: &mut dyn Canvas, cursor: Option<Vec2>) -> SceneCommand {
        if self.ending.advance() {
            info!("squashed_ending_finished");
            self.reset();
            return SceneCommand::SwitchTo(SceneKey::Start);
        }
        if !self.ending.active {
            self.walker.tick();
        }
        self.clip.tick();
        if !self.interaction_available() {
            self.menu_open = false;
        }

        self.clip.draw(canvas, BACKGROUND_FALLBACK);
        self.walker.draw(canvas);

        if self.ending.active {
            let (width, height) = (canvas.width(), canvas.height());
            canvas.fill_rect(
                Rect::new(0.0, 0.0, width, height),
                Rgba::BLACK.with_alpha(self.ending.alpha),
            );
            if self.ending.message_visible() {
                draw_caption(canvas, ENDING_MESSAGE, Vec2::new(width / 2.0, height / 2.0), 32.0);
            }
            return SceneCommand::None;
        }

        if self.back_prompt_visible() {
            self.back_prompt.draw(canvas);
        }
        if self.menu_open {
            self.draw_menu(canvas, cursor);
        } else if self.interaction_available() {
            draw_caption(canvas, "Click to interact", Vec2::new(400.0, 280.0), 18.0);
        }
        SceneCommand::None
    }

    fn pointer_pressed(&mut self, position: Vec2) -> SceneCommand {
        if self.ending.active {
            return SceneCommand::None;
        }
        if self.back_prompt_visible() && self.back_prompt.contains(position) {
            return SceneCommand::FadeTo(SceneKey::Game);
        }
        if !self.interaction_available() {
            return SceneCommand::None;
        }
        if !self.menu_open {
            self.menu_open = true;
            return SceneCommand::None;
        }
        if self.option_a.contains(position) {
            info!("squashed_ending_started");
            self.menu_open = false;
            self.walker.release_all();
            self.ending.start();
        } else if self.option_b.contains(position) {
            self.menu_open = false;
            return SceneCommand::FadeTo(SceneKey::Scene3);
        }
        SceneCommand::None
    }

    fn key_pressed(&mut self, action: InputAction) -> SceneCommand {
        if self.ending.active {
            return SceneCommand::None;
        }
        if action == InputAction::Interact && self.back_prompt_visible() {
            return SceneCommand::FadeTo(SceneKey::Game);
        }
        self.walker.press(action);
        SceneCommand::None
    }

    fn key_released(&mut self, action: InputAction) -> SceneCommand {
        if !self.ending.active {
            self.walker.release(action);
        }
        SceneCommand::None
    }

    fn exit(&mut self) {
        self.walker.release_all();
        self.menu_open = false;
    }
}

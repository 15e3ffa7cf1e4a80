use engine::{Canvas, InputAction, Rgba, Scene, SceneCommand, SceneKey, Vec2};

use crate::app::ui::draw_caption;

/// Win or lose screen. Leaving it restarts the whole game from the title.
pub(crate) struct OutcomeScene {
    headline: &'static str,
    backdrop: Rgba,
}

impl OutcomeScene {
    pub(crate) fn win() -> Self {
        Self {
            headline: "YOU WIN",
            backdrop: Rgba::rgb(30, 90, 40),
        }
    }

    pub(crate) fn lose() -> Self {
        Self {
            headline: "YOU LOSE",
            backdrop: Rgba::rgb(110, 30, 30),
        }
    }
}

impl Scene for OutcomeScene {
    fn load(&mut self) {}

    fn tick(&mut self, canvas: &mut dyn Canvas, _cursor: Option<Vec2>) -> SceneCommand {
        canvas.clear(self.backdrop);
        let center = Vec2::new(canvas.width() / 2.0, canvas.height() / 2.0);
        draw_caption(canvas, self.headline, center, 56.0);
        draw_caption(
            canvas,
            "Press Enter or click to play again",
            Vec2::new(center.x, center.y + 80.0),
            18.0,
        );
        SceneCommand::None
    }

    fn pointer_pressed(&mut self, _position: Vec2) -> SceneCommand {
        SceneCommand::RestartAt(SceneKey::Start)
    }

    fn key_pressed(&mut self, action: InputAction) -> SceneCommand {
        match action {
            InputAction::Confirm => SceneCommand::RestartAt(SceneKey::Start),
            _ => SceneCommand::None,
        }
    }
}

use engine::{Canvas, InputAction, Rgba, Scene, SceneCommand, SceneKey, Vec2};

use crate::app::ui::draw_caption;

const CONTROL_LINES: [&str; 5] = [
    "A / Left arrow: walk left",
    "D / Right arrow: walk right",
    "E: interact",
    "Enter: confirm    Escape: skip",
    "Mouse: click prompts and buttons",
];

pub(crate) struct InstructionsScene;

impl Scene for InstructionsScene {
    fn load(&mut self) {}

    fn tick(&mut self, canvas: &mut dyn Canvas, _cursor: Option<Vec2>) -> SceneCommand {
        canvas.clear(Rgba::rgb(20, 20, 28));
        let center_x = canvas.width() / 2.0;
        draw_caption(canvas, "CONTROLS", Vec2::new(center_x, 160.0), 40.0);
        for (row, line) in CONTROL_LINES.iter().enumerate() {
            let y = 280.0 + row as f32 * 50.0;
            draw_caption(canvas, line, Vec2::new(center_x, y), 20.0);
        }
        draw_caption(canvas, "Press Enter or click to return", Vec2::new(center_x, 640.0), 16.0);
        SceneCommand::None
    }

    fn pointer_pressed(&mut self, _position: Vec2) -> SceneCommand {
        SceneCommand::SwitchTo(SceneKey::Start)
    }

    fn key_pressed(&mut self, action: InputAction) -> SceneCommand {
        if action == InputAction::Confirm {
            SceneCommand::SwitchTo(SceneKey::Start)
        } else {
            SceneCommand::None
        }
    }
}

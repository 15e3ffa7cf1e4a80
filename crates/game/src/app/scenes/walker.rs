use engine::{AssetKey, Canvas, Character, ColorGrade, InputAction};

use crate::app::tuning::WalkTuning;
use crate::app::ui::{draw_character, SpritePose};

/// A scene's walking character together with the sprites and pose it is
/// drawn with. `reset` puts it back at the scene's spawn point.
#[derive(Debug, Clone)]
pub(crate) struct Walker {
    tuning: WalkTuning,
    canvas_width: f32,
    frames: Vec<AssetKey>,
    pose: SpritePose,
    character: Character,
}

impl Walker {
    pub fn new(
        tuning: WalkTuning,
        canvas_width: f32,
        frames: Vec<AssetKey>,
        grade: ColorGrade,
    ) -> Self {
        Self {
            character: spawn(&tuning, canvas_width),
            pose: SpritePose::from_tuning(&tuning, grade),
            tuning,
            canvas_width,
            frames,
        }
    }

    pub fn reset(&mut self) {
        self.character = spawn(&self.tuning, self.canvas_width);
    }

    #[cfg(test)]
    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn position(&self) -> f32 {
        self.character.position()
    }

    pub fn press(&mut self, action: InputAction) {
        self.character.press(action);
    }

    pub fn release(&mut self, action: InputAction) {
        self.character.release(action);
    }

    pub fn release_all(&mut self) {
        self.character.release_all();
    }

    pub fn tick(&mut self) {
        self.character.tick();
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        draw_character(canvas, &self.character, &self.frames, self.pose);
    }

    /// One-line readout of the walk state for the debug overlay.
    pub fn debug_line(&self) -> String {
        format!(
            "x={:.0} frame={} state={} facing={}",
            self.character.position(),
            self.character.current_frame(),
            self.character.state().label(),
            self.character.facing().label(),
        )
    }
}

fn spawn(tuning: &WalkTuning, canvas_width: f32) -> Character {
    Character::new(tuning.walk_cycle(canvas_width), tuning.spawn_x, tuning.facing)
}

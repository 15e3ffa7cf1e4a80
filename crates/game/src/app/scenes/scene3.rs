use engine::{Canvas, InputAction, Rgba, Scene, SceneCommand, SceneKey, Vec2};
use tracing::info;

use super::walker::Walker;
use crate::app::ui::{ClipPlayer, PromptBox};

const BACKGROUND_FALLBACK: Rgba = Rgba::rgb(60, 70, 60);
const PET_ZONE_MIN_X: f32 = 300.0;
const PET_ZONE_MAX_X: f32 = 600.0;
const NEXT_PROMPT_MAX_X: f32 = 100.0;
const PET_MESSAGE_TICKS: u32 = 120;

pub(crate) struct Scene3 {
    walker: Walker,
    clip: ClipPlayer,
    pet_prompt: PromptBox,
    pet_message: PromptBox,
    next_prompt: PromptBox,
    pet_completed: bool,
    pet_message_ticks: u32,
}

impl Scene3 {
    pub(crate) fn new(walker: Walker, clip: ClipPlayer) -> Self {
        Self {
            walker,
            clip,
            pet_prompt: PromptBox::centered(400.0, 300.0, 200.0, 60.0, "Click to Pet"),
            pet_message: PromptBox::centered(400.0, 300.0, 200.0, 60.0, "They liked that"),
            next_prompt: PromptBox::centered(110.0, 400.0, 200.0, 60.0, "Enter (E)"),
            pet_completed: false,
            pet_message_ticks: 0,
        }
    }

    fn pet_prompt_visible(&self) -> bool {
        let position = self.walker.position();
        !self.pet_completed && position > PET_ZONE_MIN_X && position < PET_ZONE_MAX_X
    }

    fn next_prompt_visible(&self) -> bool {
        self.walker.position() < NEXT_PROMPT_MAX_X
    }

    fn pet_message_showing(&self) -> bool {
        self.pet_message_ticks > 0
    }
}

impl Scene for Scene3 {
    fn load(&mut self) {
        self.walker.reset();
        self.clip.play();
        self.pet_completed = false;
        self.pet_message_ticks = 0;
    }

    fn tick(&mut self, canvas: &mut dyn Canvas, _cursor: Option<Vec2>) -> SceneCommand {
        self.walker.tick();
        self.clip.tick();

        self.clip.draw(canvas, BACKGROUND_FALLBACK);
        self.walker.draw(canvas);

        if self.pet_message_showing() {
            self.pet_message.draw(canvas);
            self.pet_message_ticks -= 1;
        } else if self.pet_prompt_visible() {
            self.pet_prompt.draw(canvas);
        }
        if self.next_prompt_visible() {
            self.next_prompt.draw(canvas);
        }
        SceneCommand::None
    }

    fn pointer_pressed(&mut self, position: Vec2) -> SceneCommand {
        if self.next_prompt_visible() && self.next_prompt.contains(position) {
            return SceneCommand::FadeTo(SceneKey::Scene4);
        }
        if self.pet_prompt_visible()
            && !self.pet_message_showing()
            && self.pet_prompt.contains(position)
        {
            info!("pet_completed");
            self.pet_completed = true;
            self.pet_message_ticks = PET_MESSAGE_TICKS;
        }
        SceneCommand::None
    }

    fn key_pressed(&mut self, action: InputAction) -> SceneCommand {
        if action == InputAction::Interact && self.next_prompt_visible() {
            return SceneCommand::FadeTo(SceneKey::Scene4);
        }
        self.walker.press(action);
        SceneCommand::None
    }

    fn key_released(&mut self, action: InputAction) -> SceneCommand {
        self.walker.release(action);
        SceneCommand::None
    }

    fn exit(&mut self) {
        self.walker.release_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::assets::{GameAssets, SCENE3_CHARACTER_GRADE};
    use crate::app::tuning::WalkTuning;
    use engine::DrawList;

    fn scene() -> Scene3 {
        let assets = GameAssets::new().expect("assets");
        let walker = Walker::new(
            WalkTuning::SCENE3,
            800.0,
            assets.character_frames,
            SCENE3_CHARACTER_GRADE,
        );
        let mut scene = Scene3::new(walker, ClipPlayer::looping(assets.scene3_clip));
        scene.load();
        scene
    }

    fn run(scene: &mut Scene3, ticks: u32) -> DrawList {
        let mut canvas = DrawList::new(800, 800);
        for _ in 0..ticks {
            canvas.reset();
            scene.tick(&mut canvas, None);
        }
        canvas
    }

    /// Walks left from spawn (x=750) for the given number of walking ticks
    /// at 0.5 px per tick, then stops.
    fn walk_left(scene: &mut Scene3, walking_ticks: u32) {
        scene.key_pressed(InputAction::WalkLeft);
        run(scene, 13 + walking_ticks);
        scene.key_released(InputAction::WalkLeft);
        run(scene, 13);
    }

    #[test]
    fn petting_shows_message_once() {
        let mut scene = scene();
        walk_left(&mut scene, 600);
        assert_eq!(scene.walker.position(), 450.0);
        assert!(scene.pet_prompt_visible());

        scene.pointer_pressed(Vec2::new(400.0, 300.0));
        assert!(scene.pet_completed);
        let canvas = run(&mut scene, 1);
        assert!(canvas.contains_text("They liked that"));

        let canvas = run(&mut scene, PET_MESSAGE_TICKS);
        assert!(!canvas.contains_text("They liked that"));
        assert!(!canvas.contains_text("Click to Pet"));
        assert!(!scene.pet_prompt_visible());
    }

    #[test]
    fn pet_prompt_needs_the_zone() {
        let mut scene = scene();
        assert!(!scene.pet_prompt_visible());
        scene.pointer_pressed(Vec2::new(400.0, 300.0));
        assert!(!scene.pet_completed);
    }

    #[test]
    fn next_prompt_fades_to_scene4() {
        let mut scene = scene();
        assert_eq!(scene.key_pressed(InputAction::Interact), SceneCommand::None);
        scene.key_released(InputAction::Interact);

        walk_left(&mut scene, 1400);
        assert!(scene.next_prompt_visible(), "x = {}", scene.walker.position());
        assert_eq!(
            scene.pointer_pressed(Vec2::new(110.0, 400.0)),
            SceneCommand::FadeTo(SceneKey::Scene4)
        );
        assert_eq!(
            scene.key_pressed(InputAction::Interact),
            SceneCommand::FadeTo(SceneKey::Scene4)
        );
    }

    #[test]
    fn restart_clears_pet_state() {
        let mut scene = scene();
        walk_left(&mut scene, 600);
        scene.pointer_pressed(Vec2::new(400.0, 300.0));
        scene.load();
        assert!(!scene.pet_completed);
        assert_eq!(scene.walker.position(), 750.0);
    }
}

use engine::{
    AssetKey, Canvas, ImageDraw, InputAction, Rgba, Scene, SceneCommand, SceneKey, TextAnchor,
    Vec2,
};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::info;

use super::walker::Walker;
use crate::app::ui::{draw_caption, Button, PromptBox};

const BACKGROUND_FALLBACK: Rgba = Rgba::rgb(200, 220, 240);
const ENTER_PROMPT_MAX_X: f32 = 120.0;
const INSTRUCTIONS: &str = "Press A to walk left, D to walk right";

/// First playable section: walk to the left edge to reach the next area, or
/// gamble on the button for an immediate ending.
pub(crate) struct GameScene {
    walker: Walker,
    background: AssetKey,
    foreground: AssetKey,
    enter_prompt: PromptBox,
    outcome_button: Button,
    rng: StdRng,
}

impl GameScene {
    pub(crate) fn new(
        walker: Walker,
        background: AssetKey,
        foreground: AssetKey,
        rng: StdRng,
    ) -> Self {
        Self {
            walker,
            background,
            foreground,
            enter_prompt: PromptBox::centered(100.0, 400.0, 180.0, 60.0, "Press E to Enter"),
            outcome_button: Button::centered(400.0, 700.0, 260.0, 90.0, "PRESS HERE"),
            rng,
        }
    }

    fn enter_prompt_visible(&self) -> bool {
        self.walker.position() < ENTER_PROMPT_MAX_X
    }

    fn roll_outcome(&mut self) -> SceneCommand {
        let won = self.rng.gen_bool(0.5);
        let target = if won { SceneKey::Win } else { SceneKey::Lose };
        info!(outcome = target.label(), "outcome_rolled");
        SceneCommand::SwitchTo(target)
    }
}

impl Scene for GameScene {
    fn load(&mut self) {
        self.walker.reset();
    }

    fn tick(&mut self, canvas: &mut dyn Canvas, cursor: Option<Vec2>) -> SceneCommand {
        self.walker.tick();

        let (width, height) = (canvas.width(), canvas.height());
        canvas.draw_image(ImageDraw::backdrop(
            self.background.clone(),
            width,
            height,
            BACKGROUND_FALLBACK,
        ));
        self.walker.draw(canvas);
        canvas.draw_image(ImageDraw::backdrop(
            self.foreground.clone(),
            width,
            height,
            Rgba::TRANSPARENT,
        ));

        if self.enter_prompt_visible() {
            self.enter_prompt.draw(canvas);
        }
        self.outcome_button.draw(canvas, cursor, 255);
        draw_caption(canvas, INSTRUCTIONS, Vec2::new(width / 2.0, 40.0), 16.0);
        canvas.draw_text(
            &self.walker.debug_line(),
            Vec2::new(10.0, height - 20.0),
            12.0,
            TextAnchor::TopLeft,
            Rgba::BLACK,
        );
        SceneCommand::None
    }

    fn pointer_pressed(&mut self, position: Vec2) -> SceneCommand {
        if self.outcome_button.contains(position) {
            return self.roll_outcome();
        }
        SceneCommand::None
    }

    fn key_pressed(&mut self, action: InputAction) -> SceneCommand {
        match action {
            InputAction::Interact if self.enter_prompt_visible() => {
                SceneCommand::FadeTo(SceneKey::Scene2)
            }
            InputAction::Confirm => self.roll_outcome(),
            _ => {
                self.walker.press(action);
                SceneCommand::None
            }
        }
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
    use crate::app::assets::{GameAssets, GAME_CHARACTER_GRADE};
    use crate::app::tuning::WalkTuning;
    use engine::DrawList;
    use rand::SeedableRng;

    fn scene(seed: u64) -> GameScene {
        let assets = GameAssets::new().expect("assets");
        let walker = Walker::new(
            WalkTuning::GAME,
            800.0,
            assets.character_frames.clone(),
            GAME_CHARACTER_GRADE,
        );
        let mut scene = GameScene::new(
            walker,
            assets.game_background,
            assets.game_foreground,
            StdRng::seed_from_u64(seed),
        );
        scene.load();
        scene
    }

    fn walk_left(scene: &mut GameScene, ticks: u32) {
        let mut canvas = DrawList::new(800, 800);
        scene.key_pressed(InputAction::WalkLeft);
        for _ in 0..ticks {
            canvas.reset();
            scene.tick(&mut canvas, None);
        }
    }

    #[test]
    fn interact_is_ignored_away_from_the_door() {
        let mut scene = scene(1);
        assert_eq!(scene.key_pressed(InputAction::Interact), SceneCommand::None);
    }

    #[test]
    fn walking_to_the_door_shows_prompt_and_interact_fades() {
        let mut scene = scene(1);
        // Spawn at 750: 12 transition ticks, then 1px per walking tick.
        walk_left(&mut scene, 12 + 640);
        assert!(scene.walker.position() < ENTER_PROMPT_MAX_X);

        let mut canvas = DrawList::new(800, 800);
        scene.tick(&mut canvas, None);
        assert!(canvas.contains_text("Press E to Enter"));
        assert_eq!(
            scene.key_pressed(InputAction::Interact),
            SceneCommand::FadeTo(SceneKey::Scene2)
        );
    }

    #[test]
    fn outcome_button_switches_to_an_ending() {
        for seed in 0..8 {
            let mut scene = scene(seed);
            let command = scene.pointer_pressed(Vec2::new(400.0, 700.0));
            assert!(matches!(
                command,
                SceneCommand::SwitchTo(SceneKey::Win) | SceneCommand::SwitchTo(SceneKey::Lose)
            ));
        }
    }

    #[test]
    fn both_endings_are_reachable() {
        let mut scene = scene(42);
        let mut seen_win = false;
        let mut seen_lose = false;
        for _ in 0..64 {
            match scene.key_pressed(InputAction::Confirm) {
                SceneCommand::SwitchTo(SceneKey::Win) => seen_win = true,
                SceneCommand::SwitchTo(SceneKey::Lose) => seen_lose = true,
                other => panic!("unexpected command {other:?}"),
            }
        }
        assert!(seen_win && seen_lose);
    }

    #[test]
    fn leaving_the_scene_releases_held_keys() {
        let mut scene = scene(1);
        scene.key_pressed(InputAction::WalkLeft);
        scene.exit();
        assert!(!scene.walker.character().is_movement_key_held());
    }

    #[test]
    fn debug_readout_is_drawn() {
        let mut scene = scene(1);
        let mut canvas = DrawList::new(800, 800);
        scene.tick(&mut canvas, None);
        assert!(canvas.contains_text("x=750 frame=0 state=idle facing=Right"));
    }
}

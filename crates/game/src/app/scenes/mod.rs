mod game;
mod instructions;
mod outcome;
mod scene2;
mod scene3;
mod scene4;
mod start;
mod walker;

use engine::{FadeTransition, SceneKey, SceneMachine, SceneTable, SceneTableError};
use rand::rngs::StdRng;

use self::game::GameScene;
use self::instructions::InstructionsScene;
use self::outcome::OutcomeScene;
use self::scene2::Scene2;
use self::scene3::Scene3;
use self::scene4::Scene4;
use self::start::StartScene;
use self::walker::Walker;
use super::assets::{
    GameAssets, GAME_CHARACTER_GRADE, SCENE2_CHARACTER_GRADE, SCENE3_CHARACTER_GRADE,
};
use super::tuning::GameTuning;
use super::ui::ClipPlayer;

pub(crate) const CANVAS_WIDTH: u32 = 800;
pub(crate) const CANVAS_HEIGHT: u32 = 800;
const CUTSCENE_CLIP_TICKS: u32 = 600;

/// Wires every scene of the game into a machine that starts on the title.
pub(crate) fn build_scene_machine(
    assets: &GameAssets,
    tuning: &GameTuning,
    rng: StdRng,
) -> Result<SceneMachine, SceneTableError> {
    let width = CANVAS_WIDTH as f32;
    let walker = |walk, grade| Walker::new(walk, width, assets.character_frames.clone(), grade);

    SceneTable::new()
        .with(
            SceneKey::Start,
            Box::new(StartScene::new(ClipPlayer::new(
                assets.title_clip.clone(),
                tuning.title_clip_ticks,
            ))),
        )
        .with(SceneKey::Instructions, Box::new(InstructionsScene))
        .with(
            SceneKey::Game,
            Box::new(GameScene::new(
                walker(tuning.game_walk(), GAME_CHARACTER_GRADE),
                assets.game_background.clone(),
                assets.game_foreground.clone(),
                rng,
            )),
        )
        .with(
            SceneKey::Scene2,
            Box::new(Scene2::new(
                walker(tuning.scene2_walk(), SCENE2_CHARACTER_GRADE),
                ClipPlayer::looping(assets.scene2_clip.clone()),
            )),
        )
        .with(
            SceneKey::Scene3,
            Box::new(Scene3::new(
                walker(tuning.scene3_walk(), SCENE3_CHARACTER_GRADE),
                ClipPlayer::looping(assets.scene3_clip.clone()),
            )),
        )
        .with(
            SceneKey::Scene4,
            Box::new(Scene4::new(ClipPlayer::new(
                assets.scene4_clip.clone(),
                CUTSCENE_CLIP_TICKS,
            ))),
        )
        .with(SceneKey::Win, Box::new(OutcomeScene::win()))
        .with(SceneKey::Lose, Box::new(OutcomeScene::lose()))
        .build(SceneKey::Start, FadeTransition::new(tuning.fade_speed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{DrawList, InputAction, Vec2};
    use rand::SeedableRng;

    fn machine() -> SceneMachine {
        let assets = GameAssets::new().expect("assets");
        build_scene_machine(&assets, &GameTuning::default(), StdRng::seed_from_u64(7))
            .expect("machine")
    }

    fn run(machine: &mut SceneMachine, ticks: u32) {
        let mut canvas = DrawList::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        for _ in 0..ticks {
            canvas.reset();
            machine.tick(&mut canvas, None);
        }
    }

    #[test]
    fn starts_on_the_title_with_configured_fade() {
        let machine = machine();
        assert_eq!(machine.active_scene(), SceneKey::Start);
        assert_eq!(machine.fade().speed(), GameTuning::default().fade_speed);
    }

    #[test]
    fn skipping_the_intro_reaches_the_game() {
        let mut machine = machine();
        machine.key_pressed(InputAction::Confirm);
        run(&mut machine, 10);
        machine.key_pressed(InputAction::Cancel);
        assert_eq!(machine.active_scene(), SceneKey::Game);
    }

    #[test]
    fn outcome_then_restart_returns_to_title() {
        let mut machine = machine();
        machine.key_pressed(InputAction::Cancel);
        machine.key_pressed(InputAction::Confirm);
        machine.key_pressed(InputAction::Cancel);
        assert_eq!(machine.active_scene(), SceneKey::Game);

        machine.pointer_pressed(Vec2::new(400.0, 700.0));
        let ending = machine.active_scene();
        assert!(matches!(ending, SceneKey::Win | SceneKey::Lose));

        machine.key_pressed(InputAction::Confirm);
        assert_eq!(machine.active_scene(), SceneKey::Start);
    }
}

use engine::{Canvas, InputAction, Rgba, Scene, SceneCommand, SceneKey, Vec2};
use tracing::info;

use crate::app::ui::{draw_caption, Button, ClipPlayer};

const SKIP_DELAY_TICKS: u32 = 60;
const SKIP_FADE_IN_TICKS: u32 = 120;

/// Title screen. START plays the intro clip, which ends in the first
/// playable section either when it runs out or when it is skipped.
pub(crate) struct StartScene {
    clip: ClipPlayer,
    start_button: Button,
    controls_button: Button,
    skip_button: Button,
}

impl StartScene {
    pub(crate) fn new(clip: ClipPlayer) -> Self {
        Self {
            clip,
            start_button: Button::centered(200.0, 400.0, 240.0, 80.0, "START"),
            controls_button: Button::centered(200.0, 500.0, 240.0, 60.0, "CONTROLS"),
            skip_button: Button::centered(680.0, 740.0, 100.0, 40.0, "SKIP"),
        }
    }

    fn begin_intro(&mut self) {
        self.clip.play();
        info!("intro_clip_started");
    }

    fn skip_intro(&mut self) -> SceneCommand {
        info!(elapsed_ticks = self.clip.elapsed_ticks(), "intro_clip_skipped");
        self.clip.stop();
        SceneCommand::SwitchTo(SceneKey::Game)
    }

    /// Opacity of the skip button: hidden for the first second of the clip,
    /// then ramping to fully opaque over the next two.
    fn skip_opacity(&self) -> u8 {
        if !self.clip.is_playing() {
            return 0;
        }
        let elapsed = self.clip.elapsed_ticks();
        if elapsed < SKIP_DELAY_TICKS {
            return 0;
        }
        let into_fade = (elapsed - SKIP_DELAY_TICKS).min(SKIP_FADE_IN_TICKS);
        (into_fade * 255 / SKIP_FADE_IN_TICKS) as u8
    }
}

impl Scene for StartScene {
    fn load(&mut self) {
        self.clip.stop();
    }

    fn tick(&mut self, canvas: &mut dyn Canvas, cursor: Option<Vec2>) -> SceneCommand {
        if self.clip.tick() {
            info!("intro_clip_finished");
            self.clip.stop();
            return SceneCommand::SwitchTo(SceneKey::Game);
        }

        self.clip.draw(canvas, Rgba::BLACK);
        if self.clip.is_playing() {
            self.skip_button.draw(canvas, cursor, self.skip_opacity());
        } else {
            draw_caption(canvas, "GOATMAN", Vec2::new(200.0, 250.0), 48.0);
            self.start_button.draw(canvas, cursor, 255);
            self.controls_button.draw(canvas, cursor, 255);
        }
        SceneCommand::None
    }

    fn pointer_pressed(&mut self, position: Vec2) -> SceneCommand {
        if self.clip.is_playing() {
            if self.skip_opacity() > 0 && self.skip_button.contains(position) {
                return self.skip_intro();
            }
            return SceneCommand::None;
        }
        if self.start_button.contains(position) {
            self.begin_intro();
        } else if self.controls_button.contains(position) {
            return SceneCommand::SwitchTo(SceneKey::Instructions);
        }
        SceneCommand::None
    }

    fn key_pressed(&mut self, action: InputAction) -> SceneCommand {
        match action {
            InputAction::Confirm if !self.clip.is_playing() => {
                self.begin_intro();
                SceneCommand::None
            }
            InputAction::Cancel if self.clip.is_playing() => self.skip_intro(),
            _ => SceneCommand::None,
        }
    }

    fn enter(&mut self, _previous: SceneKey) {
        self.clip.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{AssetKey, DrawList};

    fn scene(clip_ticks: u32) -> StartScene {
        let clip = ClipPlayer::new(AssetKey::parse("clips/title").expect("key"), clip_ticks);
        let mut scene = StartScene::new(clip);
        scene.load();
        scene
    }

    fn run_ticks(scene: &mut StartScene, ticks: u32) -> SceneCommand {
        let mut canvas = DrawList::new(800, 800);
        let mut last = SceneCommand::None;
        for _ in 0..ticks {
            canvas.reset();
            last = scene.tick(&mut canvas, None);
            if last != SceneCommand::None {
                break;
            }
        }
        last
    }

    #[test]
    fn idle_title_shows_start_button() {
        let mut scene = scene(600);
        let mut canvas = DrawList::new(800, 800);
        scene.tick(&mut canvas, None);
        assert!(canvas.contains_text("START"));
        assert!(!canvas.contains_text("SKIP"));
    }

    #[test]
    fn clicking_start_plays_the_intro() {
        let mut scene = scene(600);
        assert_eq!(scene.pointer_pressed(Vec2::new(200.0, 400.0)), SceneCommand::None);
        assert!(scene.clip.is_playing());
    }

    #[test]
    fn click_outside_start_does_nothing() {
        let mut scene = scene(600);
        scene.pointer_pressed(Vec2::new(600.0, 100.0));
        assert!(!scene.clip.is_playing());
    }

    #[test]
    fn intro_end_switches_to_game() {
        let mut scene = scene(30);
        scene.key_pressed(InputAction::Confirm);
        assert_eq!(run_ticks(&mut scene, 29), SceneCommand::None);
        assert_eq!(run_ticks(&mut scene, 1), SceneCommand::SwitchTo(SceneKey::Game));
    }

    #[test]
    fn skip_button_fades_in_after_one_second() {
        let mut scene = scene(600);
        scene.key_pressed(InputAction::Confirm);
        run_ticks(&mut scene, 59);
        assert_eq!(scene.skip_opacity(), 0);
        assert_eq!(scene.pointer_pressed(Vec2::new(680.0, 740.0)), SceneCommand::None);

        run_ticks(&mut scene, 61);
        assert_eq!(scene.skip_opacity(), 127);
        run_ticks(&mut scene, 60);
        assert_eq!(scene.skip_opacity(), 255);
        assert_eq!(
            scene.pointer_pressed(Vec2::new(680.0, 740.0)),
            SceneCommand::SwitchTo(SceneKey::Game)
        );
        assert!(!scene.clip.is_playing());
    }

    #[test]
    fn escape_skips_immediately() {
        let mut scene = scene(600);
        assert_eq!(scene.key_pressed(InputAction::Cancel), SceneCommand::None);
        scene.key_pressed(InputAction::Confirm);
        assert_eq!(
            scene.key_pressed(InputAction::Cancel),
            SceneCommand::SwitchTo(SceneKey::Game)
        );
    }

    #[test]
    fn controls_button_opens_instructions() {
        let mut scene = scene(600);
        assert_eq!(
            scene.pointer_pressed(Vec2::new(200.0, 500.0)),
            SceneCommand::SwitchTo(SceneKey::Instructions)
        );
    }
}

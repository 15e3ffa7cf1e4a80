use thiserror::Error;
use tracing::info;

use super::canvas::{Canvas, Rect, Rgba, Vec2};
use super::fade::FadeTransition;
use super::input::InputAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKey {
    Start,
    Instructions,
    Game,
    Scene2,
    Scene3,
    Scene4,
    Win,
    Lose,
}

impl SceneKey {
    pub const COUNT: usize = 8;
    pub const ALL: [SceneKey; Self::COUNT] = [
        SceneKey::Start,
        SceneKey::Instructions,
        SceneKey::Game,
        SceneKey::Scene2,
        SceneKey::Scene3,
        SceneKey::Scene4,
        SceneKey::Win,
        SceneKey::Lose,
    ];

    pub const fn index(self) -> usize {
        match self {
            SceneKey::Start => 0,
            SceneKey::Instructions => 1,
            SceneKey::Game => 2,
            SceneKey::Scene2 => 3,
            SceneKey::Scene3 => 4,
            SceneKey::Scene4 => 5,
            SceneKey::Win => 6,
            SceneKey::Lose => 7,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SceneKey::Start => "start",
            SceneKey::Instructions => "instructions",
            SceneKey::Game => "game",
            SceneKey::Scene2 => "scene2",
            SceneKey::Scene3 => "scene3",
            SceneKey::Scene4 => "scene4",
            SceneKey::Win => "win",
            SceneKey::Lose => "lose",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    /// Fade to black and switch at the midpoint.
    FadeTo(SceneKey),
    /// Switch immediately, leaving any running fade untouched.
    SwitchTo(SceneKey),
    /// Reload every scene to its initial state, cancel any fade, then activate the key.
    RestartAt(SceneKey),
}

/// One full-screen mode of the game. Every input handler defaults to a no-op,
/// so a scene only implements the events it reacts to.
pub trait Scene {
    /// Puts the scene into its initial state. Called once when the machine is
    /// built and again on every restart.
    fn load(&mut self);

    /// Draws the scene and advances it by one tick.
    fn tick(&mut self, canvas: &mut dyn Canvas, cursor: Option<Vec2>) -> SceneCommand;

    fn pointer_pressed(&mut self, _position: Vec2) -> SceneCommand {
        SceneCommand::None
    }

    fn key_pressed(&mut self, _action: InputAction) -> SceneCommand {
        SceneCommand::None
    }

    fn key_released(&mut self, _action: InputAction) -> SceneCommand {
        SceneCommand::None
    }

    /// Called when the scene becomes active through a switch.
    fn enter(&mut self, _previous: SceneKey) {}

    /// Called when another scene takes over.
    fn exit(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SceneTableError {
    #[error("no scene registered for {key:?}")]
    MissingScene { key: SceneKey },
}

/// Collects one scene per [`SceneKey`] before a [`SceneMachine`] is built.
pub struct SceneTable {
    scenes: [Option<Box<dyn Scene>>; SceneKey::COUNT],
}

impl SceneTable {
    pub fn new() -> Self {
        Self {
            scenes: std::array::from_fn(|_| None),
        }
    }

    pub fn with(mut self, key: SceneKey, scene: Box<dyn Scene>) -> Self {
        self.insert(key, scene);
        self
    }

    pub fn insert(&mut self, key: SceneKey, scene: Box<dyn Scene>) {
        self.scenes[key.index()] = Some(scene);
    }

    pub fn build(
        self,
        initial: SceneKey,
        fade: FadeTransition,
    ) -> Result<SceneMachine, SceneTableError> {
        let mut scenes = Vec::with_capacity(SceneKey::COUNT);
        for (key, slot) in SceneKey::ALL.into_iter().zip(self.scenes) {
            let scene = slot.ok_or(SceneTableError::MissingScene { key })?;
            scenes.push(scene);
        }
        let mut machine = SceneMachine {
            scenes,
            active_scene: initial,
            fade,
            switch_count: 0,
        };
        machine.load_all();
        info!(scene = initial.label(), "scene_loaded");
        Ok(machine)
    }
}

impl Default for SceneTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns every scene, the active key and the fade; routes ticks and input to
/// the active scene and applies the commands it returns.
pub struct SceneMachine {
    scenes: Vec<Box<dyn Scene>>,
    active_scene: SceneKey,
    fade: FadeTransition,
    switch_count: u64,
}

impl SceneMachine {
    pub fn active_scene(&self) -> SceneKey {
        self.active_scene
    }

    pub fn fade(&self) -> &FadeTransition {
        &self.fade
    }

    pub fn switch_count(&self) -> u64 {
        self.switch_count
    }

    pub fn tick(&mut self, canvas: &mut dyn Canvas, cursor: Option<Vec2>) {
        let command = self.active_mut().tick(canvas, cursor);
        self.apply_command(command);

        let Some(step) = self.fade.advance() else {
            return;
        };
        if let Some(target) = step.switch_to {
            self.switch_to(target, "fade");
        }
        let overlay = Rect::new(0.0, 0.0, canvas.width(), canvas.height());
        canvas.fill_rect(overlay, Rgba::BLACK.with_alpha(step.overlay_alpha));
        if step.finished {
            info!(scene = self.active_scene.label(), "fade_completed");
        }
    }

    pub fn pointer_pressed(&mut self, position: Vec2) {
        let command = self.active_mut().pointer_pressed(position);
        self.apply_command(command);
    }

    pub fn key_pressed(&mut self, action: InputAction) {
        let command = self.active_mut().key_pressed(action);
        self.apply_command(command);
    }

    pub fn key_released(&mut self, action: InputAction) {
        let command = self.active_mut().key_released(action);
        self.apply_command(command);
    }

    pub fn shutdown(&mut self) {
        self.active_mut().exit();
        info!(scene = self.active_scene.label(), "scene_machine_shutdown");
    }

    fn apply_command(&mut self, command: SceneCommand) {
        match command {
            SceneCommand::None => {}
            SceneCommand::FadeTo(target) => {
                self.fade.start(target);
                info!(
                    from = self.active_scene.label(),
                    target = target.label(),
                    "fade_started"
                );
            }
            SceneCommand::SwitchTo(target) => {
                self.switch_to(target, "direct");
            }
            SceneCommand::RestartAt(target) => {
                self.fade.cancel();
                self.active_mut().exit();
                self.load_all();
                let previous = self.active_scene;
                self.active_scene = target;
                self.switch_count = self.switch_count.saturating_add(1);
                info!(
                    from = previous.label(),
                    to = target.label(),
                    "restart"
                );
            }
        }
    }

    fn switch_to(&mut self, target: SceneKey, via: &'static str) -> bool {
        if self.active_scene == target {
            return false;
        }
        let previous = self.active_scene;
        self.active_mut().exit();
        self.active_scene = target;
        self.active_mut().enter(previous);
        self.switch_count = self.switch_count.saturating_add(1);
        info!(
            from = previous.label(),
            to = target.label(),
            via,
            "scene_switched"
        );
        true
    }

    fn load_all(&mut self) {
        for scene in &mut self.scenes {
            scene.load();
        }
    }

    fn active_mut(&mut self) -> &mut dyn Scene {
        &mut *self.scenes[self.active_scene.index()]
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::app::canvas::{DrawCommand, DrawList};

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Load(SceneKey),
        Tick(SceneKey),
        Pointer(SceneKey),
        KeyDown(SceneKey, InputAction),
        KeyUp(SceneKey, InputAction),
        Enter(SceneKey, SceneKey),
        Exit(SceneKey),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    struct ScriptedScene {
        key: SceneKey,
        log: Log,
        on_tick: SceneCommand,
        on_pointer: SceneCommand,
        on_key: SceneCommand,
    }

    impl ScriptedScene {
        fn boxed(key: SceneKey, log: &Log) -> Box<dyn Scene> {
            Box::new(Self {
                key,
                log: Rc::clone(log),
                on_tick: SceneCommand::None,
                on_pointer: SceneCommand::None,
                on_key: SceneCommand::None,
            })
        }
    }

    impl Scene for ScriptedScene {
        fn load(&mut self) {
            self.log.borrow_mut().push(Event::Load(self.key));
        }

        fn tick(&mut self, _canvas: &mut dyn Canvas, _cursor: Option<Vec2>) -> SceneCommand {
            self.log.borrow_mut().push(Event::Tick(self.key));
            std::mem::replace(&mut self.on_tick, SceneCommand::None)
        }

        fn pointer_pressed(&mut self, _position: Vec2) -> SceneCommand {
            self.log.borrow_mut().push(Event::Pointer(self.key));
            self.on_pointer
        }

        fn key_pressed(&mut self, action: InputAction) -> SceneCommand {
            self.log.borrow_mut().push(Event::KeyDown(self.key, action));
            self.on_key
        }

        fn key_released(&mut self, action: InputAction) -> SceneCommand {
            self.log.borrow_mut().push(Event::KeyUp(self.key, action));
            SceneCommand::None
        }

        fn enter(&mut self, previous: SceneKey) {
            self.log.borrow_mut().push(Event::Enter(self.key, previous));
        }

        fn exit(&mut self) {
            self.log.borrow_mut().push(Event::Exit(self.key));
        }
    }

    struct Silent;

    impl Scene for Silent {
        fn load(&mut self) {}

        fn tick(&mut self, _canvas: &mut dyn Canvas, _cursor: Option<Vec2>) -> SceneCommand {
            SceneCommand::None
        }
    }

    fn full_table(log: &Log) -> SceneTable {
        SceneKey::ALL
            .into_iter()
            .fold(SceneTable::new(), |table, key| table.with(key, ScriptedScene::boxed(key, log)))
    }

    #[test]
    fn scene_key_indices_match_all_order() {
        for (position, key) in SceneKey::ALL.into_iter().enumerate() {
            assert_eq!(key.index(), position);
        }
    }

    #[test]
    fn incomplete_table_is_rejected() {
        let mut table = SceneTable::new();
        for key in SceneKey::ALL {
            if key != SceneKey::Scene4 {
                table.insert(key, Box::new(Silent));
            }
        }
        let error = table
            .build(SceneKey::Start, FadeTransition::default())
            .err()
            .expect("missing scene should fail");
        assert_eq!(error, SceneTableError::MissingScene { key: SceneKey::Scene4 });
    }

    #[test]
    fn build_loads_every_scene_once() {
        let log = Log::default();
        let machine = full_table(&log)
            .build(SceneKey::Game, FadeTransition::default())
            .expect("machine");
        assert_eq!(machine.active_scene(), SceneKey::Game);
        let loads = log
            .borrow()
            .iter()
            .filter(|event| matches!(event, Event::Load(_)))
            .count();
        assert_eq!(loads, SceneKey::COUNT);
    }

    #[test]
    fn input_only_reaches_active_scene() {
        let log = Log::default();
        let mut machine = full_table(&log)
            .build(SceneKey::Scene2, FadeTransition::default())
            .expect("machine");
        log.borrow_mut().clear();

        machine.pointer_pressed(Vec2::new(10.0, 10.0));
        machine.key_pressed(InputAction::WalkLeft);
        machine.key_released(InputAction::WalkLeft);

        assert_eq!(
            *log.borrow(),
            vec![
                Event::Pointer(SceneKey::Scene2),
                Event::KeyDown(SceneKey::Scene2, InputAction::WalkLeft),
                Event::KeyUp(SceneKey::Scene2, InputAction::WalkLeft),
            ]
        );
    }

    #[test]
    fn direct_switch_calls_exit_then_enter() {
        let log = Log::default();
        let mut table = full_table(&log);
        table.insert(
            SceneKey::Win,
            Box::new(ScriptedScene {
                key: SceneKey::Win,
                log: Rc::clone(&log),
                on_tick: SceneCommand::None,
                on_pointer: SceneCommand::SwitchTo(SceneKey::Start),
                on_key: SceneCommand::None,
            }),
        );
        let mut machine = table
            .build(SceneKey::Win, FadeTransition::default())
            .expect("machine");
        log.borrow_mut().clear();

        machine.pointer_pressed(Vec2::default());
        assert_eq!(machine.active_scene(), SceneKey::Start);
        assert_eq!(machine.switch_count(), 1);
        assert_eq!(
            *log.borrow(),
            vec![
                Event::Pointer(SceneKey::Win),
                Event::Exit(SceneKey::Win),
                Event::Enter(SceneKey::Start, SceneKey::Win),
            ]
        );
    }

    #[test]
    fn fade_switches_at_midpoint_and_draws_overlay_last() {
        let log = Log::default();
        let mut table = full_table(&log);
        table.insert(
            SceneKey::Game,
            Box::new(ScriptedScene {
                key: SceneKey::Game,
                log: Rc::clone(&log),
                on_tick: SceneCommand::None,
                on_pointer: SceneCommand::None,
                on_key: SceneCommand::FadeTo(SceneKey::Scene2),
            }),
        );
        let mut machine = table
            .build(SceneKey::Game, FadeTransition::default())
            .expect("machine");
        machine.key_pressed(InputAction::Interact);
        assert!(machine.fade().is_active());

        let mut canvas = DrawList::new(800, 800);
        for tick in 1..=51u32 {
            canvas.reset();
            machine.tick(&mut canvas, None);
            let expected = if tick < 26 { SceneKey::Game } else { SceneKey::Scene2 };
            assert_eq!(machine.active_scene(), expected, "tick {tick}");
            match canvas.commands().last() {
                Some(DrawCommand::FillRect { color, .. }) => {
                    assert_eq!(color.alpha() as u32, (tick * 5).min(255));
                }
                other => panic!("expected overlay on tick {tick}, got {other:?}"),
            }
        }
        assert!(!machine.fade().is_active());
        assert_eq!(machine.switch_count(), 1);

        canvas.reset();
        machine.tick(&mut canvas, None);
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn restart_reloads_all_scenes_and_cancels_fade() {
        let log = Log::default();
        let mut table = full_table(&log);
        table.insert(
            SceneKey::Lose,
            Box::new(ScriptedScene {
                key: SceneKey::Lose,
                log: Rc::clone(&log),
                on_tick: SceneCommand::FadeTo(SceneKey::Game),
                on_pointer: SceneCommand::RestartAt(SceneKey::Start),
                on_key: SceneCommand::None,
            }),
        );
        let mut machine = table
            .build(SceneKey::Lose, FadeTransition::default())
            .expect("machine");
        let mut canvas = DrawList::new(800, 800);
        machine.tick(&mut canvas, None);
        assert!(machine.fade().is_active());
        log.borrow_mut().clear();

        machine.pointer_pressed(Vec2::default());
        assert_eq!(machine.active_scene(), SceneKey::Start);
        assert!(!machine.fade().is_active());
        let loads = log
            .borrow()
            .iter()
            .filter(|event| matches!(event, Event::Load(_)))
            .count();
        assert_eq!(loads, SceneKey::COUNT);
    }

    #[test]
    fn switching_to_the_active_scene_is_a_no_op() {
        let log = Log::default();
        let mut machine = full_table(&log)
            .build(SceneKey::Start, FadeTransition::default())
            .expect("machine");
        assert!(!machine.switch_to(SceneKey::Start, "direct"));
        assert_eq!(machine.switch_count(), 0);
    }
}

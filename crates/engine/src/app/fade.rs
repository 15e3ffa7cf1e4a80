use super::scene::SceneKey;

/// Overlay alpha at which the pending scene switch happens.
pub const FADE_MIDPOINT_ALPHA: u8 = 127;
pub const FADE_MAX_ALPHA: u8 = 255;
pub const DEFAULT_FADE_SPEED: u8 = 5;

/// Outcome of one fade tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeStep {
    pub overlay_alpha: u8,
    pub switch_to: Option<SceneKey>,
    pub finished: bool,
}

/// Fade-to-black that switches scene once, at the midpoint of its ramp.
#[derive(Debug, Clone)]
pub struct FadeTransition {
    active: bool,
    target: Option<SceneKey>,
    alpha: u8,
    switched: bool,
    speed: u8,
}

impl FadeTransition {
    pub fn new(speed: u8) -> Self {
        Self {
            active: false,
            target: None,
            alpha: 0,
            switched: false,
            speed: speed.max(1),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn target(&self) -> Option<SceneKey> {
        self.target
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    /// Starts a fade toward `target`. A fade already running is replaced and
    /// its ramp restarts from zero.
    pub fn start(&mut self, target: SceneKey) {
        self.active = true;
        self.target = Some(target);
        self.alpha = 0;
        self.switched = false;
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.target = None;
        self.alpha = 0;
        self.switched = false;
    }

    /// Advances the ramp by one tick. Returns `None` when no fade is running.
    pub fn advance(&mut self) -> Option<FadeStep> {
        if !self.active {
            return None;
        }
        self.alpha = self.alpha.saturating_add(self.speed);

        let switch_to = if self.alpha >= FADE_MIDPOINT_ALPHA && !self.switched {
            self.switched = true;
            self.target
        } else {
            None
        };

        let overlay_alpha = self.alpha;
        let finished = self.alpha >= FADE_MAX_ALPHA;
        if finished {
            self.active = false;
            self.alpha = 0;
        }

        Some(FadeStep {
            overlay_alpha,
            switch_to,
            finished,
        })
    }
}

impl Default for FadeTransition {
    fn default() -> Self {
        Self::new(DEFAULT_FADE_SPEED)
    }
}

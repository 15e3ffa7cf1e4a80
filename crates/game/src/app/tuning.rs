use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use engine::{Facing, FrameBands, WalkCycleConfig, DEFAULT_FADE_SPEED};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

pub(crate) const TUNING_FILE_NAME: &str = "tuning.json";
pub(crate) const DEFAULT_TITLE_CLIP_TICKS: u32 = 600;
const WALK_BOUND_MARGIN_PX: f32 = 50.0;

/// Placement and walk cadence of the character in one playable scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct WalkTuning {
    pub spawn_x: f32,
    pub baseline_y: f32,
    pub facing: Facing,
    pub walk_speed: f32,
    pub transition_ticks_per_frame: u32,
    pub walk_ticks_per_frame: u32,
    pub sprite_scale: f32,
    pub vertical_stretch: f32,
}

impl WalkTuning {
    pub const GAME: Self = Self {
        spawn_x: 750.0,
        baseline_y: 575.0,
        facing: Facing::Right,
        walk_speed: 1.0,
        transition_ticks_per_frame: 6,
        walk_ticks_per_frame: 7,
        sprite_scale: 0.30,
        vertical_stretch: 1.1,
    };

    pub const SCENE2: Self = Self {
        spawn_x: 50.0,
        baseline_y: 750.0,
        facing: Facing::Right,
        walk_speed: 0.5,
        transition_ticks_per_frame: 6,
        walk_ticks_per_frame: 3,
        sprite_scale: 0.05,
        vertical_stretch: 1.1,
    };

    pub const SCENE3: Self = Self {
        spawn_x: 750.0,
        baseline_y: 600.0,
        facing: Facing::Left,
        walk_speed: 0.5,
        transition_ticks_per_frame: 6,
        walk_ticks_per_frame: 3,
        sprite_scale: 0.10,
        vertical_stretch: 1.1,
    };

    pub fn walk_cycle(&self, canvas_width: f32) -> WalkCycleConfig {
        WalkCycleConfig {
            transition_ticks_per_frame: self.transition_ticks_per_frame,
            walk_ticks_per_frame: self.walk_ticks_per_frame,
            walk_speed_px_per_tick: self.walk_speed,
            min_x: WALK_BOUND_MARGIN_PX,
            max_x: canvas_width - WALK_BOUND_MARGIN_PX,
            bands: FrameBands::STANDARD,
        }
    }
}

/// Optional per-field overrides for a scene's [`WalkTuning`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct WalkOverrides {
    pub spawn_x: Option<f32>,
    pub baseline_y: Option<f32>,
    pub walk_speed: Option<f32>,
    pub transition_ticks_per_frame: Option<u32>,
    pub walk_ticks_per_frame: Option<u32>,
    pub sprite_scale: Option<f32>,
    pub vertical_stretch: Option<f32>,
}

impl WalkOverrides {
    pub fn apply(&self, base: WalkTuning) -> WalkTuning {
        WalkTuning {
            spawn_x: self.spawn_x.unwrap_or(base.spawn_x),
            baseline_y: self.baseline_y.unwrap_or(base.baseline_y),
            facing: base.facing,
            walk_speed: self.walk_speed.unwrap_or(base.walk_speed),
            transition_ticks_per_frame: self
                .transition_ticks_per_frame
                .unwrap_or(base.transition_ticks_per_frame),
            walk_ticks_per_frame: self.walk_ticks_per_frame.unwrap_or(base.walk_ticks_per_frame),
            sprite_scale: self.sprite_scale.unwrap_or(base.sprite_scale),
            vertical_stretch: self.vertical_stretch.unwrap_or(base.vertical_stretch),
        }
    }

    fn validate(&self, scene: &'static str) -> Result<(), TuningError> {
        let non_negative = [
            ("walk_speed", self.walk_speed),
            ("spawn_x", self.spawn_x),
            ("baseline_y", self.baseline_y),
        ];
        for (field, value) in non_negative {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(TuningError::Invalid {
                        field: format!("{scene}.{field}"),
                        message: format!("expected a finite non-negative number, got {value}"),
                    });
                }
            }
        }
        let positive = [
            ("sprite_scale", self.sprite_scale),
            ("vertical_stretch", self.vertical_stretch),
        ];
        for (field, value) in positive {
            if let Some(value) = value {
                if !value.is_finite() || value <= 0.0 {
                    return Err(TuningError::Invalid {
                        field: format!("{scene}.{field}"),
                        message: format!("expected a finite positive number, got {value}"),
                    });
                }
            }
        }
        let ticks = [
            ("transition_ticks_per_frame", self.transition_ticks_per_frame),
            ("walk_ticks_per_frame", self.walk_ticks_per_frame),
        ];
        for (field, value) in ticks {
            if value == Some(0) {
                return Err(TuningError::Invalid {
                    field: format!("{scene}.{field}"),
                    message: "must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameTuning {
    pub fade_speed: u8,
    pub title_clip_ticks: u32,
    pub game: WalkOverrides,
    pub scene2: WalkOverrides,
    pub scene3: WalkOverrides,
}

impl Default for GameTuning {
    fn default() -> Self {
        Self {
            fade_speed: DEFAULT_FADE_SPEED,
            title_clip_ticks: DEFAULT_TITLE_CLIP_TICKS,
            game: WalkOverrides::default(),
            scene2: WalkOverrides::default(),
            scene3: WalkOverrides::default(),
        }
    }
}

impl GameTuning {
    pub fn game_walk(&self) -> WalkTuning {
        self.game.apply(WalkTuning::GAME)
    }

    pub fn scene2_walk(&self) -> WalkTuning {
        self.scene2.apply(WalkTuning::SCENE2)
    }

    pub fn scene3_walk(&self) -> WalkTuning {
        self.scene3.apply(WalkTuning::SCENE3)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.fade_speed == 0 {
            return Err(TuningError::Invalid {
                field: "fade_speed".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.title_clip_ticks == 0 {
            return Err(TuningError::Invalid {
                field: "title_clip_ticks".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        self.game.validate("game")?;
        self.scene2.validate("scene2")?;
        self.scene3.validate("scene3")?;
        Ok(())
    }
}

#[derive(Debug, Error)]
pub(crate) enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse tuning file {path} at {field}: {message}")]
    Parse {
        path: PathBuf,
        field: String,
        message: String,
    },
    #[error("invalid tuning value at {field}: {message}")]
    Invalid { field: String, message: String },
}

/// Reads tuning overrides from `path`. A missing file is not an error.
pub(crate) fn load_tuning(path: &Path) -> Result<Option<GameTuning>, TuningError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(TuningError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let tuning = parse_tuning_json(path, &raw)?;
    tuning.validate()?;
    Ok(Some(tuning))
}

fn parse_tuning_json(path: &Path, raw: &str) -> Result<GameTuning, TuningError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize::<_, GameTuning>(&mut deserializer).map_err(|error| {
        let field = error.path().to_string();
        let message = error.into_inner().to_string();
        TuningError::Parse {
            path: path.to_path_buf(),
            field,
            message,
        }
    })
}

pub(crate) fn load_tuning_or_default(path: &Path) -> GameTuning {
    match load_tuning(path) {
        Ok(Some(tuning)) => {
            info!(path = %path.display(), "tuning_loaded");
            tuning
        }
        Ok(None) => {
            info!(path = %path.display(), "tuning_file_absent_using_defaults");
            GameTuning::default()
        }
        Err(error) => {
            warn!(error = %error, "tuning_invalid_using_defaults");
            GameTuning::default()
        }
    }
}

mod canvas;
mod fade;
mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;
mod walk_cycle;

pub use canvas::{
    Canvas, DrawCommand, DrawList, ImageAnchor, ImageDraw, ImageExtent, Rect, Rgba, TextAnchor,
    Vec2,
};
pub use fade::{FadeStep, FadeTransition, DEFAULT_FADE_SPEED, FADE_MAX_ALPHA, FADE_MIDPOINT_ALPHA};
pub use input::{HeldActions, InputAction};
pub use loop_runner::{run_app, run_app_with_metrics, AppError, LoopConfig, SLOW_FRAME_ENV_VAR};
pub use metrics::{LoopMetricsSnapshot, MetricsHandle};
pub use rendering::{ColorGrade, Renderer, RendererError};
pub use scene::{Scene, SceneCommand, SceneKey, SceneMachine, SceneTable, SceneTableError};
pub use walk_cycle::{AnimationState, Character, Facing, FrameBands, WalkCycleConfig};

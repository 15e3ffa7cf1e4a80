use engine::{
    resolve_app_paths, AssetKeyError, LoopConfig, SceneMachine, SceneTableError, StartupError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::assets::GameAssets;
use super::scenes::{build_scene_machine, CANVAS_HEIGHT, CANVAS_WIDTH};
use super::tuning::{load_tuning_or_default, TUNING_FILE_NAME};

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) machine: SceneMachine,
}

#[derive(Debug, Error)]
pub(crate) enum BootstrapError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error("invalid built-in asset key: {0}")]
    AssetKey(#[from] AssetKeyError),
    #[error("scene table is incomplete: {0}")]
    SceneTable(#[from] SceneTableError),
}

pub(crate) fn build_app() -> Result<AppWiring, BootstrapError> {
    init_tracing();
    info!("=== Goatman Startup ===");

    let paths = resolve_app_paths()?;
    info!(root = %paths.root.display(), assets = %paths.asset_dir.display(), "paths_resolved");

    let tuning = load_tuning_or_default(&paths.asset_dir.join(TUNING_FILE_NAME));
    let assets = GameAssets::new()?;
    let machine = build_scene_machine(&assets, &tuning, StdRng::from_entropy())?;
    let config = LoopConfig {
        canvas_width: CANVAS_WIDTH,
        canvas_height: CANVAS_HEIGHT,
        asset_dir: paths.asset_dir,
        ..LoopConfig::default()
    };

    Ok(AppWiring { config, machine })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod app;
mod asset_keys;

pub use app::{
    run_app, run_app_with_metrics, AnimationState, AppError, Canvas, Character, ColorGrade,
    DrawCommand, DrawList, Facing, FadeStep, FadeTransition, FrameBands, HeldActions, ImageAnchor,
    ImageDraw, ImageExtent, InputAction, LoopConfig, LoopMetricsSnapshot, MetricsHandle, Rect,
    Renderer, RendererError, Rgba, Scene, SceneCommand, SceneKey, SceneMachine, SceneTable,
    SceneTableError, TextAnchor, Vec2, WalkCycleConfig, DEFAULT_FADE_SPEED, FADE_MAX_ALPHA,
    FADE_MIDPOINT_ALPHA, SLOW_FRAME_ENV_VAR,
};
pub use asset_keys::{AssetKey, AssetKeyError, IMAGE_EXTENSIONS};

pub const ROOT_ENV_VAR: &str = "GOATMAN_ROOT";

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub root: PathBuf,
    pub asset_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to read environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error("failed to resolve current executable path: {0}")]
    CurrentExe(#[source] std::io::Error),
    #[error("current executable path has no parent directory: {0}")]
    ExeHasNoParent(PathBuf),
    #[error(
        "GOATMAN_ROOT is set but does not point to a valid project root: {path}\n\
A valid root must contain Cargo.toml and either crates/ or assets/."
    )]
    InvalidEnvRoot { path: PathBuf },
    #[error(
        "Could not detect project root by walking upward from executable directory: {start_dir}\n\
Expected a directory containing Cargo.toml and either crates/ or assets/.\n\
Set {env_var} explicitly, for example:\n\
Bash/zsh: export {env_var}=\"/path/to/goatman\""
    )]
    RootNotFound {
        start_dir: PathBuf,
        env_var: &'static str,
    },
}

pub fn resolve_app_paths() -> Result<AppPaths, StartupError> {
    let root = resolve_root()?;
    Ok(app_paths_for_root(root))
}

fn app_paths_for_root(root: PathBuf) -> AppPaths {
    let asset_dir = root.join("assets");
    AppPaths { root, asset_dir }
}

fn resolve_root() -> Result<PathBuf, StartupError> {
    match env::var(ROOT_ENV_VAR) {
        Ok(value) => {
            let normalized = normalize_path(Path::new(&value));
            if is_repo_marker(&normalized) {
                Ok(normalized)
            } else {
                Err(StartupError::InvalidEnvRoot { path: normalized })
            }
        }
        Err(env::VarError::NotPresent) => {
            let exe = env::current_exe().map_err(StartupError::CurrentExe)?;
            let exe_dir = exe
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| StartupError::ExeHasNoParent(exe.clone()))?;
            find_root_above(&exe_dir).ok_or_else(|| StartupError::RootNotFound {
                start_dir: normalize_path(&exe_dir),
                env_var: ROOT_ENV_VAR,
            })
        }
        Err(source) => Err(StartupError::EnvVar {
            var: ROOT_ENV_VAR,
            source,
        }),
    }
}

fn find_root_above(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|candidate| is_repo_marker(candidate))
        .map(normalize_path)
}

fn is_repo_marker(path: &Path) -> bool {
    let cargo_toml = path.join("Cargo.toml").is_file();
    let has_crates = path.join("crates").is_dir();
    let has_assets = path.join("assets").is_dir();

    cargo_toml && (has_crates || has_assets)
}

fn normalize_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn repo_marker_requires_cargo_toml() {
        let temp = TempDir::new().expect("temp");
        fs::create_dir_all(temp.path().join("assets")).expect("assets");
        assert!(!is_repo_marker(temp.path()));

        fs::write(temp.path().join("Cargo.toml"), "[workspace]\n").expect("cargo toml");
        assert!(is_repo_marker(temp.path()));
    }

    #[test]
    fn root_is_found_from_nested_target_dir() {
        let temp = TempDir::new().expect("temp");
        fs::write(temp.path().join("Cargo.toml"), "[workspace]\n").expect("cargo toml");
        fs::create_dir_all(temp.path().join("crates")).expect("crates");
        let nested = temp.path().join("target").join("debug");
        fs::create_dir_all(&nested).expect("nested");

        let root = find_root_above(&nested).expect("root");
        assert_eq!(root, normalize_path(temp.path()));
        assert_eq!(app_paths_for_root(root.clone()).asset_dir, root.join("assets"));
    }

    #[test]
    fn no_marker_means_no_root() {
        let temp = TempDir::new().expect("temp");
        let nested = temp.path().join("a").join("b");
        fs::create_dir_all(&nested).expect("nested");
        // The temp dir itself may live under some unrelated workspace, so only
        // assert on the part of the path this test controls.
        if let Some(root) = find_root_above(&nested) {
            assert!(!root.starts_with(normalize_path(temp.path())));
        }
    }
}

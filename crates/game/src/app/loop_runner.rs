use std::process::ExitCode;

use engine::run_app;
use tracing::error;

use super::bootstrap::{build_app, AppWiring};

pub(crate) fn run() -> ExitCode {
    let app = match build_app() {
        Ok(app) => app,
        Err(err) => {
            error!(error = %err, "startup_failed");
            return ExitCode::FAILURE;
        }
    };
    run_wired(app)
}

fn run_wired(app: AppWiring) -> ExitCode {
    if let Err(err) = run_app(app.config, app.machine) {
        error!(error = %err, "startup_failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

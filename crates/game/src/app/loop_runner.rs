use std::process::ExitCode;

use engine::run_app;
use tracing::error;

use super::bootstrap::AppWiring;

pub(crate) fn run(app: AppWiring) -> ExitCode {
    if let Err(err) = run_app(app.config, app.scene) {
        let exit_code = err.exit_code();
        error!(error = %err, exit_code, "app_failed");
        return ExitCode::from(exit_code);
    }

    ExitCode::SUCCESS
}

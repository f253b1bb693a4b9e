use std::process::ExitCode;

use tracing::error;

mod app;

fn main() -> ExitCode {
    match app::bootstrap::build_app() {
        Ok(wiring) => app::loop_runner::run(wiring),
        Err(startup_error) => {
            error!(error = %startup_error, "startup_failed");
            ExitCode::FAILURE
        }
    }
}

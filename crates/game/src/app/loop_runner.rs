use std::process::ExitCode;

use arbor_engine::{run_session, LogHud};
use tracing::info;

use super::bootstrap::AppWiring;

pub(crate) fn run(app: AppWiring) -> ExitCode {
    let AppWiring {
        loop_config,
        mut scene,
        mut world,
        mut input,
    } = app;

    let mut hud = LogHud::default();
    let summary = run_session(loop_config, &mut scene, &mut world, &mut input, &mut hud);
    info!(
        frames = summary.frames,
        simulated_seconds = summary.simulated_seconds,
        score = summary.final_score,
        "session_complete"
    );

    ExitCode::SUCCESS
}

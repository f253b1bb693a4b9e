use std::time::Duration;

use tracing::info;

use super::hud::ScoreHud;
use super::input::InputFeed;
use super::scene::{GroveWorld, Scene};

/// Clock/tick collaborator settings. The driver simulates render frames at a
/// fixed interval and hands each frame's delta to the scene; deltas are
/// clamped so one stalled frame cannot fast-forward every timer at once.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub frame_interval: Duration,
    pub max_frame_delta: Duration,
    pub session_duration: Duration,
    pub progress_log_interval: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_micros(16_667),
            max_frame_delta: Duration::from_millis(250),
            session_duration: Duration::from_secs(30),
            progress_log_interval: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionSummary {
    pub frames: u64,
    pub simulated_seconds: f32,
    pub final_score: Option<u32>,
}

pub fn run_session(
    config: LoopConfig,
    scene: &mut dyn Scene,
    world: &mut GroveWorld,
    input: &mut dyn InputFeed,
    hud: &mut dyn ScoreHud,
) -> SessionSummary {
    let frame_interval =
        normalize_non_zero_duration(config.frame_interval, Duration::from_micros(16_667));
    let max_frame_delta =
        normalize_non_zero_duration(config.max_frame_delta, Duration::from_millis(250));
    let progress_log_interval =
        normalize_non_zero_duration(config.progress_log_interval, Duration::from_secs(5));

    let frame_dt = clamp_frame_delta(frame_interval, max_frame_delta);
    let dt_seconds = frame_dt.as_secs_f32();
    let total_frames = planned_frame_count(config.session_duration, frame_interval);

    info!(
        frame_interval_us = frame_interval.as_micros() as u64,
        max_frame_delta_ms = max_frame_delta.as_millis() as u64,
        total_frames,
        "loop_config"
    );

    scene.load(world);

    let mut simulated = Duration::ZERO;
    let mut next_progress_log = progress_log_interval;
    for tick_index in 0..total_frames {
        let frame = input.next_frame(tick_index);
        scene.update(dt_seconds, &frame, world, hud);
        simulated = simulated.saturating_add(frame_dt);

        if simulated >= next_progress_log {
            info!(
                tick = tick_index,
                simulated_seconds = simulated.as_secs_f32(),
                score = scene.debug_score(),
                "session_progress"
            );
            next_progress_log = next_progress_log.saturating_add(progress_log_interval);
        }
    }

    scene.unload(world);

    SessionSummary {
        frames: total_frames,
        simulated_seconds: simulated.as_secs_f32(),
        final_score: scene.debug_score(),
    }
}

fn planned_frame_count(session_duration: Duration, frame_interval: Duration) -> u64 {
    (session_duration.as_secs_f64() / frame_interval.as_secs_f64()).round() as u64
}

fn clamp_frame_delta(delta: Duration, max_delta: Duration) -> Duration {
    delta.min(max_delta)
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

use tracing::info;

/// Score HUD collaborator. The core's only obligation is to report each new
/// score value; glyph rendering and feedback animation live entirely behind
/// this trait.
pub trait ScoreHud {
    fn on_score_changed(&mut self, new_score: u32);
}

/// HUD that discards notifications.
#[derive(Debug, Default)]
pub struct NullHud;

impl ScoreHud for NullHud {
    fn on_score_changed(&mut self, _new_score: u32) {}
}

/// HUD that renders score changes to the log; the stand-in display for
/// headless sessions.
#[derive(Debug, Default)]
pub struct LogHud;

impl ScoreHud for LogHud {
    fn on_score_changed(&mut self, new_score: u32) {
        info!(score = new_score, "score_changed");
    }
}

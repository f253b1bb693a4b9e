use super::scene::Vec3;

/// Per-frame input snapshot delivered by the input collaborator. The reticle
/// point is present only while surface detection has a valid hit for this
/// frame; a select with no reticle point is delivered as-is and left to the
/// scene to ignore.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    select_pressed: bool,
    reticle_point: Option<Vec3>,
    frame_available: bool,
}

impl FrameInput {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_select_pressed(mut self, select_pressed: bool) -> Self {
        self.select_pressed = select_pressed;
        self
    }

    pub fn with_reticle_point(mut self, reticle_point: Option<Vec3>) -> Self {
        self.reticle_point = reticle_point;
        self
    }

    pub fn with_frame_available(mut self, frame_available: bool) -> Self {
        self.frame_available = frame_available;
        self
    }

    pub fn select_pressed(&self) -> bool {
        self.select_pressed
    }

    pub fn reticle_point(&self) -> Option<Vec3> {
        self.reticle_point
    }

    pub fn frame_available(&self) -> bool {
        self.frame_available
    }
}

/// Source of per-tick input snapshots for the session driver.
pub trait InputFeed {
    fn next_frame(&mut self, tick_index: u64) -> FrameInput;
}

/// Feed that never selects anything; useful for idle sessions and tests.
#[derive(Debug, Default)]
pub struct IdleFeed;

impl InputFeed for IdleFeed {
    fn next_frame(&mut self, _tick_index: u64) -> FrameInput {
        FrameInput::empty().with_frame_available(true)
    }
}

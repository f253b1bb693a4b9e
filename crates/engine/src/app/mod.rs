mod hud;
mod input;
mod loop_runner;
mod scene;

pub use hud::{LogHud, NullHud, ScoreHud};
pub use input::{FrameInput, IdleFeed, InputFeed};
pub use loop_runner::{run_session, LoopConfig, SessionSummary};
pub use scene::{Aabb, Agent, GroveWorld, Prop, PropId, PropIdAllocator, Scene, Vec3};

pub mod app;
pub mod assets;
pub mod config;

pub use app::{
    run_session, Aabb, Agent, FrameInput, GroveWorld, IdleFeed, InputFeed, LogHud, LoopConfig,
    NullHud, Prop, PropId, Scene, ScoreHud, SessionSummary, Vec3,
};
pub use assets::{
    asset_channel, plan_population_grid, AgentSeed, AssetChannel, AssetEvent, PopulationRequest,
    PropSeed, TREE_LOCAL_BOUNDS,
};
pub use config::{
    load_demo_config, load_demo_config_from_env, ConfigError, ConfigVec3, DemoConfig,
    PopulationConfig, CONFIG_ENV_VAR,
};

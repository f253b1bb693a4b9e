use arbor_engine::{
    asset_channel, load_demo_config_from_env, plan_population_grid, AgentSeed, ConfigError,
    DemoConfig, FrameInput, GroveWorld, InputFeed, LoopConfig, PropSeed, Vec3,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::gameplay;

const AR_WARMUP_FRAMES: u64 = 30;
const SELECT_INTERVAL_SECONDS: f32 = 3.0;

pub(crate) struct AppWiring {
    pub(crate) loop_config: LoopConfig,
    pub(crate) scene: gameplay::GroveScene,
    pub(crate) world: GroveWorld,
    pub(crate) input: ScriptedSelectFeed,
}

pub(crate) fn build_app() -> Result<AppWiring, ConfigError> {
    init_tracing();
    info!("=== Arbor AR Demo (headless) ===");

    let config = load_demo_config_from_env()?;
    info!(
        population = config.population.count,
        rng_seed = config.rng_seed,
        session_seconds = config.session_seconds,
        "demo_config"
    );

    let (assets, asset_events) = asset_channel();
    let request = config.population.to_request();
    let mut rng = SmallRng::seed_from_u64(config.rng_seed);
    let seeds = plan_population_grid(&request, &mut rng);
    let input = ScriptedSelectFeed::from_targets(select_targets(&config, &seeds), config.target_fps);
    assets.deliver_population(request, seeds);
    assets.deliver_agent(AgentSeed::humanoid());

    Ok(AppWiring {
        loop_config: config.loop_config(),
        scene: gameplay::build_scene(config.rng_seed, asset_events),
        world: GroveWorld::default(),
        input,
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

/// Surface points the scripted session will select, one per planted prop:
/// the prop's cell on the detected plane.
fn select_targets(config: &DemoConfig, seeds: &[PropSeed]) -> Vec<Vec3> {
    seeds
        .iter()
        .map(|seed| Vec3::new(seed.position.x, config.population.base.y, seed.position.z))
        .collect()
}

/// Stand-in for the AR input collaborator: surface detection becomes valid
/// after a short pose warmup, then a select fires on a fixed cadence,
/// sweeping the planted grid positions.
pub(crate) struct ScriptedSelectFeed {
    targets: Vec<Vec3>,
    select_every_frames: u64,
    issued: usize,
}

impl ScriptedSelectFeed {
    fn from_targets(targets: Vec<Vec3>, target_fps: u32) -> Self {
        Self {
            targets,
            select_every_frames: (SELECT_INTERVAL_SECONDS * target_fps.max(1) as f32) as u64,
            issued: 0,
        }
    }
}

impl InputFeed for ScriptedSelectFeed {
    fn next_frame(&mut self, tick_index: u64) -> FrameInput {
        if tick_index < AR_WARMUP_FRAMES {
            // No AR pose yet: no frame data, no reticle.
            return FrameInput::empty();
        }
        let mut frame = FrameInput::empty().with_frame_available(true);
        if tick_index % self.select_every_frames.max(1) == 0 {
            if let Some(target) = self.targets.get(self.issued).copied() {
                self.issued += 1;
                frame = frame
                    .with_select_pressed(true)
                    .with_reticle_point(Some(target));
            }
        }
        frame
    }
}

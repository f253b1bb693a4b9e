use std::collections::HashMap;
use std::sync::mpsc::Receiver;

use arbor_engine::{
    Agent, AssetEvent, FrameInput, GroveWorld, PopulationRequest, Prop, PropId, PropSeed, Scene,
    ScoreHud, Vec3,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

const FADE_OUT_SECONDS: f32 = 0.5;
const FADE_IN_SECONDS: f32 = 0.5;
const RESPAWN_GRACE_SECONDS: f32 = 0.5;
const COLLAPSED_SCALE: f32 = 0.001;
const ROTATE_PHASE_SECONDS: f32 = 0.5;
const TRANSLATE_PHASE_SECONDS: f32 = 1.0;
const AMBIENT_RECYCLE_MIN_SECONDS: f32 = 3.0;
const AMBIENT_RECYCLE_MAX_SECONDS: f32 = 8.0;

include!("types.rs");
include!("population.rs");
include!("nav.rs");
include!("scene_impl.rs");
include!("util.rs");

pub(crate) fn build_scene(rng_seed: u64, assets: Receiver<AssetEvent>) -> GroveScene {
    GroveScene::new(rng_seed, assets)
}

//! Asset/scene collaborator boundary.
//!
//! Geometry loading happens outside the core; the core only ever sees the
//! finished seeds, delivered over a completion channel so nothing may assume
//! the population or the agent exists synchronously.

use std::sync::mpsc::{channel, Receiver, Sender};

use rand::{Rng as _, RngCore};
use tracing::{info, warn};

use crate::app::{Aabb, Vec3};

/// Unit-scale extents of the tree model.
pub const TREE_LOCAL_BOUNDS: Aabb = Aabb {
    min: Vec3 {
        x: -0.8,
        y: 0.0,
        z: -0.8,
    },
    max: Vec3 {
        x: 0.8,
        y: 3.0,
        z: 0.8,
    },
};

const AGENT_SPAWN_POSITION: Vec3 = Vec3 {
    x: 0.0,
    y: 0.0,
    z: -1.0,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationRequest {
    pub count: usize,
    pub base_position: Vec3,
    pub spacing: f32,
    pub scale: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropSeed {
    pub position: Vec3,
    pub rotation_y: f32,
    pub scale: f32,
    pub local_bounds: Aabb,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSeed {
    pub position: Vec3,
    pub rotation_y: f32,
    pub scale: f32,
    pub local_bounds: Aabb,
}

impl AgentSeed {
    /// The rigged character model.
    pub fn humanoid() -> Self {
        Self {
            position: AGENT_SPAWN_POSITION,
            rotation_y: 0.0,
            scale: 0.5,
            local_bounds: Aabb::new(Vec3::new(-0.4, 0.0, -0.4), Vec3::new(0.4, 1.8, 0.4)),
        }
    }

    /// Fallback stand-in used when the character model fails to load; the
    /// session keeps running with a plain box.
    pub fn placeholder() -> Self {
        Self {
            position: AGENT_SPAWN_POSITION,
            rotation_y: 0.0,
            scale: 1.0,
            local_bounds: Aabb::new(Vec3::new(-0.5, -1.0, -0.5), Vec3::new(0.5, 1.0, 0.5)),
        }
    }
}

#[derive(Debug, Clone)]
pub enum AssetEvent {
    PopulationReady {
        request: PopulationRequest,
        seeds: Vec<PropSeed>,
    },
    AgentReady {
        seed: AgentSeed,
    },
    LoadFailed {
        what: &'static str,
        reason: String,
    },
}

/// Lays the population out on a `ceil(sqrt(count))`-sided grid centred on the
/// base position, each instance seated on the base plane with a random
/// heading.
pub fn plan_population_grid(request: &PopulationRequest, rng: &mut dyn RngCore) -> Vec<PropSeed> {
    if request.count == 0 {
        return Vec::new();
    }

    let grid_size = (request.count as f32).sqrt().ceil() as usize;
    let offset = grid_size as f32 * request.spacing / 2.0;
    let base = request.base_position;

    let mut seeds = Vec::with_capacity(request.count);
    for index in 0..request.count {
        let column = (index % grid_size) as f32;
        let row = (index / grid_size) as f32;
        let mut seed = PropSeed {
            position: Vec3::new(
                base.x + (column * request.spacing - offset),
                base.y,
                base.z + (row * request.spacing - offset),
            ),
            rotation_y: rng.random_range(0.0..std::f32::consts::TAU),
            scale: request.scale,
            local_bounds: TREE_LOCAL_BOUNDS,
        };
        seed.position.y = base.y - seed.local_bounds.min.y * seed.scale;
        seeds.push(seed);
    }
    seeds
}

pub fn asset_channel() -> (AssetChannel, Receiver<AssetEvent>) {
    let (sender, receiver) = channel();
    (AssetChannel { sender }, receiver)
}

/// Sending half of the asset completion channel.
#[derive(Debug, Clone)]
pub struct AssetChannel {
    sender: Sender<AssetEvent>,
}

impl AssetChannel {
    pub fn spawn_population(&self, request: PopulationRequest, rng: &mut dyn RngCore) {
        let seeds = plan_population_grid(&request, rng);
        self.deliver_population(request, seeds);
    }

    pub fn deliver_population(&self, request: PopulationRequest, seeds: Vec<PropSeed>) {
        info!(count = seeds.len(), "population_ready");
        self.send(AssetEvent::PopulationReady { request, seeds });
    }

    pub fn deliver_agent(&self, seed: AgentSeed) {
        info!("agent_ready");
        self.send(AssetEvent::AgentReady { seed });
    }

    pub fn report_failure(&self, what: &'static str, reason: String) {
        warn!(what, reason = %reason, "asset_load_failed");
        self.send(AssetEvent::LoadFailed { what, reason });
    }

    fn send(&self, event: AssetEvent) {
        if self.sender.send(event).is_err() {
            warn!("asset_event_dropped_no_receiver");
        }
    }
}

use super::hud::ScoreHud;
use super::input::FrameInput;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Axis-aligned box in world or model-local space. Yaw is treated as
/// rotation-invariant for bounds purposes; overlap is box-vs-box only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    pub fn scaled(&self, factor: f32) -> Aabb {
        Aabb {
            min: Vec3::new(
                self.min.x * factor,
                self.min.y * factor,
                self.min.z * factor,
            ),
            max: Vec3::new(
                self.max.x * factor,
                self.max.y * factor,
                self.max.z * factor,
            ),
        }
    }

    pub fn translated(&self, offset: Vec3) -> Aabb {
        Aabb {
            min: Vec3::new(
                self.min.x + offset.x,
                self.min.y + offset.y,
                self.min.z + offset.z,
            ),
            max: Vec3::new(
                self.max.x + offset.x,
                self.max.y + offset.y,
                self.max.z + offset.z,
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropId(pub u64);

#[derive(Debug, Default)]
pub struct PropIdAllocator {
    next: u64,
}

impl PropIdAllocator {
    pub fn allocate(&mut self) -> PropId {
        let id = PropId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

/// One collectible prop instance. `local_bounds` holds the unit-scale model
/// extents; the world-space bounding volume is derived on demand so it always
/// reflects the current transform.
#[derive(Debug, Clone)]
pub struct Prop {
    pub id: PropId,
    pub position: Vec3,
    pub rotation_y: f32,
    pub scale: f32,
    pub original_scale: f32,
    pub local_bounds: Aabb,
}

impl Prop {
    pub fn world_bounds(&self) -> Aabb {
        self.local_bounds.scaled(self.scale).translated(self.position)
    }

    /// Re-seats the prop so its lowest world-space extent sits exactly on
    /// `plane_y`. Must be called again after any scale change.
    pub fn seat_on_plane(&mut self, plane_y: f32) {
        self.position.y = plane_y - self.local_bounds.min.y * self.scale;
    }
}

/// The user-controlled character. Optional on the world until the asset
/// collaborator delivers it.
#[derive(Debug, Clone)]
pub struct Agent {
    pub position: Vec3,
    pub rotation_y: f32,
    pub scale: f32,
    pub local_bounds: Aabb,
}

impl Agent {
    pub fn world_bounds(&self) -> Aabb {
        self.local_bounds.scaled(self.scale).translated(self.position)
    }
}

/// Session-scoped world context: the prop set and the agent. Owned by the
/// session driver and passed to the scene each tick; nothing reaches it
/// through globals.
#[derive(Debug, Default)]
pub struct GroveWorld {
    allocator: PropIdAllocator,
    props: Vec<Prop>,
    agent: Option<Agent>,
}

impl GroveWorld {
    pub fn spawn_prop(
        &mut self,
        position: Vec3,
        rotation_y: f32,
        scale: f32,
        local_bounds: Aabb,
    ) -> PropId {
        let id = self.allocator.allocate();
        self.props.push(Prop {
            id,
            position,
            rotation_y,
            scale,
            original_scale: scale,
            local_bounds,
        });
        id
    }

    pub fn prop_count(&self) -> usize {
        self.props.len()
    }

    /// Props in creation order. Collision scans that need the deterministic
    /// reverse-creation order iterate this slice backwards.
    pub fn props(&self) -> &[Prop] {
        &self.props
    }

    pub fn props_mut(&mut self) -> &mut [Prop] {
        &mut self.props
    }

    pub fn find_prop(&self, id: PropId) -> Option<&Prop> {
        self.props.iter().find(|prop| prop.id == id)
    }

    pub fn find_prop_mut(&mut self, id: PropId) -> Option<&mut Prop> {
        self.props.iter_mut().find(|prop| prop.id == id)
    }

    pub fn set_agent(&mut self, agent: Agent) {
        self.agent = Some(agent);
    }

    pub fn agent(&self) -> Option<&Agent> {
        self.agent.as_ref()
    }

    pub fn agent_mut(&mut self) -> Option<&mut Agent> {
        self.agent.as_mut()
    }

    /// The agent's bounding volume for this tick, or `None` while the agent
    /// asset has not arrived.
    pub fn agent_bounds(&self) -> Option<Aabb> {
        self.agent.as_ref().map(Agent::world_bounds)
    }
}

pub trait Scene {
    fn load(&mut self, world: &mut GroveWorld);
    fn update(
        &mut self,
        dt_seconds: f32,
        input: &FrameInput,
        world: &mut GroveWorld,
        hud: &mut dyn ScoreHud,
    );
    fn unload(&mut self, world: &mut GroveWorld);
    fn debug_score(&self) -> Option<u32> {
        None
    }
}

/// Horizontal placement rectangle plus the vertical reference plane. The
/// `min <= max` invariant holds by construction; the constructor normalizes.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    min_x: f32,
    max_x: f32,
    min_z: f32,
    max_z: f32,
    plane_y: f32,
}

impl Bounds {
    fn new(x_a: f32, x_b: f32, z_a: f32, z_b: f32, plane_y: f32) -> Self {
        Self {
            min_x: x_a.min(x_b),
            max_x: x_a.max(x_b),
            min_z: z_a.min(z_b),
            max_z: z_a.max(z_b),
            plane_y,
        }
    }

    /// Footprint of a delivered population; `None` for an empty one.
    fn from_seed_footprint(seeds: &[PropSeed], plane_y: f32) -> Option<Self> {
        let first = seeds.first()?;
        let mut bounds = Self::new(
            first.position.x,
            first.position.x,
            first.position.z,
            first.position.z,
            plane_y,
        );
        for seed in &seeds[1..] {
            bounds.min_x = bounds.min_x.min(seed.position.x);
            bounds.max_x = bounds.max_x.max(seed.position.x);
            bounds.min_z = bounds.min_z.min(seed.position.z);
            bounds.max_z = bounds.max_z.max(seed.position.z);
        }
        Some(bounds)
    }

    fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.min_x && x <= self.max_x && z >= self.min_z && z <= self.max_z
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum LifecyclePhase {
    Idle,
    FadingOut { elapsed_seconds: f32 },
    FadingIn { elapsed_seconds: f32 },
    Grace { remaining_seconds: f32 },
}

/// Per-prop lifecycle record. `collecting` is the collision-path guard: set
/// when a collection commits, cleared only when the grace delay expires, and
/// excluded from both collision scans and ambient selection while held.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PropState {
    phase: LifecyclePhase,
    collecting: bool,
    fade_from_scale: f32,
}

impl PropState {
    fn idle() -> Self {
        Self {
            phase: LifecyclePhase::Idle,
            collecting: false,
            fade_from_scale: 0.0,
        }
    }

    fn is_collision_candidate(&self) -> bool {
        !self.collecting
            && matches!(
                self.phase,
                LifecyclePhase::Idle
                    | LifecyclePhase::FadingOut { .. }
                    | LifecyclePhase::FadingIn { .. }
            )
    }

    fn is_ambient_candidate(&self) -> bool {
        !self.collecting && matches!(self.phase, LifecyclePhase::Idle)
    }
}

#[derive(Debug, Default)]
struct ScoreLedger {
    value: u32,
}

impl ScoreLedger {
    /// Always yields `previous + 1`; the ledger never decreases or resets
    /// within a session.
    fn increment(&mut self) -> u32 {
        self.value = self.value.saturating_add(1);
        self.value
    }

    fn value(&self) -> u32 {
        self.value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameplayEvent {
    PropCollected { prop: PropId },
    PropRecycled { prop: PropId },
    NavigationIssued,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct GameplayEventCounts {
    total: u32,
    prop_collected: u32,
    prop_recycled: u32,
    navigation_issued: u32,
}

impl GameplayEventCounts {
    fn record(&mut self, event: GameplayEvent) {
        self.total = self.total.saturating_add(1);
        match event {
            GameplayEvent::PropCollected { .. } => {
                self.prop_collected = self.prop_collected.saturating_add(1)
            }
            GameplayEvent::PropRecycled { .. } => {
                self.prop_recycled = self.prop_recycled.saturating_add(1)
            }
            GameplayEvent::NavigationIssued => {
                self.navigation_issued = self.navigation_issued.saturating_add(1)
            }
        }
    }
}

#[derive(Default)]
struct GameplayEventBus {
    current_tick_events: Vec<GameplayEvent>,
    last_tick_counts: GameplayEventCounts,
}

impl GameplayEventBus {
    fn clear_current_tick(&mut self) {
        self.current_tick_events.clear();
    }

    fn emit(&mut self, event: GameplayEvent) {
        match event {
            GameplayEvent::PropCollected { prop } => debug!(prop = prop.0, "event_prop_collected"),
            GameplayEvent::PropRecycled { prop } => debug!(prop = prop.0, "event_prop_recycled"),
            GameplayEvent::NavigationIssued => debug!("event_navigation_issued"),
        }
        self.current_tick_events.push(event);
    }

    fn finish_tick_rollover(&mut self) {
        let mut counts = GameplayEventCounts::default();
        for event in &self.current_tick_events {
            counts.record(*event);
        }
        self.last_tick_counts = counts;
        self.current_tick_events.clear();
    }

    fn last_tick_counts(&self) -> GameplayEventCounts {
        self.last_tick_counts
    }
}

fn place_randomly(bounds: Bounds, rng: &mut SmallRng) -> (f32, f32) {
    (
        rng.random_range(bounds.min_x..=bounds.max_x),
        rng.random_range(bounds.min_z..=bounds.max_z),
    )
}

/// Owns the collectible set's lifecycle records, the spawn footprint, and the
/// ambient recycle timer. Prop transforms live on the world; everything else
/// about a collectible lives here.
struct Population {
    states: HashMap<PropId, PropState>,
    footprint: Option<Bounds>,
    rng: SmallRng,
    recycle_timer_seconds: Option<f32>,
}

impl Population {
    fn new(rng_seed: u64) -> Self {
        Self {
            states: HashMap::new(),
            footprint: None,
            rng: SmallRng::seed_from_u64(rng_seed),
            recycle_timer_seconds: None,
        }
    }

    fn install(&mut self, world: &mut GroveWorld, request: &PopulationRequest, seeds: Vec<PropSeed>) {
        self.footprint = Bounds::from_seed_footprint(&seeds, request.base_position.y);
        for seed in seeds {
            let id = world.spawn_prop(seed.position, seed.rotation_y, seed.scale, seed.local_bounds);
            self.states.insert(id, PropState::idle());
        }
        if self.footprint.is_some() {
            self.arm_recycle_timer();
        }
        info!(count = self.states.len(), "population_installed");
    }

    fn arm_recycle_timer(&mut self) {
        self.recycle_timer_seconds = Some(
            self.rng
                .random_range(AMBIENT_RECYCLE_MIN_SECONDS..AMBIENT_RECYCLE_MAX_SECONDS),
        );
    }

    fn begin_fade(state: &mut PropState, prop: &Prop) {
        state.fade_from_scale = prop.scale;
        state.phase = LifecyclePhase::FadingOut {
            elapsed_seconds: 0.0,
        };
    }

    fn advance_lifecycles(&mut self, dt_seconds: f32, world: &mut GroveWorld) {
        let Some(footprint) = self.footprint else {
            return;
        };
        for prop in world.props_mut() {
            let Some(state) = self.states.get_mut(&prop.id) else {
                continue;
            };
            match state.phase {
                LifecyclePhase::Idle => {}
                LifecyclePhase::FadingOut { elapsed_seconds } => {
                    let elapsed_seconds = elapsed_seconds + dt_seconds;
                    let progress = phase_progress(elapsed_seconds, FADE_OUT_SECONDS);
                    prop.scale = lerp(state.fade_from_scale, COLLAPSED_SCALE, ease_in_quad(progress));
                    prop.seat_on_plane(footprint.plane_y);
                    if elapsed_seconds >= FADE_OUT_SECONDS {
                        // Relocation itself is instantaneous; the prop pops
                        // back in from the collapsed scale at the new spot.
                        let (x, z) = place_randomly(footprint, &mut self.rng);
                        prop.position.x = x;
                        prop.position.z = z;
                        prop.rotation_y = self.rng.random_range(0.0..std::f32::consts::TAU);
                        prop.scale = COLLAPSED_SCALE;
                        prop.seat_on_plane(footprint.plane_y);
                        state.phase = LifecyclePhase::FadingIn {
                            elapsed_seconds: 0.0,
                        };
                    } else {
                        state.phase = LifecyclePhase::FadingOut { elapsed_seconds };
                    }
                }
                LifecyclePhase::FadingIn { elapsed_seconds } => {
                    let elapsed_seconds = elapsed_seconds + dt_seconds;
                    let progress = phase_progress(elapsed_seconds, FADE_IN_SECONDS);
                    prop.scale = lerp(COLLAPSED_SCALE, prop.original_scale, ease_out_quad(progress));
                    prop.seat_on_plane(footprint.plane_y);
                    if elapsed_seconds >= FADE_IN_SECONDS {
                        state.phase = LifecyclePhase::Grace {
                            remaining_seconds: RESPAWN_GRACE_SECONDS,
                        };
                    } else {
                        state.phase = LifecyclePhase::FadingIn { elapsed_seconds };
                    }
                }
                LifecyclePhase::Grace { remaining_seconds } => {
                    let remaining_seconds = remaining_seconds - dt_seconds;
                    if remaining_seconds <= 0.0 {
                        state.phase = LifecyclePhase::Idle;
                        state.collecting = false;
                    } else {
                        state.phase = LifecyclePhase::Grace { remaining_seconds };
                    }
                }
            }
        }
    }

    /// Ambient recycle: independent of collection, a random idle collectible
    /// is sent through the same fade/relocate/fade sequence on a randomized
    /// multi-second cadence. Never scores.
    fn advance_ambient_recycle(
        &mut self,
        dt_seconds: f32,
        world: &GroveWorld,
        events: &mut GameplayEventBus,
    ) {
        let Some(timer) = self.recycle_timer_seconds.as_mut() else {
            return;
        };
        *timer -= dt_seconds;
        if *timer > 0.0 {
            return;
        }

        let candidates: Vec<PropId> = world
            .props()
            .iter()
            .filter(|prop| {
                self.states
                    .get(&prop.id)
                    .is_some_and(|state| state.is_ambient_candidate())
            })
            .map(|prop| prop.id)
            .collect();
        if !candidates.is_empty() {
            let prop_id = candidates[self.rng.random_range(0..candidates.len())];
            if let Some(prop) = world.find_prop(prop_id) {
                if let Some(state) = self.states.get_mut(&prop_id) {
                    Self::begin_fade(state, prop);
                    events.emit(GameplayEvent::PropRecycled { prop: prop_id });
                }
            }
        }
        self.arm_recycle_timer();
    }

    /// Tests the agent volume against every candidate collectible in reverse
    /// creation order and commits at most one collection event per tick.
    fn check_collisions(
        &mut self,
        world: &GroveWorld,
        score: &mut ScoreLedger,
        hud: &mut dyn ScoreHud,
        events: &mut GameplayEventBus,
    ) {
        let Some(agent_bounds) = world.agent_bounds() else {
            return;
        };

        let mut hit = None;
        for prop in world.props().iter().rev() {
            let Some(state) = self.states.get(&prop.id) else {
                continue;
            };
            if !state.is_collision_candidate() {
                continue;
            }
            if agent_bounds.intersects(&prop.world_bounds()) {
                hit = Some(prop.id);
                break;
            }
        }

        let Some(prop_id) = hit else {
            return;
        };
        let Some(prop) = world.find_prop(prop_id) else {
            return;
        };
        let Some(state) = self.states.get_mut(&prop_id) else {
            return;
        };
        state.collecting = true;
        Self::begin_fade(state, prop);
        let new_score = score.increment();
        hud.on_score_changed(new_score);
        events.emit(GameplayEvent::PropCollected { prop: prop_id });
        info!(prop = prop_id.0, score = new_score, "prop_collected");
    }
}

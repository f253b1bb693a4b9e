/// Tick orchestrator: owns the session's gameplay state and is driven once
/// per rendered frame by the engine's session loop. Asset completion is the
/// only out-of-band entry point and is drained at the top of the tick.
pub(crate) struct GroveScene {
    assets: Receiver<AssetEvent>,
    population: Population,
    navigator: Navigator,
    score: ScoreLedger,
    events: GameplayEventBus,
}

impl GroveScene {
    pub(crate) fn new(rng_seed: u64, assets: Receiver<AssetEvent>) -> Self {
        Self {
            assets,
            population: Population::new(rng_seed),
            navigator: Navigator::default(),
            score: ScoreLedger::default(),
            events: GameplayEventBus::default(),
        }
    }

    fn drain_asset_events(&mut self, world: &mut GroveWorld) {
        while let Ok(event) = self.assets.try_recv() {
            match event {
                AssetEvent::PopulationReady { request, seeds } => {
                    self.population.install(world, &request, seeds);
                }
                AssetEvent::AgentReady { seed } => {
                    world.set_agent(Agent {
                        position: seed.position,
                        rotation_y: seed.rotation_y,
                        scale: seed.scale,
                        local_bounds: seed.local_bounds,
                    });
                    info!("agent_installed");
                }
                AssetEvent::LoadFailed { what, reason } => {
                    // Degraded-but-running: collision checks and navigation
                    // stay no-ops until the missing piece arrives.
                    warn!(what, reason = %reason, "asset_missing_running_degraded");
                }
            }
        }
    }
}

impl Scene for GroveScene {
    fn load(&mut self, world: &mut GroveWorld) {
        info!(prop_count = world.prop_count(), "scene_loaded");
    }

    fn update(
        &mut self,
        dt_seconds: f32,
        input: &FrameInput,
        world: &mut GroveWorld,
        hud: &mut dyn ScoreHud,
    ) {
        self.drain_asset_events(world);
        self.events.clear_current_tick();

        if input.select_pressed() && self.navigator.issue(world, input.reticle_point()) {
            self.events.emit(GameplayEvent::NavigationIssued);
        }

        // The agent moves first so the collision scan sees this tick's
        // position, never the stale one.
        let nav_was_active = self.navigator.is_active();
        self.navigator.advance(dt_seconds, world);
        if nav_was_active && !self.navigator.is_active() {
            debug!("navigation_completed");
        }
        self.population.advance_lifecycles(dt_seconds, world);
        self.population
            .advance_ambient_recycle(dt_seconds, world, &mut self.events);
        self.population
            .check_collisions(world, &mut self.score, hud, &mut self.events);

        self.events.finish_tick_rollover();
        let counts = self.events.last_tick_counts();
        if counts.total > 0 {
            debug!(
                total = counts.total,
                collected = counts.prop_collected,
                recycled = counts.prop_recycled,
                issued = counts.navigation_issued,
                "tick_events"
            );
        }
    }

    fn unload(&mut self, world: &mut GroveWorld) {
        info!(
            prop_count = world.prop_count(),
            score = self.score.value(),
            "scene_unload"
        );
    }

    fn debug_score(&self) -> Option<u32> {
        Some(self.score.value())
    }
}

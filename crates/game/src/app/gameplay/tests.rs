    use super::*;
    use arbor_engine::{asset_channel, Aabb, AgentSeed, NullHud};

    #[derive(Debug, Default)]
    struct RecordingHud {
        calls: Vec<u32>,
    }

    impl ScoreHud for RecordingHud {
        fn on_score_changed(&mut self, new_score: u32) {
            self.calls.push(new_score);
        }
    }

    fn demo_request(count: usize) -> PopulationRequest {
        PopulationRequest {
            count,
            base_position: Vec3::new(0.0, -2.0, 0.0),
            spacing: 2.0,
            scale: 0.3,
        }
    }

    fn scene_with_population(count: usize) -> (GroveScene, GroveWorld) {
        let (assets, receiver) = asset_channel();
        let mut rng = SmallRng::seed_from_u64(11);
        assets.spawn_population(demo_request(count), &mut rng);
        assets.deliver_agent(AgentSeed::humanoid());

        let mut scene = GroveScene::new(5, receiver);
        let mut world = GroveWorld::default();
        scene.update(0.0, &FrameInput::empty(), &mut world, &mut NullHud);
        (scene, world)
    }

    fn park_agent_far_away(world: &mut GroveWorld) {
        world.agent_mut().expect("agent").position = Vec3::new(100.0, 0.0, 100.0);
    }

    fn run_ticks(scene: &mut GroveScene, world: &mut GroveWorld, hud: &mut dyn ScoreHud, ticks: u32) {
        for _ in 0..ticks {
            scene.update(0.1, &FrameInput::empty(), world, hud);
        }
    }

    #[test]
    fn placement_stays_inside_bounds_and_seats_on_plane() {
        let bounds = Bounds::new(-5.0, 5.0, -4.0, 4.0, 0.0);
        let mut rng = SmallRng::seed_from_u64(123);
        let mut world = GroveWorld::default();
        let id = world.spawn_prop(
            Vec3::ZERO,
            0.0,
            0.3,
            Aabb::new(Vec3::new(-0.5, -0.5, -0.5), Vec3::new(0.5, 2.5, 0.5)),
        );

        for _ in 0..200 {
            let (x, z) = place_randomly(bounds, &mut rng);
            assert!(bounds.contains(x, z), "({x}, {z}) escaped bounds");
            let prop = world.find_prop_mut(id).expect("prop");
            prop.position.x = x;
            prop.position.z = z;
            prop.seat_on_plane(bounds.plane_y);
            assert_eq!(prop.world_bounds().min.y, 0.0);
        }
    }

    #[test]
    fn bounds_constructor_normalizes_swapped_extents() {
        let bounds = Bounds::new(3.0, -3.0, 2.0, -2.0, 0.5);
        assert!(bounds.contains(0.0, 0.0));
        assert!(bounds.contains(-3.0, 2.0));
        assert!(!bounds.contains(3.1, 0.0));
        assert!(!bounds.contains(0.0, -2.1));
    }

    #[test]
    fn footprint_of_empty_population_is_none() {
        assert_eq!(Bounds::from_seed_footprint(&[], -2.0), None);
    }

    #[test]
    fn score_ledger_increments_by_exactly_one() {
        let mut ledger = ScoreLedger::default();
        assert_eq!(ledger.increment(), 1);
        assert_eq!(ledger.increment(), 2);
        assert_eq!(ledger.increment(), 3);
        assert_eq!(ledger.value(), 3);
    }

    #[test]
    fn grid_collision_scores_once_and_guard_spans_full_cycle() {
        let (mut scene, mut world) = scene_with_population(9);
        let mut hud = RecordingHud::default();

        let target_id = world.props()[4].id;
        let target_position = world.props()[4].position;
        world.agent_mut().expect("agent").position = target_position;

        scene.update(0.1, &FrameInput::empty(), &mut world, &mut hud);
        assert_eq!(hud.calls, vec![1]);
        let state = scene.population.states.get(&target_id).expect("state");
        assert!(state.collecting);
        assert!(matches!(state.phase, LifecyclePhase::FadingOut { .. }));

        // Guard held through fade-out, fade-in, and the grace delay.
        park_agent_far_away(&mut world);
        run_ticks(&mut scene, &mut world, &mut hud, 10);
        let state = scene.population.states.get(&target_id).expect("state");
        assert!(state.collecting, "guard released before the cycle finished");

        run_ticks(&mut scene, &mut world, &mut hud, 6);
        let state = scene.population.states.get(&target_id).expect("state");
        assert!(!state.collecting);
        assert_eq!(state.phase, LifecyclePhase::Idle);
        assert_eq!(hud.calls, vec![1]);

        // Relocation stayed inside the spawn footprint and on the plane.
        let footprint = scene.population.footprint.expect("footprint");
        let prop = world.find_prop(target_id).expect("prop");
        assert!(footprint.contains(prop.position.x, prop.position.z));
        assert!((prop.world_bounds().min.y - -2.0).abs() < 1e-4);
        assert!((prop.scale - prop.original_scale).abs() < 1e-4);
    }

    #[test]
    fn simultaneous_overlaps_commit_one_collection_per_tick() {
        let (mut scene, mut world) = scene_with_population(9);
        let mut hud = RecordingHud::default();
        {
            let agent = world.agent_mut().expect("agent");
            agent.position = Vec3::new(-1.0, -2.0, -1.0);
            agent.scale = 1.0;
            agent.local_bounds = Aabb::new(Vec3::new(-10.0, -1.0, -10.0), Vec3::new(10.0, 5.0, 10.0));
        }
        let last_created = world.props().last().expect("props").id;

        scene.update(0.1, &FrameInput::empty(), &mut world, &mut hud);
        assert_eq!(hud.calls, vec![1]);
        assert_eq!(scene.events.last_tick_counts().prop_collected, 1);
        // Deterministic scan order: reverse creation order collects the
        // newest prop first.
        assert!(scene.population.states[&last_created].collecting);

        scene.update(0.1, &FrameInput::empty(), &mut world, &mut hud);
        assert_eq!(hud.calls, vec![1, 2]);
        assert_eq!(scene.events.last_tick_counts().prop_collected, 1);
        assert_eq!(scene.debug_score(), Some(2));
    }

    #[test]
    fn held_overlap_never_rescores_a_collecting_prop() {
        let (mut scene, mut world) = scene_with_population(1);
        let mut hud = RecordingHud::default();
        let target_position = world.props()[0].position;
        world.agent_mut().expect("agent").position = target_position;

        run_ticks(&mut scene, &mut world, &mut hud, 5);
        assert_eq!(hud.calls, vec![1]);
    }

    #[test]
    fn ambient_recycle_relocates_inside_footprint_without_scoring() {
        let (mut scene, mut world) = scene_with_population(9);
        let mut hud = RecordingHud::default();
        park_agent_far_away(&mut world);

        let initial_positions: Vec<Vec3> =
            world.props().iter().map(|prop| prop.position).collect();
        run_ticks(&mut scene, &mut world, &mut hud, 120);

        assert!(hud.calls.is_empty(), "ambient recycle must never score");
        assert_eq!(scene.score.value(), 0);

        let footprint = scene.population.footprint.expect("footprint");
        let moved = world
            .props()
            .iter()
            .zip(&initial_positions)
            .any(|(prop, initial)| prop.position != *initial);
        assert!(moved, "expected at least one ambient relocation in 12s");
        for prop in world.props() {
            assert!(footprint.contains(prop.position.x, prop.position.z));
            assert!((prop.world_bounds().min.y - -2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn ambient_selection_skips_collecting_props() {
        let (mut scene, mut world) = scene_with_population(4);
        for state in scene.population.states.values_mut() {
            state.collecting = true;
        }
        scene.population.recycle_timer_seconds = Some(0.05);

        let mut bus = GameplayEventBus::default();
        scene
            .population
            .advance_ambient_recycle(0.1, &mut world, &mut bus);

        assert!(scene
            .population
            .states
            .values()
            .all(|state| state.phase == LifecyclePhase::Idle));
        assert!(bus.current_tick_events.is_empty());
        let rearmed = scene.population.recycle_timer_seconds.expect("re-armed");
        assert!((AMBIENT_RECYCLE_MIN_SECONDS..AMBIENT_RECYCLE_MAX_SECONDS).contains(&rearmed));
    }

    #[test]
    fn select_without_valid_reticle_changes_nothing() {
        let (mut scene, mut world) = scene_with_population(1);
        let before = world.agent().expect("agent").clone();
        let input = FrameInput::empty()
            .with_frame_available(true)
            .with_select_pressed(true);

        for _ in 0..20 {
            scene.update(0.1, &input, &mut world, &mut NullHud);
        }
        let agent = world.agent().expect("agent");
        assert_eq!(agent.position, before.position);
        assert_eq!(agent.rotation_y, before.rotation_y);
        assert_eq!(scene.events.last_tick_counts().navigation_issued, 0);
    }

    #[test]
    fn select_before_agent_arrives_is_a_noop() {
        let (assets, receiver) = asset_channel();
        let mut rng = SmallRng::seed_from_u64(11);
        assets.spawn_population(demo_request(4), &mut rng);

        let mut scene = GroveScene::new(5, receiver);
        let mut world = GroveWorld::default();
        let input = FrameInput::empty()
            .with_frame_available(true)
            .with_select_pressed(true)
            .with_reticle_point(Some(Vec3::new(1.0, -2.0, 1.0)));

        scene.update(0.1, &input, &mut world, &mut NullHud);
        assert!(world.agent().is_none());
        assert!(!scene.navigator.is_active());
        assert_eq!(scene.score.value(), 0);
    }

    #[test]
    fn empty_population_session_stays_inert() {
        let (mut scene, mut world) = scene_with_population(0);
        let mut hud = RecordingHud::default();
        assert_eq!(world.prop_count(), 0);
        assert!(scene.population.footprint.is_none());
        assert!(scene.population.recycle_timer_seconds.is_none());

        run_ticks(&mut scene, &mut world, &mut hud, 50);
        assert!(hud.calls.is_empty());
        assert_eq!(scene.debug_score(), Some(0));
    }

    #[test]
    fn navigation_walks_agent_into_a_collection() {
        let (mut scene, mut world) = scene_with_population(9);
        let mut hud = RecordingHud::default();

        let select = FrameInput::empty()
            .with_frame_available(true)
            .with_select_pressed(true)
            .with_reticle_point(Some(Vec3::new(-1.0, -2.0, -1.0)));
        scene.update(0.1, &select, &mut world, &mut hud);
        assert!(scene.navigator.is_active());

        run_ticks(&mut scene, &mut world, &mut hud, 24);
        assert_eq!(hud.calls.first().copied(), Some(1));
        assert!(scene.score.value() >= 1);
    }

    #[test]
    fn asset_load_failure_leaves_session_running() {
        let (assets, receiver) = asset_channel();
        let mut rng = SmallRng::seed_from_u64(11);
        assets.spawn_population(demo_request(4), &mut rng);
        assets.report_failure("agent_model", "corrupt file".to_string());

        let mut scene = GroveScene::new(5, receiver);
        let mut world = GroveWorld::default();
        let mut hud = RecordingHud::default();
        run_ticks(&mut scene, &mut world, &mut hud, 30);

        assert!(world.agent().is_none());
        assert!(hud.calls.is_empty());
        assert_eq!(world.prop_count(), 4);
    }

    #[test]
    fn placeholder_agent_participates_in_collisions() {
        let (assets, receiver) = asset_channel();
        let mut rng = SmallRng::seed_from_u64(11);
        assets.spawn_population(demo_request(9), &mut rng);
        assets.deliver_agent(AgentSeed::placeholder());

        let mut scene = GroveScene::new(5, receiver);
        let mut world = GroveWorld::default();
        let mut hud = RecordingHud::default();
        scene.update(0.0, &FrameInput::empty(), &mut world, &mut hud);

        let target_position = world.props()[4].position;
        world.agent_mut().expect("agent").position = target_position;
        scene.update(0.1, &FrameInput::empty(), &mut world, &mut hud);
        assert_eq!(hud.calls, vec![1]);
    }

    #[test]
    fn easing_curves_are_clamped_and_terminal() {
        assert_eq!(ease_in_quad(0.0), 0.0);
        assert_eq!(ease_in_quad(1.0), 1.0);
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(1.0), 1.0);
        assert!(ease_in_quad(0.5) < 0.5);
        assert!(ease_out_quad(0.5) > 0.5);
        assert_eq!(phase_progress(2.0, 1.0), 1.0);
        assert_eq!(phase_progress(-1.0, 1.0), 0.0);
        assert_eq!(phase_progress(0.5, 0.0), 1.0);
    }

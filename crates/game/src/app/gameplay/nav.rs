#[derive(Debug, Clone, Copy, PartialEq)]
enum NavPhase {
    Rotating { elapsed_seconds: f32 },
    Translating { elapsed_seconds: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct NavigationCommand {
    target: Vec3,
    phase: NavPhase,
    start_heading: f32,
    desired_heading: f32,
    start_position: Vec3,
}

/// Point-to-surface navigation: a select reorients the agent toward the
/// target over a fixed rotation phase, then translates it there in a straight
/// line. No path planning, no collision avoidance.
#[derive(Debug, Default)]
struct Navigator {
    active: Option<NavigationCommand>,
}

impl Navigator {
    /// Starts a command toward `reticle_point`. A select with no valid
    /// surface point, or before the agent asset has arrived, is a no-op.
    /// A select while a command is in flight replaces it (last-writer-wins).
    fn issue(&mut self, world: &GroveWorld, reticle_point: Option<Vec3>) -> bool {
        let Some(target) = reticle_point else {
            return false;
        };
        let Some(agent) = world.agent() else {
            return false;
        };
        let dx = target.x - agent.position.x;
        let dz = target.z - agent.position.z;
        // Heading from the horizontal projection only; zero faces +z.
        let desired_heading = dx.atan2(dz);
        self.active = Some(NavigationCommand {
            target,
            phase: NavPhase::Rotating {
                elapsed_seconds: 0.0,
            },
            start_heading: agent.rotation_y,
            desired_heading,
            start_position: agent.position,
        });
        true
    }

    fn is_active(&self) -> bool {
        self.active.is_some()
    }

    fn advance(&mut self, dt_seconds: f32, world: &mut GroveWorld) {
        let Some(command) = self.active.as_mut() else {
            return;
        };
        let Some(agent) = world.agent_mut() else {
            return;
        };
        match command.phase {
            NavPhase::Rotating { elapsed_seconds } => {
                let elapsed_seconds = elapsed_seconds + dt_seconds;
                let progress = phase_progress(elapsed_seconds, ROTATE_PHASE_SECONDS);
                // Raw-angle interpolation, no shortest-arc rewrap.
                agent.rotation_y = lerp(
                    command.start_heading,
                    command.desired_heading,
                    ease_out_quad(progress),
                );
                if elapsed_seconds >= ROTATE_PHASE_SECONDS {
                    agent.rotation_y = command.desired_heading;
                    command.start_position = agent.position;
                    command.phase = NavPhase::Translating {
                        elapsed_seconds: 0.0,
                    };
                } else {
                    command.phase = NavPhase::Rotating { elapsed_seconds };
                }
            }
            NavPhase::Translating { elapsed_seconds } => {
                let elapsed_seconds = elapsed_seconds + dt_seconds;
                let progress = ease_out_quad(phase_progress(elapsed_seconds, TRANSLATE_PHASE_SECONDS));
                agent.position = lerp_vec3(command.start_position, command.target, progress);
                if elapsed_seconds >= TRANSLATE_PHASE_SECONDS {
                    agent.position = command.target;
                    self.active = None;
                } else {
                    command.phase = NavPhase::Translating { elapsed_seconds };
                }
            }
        }
    }
}

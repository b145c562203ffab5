use std::collections::HashMap;
use std::sync::Mutex;

use glam::Vec2;
use rapier2d::prelude::*;

use crate::api::sinks::{BodyCommand, PlayerSnapshot};
use crate::api::types::{BodyRole, Contact};

/// Player mass; colliders are massless sensors, so a flap impulse equals
/// the velocity change.
const PLAYER_MASS: f32 = 1.0;

// ---------------------------------------------------------------------------
// WASM-safe event collector (no crossbeam)
// ---------------------------------------------------------------------------

struct StartedCollector {
    started: Mutex<Vec<(ColliderHandle, ColliderHandle)>>,
}

impl StartedCollector {
    fn new() -> Self {
        Self {
            started: Mutex::new(Vec::new()),
        }
    }

    fn drain(&self) -> Vec<(ColliderHandle, ColliderHandle)> {
        self.started
            .lock()
            .map(|mut started| std::mem::take(&mut *started))
            .unwrap_or_default()
    }
}

impl EventHandler for StartedCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        // Only the beginning of an overlap is a contact; separation is silent.
        if let CollisionEvent::Started(h1, h2, _) = event {
            if let Ok(mut started) = self.started.lock() {
                started.push((h1, h2));
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

// ---------------------------------------------------------------------------
// ContactWorld
// ---------------------------------------------------------------------------

/// Physics host for the game: Rapier2D bodies tagged with a `BodyRole`,
/// driven by `BodyCommand`s and reporting role-tagged `Contact`s.
///
/// Every collider is a sensor, so nothing pushes anything; the world only
/// integrates the player under gravity and detects overlaps. The player's
/// collider enables every pair type while the rest keep Rapier's default
/// (pairs with a dynamic body only), so obstacles sliding past the boundary
/// or the ground never report against each other.
pub struct ContactWorld {
    gravity: f32,
    frozen: bool,
    roles: HashMap<RigidBodyHandle, BodyRole>,
    handles: HashMap<BodyRole, RigidBodyHandle>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    collector: StartedCollector,
}

impl ContactWorld {
    /// Create a world with downward (positive Y) gravity.
    pub fn new(gravity: f32) -> Self {
        Self {
            gravity,
            frozen: false,
            roles: HashMap::new(),
            handles: HashMap::new(),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            collector: StartedCollector::new(),
        }
    }

    /// Set the integration timestep.
    pub fn set_dt(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    pub fn dt(&self) -> f32 {
        self.integration_parameters.dt
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn contains(&self, role: BodyRole) -> bool {
        self.handles.contains_key(&role)
    }

    /// Apply one command from the game.
    pub fn apply(&mut self, cmd: &BodyCommand) {
        match *cmd {
            BodyCommand::Spawn { role, pos, half_extents } => self.spawn(role, pos, half_extents),
            BodyCommand::MoveObstacle { id, pos } => {
                if self.frozen {
                    return;
                }
                if let Some(rb) = self.body_mut(BodyRole::Obstacle(id)) {
                    rb.set_next_kinematic_translation(vector![pos.x, pos.y]);
                }
            }
            BodyCommand::Remove(role) => self.remove(role),
            BodyCommand::ActivatePlayer => {
                if let Some(rb) = self.body_mut(BodyRole::Player) {
                    rb.set_body_type(RigidBodyType::Dynamic, true);
                }
            }
            BodyCommand::Flap { impulse } => {
                if self.frozen {
                    return;
                }
                if let Some(rb) = self.body_mut(BodyRole::Player) {
                    rb.set_linvel(vector![0.0, 0.0], true);
                    rb.apply_impulse(vector![impulse.x, impulse.y], true);
                }
            }
            BodyCommand::TiltPlayer { angle } => {
                if let Some(rb) = self.body_mut(BodyRole::Player) {
                    rb.set_rotation(Rotation::new(angle), true);
                }
            }
            BodyCommand::Freeze => self.frozen = true,
            BodyCommand::Reset => {
                log::debug!("contact world reset ({} bodies dropped)", self.bodies.len());
                let dt = self.integration_parameters.dt;
                *self = ContactWorld::new(self.gravity);
                self.set_dt(dt);
            }
        }
    }

    /// Step the simulation and append the contacts that began this step.
    /// A frozen world neither moves nor reports.
    pub fn step_into(&mut self, contacts: &mut Vec<Contact>) {
        if self.frozen {
            return;
        }

        let gravity = vector![0.0, self.gravity];
        self.physics_pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.collector,
        );

        for (h1, h2) in self.collector.drain() {
            if let (Some(a), Some(b)) = (self.collider_role(h1), self.collider_role(h2)) {
                contacts.push(Contact::new(a, b));
            }
        }
    }

    /// Current player position and velocity, if the player is registered.
    pub fn player_snapshot(&self) -> Option<PlayerSnapshot> {
        let handle = self.handles.get(&BodyRole::Player)?;
        let rb = self.bodies.get(*handle)?;
        let pos = rb.translation();
        let vel = rb.linvel();
        Some(PlayerSnapshot {
            pos: Vec2::new(pos.x, pos.y),
            velocity: Vec2::new(vel.x, vel.y),
        })
    }

    fn spawn(&mut self, role: BodyRole, pos: Vec2, half_extents: Vec2) {
        if role != BodyRole::Other && self.handles.contains_key(&role) {
            log::warn!("body {:?} already registered; spawn ignored", role);
            return;
        }

        let builder = match role {
            BodyRole::Player => RigidBodyBuilder::kinematic_position_based()
                .locked_axes(LockedAxes::ROTATION_LOCKED)
                .additional_mass(PLAYER_MASS),
            BodyRole::Obstacle(_) => RigidBodyBuilder::kinematic_position_based(),
            BodyRole::Boundary | BodyRole::Other => RigidBodyBuilder::fixed(),
        };
        let handle = self.bodies.insert(builder.translation(vector![pos.x, pos.y]).build());

        let mut collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y)
            .sensor(true)
            .density(0.0)
            .active_events(ActiveEvents::COLLISION_EVENTS);
        if role == BodyRole::Player {
            collider = collider.active_collision_types(ActiveCollisionTypes::all());
        }
        self.colliders
            .insert_with_parent(collider.build(), handle, &mut self.bodies);

        self.roles.insert(handle, role);
        if role != BodyRole::Other {
            self.handles.insert(role, handle);
        }
    }

    fn remove(&mut self, role: BodyRole) {
        let Some(handle) = self.handles.remove(&role) else {
            return;
        };
        self.roles.remove(&handle);
        self.bodies.remove(
            handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    fn body_mut(&mut self, role: BodyRole) -> Option<&mut RigidBody> {
        let handle = *self.handles.get(&role)?;
        self.bodies.get_mut(handle)
    }

    fn collider_role(&self, handle: ColliderHandle) -> Option<BodyRole> {
        let parent = self.colliders.get(handle)?.parent()?;
        self.roles.get(&parent).copied()
    }
}

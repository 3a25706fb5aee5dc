//! Vaulter Physics - 2D physics simulation using rapier2d
//!
//! Provides rigid body dynamics, continuous forces and impulses, gravity
//! scaling, and the overlap queries used by the character controller.

use glam::Vec2;
use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, QueryFilter, RigidBodyHandle};

/// Collision group for level geometry (ground and walls)
pub const WORLD_GROUP: Group = Group::GROUP_1;
/// Collision group for character bodies
pub const CHARACTER_GROUP: Group = Group::GROUP_2;

/// Query filter matching level geometry, as seen from a character
pub fn world_query_filter() -> QueryFilter<'static> {
    QueryFilter::default().groups(InteractionGroups::new(CHARACTER_GROUP, WORLD_GROUP))
}

/// Physics world configuration
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Gravity vector (default: -9.81 on Y axis)
    pub gravity: Vec2,
    /// Physics timestep (default: 1/60)
    pub timestep: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -9.81),
            timestep: 1.0 / 60.0,
        }
    }
}

/// The main physics world containing all simulation state
pub struct PhysicsWorld {
    /// Configuration
    pub config: PhysicsConfig,

    /// Rigid body storage
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,
    /// Impulse joint storage
    pub impulse_joint_set: ImpulseJointSet,
    /// Multi-body joint storage
    pub multibody_joint_set: MultibodyJointSet,

    /// Integration parameters
    integration_parameters: IntegrationParameters,
    /// Physics pipeline
    physics_pipeline: PhysicsPipeline,
    /// Island manager
    island_manager: IslandManager,
    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,
    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,
    /// Continuous collision detection solver
    ccd_solver: CCDSolver,
    /// Query pipeline for overlap tests
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = config.timestep;

        Self {
            config,
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Step the physics simulation by one fixed timestep
    ///
    /// Forces applied since the previous step act for exactly this step;
    /// they are cleared afterwards so every tick starts fresh.
    pub fn step(&mut self) {
        let gravity = vector![self.config.gravity.x, self.config.gravity.y];

        self.physics_pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );

        for (_, body) in self.rigid_body_set.iter_mut() {
            body.reset_forces(true);
        }

        // Update query pipeline after physics step
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a static collider (ground, walls, etc.)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        let handle = self.collider_set.insert(collider);
        self.query_pipeline.update(&self.collider_set);
        handle
    }

    /// Add a dynamic rigid body with a collider
    pub fn add_dynamic_body(
        &mut self,
        rigid_body: RigidBody,
        collider: Collider,
    ) -> (RigidBodyHandle, ColliderHandle) {
        let rb_handle = self.rigid_body_set.insert(rigid_body);
        let col_handle =
            self.collider_set
                .insert_with_parent(collider, rb_handle, &mut self.rigid_body_set);
        self.query_pipeline.update(&self.collider_set);
        (rb_handle, col_handle)
    }

    /// Spawn a character body: dynamic, rotation-locked, frictionless
    /// capsule on the character collision group
    pub fn add_character_body(
        &mut self,
        position: Vec2,
        half_height: f32,
        radius: f32,
    ) -> (RigidBodyHandle, ColliderHandle) {
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![position.x, position.y])
            .lock_rotations()
            .build();

        let collider = ColliderBuilder::capsule_y(half_height.max(0.01), radius)
            .friction(0.0) // Smooth sliding against walls
            .restitution(0.0)
            .mass(1.0)
            .collision_groups(InteractionGroups::new(CHARACTER_GROUP, Group::ALL))
            .build();

        self.add_dynamic_body(body, collider)
    }

    /// Create a static box collider on the world group
    pub fn create_static_box(&mut self, half_extents: Vec2, position: Vec2) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y)
            .translation(vector![position.x, position.y])
            .friction(0.7)
            .collision_groups(InteractionGroups::new(WORLD_GROUP, Group::ALL))
            .build();
        self.add_static_collider(collider)
    }

    /// Whether a rigid body handle is present in this world
    pub fn contains_body(&self, handle: RigidBodyHandle) -> bool {
        self.rigid_body_set.contains(handle)
    }

    /// Get a rigid body by handle
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable rigid body by handle
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// World-space position of a body (zero if the handle is stale)
    pub fn position(&self, handle: RigidBodyHandle) -> Vec2 {
        self.rigid_body_set
            .get(handle)
            .map(|body| Vec2::new(body.translation().x, body.translation().y))
            .unwrap_or(Vec2::ZERO)
    }

    /// Teleport a body to a world-space position
    pub fn set_position(&mut self, handle: RigidBodyHandle, position: Vec2) {
        let Some(body) = self.rigid_body_set.get_mut(handle) else {
            return;
        };
        body.set_translation(vector![position.x, position.y], true);
    }

    /// Linear velocity of a body (zero if the handle is stale)
    pub fn velocity(&self, handle: RigidBodyHandle) -> Vec2 {
        self.rigid_body_set
            .get(handle)
            .map(|body| Vec2::new(body.linvel().x, body.linvel().y))
            .unwrap_or(Vec2::ZERO)
    }

    /// Set a body's linear velocity directly
    pub fn set_velocity(&mut self, handle: RigidBodyHandle, velocity: Vec2) {
        let Some(body) = self.rigid_body_set.get_mut(handle) else {
            return;
        };
        body.set_linvel(vector![velocity.x, velocity.y], true);
    }

    /// Apply a continuous force acting for the current step
    pub fn apply_force(&mut self, handle: RigidBodyHandle, force: Vec2) {
        let Some(body) = self.rigid_body_set.get_mut(handle) else {
            return;
        };
        body.add_force(vector![force.x, force.y], true);
    }

    /// Apply an instantaneous impulse (momentum change)
    pub fn apply_impulse(&mut self, handle: RigidBodyHandle, impulse: Vec2) {
        let Some(body) = self.rigid_body_set.get_mut(handle) else {
            return;
        };
        body.apply_impulse(vector![impulse.x, impulse.y], true);
    }

    /// Gravity scale of a body (1.0 if the handle is stale)
    pub fn gravity_scale(&self, handle: RigidBodyHandle) -> f32 {
        self.rigid_body_set
            .get(handle)
            .map(|body| body.gravity_scale())
            .unwrap_or(1.0)
    }

    /// Set a body's gravity scale
    pub fn set_gravity_scale(&mut self, handle: RigidBodyHandle, scale: f32) {
        let Some(body) = self.rigid_body_set.get_mut(handle) else {
            return;
        };
        body.set_gravity_scale(scale, true);
    }

    /// Boolean overlap test of an axis-aligned box against the world
    ///
    /// `size` is the full extent of the box, matching how check geometry is
    /// authored in the tuning config.
    pub fn overlap_box(&self, center: Vec2, size: Vec2, filter: QueryFilter) -> bool {
        let shape = Cuboid::new(vector![size.x * 0.5, size.y * 0.5]);
        let shape_pos = Isometry::translation(center.x, center.y);

        self.query_pipeline
            .intersection_with_shape(
                &self.rigid_body_set,
                &self.collider_set,
                &shape_pos,
                &shape,
                filter,
            )
            .is_some()
    }

    /// Boolean overlap test of a circle against the world
    pub fn overlap_circle(&self, center: Vec2, radius: f32, filter: QueryFilter) -> bool {
        let shape = Ball::new(radius);
        let shape_pos = Isometry::translation(center.x, center.y);

        self.query_pipeline
            .intersection_with_shape(
                &self.rigid_body_set,
                &self.collider_set,
                &shape_pos,
                &shape,
                filter,
            )
            .is_some()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physics_world_creation() {
        let world = PhysicsWorld::new();
        assert_eq!(world.config.gravity, Vec2::new(0.0, -9.81));
    }

    #[test]
    fn test_overlap_box_hit_and_miss() {
        let mut world = PhysicsWorld::new();
        world.create_static_box(Vec2::new(1.0, 1.0), Vec2::new(0.0, 0.0));

        assert!(world.overlap_box(
            Vec2::new(0.5, 0.5),
            Vec2::new(0.2, 0.2),
            world_query_filter()
        ));
        assert!(!world.overlap_box(
            Vec2::new(5.0, 5.0),
            Vec2::new(0.2, 0.2),
            world_query_filter()
        ));
    }

    #[test]
    fn test_overlap_circle_hit_and_miss() {
        let mut world = PhysicsWorld::new();
        world.create_static_box(Vec2::new(0.5, 5.0), Vec2::new(2.5, 0.0));

        assert!(world.overlap_circle(Vec2::new(2.1, 0.0), 0.2, world_query_filter()));
        assert!(!world.overlap_circle(Vec2::new(1.0, 0.0), 0.2, world_query_filter()));
    }

    #[test]
    fn test_world_filter_ignores_characters() {
        let mut world = PhysicsWorld::new();
        let (_, _) = world.add_character_body(Vec2::new(0.0, 0.0), 0.6, 0.4);

        // A character body must not register as level geometry
        assert!(!world.overlap_circle(Vec2::new(0.0, 0.0), 0.2, world_query_filter()));
    }

    #[test]
    fn test_gravity_pulls_dynamic_body() {
        let mut world = PhysicsWorld::new();
        let (body, _) = world.add_character_body(Vec2::new(0.0, 10.0), 0.6, 0.4);

        for _ in 0..10 {
            world.step();
        }

        assert!(world.velocity(body).y < 0.0);
        assert!(world.position(body).y < 10.0);
    }

    #[test]
    fn test_impulse_changes_velocity_by_momentum() {
        let mut world = PhysicsWorld::new();
        let (body, _) = world.add_character_body(Vec2::new(0.0, 10.0), 0.6, 0.4);

        // Collider mass is exactly 1.0, so dv == impulse
        world.apply_impulse(body, Vec2::new(0.0, 10.0));
        assert!((world.velocity(body).y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_forces_are_fresh_each_step() {
        let mut world = PhysicsWorld::new();
        let (body, _) = world.add_character_body(Vec2::new(0.0, 10.0), 0.6, 0.4);
        world.set_gravity_scale(body, 0.0);

        world.apply_force(body, Vec2::new(6.0, 0.0));
        world.step();
        let after_one = world.velocity(body).x;
        assert!((after_one - 6.0 * world.config.timestep).abs() < 1e-4);

        // No force this step: velocity must not keep growing
        world.step();
        assert!((world.velocity(body).x - after_one).abs() < 1e-5);
    }

    #[test]
    fn test_gravity_scale_modulates_fall() {
        let mut world = PhysicsWorld::new();
        let (light, _) = world.add_character_body(Vec2::new(0.0, 10.0), 0.6, 0.4);
        let (heavy, _) = world.add_character_body(Vec2::new(5.0, 10.0), 0.6, 0.4);
        world.set_gravity_scale(heavy, 2.0);

        for _ in 0..10 {
            world.step();
        }

        assert!(world.velocity(heavy).y < world.velocity(light).y);
    }
}

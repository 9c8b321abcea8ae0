use rapier2d::prelude::*;

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier2d::prelude::ColliderHandle;

/// Rapier simulation state behind a body.
///
/// Gravity set here only reaches dynamic bodies. Kinematic bodies move by the
/// velocity their owner gives them before each `step`.
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,

    /// Query pipeline for raycasts, refreshed on every step
    query_pipeline: QueryPipeline,

    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
}

impl PhysicsWorld {
    /// Create a world with custom gravity and a 60 Hz timestep
    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = 1.0 / 60.0;

        Self {
            gravity,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
        }
    }

    /// Step the simulation forward by one timestep
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Add a rigid body to the world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Cast a ray and return the first hit with its distance along the ray.
    ///
    /// Only sees colliders as of the last `step`.
    pub fn raycast(
        &self,
        ray_origin: Vector<Real>,
        ray_dir: Vector<Real>,
        max_toi: Real,
        solid: bool,
        filter: QueryFilter,
    ) -> Option<(ColliderHandle, Real)> {
        let ray = Ray::new(point![ray_origin.x, ray_origin.y], ray_dir);
        self.query_pipeline.cast_ray(
            &self.rigid_body_set,
            &self.collider_set,
            &ray,
            max_toi,
            solid,
            filter,
        )
    }

    /// Set the timestep used by the next `step`
    pub fn set_timestep(&mut self, dt: Real) {
        self.integration_parameters.dt = dt;
    }

    pub fn timestep(&self) -> Real {
        self.integration_parameters.dt
    }
}

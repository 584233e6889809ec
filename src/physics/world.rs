use std::num::NonZeroUsize;

use bevy::prelude::Vec2;
use rapier2d::prelude::*;

use super::sled::{BoxSpec, JointSpec};

// glam <-> nalgebra

fn to_na(v: Vec2) -> Vector<Real> {
    vector![v.x, v.y]
}

fn to_na_point(v: Vec2) -> Point<Real> {
    point![v.x, v.y]
}

fn from_na(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// Opaque reference to a body owned by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BodyHandle(RigidBodyHandle);

/// World-space position and rotation (radians) of a body's centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec2,
    pub angle: f32,
}

/// Solver iteration counts, fixed for the lifetime of the world.
#[derive(Clone, Copy, Debug)]
pub struct SolverIterations {
    pub velocity: usize,
    pub position: usize,
    /// Characteristic length of the scene (rapier scales its tolerances by it).
    pub length_unit: f32,
}

/// Every rapier set and pipeline the simulation needs, behind a small API.
pub struct PhysicsWorld {
    gravity: Vector<Real>,
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
}

impl PhysicsWorld {
    /// A world with constant `gravity`; `gravity.y > 0` pulls toward the bottom of the screen.
    pub fn new(gravity: Vec2, solver: SolverIterations) -> Self {
        let integration_parameters = IntegrationParameters {
            num_solver_iterations: NonZeroUsize::new(solver.velocity).unwrap_or(NonZeroUsize::MIN),
            num_internal_stabilization_iterations: solver.position,
            length_unit: solver.length_unit,
            ..IntegrationParameters::default()
        };

        Self {
            gravity: to_na(gravity),
            integration_parameters,
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
        }
    }

    /// Insert a dynamic box centred on `spec.position`.
    pub fn create_box(&mut self, spec: &BoxSpec) -> BodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(to_na(spec.position))
            .build();
        let handle = self.bodies.insert(body);

        let collider = ColliderBuilder::cuboid(spec.half_size.x, spec.half_size.y)
            .density(spec.density)
            .friction(spec.friction)
            .restitution(spec.restitution)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        BodyHandle(handle)
    }

    /// Insert an immovable body at the origin whose only collider is the segment `a`-`b`.
    pub fn create_segment(&mut self, a: Vec2, b: Vec2) -> BodyHandle {
        let handle = self.bodies.insert(RigidBodyBuilder::fixed().build());
        let collider = ColliderBuilder::segment(to_na_point(a), to_na_point(b)).build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        BodyHandle(handle)
    }

    /// Join the centres of `a` and `b` with a damped spring.
    ///
    /// The rest length is the current centre distance plus `joint.length_offset`.
    /// Stiffness and damping follow from the joint's frequency and damping ratio
    /// applied to the pair's effective mass `ma * mb / (ma + mb)`, so the spring
    /// oscillates at `frequency_hz` whatever the box densities are.
    /// Returns the rest length.
    pub fn create_spring(
        &mut self,
        a: BodyHandle,
        a_mass: f32,
        b: BodyHandle,
        b_mass: f32,
        joint: &JointSpec,
    ) -> Option<f32> {
        let pa = self.pose(a)?.position;
        let pb = self.pose(b)?.position;
        let rest_length = pa.distance(pb) + joint.length_offset;

        let (stiffness, damping) = joint.coefficients(a_mass, b_mass);
        let spring = SpringJointBuilder::new(rest_length, stiffness, damping)
            .local_anchor1(Point::origin())
            .local_anchor2(Point::origin())
            .build();
        self.impulse_joints.insert(a.0, b.0, spring, true);

        Some(rest_length)
    }

    /// Advance the simulation by `dt` seconds. Non-positive or non-finite
    /// durations leave the world untouched.
    pub fn step(&mut self, dt: f32) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
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
            &(),
        );
    }

    pub fn pose(&self, handle: BodyHandle) -> Option<Pose> {
        self.bodies.get(handle.0).map(|rb| Pose {
            position: from_na(rb.translation()),
            angle: rb.rotation().angle(),
        })
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn fixed_body_count(&self) -> usize {
        self.bodies.iter().filter(|(_, rb)| rb.is_fixed()).count()
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    pub fn joint_count(&self) -> usize {
        self.impulse_joints.len()
    }

    /// Both endpoints of every segment collider, in insertion order of their bodies.
    pub fn segments(&self) -> Vec<(Vec2, Vec2)> {
        self.colliders
            .iter()
            .filter_map(|(_, co)| co.shape().as_segment())
            .map(|s| (Vec2::new(s.a.x, s.a.y), Vec2::new(s.b.x, s.b.y)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimSettings;

    fn world(gravity: Vec2) -> PhysicsWorld {
        let settings = SimSettings::default();
        PhysicsWorld::new(
            gravity,
            SolverIterations {
                velocity: settings.velocity_iterations,
                position: settings.position_iterations,
                length_unit: settings.length_unit,
            },
        )
    }

    #[test]
    fn box_starts_at_spawn_without_rotation() {
        let mut w = world(Vec2::ZERO);
        let spec = SimSettings::default().slider;
        let h = w.create_box(&spec);

        let pose = w.pose(h).unwrap();
        assert_eq!(pose.position, spec.position);
        assert_eq!(pose.angle, 0.0);
        assert_eq!(w.body_count(), 1);
        assert_eq!(w.fixed_body_count(), 0);
    }

    #[test]
    fn segment_is_fixed_and_keeps_its_endpoints() {
        let mut w = world(Vec2::new(0.0, 100.0));
        let h = w.create_segment(Vec2::new(0.0, 0.0), Vec2::new(0.0, 20.0));
        for _ in 0..30 {
            w.step(1.0 / 60.0);
        }

        assert_eq!(w.fixed_body_count(), 1);
        assert_eq!(w.pose(h).unwrap().position, Vec2::ZERO);
        assert_eq!(
            w.segments(),
            vec![(Vec2::new(0.0, 0.0), Vec2::new(0.0, 20.0))]
        );
    }

    #[test]
    fn non_positive_steps_are_ignored() {
        let mut w = world(Vec2::new(0.0, 100.0));
        let h = w.create_box(&SimSettings::default().rider);
        let before = w.pose(h).unwrap();

        w.step(0.0);
        w.step(-1.0);
        w.step(f32::NAN);

        assert_eq!(w.pose(h).unwrap(), before);
    }

    #[test]
    fn box_lands_on_segment() {
        let mut w = world(Vec2::new(0.0, 100.0));
        let spec = SimSettings::default().rider;
        let h = w.create_box(&spec);
        // floor 40 units below the rider's bottom edge
        let floor_y = spec.position.y + spec.half_size.y + 40.0;
        w.create_segment(Vec2::new(0.0, floor_y), Vec2::new(200.0, floor_y));

        for _ in 0..600 {
            w.step(1.0 / 60.0);
        }

        let pose = w.pose(h).unwrap();
        let resting_y = floor_y - spec.half_size.y;
        assert!(
            (pose.position.y - resting_y).abs() < 1.0,
            "rider at {:?}, expected y ~ {resting_y}",
            pose.position
        );
    }
}

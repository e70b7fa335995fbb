use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use super::{
    obb::{RayHitPolicy, OBB},
    ray::Ray,
};

/// World placement of an entity. Only position and rotation take part in picking, the half extent is fixed per
/// entity in [`Pickable`].
#[derive(Debug, Copy, Clone)]
pub struct Transform {
    pub position: nalgebra_glm::Vec3,
    pub rotation: nalgebra_glm::Mat3,
}

impl Transform {
    pub fn at(position: nalgebra_glm::Vec3) -> Self {
        Self {
            position,
            rotation: nalgebra_glm::Mat3::identity(),
        }
    }

    pub fn rotated(mut self, angle: f32, axis: nalgebra_glm::Vec3) -> Self {
        self.rotation = rotation_matrix(angle, axis) * self.rotation;
        self
    }
}

pub fn rotation_matrix(angle: f32, axis: nalgebra_glm::Vec3) -> nalgebra_glm::Mat3 {
    nalgebra_glm::mat4_to_mat3(&nalgebra_glm::rotation(angle, &axis))
}

/// Marks an entity as something the crosshair can land on.
#[derive(Debug, Copy, Clone)]
pub struct Pickable {
    pub half_extents: nalgebra_glm::Vec3,
}

/// Continuous rotation around a fixed axis, advanced each tick.
#[derive(Debug, Copy, Clone)]
pub struct Spin {
    pub axis: nalgebra_glm::Vec3,
    pub radians_per_second: f32,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickPolicy {
    /// The first candidate in list order that is hit wins, no matter how far away it is.
    #[default]
    FirstMatch,
    /// The candidate with the smallest hit distance wins.
    Closest,
}

pub fn spin_system(world: &mut World, delta_seconds: f32) {
    for (_, (transform, spin)) in world.query_mut::<(&mut Transform, &Spin)>() {
        transform.rotation =
            rotation_matrix(spin.radians_per_second * delta_seconds, spin.axis) * transform.rotation;
    }
}

pub fn oriented_box(transform: &Transform, pickable: &Pickable) -> OBB {
    OBB::new(transform.position, pickable.half_extents, transform.rotation)
}

/// Casts `ray` against `candidates` in order. Candidates that were despawned or lost their `Pickable` are skipped.
pub fn pick(
    world: &World,
    candidates: &[Entity],
    ray: &Ray,
    hit_policy: RayHitPolicy,
    pick_policy: PickPolicy,
) -> Option<Entity> {
    let mut best: Option<(Entity, f32)> = None;
    for &entity in candidates {
        let Ok(mut query) = world.query_one::<(&Transform, &Pickable)>(entity) else {
            continue;
        };
        let Some((transform, pickable)) = query.get() else {
            continue;
        };
        let Some(hit) = oriented_box(transform, pickable).raycast(ray, hit_policy) else {
            continue;
        };

        match pick_policy {
            PickPolicy::FirstMatch => return Some(entity),
            PickPolicy::Closest => {
                let distance = hit.distance();
                if best.map_or(true, |(_, d)| distance < d) {
                    best = Some((entity, distance));
                }
            }
        }
    }
    best.map(|(entity, _)| entity)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn pickable() -> Pickable {
        Pickable {
            half_extents: nalgebra_glm::vec3(0.5, 0.5, 0.5),
        }
    }

    fn down_the_z_axis() -> Ray {
        Ray::new(nalgebra_glm::vec3(0.0, 0.0, 0.0), nalgebra_glm::vec3(0.0, 0.0, -1.0))
    }

    #[test]
    fn first_match_ignores_distance() {
        let mut world = World::new();
        let far = world.spawn((Transform::at(nalgebra_glm::vec3(0.0, 0.0, -20.0)), pickable()));
        let near = world.spawn((Transform::at(nalgebra_glm::vec3(0.0, 0.0, -5.0)), pickable()));
        let off = world.spawn((Transform::at(nalgebra_glm::vec3(3.0, 0.0, -5.0)), pickable()));
        let ray = down_the_z_axis();

        let candidates = [off, far, near];
        assert_eq!(
            pick(&world, &candidates, &ray, RayHitPolicy::AnyIntersection, PickPolicy::FirstMatch),
            Some(far)
        );
        assert_eq!(
            pick(&world, &candidates, &ray, RayHitPolicy::AnyIntersection, PickPolicy::Closest),
            Some(near)
        );
    }

    #[test]
    fn behind_origin_depends_on_policy() {
        let mut world = World::new();
        let behind = world.spawn((Transform::at(nalgebra_glm::vec3(0.0, 0.0, 5.0)), pickable()));
        let ray = down_the_z_axis();
        assert_eq!(
            pick(&world, &[behind], &ray, RayHitPolicy::AnyIntersection, PickPolicy::FirstMatch),
            Some(behind)
        );
        assert_eq!(
            pick(&world, &[behind], &ray, RayHitPolicy::ForwardOnly, PickPolicy::FirstMatch),
            None
        );
    }

    #[test]
    fn despawned_candidates_are_skipped() {
        let mut world = World::new();
        let gone = world.spawn((Transform::at(nalgebra_glm::vec3(0.0, 0.0, -5.0)), pickable()));
        let other = world.spawn((Transform::at(nalgebra_glm::vec3(0.0, 0.0, -9.0)), pickable()));
        world.despawn(gone).unwrap();
        assert_eq!(
            pick(&world, &[gone, other], &down_the_z_axis(), RayHitPolicy::ForwardOnly, PickPolicy::FirstMatch),
            Some(other)
        );
    }

    #[test]
    fn spin_turns_the_box() {
        let mut world = World::new();
        let entity = world.spawn((
            Transform::at(nalgebra_glm::vec3(0.0, 0.0, 0.0)),
            Spin {
                axis: nalgebra_glm::vec3(0.0, 1.0, 0.0),
                radians_per_second: std::f32::consts::PI,
            },
        ));
        spin_system(&mut world, 0.5);
        let transform = *world.get::<&Transform>(entity).unwrap();
        let x = transform.rotation * nalgebra_glm::vec3(1.0, 0.0, 0.0);
        assert_relative_eq!(x.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(x.z, -1.0, epsilon = 1e-5);
    }
}

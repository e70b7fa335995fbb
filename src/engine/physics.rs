//! Collision resolution for a single moving actor against hand-placed static geometry.
//!
//! Every function here is pure: the caller passes the last valid position and the position it would like to move
//! to, and gets back where the actor is actually allowed to be.

use serde::{Deserialize, Serialize};

use super::{aabb::AABB, plane::Plane};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CollisionResult {
    pub collided: bool,
    pub corrected_position: nalgebra_glm::Vec3,
}

/// What to do with a displacement that ends inside an obstacle.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionPolicy {
    /// Throw the whole displacement away and stay at the old position. Contact feels "sticky", there is no wall
    /// sliding.
    #[default]
    Reject,
    /// Keep the x and z parts of the displacement separately when either one alone is free, so the actor slides
    /// along the obstacle.
    Slide,
}

/// The walls and hard limits of the playable map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Boundary {
    pub threshold: f32,
    pub clamp_x: [f32; 2],
    pub clamp_z: [f32; 2],
    pub planes: Vec<Plane>,
}

impl Default for Boundary {
    fn default() -> Self {
        Self {
            planes: vec![
                // north
                Plane::from_point_normal(
                    nalgebra_glm::vec3(0.0, 0.0, 85.0),
                    nalgebra_glm::vec3(0.0, 0.0, 1.0),
                ),
                // south
                Plane::from_point_normal(
                    nalgebra_glm::vec3(0.0, 0.0, -197.0),
                    nalgebra_glm::vec3(0.0, 0.0, -1.0),
                ),
                // east
                Plane::from_point_normal(
                    nalgebra_glm::vec3(87.0, 0.0, 0.0),
                    nalgebra_glm::vec3(1.0, 0.0, 0.0),
                ),
                // west
                Plane::from_point_normal(
                    nalgebra_glm::vec3(-87.0, 0.0, 0.0),
                    nalgebra_glm::vec3(-1.0, 0.0, 0.0),
                ),
            ],
            threshold: 1.0,
            clamp_x: [-85.0, 85.0],
            clamp_z: [-195.0, 83.0],
        }
    }
}

impl Boundary {
    /// The first wall `p` is on the wrong side of, if any.
    pub fn violated_by(&self, p: nalgebra_glm::Vec3) -> Option<&Plane> {
        self.planes
            .iter()
            .find(|plane| plane.collides_with_point(p, self.threshold))
    }

    pub fn collides_with_point(&self, p: nalgebra_glm::Vec3) -> bool {
        self.violated_by(p).is_some()
    }

    pub fn clamp(&self, p: nalgebra_glm::Vec3) -> nalgebra_glm::Vec3 {
        nalgebra_glm::vec3(
            p.x.clamp(self.clamp_x[0], self.clamp_x[1]),
            p.y,
            p.z.clamp(self.clamp_z[0], self.clamp_z[1]),
        )
    }
}

/// Tests `moving_box` (already placed at `proposed_position`) against one static obstacle.
pub fn resolve_box_collision(
    moving_box: &AABB,
    static_box: &AABB,
    old_position: nalgebra_glm::Vec3,
    proposed_position: nalgebra_glm::Vec3,
) -> CollisionResult {
    if moving_box.intersects(static_box) {
        CollisionResult {
            collided: true,
            corrected_position: old_position,
        }
    } else {
        CollisionResult {
            collided: false,
            corrected_position: proposed_position,
        }
    }
}

/// Same contract as [`resolve_box_collision`], with the box re-derived from each candidate and the correction
/// chosen by `policy`.
pub fn resolve_with_policy(
    half_extents: nalgebra_glm::Vec3,
    static_box: &AABB,
    old_position: nalgebra_glm::Vec3,
    proposed_position: nalgebra_glm::Vec3,
    policy: CorrectionPolicy,
) -> CollisionResult {
    let moving_box = AABB::from_center(proposed_position, half_extents);
    let result = resolve_box_collision(&moving_box, static_box, old_position, proposed_position);
    if !result.collided || policy == CorrectionPolicy::Reject {
        return result;
    }

    let free = |p: nalgebra_glm::Vec3| !AABB::from_center(p, half_extents).intersects(static_box);
    let x_only = nalgebra_glm::vec3(proposed_position.x, proposed_position.y, old_position.z);
    let z_only = nalgebra_glm::vec3(old_position.x, proposed_position.y, proposed_position.z);
    let corrected_position = if free(x_only) {
        x_only
    } else if free(z_only) {
        z_only
    } else {
        old_position
    };

    CollisionResult {
        collided: true,
        corrected_position,
    }
}

/// Full per-tick movement resolution: each obstacle in the given order, then the boundary walls, then the hard
/// clamp. Later obstacles see the output of earlier ones.
pub fn resolve_movement(
    old_position: nalgebra_glm::Vec3,
    proposed_position: nalgebra_glm::Vec3,
    half_extents: nalgebra_glm::Vec3,
    obstacles: &[AABB],
    boundary: &Boundary,
    policy: CorrectionPolicy,
) -> nalgebra_glm::Vec3 {
    let mut position = proposed_position;
    for obstacle in obstacles {
        let result = resolve_with_policy(half_extents, obstacle, old_position, position, policy);
        if result.collided {
            log::trace!("blocked by obstacle at {:?}", obstacle.center());
            position = result.corrected_position;
        }
    }

    if let Some(wall) = boundary.violated_by(position) {
        log::trace!(
            "{:?} is past the wall through {:?} facing {:?}",
            position,
            wall.point(),
            wall.normal()
        );
        position = old_position;
    }

    boundary.clamp(position)
}

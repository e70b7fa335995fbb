use serde::{Deserialize, Serialize};

use super::ray::Ray;

/// Below this, a local ray direction component is treated as parallel to that slab.
pub const PARALLEL_EPSILON: f32 = 0.001;

/// Whether an intersection interval lying entirely behind the ray origin still counts as a hit.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RayHitPolicy {
    /// Any surviving slab interval is a hit, even one with `t < 0`.
    #[default]
    AnyIntersection,
    /// Intervals that end behind the origin are rejected.
    ForwardOnly,
}

/// Parametric interval where a ray is inside a box.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RayHit {
    pub t_enter: f32,
    pub t_exit: f32,
}

impl RayHit {
    /// Distance along the ray line to the nearest point of the box. Zero when the origin is inside.
    pub fn distance(&self) -> f32 {
        if self.t_exit < 0.0 {
            -self.t_exit
        } else {
            self.t_enter.max(0.0)
        }
    }
}

/// An oriented bounding box: an AABB of `half_extents` around the origin, rotated then moved to `center`.
#[derive(Debug, Copy, Clone)]
pub struct OBB {
    pub center: nalgebra_glm::Vec3,
    pub half_extents: nalgebra_glm::Vec3,
    pub rotation: nalgebra_glm::Mat3,
}

impl OBB {
    pub fn new(
        center: nalgebra_glm::Vec3,
        half_extents: nalgebra_glm::Vec3,
        rotation: nalgebra_glm::Mat3,
    ) -> Self {
        Self {
            center,
            half_extents,
            rotation,
        }
    }

    /// Slab test in the box's local frame.
    pub fn raycast(&self, ray: &Ray, policy: RayHitPolicy) -> Option<RayHit> {
        // Rotations are orthonormal, so the transpose is the inverse.
        let inv_rotation = self.rotation.transpose();
        let origin = inv_rotation * (ray.origin - self.center);
        let dir = inv_rotation * ray.dir;

        let mut tmin = f32::NEG_INFINITY;
        let mut tmax = f32::INFINITY;

        for i in 0..3 {
            let extent = self.half_extents[i];
            if dir[i].abs() < PARALLEL_EPSILON {
                if origin[i] < -extent || origin[i] > extent {
                    return None;
                }
            } else {
                let mut t1 = (-extent - origin[i]) / dir[i];
                let mut t2 = (extent - origin[i]) / dir[i];
                if t1 > t2 {
                    std::mem::swap(&mut t1, &mut t2);
                }

                tmin = tmin.max(t1);
                tmax = tmax.min(t2);

                if tmin > tmax {
                    return None;
                }
            }
        }

        if policy == RayHitPolicy::ForwardOnly && tmax < 0.0 {
            return None;
        }

        Some(RayHit {
            t_enter: tmin,
            t_exit: tmax,
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn cube_at(center: nalgebra_glm::Vec3) -> OBB {
        OBB::new(center, nalgebra_glm::vec3(0.5, 0.5, 0.5), nalgebra_glm::Mat3::identity())
    }

    #[test]
    fn origin_inside_axis_aligned_always_hits() {
        let obb = cube_at(nalgebra_glm::vec3(2.0, 1.0, -3.0));
        let origin = nalgebra_glm::vec3(2.2, 0.9, -3.4);
        let axes = [
            nalgebra_glm::vec3(1.0, 0.0, 0.0),
            nalgebra_glm::vec3(-1.0, 0.0, 0.0),
            nalgebra_glm::vec3(0.0, 1.0, 0.0),
            nalgebra_glm::vec3(0.0, -1.0, 0.0),
            nalgebra_glm::vec3(0.0, 0.0, 1.0),
            nalgebra_glm::vec3(0.0, 0.0, -1.0),
        ];
        for dir in axes {
            for policy in [RayHitPolicy::AnyIntersection, RayHitPolicy::ForwardOnly] {
                let hit = obb.raycast(&Ray::new(origin, dir), policy);
                assert!(hit.is_some(), "{:?} {:?}", dir, policy);
                assert_relative_eq!(hit.unwrap().distance(), 0.0);
            }
        }
    }

    #[test]
    fn parallel_ray_outside_slab_misses() {
        let obb = cube_at(nalgebra_glm::vec3(0.0, 0.0, 0.0));
        // Outside on y, travelling along x with no y component.
        let ray = Ray::new(nalgebra_glm::vec3(-5.0, 3.0, 0.0), nalgebra_glm::vec3(1.0, 0.0, 0.0));
        assert!(obb.raycast(&ray, RayHitPolicy::AnyIntersection).is_none());
        assert!(obb.raycast(&ray, RayHitPolicy::ForwardOnly).is_none());
    }

    #[test]
    fn pointing_away_only_hits_when_behind_hits_are_allowed() {
        let obb = cube_at(nalgebra_glm::vec3(0.0, 0.0, 0.0));
        let ray = Ray::new(nalgebra_glm::vec3(5.0, 0.0, 0.0), nalgebra_glm::vec3(1.0, 0.0, 0.0));
        assert!(obb.raycast(&ray, RayHitPolicy::ForwardOnly).is_none());

        let behind = obb.raycast(&ray, RayHitPolicy::AnyIntersection).unwrap();
        assert_relative_eq!(behind.t_enter, -5.5);
        assert_relative_eq!(behind.t_exit, -4.5);
        assert_relative_eq!(behind.distance(), 4.5);
    }

    #[test]
    fn forward_hit_reports_entry_distance() {
        let obb = cube_at(nalgebra_glm::vec3(0.0, 0.0, -10.0));
        let ray = Ray::new(nalgebra_glm::vec3(0.0, 0.0, 0.0), nalgebra_glm::vec3(0.0, 0.0, -3.0));
        let hit = obb.raycast(&ray, RayHitPolicy::ForwardOnly).unwrap();
        assert_relative_eq!(hit.t_enter, 9.5);
        assert_relative_eq!(hit.t_exit, 10.5);
    }

    #[test]
    fn rotation_is_applied() {
        // A long thin box along x, turned 90 degrees about y so it lies along z.
        let rotation = nalgebra_glm::mat4_to_mat3(&nalgebra_glm::rotation(
            std::f32::consts::FRAC_PI_2,
            &nalgebra_glm::vec3(0.0, 1.0, 0.0),
        ));
        let obb = OBB::new(
            nalgebra_glm::vec3(0.0, 0.0, 0.0),
            nalgebra_glm::vec3(4.0, 0.5, 0.5),
            rotation,
        );
        // Would hit the unrotated box at x = 3, misses the rotated one.
        let across = Ray::new(nalgebra_glm::vec3(3.0, 0.0, 10.0), nalgebra_glm::vec3(0.0, 0.0, -1.0));
        assert!(obb.raycast(&across, RayHitPolicy::ForwardOnly).is_none());
        // Along z at x = 0 it is 8 units deep.
        let along = Ray::new(nalgebra_glm::vec3(0.0, 0.0, 10.0), nalgebra_glm::vec3(0.0, 0.0, -1.0));
        let hit = obb.raycast(&along, RayHitPolicy::ForwardOnly).unwrap();
        assert_relative_eq!(hit.t_enter, 6.0, epsilon = 1e-4);
        assert_relative_eq!(hit.t_exit, 14.0, epsilon = 1e-4);
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AABB {
    pub min: nalgebra_glm::Vec3,
    pub max: nalgebra_glm::Vec3,
}

impl AABB {
    pub fn from_min_max(min: nalgebra_glm::Vec3, max: nalgebra_glm::Vec3) -> Self {
        Self {
            min: nalgebra_glm::min2(&min, &max),
            max: nalgebra_glm::max2(&min, &max),
        }
    }

    /// Box of size `2 * half_extents` centered on `center`. Used to re-derive an actor's box from its position.
    pub fn from_center(center: nalgebra_glm::Vec3, half_extents: nalgebra_glm::Vec3) -> Self {
        let half_extents = nalgebra_glm::abs(&half_extents);
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn center(&self) -> nalgebra_glm::Vec3 {
        (self.max + self.min) * 0.5
    }

    pub fn intersects(&self, other: &AABB) -> bool {
        // Check for separation in the x-axis
        if self.max.x < other.min.x || self.min.x > other.max.x {
            return false;
        }
        // Check for separation in the y-axis
        if self.max.y < other.min.y || self.min.y > other.max.y {
            return false;
        }
        // Check for separation in the z-axis
        if self.max.z < other.min.z || self.min.z > other.max.z {
            return false;
        }

        // No separation found, the AABBs intersect
        true
    }
}

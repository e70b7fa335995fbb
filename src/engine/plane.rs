use serde::{Deserialize, Serialize};

/// An infinite plane through `point`. The normal is always stored unit length and points to the "outside" half-space.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(from = "PlaneDef", into = "PlaneDef")]
pub struct Plane {
    point: nalgebra_glm::Vec3,
    normal: nalgebra_glm::Vec3,
}

impl Plane {
    pub fn from_point_normal(point: nalgebra_glm::Vec3, normal: nalgebra_glm::Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize(),
        }
    }

    pub fn normal(&self) -> nalgebra_glm::Vec3 {
        self.normal
    }

    pub fn point(&self) -> nalgebra_glm::Vec3 {
        self.point
    }

    pub fn signed_distance(&self, p: nalgebra_glm::Vec3) -> f32 {
        self.normal.dot(&(p - self.point))
    }

    /// True once `p` is on, past, or within `threshold` of the outward side.
    pub fn collides_with_point(&self, p: nalgebra_glm::Vec3, threshold: f32) -> bool {
        self.signed_distance(p) > -threshold
    }
}

#[derive(Serialize, Deserialize)]
struct PlaneDef {
    point: [f32; 3],
    normal: [f32; 3],
}

impl From<PlaneDef> for Plane {
    fn from(def: PlaneDef) -> Self {
        Plane::from_point_normal(
            nalgebra_glm::make_vec3(&def.point),
            nalgebra_glm::make_vec3(&def.normal),
        )
    }
}

impl From<Plane> for PlaneDef {
    fn from(plane: Plane) -> Self {
        Self {
            point: [plane.point.x, plane.point.y, plane.point.z],
            normal: [plane.normal.x, plane.normal.y, plane.normal.z],
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct Sphere {
    pub center: nalgebra_glm::Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: nalgebra_glm::Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Touching spheres count as overlapping.
    pub fn intersects(&self, other: &Sphere) -> bool {
        nalgebra_glm::distance(&self.center, &other.center) <= self.radius + other.radius
    }
}

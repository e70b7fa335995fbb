#[derive(Debug, Copy, Clone)]
pub struct Ray {
    pub origin: nalgebra_glm::Vec3,
    pub dir: nalgebra_glm::Vec3,
}

impl Ray {
    /// `dir` is normalized here, callers can pass the raw view vector.
    pub fn new(origin: nalgebra_glm::Vec3, dir: nalgebra_glm::Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize(),
        }
    }
}

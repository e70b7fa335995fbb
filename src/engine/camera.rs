use core::f32;

/// Which camera the renderer should use. The player only walks in `Free` mode.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum CameraMode {
    #[default]
    Free,
    /// Slow orbit around the player, entered after standing still for a while.
    Orbit,
}

/// First person camera. The view direction comes from spherical angles, the same way a mouse-look camera keeps
/// `theta` (around y) and `phi` (elevation).
#[derive(Debug, Copy, Clone)]
pub struct Camera {
    position: nalgebra_glm::Vec3,
    theta: f32,
    phi: f32,
    distance: f32,
    up: nalgebra_glm::Vec3,
}

impl Camera {
    const PHI_MAX: f32 = f32::consts::FRAC_PI_2;
    const ZOOM_STEP: f32 = 0.1;

    pub fn new(position: nalgebra_glm::Vec3, theta: f32, phi: f32) -> Self {
        Self {
            position,
            theta,
            phi: phi.clamp(-Self::PHI_MAX, Self::PHI_MAX),
            distance: 10.0,
            up: nalgebra_glm::vec3(0.0, 1.0, 0.0),
        }
    }

    pub fn position(&self) -> nalgebra_glm::Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: nalgebra_glm::Vec3) {
        self.position = position;
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn phi(&self) -> f32 {
        self.phi
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Points from the orbit point towards the origin of the sphere, scaled by the orbit distance.
    pub fn view_vector(&self) -> nalgebra_glm::Vec3 {
        let r = self.distance;
        -nalgebra_glm::vec3(
            r * self.phi.cos() * self.theta.sin(),
            r * self.phi.sin(),
            r * self.phi.cos() * self.theta.cos(),
        )
    }

    pub fn view_direction(&self) -> nalgebra_glm::Vec3 {
        self.view_vector().normalize()
    }

    /// Mouse look. Positive `dy` looks down.
    pub fn look(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        self.theta -= sensitivity * dx;
        self.phi = (self.phi + sensitivity * dy).clamp(-Self::PHI_MAX, Self::PHI_MAX);
    }

    /// Scroll zoom. The distance never reaches zero, the basis would divide by it.
    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance - Self::ZOOM_STEP * scroll).max(f32::EPSILON);
    }

    /// `(w, u)`: `w` points backwards (opposite the view), `u` points right.
    pub fn basis(&self) -> (nalgebra_glm::Vec3, nalgebra_glm::Vec3) {
        let view = self.view_vector();
        let w = -view / view.norm();
        let u = self.up.cross(&w);
        (w, u)
    }

    /// Displacement for one tick of WASD movement.
    pub fn walk_displacement(
        &self,
        forward: bool,
        back: bool,
        left: bool,
        right: bool,
        speed: f32,
        delta_seconds: f32,
    ) -> nalgebra_glm::Vec3 {
        let (w, u) = self.basis();
        let step = speed * delta_seconds;
        let mut displacement: nalgebra_glm::Vec3 = nalgebra_glm::zero();
        if forward {
            displacement -= w * step;
        }
        if back {
            displacement += w * step;
        }
        if left {
            displacement -= u * step;
        }
        if right {
            displacement += u * step;
        }
        displacement
    }
}

/// Switches to [`CameraMode::Orbit`] after `threshold` seconds without movement input.
#[derive(Debug, Copy, Clone)]
pub struct IdleSwitch {
    threshold: f32,
    idle_seconds: f32,
    mode: CameraMode,
}

impl IdleSwitch {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            idle_seconds: 0.0,
            mode: CameraMode::Free,
        }
    }

    pub fn update(&mut self, moving: bool, delta_seconds: f32) -> CameraMode {
        if moving {
            self.idle_seconds = 0.0;
            self.mode = CameraMode::Free;
        } else {
            self.idle_seconds += delta_seconds;
            if self.idle_seconds > self.threshold {
                self.mode = CameraMode::Orbit;
            }
        }
        self.mode
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }
}

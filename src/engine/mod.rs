#[allow(unused)]
pub(crate) mod aabb;
#[allow(unused)]
pub(crate) mod app;
#[allow(unused)]
pub(crate) mod camera;
#[allow(unused)]
pub(crate) mod obb;
#[allow(unused)]
pub(crate) mod physics;
#[allow(unused)]
pub(crate) mod picking;
#[allow(unused)]
pub(crate) mod plane;
#[allow(unused)]
pub(crate) mod ray;
#[allow(unused)]
pub(crate) mod script;
#[allow(unused)]
pub(crate) mod sphere;

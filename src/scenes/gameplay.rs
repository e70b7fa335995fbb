use core::f32;

use hecs::{Entity, World};
use rand::Rng;

use crate::{
    config::GameConfig,
    engine::{
        aabb::AABB,
        app::{App, Key, Scene},
        camera::{Camera, CameraMode, IdleSwitch},
        physics::resolve_movement,
        picking::{pick, spin_system, Pickable, Spin, Transform},
        ray::Ray,
        sphere::Sphere,
    },
    scenes::shop::{
        hud::Hud,
        state::{Interaction, ShopState},
        ItemKind, ObjectId,
    },
};

const TREASURE_POSITION: [f32; 3] = [50.0, 0.0, -40.0];
const TERMINAL_POSITION: [f32; 3] = [15.0, -1.1, -147.5];
const HOME_POSITION: [f32; 3] = [0.0, -1.3, 58.0];

fn item_position(item: ItemKind) -> nalgebra_glm::Vec3 {
    match item {
        ItemKind::Baguette => nalgebra_glm::vec3(-6.0, 0.0, -160.0),
        ItemKind::Cheese => nalgebra_glm::vec3(10.0, -1.0, -156.0),
        ItemKind::Eggs => nalgebra_glm::vec3(-6.0, -1.0, -156.0),
        ItemKind::Butter => nalgebra_glm::vec3(10.0, -1.0, -160.0),
    }
}

/// The house and the cashier counter, in the order movement is tested against them.
fn obstacles() -> Vec<AABB> {
    vec![
        AABB::from_min_max(
            nalgebra_glm::vec3(-20.0, -1.3, 45.0),
            nalgebra_glm::vec3(20.0, 3.0, 70.0),
        ),
        AABB::from_center(
            nalgebra_glm::vec3(-5.0, -1.0, -20.0),
            nalgebra_glm::vec3(1.0, 1.0, 1.0),
        ),
    ]
}

pub struct Gameplay {
    world: World,
    /// Everything the crosshair can land on, in the order it is tested.
    candidates: Vec<Entity>,
    treasure: Entity,
    camera: Camera,
    idle: IdleSwitch,
    obstacles: Vec<AABB>,
    config: GameConfig,
    shop: ShopState,

    // Player stuff
    position: nalgebra_glm::Vec3,
    half_extents: nalgebra_glm::Vec3,
    bike: bool,

    targeted: Option<(Entity, ObjectId)>,
}

impl Scene for Gameplay {
    fn update(&mut self, app: &App) {
        if self.shop.finished() {
            return;
        }
        self.shop.tick(app.delta_seconds);
        self.update_player(app);
        self.update_treasure(app.delta_seconds);
        self.update_target();
        self.update_interactions(app);
    }

    fn present(&self, app: &App) {
        log::debug!(
            "t = {:.2}s, player at {:?}, {:?} camera (theta {:.2}, phi {:.2}, distance {:.2}), looking at {:?}",
            app.seconds,
            self.position,
            self.idle.mode(),
            self.camera.theta(),
            self.camera.phi(),
            self.camera.distance(),
            self.targeted()
        );
        log::info!("\n{}", Hud::new(&self.shop));
    }

    fn finished(&self) -> bool {
        self.shop.finished()
    }
}

impl Gameplay {
    pub fn new(config: GameConfig, rng: &mut impl Rng) -> Self {
        let shop = ShopState::new(&config.session, config.prices, rng);
        log::info!(
            "shopping list: {:?}, cash {:.2}",
            shop.list()
                .entries()
                .iter()
                .map(|entry| entry.item.name())
                .collect::<Vec<_>>(),
            shop.cash()
        );

        let mut world = World::new();
        let pickable = Pickable {
            half_extents: nalgebra_glm::vec3(1.0, 1.0, 1.0) * config.picking.half_extent,
        };
        let mut candidates = vec![];

        let treasure = world.spawn((
            ObjectId::Treasure,
            Transform::at(nalgebra_glm::make_vec3(&TREASURE_POSITION)),
            pickable,
            Spin {
                axis: nalgebra_glm::vec3(1.0, 0.0, 0.0),
                radians_per_second: config.treasure.spin_speed,
            },
        ));
        candidates.push(treasure);

        for item in [
            ItemKind::Baguette,
            ItemKind::Cheese,
            ItemKind::Eggs,
            ItemKind::Butter,
        ] {
            candidates.push(world.spawn((
                ObjectId::Item(item),
                Transform::at(item_position(item)),
                pickable,
            )));
        }

        candidates.push(world.spawn((
            ObjectId::PaymentTerminal,
            Transform::at(nalgebra_glm::make_vec3(&TERMINAL_POSITION)),
            pickable,
        )));
        candidates.push(world.spawn((
            ObjectId::Home,
            Transform::at(nalgebra_glm::make_vec3(&HOME_POSITION))
                .rotated(f32::consts::FRAC_PI_2, nalgebra_glm::vec3(0.0, 1.0, 0.0)),
            pickable,
        )));

        let mut position = nalgebra_glm::make_vec3(&config.player.spawn);
        position.y = config.player.height;

        Self {
            world,
            candidates,
            treasure,
            camera: Camera::new(position, 0.0, 0.0),
            idle: IdleSwitch::new(config.player.idle_seconds),
            obstacles: obstacles(),
            half_extents: nalgebra_glm::vec3(1.0, 1.0, 1.0) * config.player.half_extent,
            config,
            shop,

            position,
            bike: false,

            targeted: None,
        }
    }

    pub fn targeted(&self) -> Option<ObjectId> {
        self.targeted.map(|(_, id)| id)
    }

    /// What the crosshair is on right now, if anything.
    pub fn target(&self) -> Option<(Entity, ObjectId)> {
        let ray = Ray::new(self.camera.position(), self.camera.view_direction());
        let entity = pick(
            &self.world,
            &self.candidates,
            &ray,
            self.config.picking.ray,
            self.config.picking.policy,
        )?;
        let id = *self.world.get::<&ObjectId>(entity).ok()?;
        Some((entity, id))
    }

    fn update_player(&mut self, app: &App) {
        let player = &self.config.player;
        self.camera
            .look(app.mouse_rel_x, app.mouse_rel_y, player.look_sensitivity);
        if app.mouse_wheel != 0.0 {
            self.camera.zoom(app.mouse_wheel);
        }
        if app.key_pressed(Key::Bike) {
            self.bike = !self.bike;
            log::debug!("bike {}", if self.bike { "on" } else { "off" });
        }

        let prev_mode = self.idle.mode();
        let mode = self.idle.update(app.moving(), app.delta_seconds);
        if mode != prev_mode {
            log::debug!("camera switched to {:?}", mode);
        }
        if mode == CameraMode::Orbit || app.delta_seconds <= 0.0 {
            return;
        }

        let speed = if self.bike {
            player.bike_speed
        } else {
            player.speed
        };
        let mut proposed = self.position
            + self.camera.walk_displacement(
                app.key_down(Key::Forward),
                app.key_down(Key::Back),
                app.key_down(Key::Left),
                app.key_down(Key::Right),
                speed,
                app.delta_seconds,
            );
        proposed.y = player.height;

        self.position = resolve_movement(
            self.position,
            proposed,
            self.half_extents,
            &self.obstacles,
            &self.config.boundary,
            self.config.collision.policy,
        );
        self.camera.set_position(self.position);
    }

    fn update_treasure(&mut self, delta_seconds: f32) {
        spin_system(&mut self.world, delta_seconds);
        if self.shop.treasure_collected() {
            return;
        }

        let center = match self.world.get::<&Transform>(self.treasure) {
            Ok(transform) => transform.position,
            Err(_) => return,
        };
        let treasure = Sphere::new(center, self.config.treasure.radius);
        let player = Sphere::new(self.position, self.config.player.radius);
        if player.intersects(&treasure) && self.shop.collect_treasure(self.config.treasure.reward) {
            let _ = self.world.despawn(self.treasure);
        }
    }

    fn update_target(&mut self) {
        let targeted = self.target();
        if targeted.map(|(_, id)| id) != self.targeted() {
            log::debug!("looking at {:?}", targeted.map(|(_, id)| id));
        }
        self.targeted = targeted;
    }

    fn update_interactions(&mut self, app: &App) {
        if app.key_pressed(Key::Interact) {
            match self.shop.interact(self.targeted()) {
                Some(Interaction::PickedUp(_)) => {
                    if let Some((entity, _)) = self.targeted.take() {
                        let _ = self.world.despawn(entity);
                    }
                }
                Some(interaction) => log::debug!("{:?}", interaction),
                None => log::debug!("nothing to do with {:?}", self.targeted()),
            }
        }
        for key in &app.text {
            self.shop.type_key(*key);
        }
    }
}

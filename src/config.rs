//! Game configuration. Every field has a default, so a config file only needs the values it wants to change.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    engine::{
        obb::RayHitPolicy,
        physics::{Boundary, CorrectionPolicy},
        picking::PickPolicy,
    },
    scenes::shop::{ItemKind, ItemPrices},
};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Fixed seed for the shopping list and starting cash. Drawn from entropy when unset.
    pub seed: Option<u64>,
    pub list_size: usize,
    pub time_limit: f32,
    pub cash_base_cents: u32,
    pub cash_spread_cents: u32,
    pub cash_cap: f64,
    pub change_tolerance: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            list_size: 2,
            time_limit: 120.0,
            cash_base_cents: 4000,
            cash_spread_cents: 2000,
            cash_cap: 150.0,
            change_tolerance: 0.01,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub spawn: [f32; 3],
    pub height: f32,
    pub half_extent: f32,
    pub radius: f32,
    pub speed: f32,
    pub bike_speed: f32,
    pub look_sensitivity: f32,
    pub idle_seconds: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: [0.0, 2.0, 3.5],
            height: 2.0,
            half_extent: 0.5,
            radius: 1.5,
            speed: 12.0,
            bike_speed: 20.0,
            look_sensitivity: 0.005,
            idle_seconds: 10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TreasureConfig {
    pub radius: f32,
    pub reward: f64,
    pub spin_speed: f32,
}

impl Default for TreasureConfig {
    fn default() -> Self {
        Self {
            radius: 1.5,
            reward: 50.0,
            spin_speed: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PickingConfig {
    pub policy: PickPolicy,
    pub ray: RayHitPolicy,
    pub half_extent: f32,
}

impl Default for PickingConfig {
    fn default() -> Self {
        Self {
            policy: PickPolicy::FirstMatch,
            ray: RayHitPolicy::AnyIntersection,
            half_extent: 0.5,
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    pub policy: CorrectionPolicy,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub session: SessionConfig,
    pub player: PlayerConfig,
    pub treasure: TreasureConfig,
    pub picking: PickingConfig,
    pub collision: CollisionConfig,
    pub boundary: Boundary,
    pub prices: ItemPrices,
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

impl GameConfig {
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let session = &self.session;
        if session.list_size == 0 || session.list_size > ItemKind::ALL.len() {
            return Err(invalid(
                "session.list_size",
                format!("must be between 1 and {}", ItemKind::ALL.len()),
            ));
        }
        if !(session.time_limit > 0.0) {
            return Err(invalid("session.time_limit", "must be positive"));
        }
        if !(session.cash_cap > 0.0) {
            return Err(invalid("session.cash_cap", "must be positive"));
        }
        if !(session.change_tolerance >= 0.0) {
            return Err(invalid("session.change_tolerance", "must not be negative"));
        }

        let player = &self.player;
        if !(player.half_extent > 0.0 && player.radius > 0.0) {
            return Err(invalid("player", "half_extent and radius must be positive"));
        }
        if !(player.speed >= 0.0 && player.bike_speed >= 0.0) {
            return Err(invalid("player", "speeds must not be negative"));
        }

        if !(self.picking.half_extent > 0.0) {
            return Err(invalid("picking.half_extent", "must be positive"));
        }
        if !(self.treasure.radius > 0.0) {
            return Err(invalid("treasure.radius", "must be positive"));
        }

        let boundary = &self.boundary;
        if boundary.clamp_x[0] > boundary.clamp_x[1] {
            return Err(invalid("boundary.clamp_x", "min is above max"));
        }
        if boundary.clamp_z[0] > boundary.clamp_z[1] {
            return Err(invalid("boundary.clamp_z", "min is above max"));
        }
        if !(boundary.threshold >= 0.0) {
            return Err(invalid("boundary.threshold", "must not be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = GameConfig::parse("").unwrap();
        assert_eq!(config.session.list_size, 2);
        assert_eq!(config.session.time_limit, 120.0);
        assert_eq!(config.player.speed, 12.0);
        assert_eq!(config.picking.policy, PickPolicy::FirstMatch);
        assert_eq!(config.collision.policy, CorrectionPolicy::Reject);
        assert_eq!(config.boundary.planes.len(), 4);
        assert_eq!(config.prices.cheese, 17.99);
        assert_eq!(config.treasure.spin_speed, 0.1);
    }

    #[test]
    fn partial_file_overrides_only_what_it_names() {
        let config = GameConfig::parse(
            r#"
[session]
seed = 9
time_limit = 60.0

[picking]
policy = "closest"
ray = "forward_only"

[collision]
policy = "slide"

[prices]
eggs = 1.5
"#,
        )
        .unwrap();
        assert_eq!(config.session.seed, Some(9));
        assert_eq!(config.session.time_limit, 60.0);
        assert_eq!(config.session.list_size, 2);
        assert_eq!(config.picking.policy, PickPolicy::Closest);
        assert_eq!(config.picking.ray, RayHitPolicy::ForwardOnly);
        assert_eq!(config.collision.policy, CorrectionPolicy::Slide);
        assert_eq!(config.prices.eggs, 1.5);
        assert_eq!(config.prices.butter, 13.99);
    }

    #[test]
    fn toml_round_trip() {
        let mut config = GameConfig::default();
        config.session.seed = Some(1234);
        config.player.bike_speed = 30.0;
        config.boundary.clamp_z = [-10.0, 10.0];

        let text = toml::to_string(&config).unwrap();
        let back = GameConfig::parse(&text).unwrap();
        assert_eq!(back.session.seed, Some(1234));
        assert_eq!(back.player.bike_speed, 30.0);
        assert_eq!(back.boundary.clamp_z, [-10.0, 10.0]);
        assert_eq!(back.boundary.planes.len(), config.boundary.planes.len());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = GameConfig::parse("[session]\nlist_size = 5").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "session.list_size", .. }));

        let err = GameConfig::parse("[boundary]\nclamp_x = [10.0, -10.0]").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "boundary.clamp_x", .. }));

        let err = GameConfig::parse("[session]\ntime_limit = nan").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "session.time_limit", .. }));

        let err = GameConfig::parse("[player]\nradius = nan").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "player", .. }));

        let err = GameConfig::parse("[session]\ntime_limit = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn demo_config_is_valid() {
        let config = GameConfig::parse(include_str!("../demos/config.toml")).unwrap();
        assert_eq!(config.session.seed, Some(7));
        assert_eq!(config.collision.policy, CorrectionPolicy::Slide);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GameConfig::load_from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

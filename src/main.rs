mod config;
mod engine;
mod scenes;

use rand::{rngs::StdRng, SeedableRng};

use config::{ConfigError, GameConfig};
use engine::{
    app::{run, InputSource},
    script::{IdleInput, ScriptError, ScriptedInput},
};
use scenes::gameplay::Gameplay;

/// Hard stop for the headless loop, half an hour of simulated time.
const MAX_TICKS: usize = 60 * 60 * 30;

#[derive(thiserror::Error, Debug)]
enum GameError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Script error: {0}")]
    Script(#[from] ScriptError),
}

/// Usage: `neighborhood [CONFIG.toml] [SCRIPT.toml]`
fn main() -> Result<(), GameError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            log::info!("loading config from {}", path);
            GameConfig::load_from_file(&path)?
        }
        None => GameConfig::default(),
    };
    let mut input: Box<dyn InputSource> = match args.next() {
        Some(path) => {
            log::info!("replaying input from {}", path);
            Box::new(ScriptedInput::load(&path)?)
        }
        None => {
            log::info!("no input script, idling until the time runs out");
            Box::new(IdleInput)
        }
    };

    let mut rng = match config.session.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut gameplay = Gameplay::new(config, &mut rng);
    let app = run(&mut gameplay, input.as_mut(), MAX_TICKS);
    log::info!("stopped after {:.2}s ({} ticks)", app.seconds, app.ticks);
    Ok(())
}

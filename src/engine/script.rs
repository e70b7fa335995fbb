//! Scripted input for the headless driver.
//!
//! A script is a list of steps, each holding a set of keys for a number of ticks:
//!
//! ```toml
//! [[step]]
//! ticks = 120
//! hold = ["forward"]
//! look = [4.0, 0.0]
//!
//! [[step]]
//! interact = true
//! text = "12.75"
//! submit = true
//! ```
//!
//! One-shot fields (`interact`, `bike`, `text`, `backspace`, `submit`, `cancel`, `scroll`) fire on the first tick of
//! their step only. `look` is applied every tick of the step.

use std::path::Path;

use serde::Deserialize;

use super::app::{App, InputSource, Key, TextKey};

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Step {step}: unknown key {name:?}")]
    UnknownKey { step: usize, name: String },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScriptStep {
    pub ticks: usize,
    pub hold: Vec<String>,
    pub look: [f32; 2],
    pub scroll: f32,
    pub interact: bool,
    pub bike: bool,
    pub text: String,
    pub backspace: usize,
    pub submit: bool,
    pub cancel: bool,
}

impl Default for ScriptStep {
    fn default() -> Self {
        Self {
            ticks: 1,
            hold: vec![],
            look: [0.0, 0.0],
            scroll: 0.0,
            interact: false,
            bike: false,
            text: String::new(),
            backspace: 0,
            submit: false,
            cancel: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ScriptFile {
    #[serde(default)]
    step: Vec<ScriptStep>,
}

/// A step with its key names already checked.
#[derive(Debug)]
struct CompiledStep {
    step: ScriptStep,
    hold: Vec<Key>,
}

#[derive(Debug)]
pub struct ScriptedInput {
    steps: Vec<CompiledStep>,
    current: usize,
    tick_in_step: usize,
}

impl ScriptedInput {
    pub fn from_steps(steps: Vec<ScriptStep>) -> Result<Self, ScriptError> {
        let steps = steps
            .into_iter()
            .enumerate()
            .map(|(i, step)| {
                let hold = step
                    .hold
                    .iter()
                    .map(|name| {
                        Key::from_name(name).ok_or_else(|| ScriptError::UnknownKey {
                            step: i,
                            name: name.clone(),
                        })
                    })
                    .collect::<Result<Vec<Key>, ScriptError>>()?;
                Ok(CompiledStep { step, hold })
            })
            .collect::<Result<Vec<CompiledStep>, ScriptError>>()?;

        Ok(Self {
            steps,
            current: 0,
            tick_in_step: 0,
        })
    }

    pub fn parse(contents: &str) -> Result<Self, ScriptError> {
        let file: ScriptFile = toml::from_str(contents)?;
        Self::from_steps(file.step)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, app: &mut App) -> bool {
        // Skip over steps that were asked to last zero ticks.
        while let Some(compiled) = self.steps.get(self.current) {
            if self.tick_in_step < compiled.step.ticks {
                break;
            }
            self.current += 1;
            self.tick_in_step = 0;
        }
        let Some(compiled) = self.steps.get(self.current) else {
            return false;
        };
        let step = &compiled.step;

        app.release_all();
        for key in &compiled.hold {
            app.set_key(*key, true);
        }
        app.mouse_rel_x = step.look[0];
        app.mouse_rel_y = step.look[1];

        if self.tick_in_step == 0 {
            if step.interact {
                app.press(Key::Interact);
            }
            if step.bike {
                app.press(Key::Bike);
            }
            app.mouse_wheel = step.scroll;
            app.text.extend(step.text.chars().map(TextKey::Char));
            app.text
                .extend(std::iter::repeat(TextKey::Backspace).take(step.backspace));
            if step.submit {
                app.text.push(TextKey::Submit);
            }
            if step.cancel {
                app.text.push(TextKey::Cancel);
            }
        }

        self.tick_in_step += 1;
        true
    }
}

/// No input at all, forever. The scene decides when to stop.
pub struct IdleInput;

impl InputSource for IdleInput {
    fn poll(&mut self, app: &mut App) -> bool {
        app.release_all();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::app::{run, Scene};

    const SCRIPT: &str = r#"
[[step]]
ticks = 2
hold = ["forward", "d"]
look = [1.5, 0.0]

[[step]]
interact = true

[[step]]
text = "12.7"
backspace = 1
submit = true
"#;

    #[test]
    fn parses_and_replays_steps() {
        let mut input = ScriptedInput::parse(SCRIPT).unwrap();
        let mut app = App::new();

        assert!(input.poll(&mut app));
        assert!(app.key_down(Key::Forward));
        assert!(app.key_down(Key::Right));
        assert!(!app.key_down(Key::Interact));
        assert_eq!(app.mouse_rel_x, 1.5);

        assert!(input.poll(&mut app));
        assert!(app.key_down(Key::Forward));

        assert!(input.poll(&mut app));
        assert!(!app.key_down(Key::Forward));
        assert!(app.key_down(Key::Interact));

        app.text.clear();
        assert!(input.poll(&mut app));
        assert!(!app.key_down(Key::Interact));
        assert_eq!(
            app.text,
            vec![
                TextKey::Char('1'),
                TextKey::Char('2'),
                TextKey::Char('.'),
                TextKey::Char('7'),
                TextKey::Backspace,
                TextKey::Submit,
            ]
        );

        assert!(!input.poll(&mut app));
    }

    #[test]
    fn zero_tick_steps_are_skipped() {
        let mut input = ScriptedInput::parse("[[step]]\nticks = 0\ninteract = true\n[[step]]\nbike = true").unwrap();
        let mut app = App::new();
        assert!(input.poll(&mut app));
        assert!(!app.key_down(Key::Interact));
        assert!(app.key_down(Key::Bike));
        assert!(!input.poll(&mut app));
    }

    #[test]
    fn unknown_key_is_reported() {
        let err = ScriptedInput::parse("[[step]]\nhold = [\"jump\"]").unwrap_err();
        assert!(matches!(err, ScriptError::UnknownKey { step: 0, ref name } if name == "jump"));
    }

    #[test]
    fn demo_walkthrough_parses() {
        let mut input = ScriptedInput::parse(include_str!("../../demos/walkthrough.toml")).unwrap();
        let mut app = App::new();
        assert!(input.poll(&mut app));
        assert!(app.key_down(Key::Forward));
    }

    struct EdgeCounter {
        interacts: usize,
        bikes: usize,
    }

    impl Scene for EdgeCounter {
        fn update(&mut self, app: &App) {
            if app.key_pressed(Key::Interact) {
                self.interacts += 1;
            }
            if app.key_pressed(Key::Bike) {
                self.bikes += 1;
            }
        }

        fn present(&self, _app: &App) {}

        fn finished(&self) -> bool {
            false
        }
    }

    #[test]
    fn back_to_back_presses_each_register() {
        let mut input = ScriptedInput::parse(
            "[[step]]\ninteract = true\nbike = true\n[[step]]\ninteract = true\nbike = true\n[[step]]\nticks = 2\ninteract = true",
        )
        .unwrap();
        let mut scene = EdgeCounter {
            interacts: 0,
            bikes: 0,
        };
        let app = run(&mut scene, &mut input, 100);
        assert_eq!(app.ticks, 4);
        assert_eq!(scene.interacts, 3);
        assert_eq!(scene.bikes, 2);
    }

    #[test]
    fn empty_script_ends_immediately() {
        let mut input = ScriptedInput::parse("").unwrap();
        assert!(!input.poll(&mut App::new()));
    }
}

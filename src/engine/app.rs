/// Logical keys the gameplay reads. Held state is tracked per tick; `pressed` is the rising edge.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Key {
    Forward,
    Back,
    Left,
    Right,
    Interact,
    Bike,
}

impl Key {
    pub const COUNT: usize = 6;

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "forward" | "w" => Some(Key::Forward),
            "back" | "s" => Some(Key::Back),
            "left" | "a" => Some(Key::Left),
            "right" | "d" => Some(Key::Right),
            "interact" | "e" => Some(Key::Interact),
            "bike" | "b" => Some(Key::Bike),
            _ => None,
        }
    }
}

/// Keys that only matter while typing into a text field.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextKey {
    Char(char),
    Backspace,
    Submit,
    Cancel,
}

pub struct App {
    // Main loop stuff
    pub running: bool,
    pub seconds: f32, //< How many simulated seconds the program has been up
    pub ticks: usize, //< How many ticks the program has been up
    pub delta_seconds: f32,

    // User input state
    keys: [bool; Key::COUNT],
    prev_keys: [bool; Key::COUNT],
    pub mouse_rel_x: f32,
    pub mouse_rel_y: f32,
    pub mouse_wheel: f32,
    pub text: Vec<TextKey>,
}

/// Anything that can fill in a tick's worth of input. Returns false once it has nothing left to say.
pub trait InputSource {
    fn poll(&mut self, app: &mut App) -> bool;
}

pub trait Scene {
    fn update(&mut self, app: &App);
    /// Called every `PRESENT_EVERY` ticks and once at the end, in place of drawing a frame.
    fn present(&self, app: &App);
    /// The scene has nothing more to simulate.
    fn finished(&self) -> bool;
}

pub const DELTA_T: f32 = 1.0 / 60.0;
const PRESENT_EVERY: usize = 60 * 5;

/// Fixed timestep loop. Runs until the input source runs dry, the scene finishes, or `max_ticks` is hit.
pub fn run(scene: &mut dyn Scene, input: &mut dyn InputSource, max_ticks: usize) -> App {
    let mut app = App::new();

    while app.running && app.ticks < max_ticks {
        app.reset_input();
        if !input.poll(&mut app) {
            app.running = false;
            break;
        }

        scene.update(&app);
        app.ticks += 1;
        app.seconds += app.delta_seconds;

        if app.ticks % PRESENT_EVERY == 0 {
            scene.present(&app);
        }

        if scene.finished() {
            log::info!("scene finished after {} ticks", app.ticks);
            app.running = false;
        }
    }

    scene.present(&app);
    app
}

impl App {
    pub fn new() -> Self {
        Self {
            running: true,
            seconds: 0.0,
            ticks: 0,
            delta_seconds: DELTA_T,
            keys: [false; Key::COUNT],
            prev_keys: [false; Key::COUNT],
            mouse_rel_x: 0.0,
            mouse_rel_y: 0.0,
            mouse_wheel: 0.0,
            text: vec![],
        }
    }

    fn reset_input(&mut self) {
        self.mouse_rel_x = 0.0;
        self.mouse_rel_y = 0.0;
        self.mouse_wheel = 0.0;
        self.text.clear();
        self.prev_keys = self.keys;
    }

    pub fn set_key(&mut self, key: Key, down: bool) {
        self.keys[key as usize] = down;
    }

    /// Puts `key` down as a fresh press this tick, even if it was already down last tick.
    pub fn press(&mut self, key: Key) {
        self.prev_keys[key as usize] = false;
        self.keys[key as usize] = true;
    }

    pub fn release_all(&mut self) {
        self.keys = [false; Key::COUNT];
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys[key as usize]
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        !self.prev_keys[key as usize] && self.keys[key as usize]
    }

    pub fn moving(&self) -> bool {
        self.key_down(Key::Forward)
            || self.key_down(Key::Back)
            || self.key_down(Key::Left)
            || self.key_down(Key::Right)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

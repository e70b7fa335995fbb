use crate::engine::app::TextKey;

/// The cashier conversation. The player has to type the change they are owed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum Checkout {
    /// Shopping list not done yet.
    #[default]
    Idle,
    /// Everything collected, waiting for the player to walk up to the terminal.
    AwaitingInteraction,
    /// Text input mode. `input` only ever holds digits and at most one decimal point.
    Negotiating { input: String },
    Completed,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected,
}

/// Empty or malformed input counts as zero.
pub fn parse_amount(input: &str) -> f64 {
    input.parse::<f64>().unwrap_or(0.0)
}

impl Checkout {
    pub fn refresh(&mut self, list_complete: bool) {
        match self {
            Checkout::Idle if list_complete => *self = Checkout::AwaitingInteraction,
            Checkout::AwaitingInteraction if !list_complete => *self = Checkout::Idle,
            _ => {}
        }
    }

    /// Enters text input. Only allowed from `AwaitingInteraction`.
    pub fn begin(&mut self) -> bool {
        if *self == Checkout::AwaitingInteraction {
            *self = Checkout::Negotiating {
                input: String::new(),
            };
            true
        } else {
            false
        }
    }

    pub fn negotiating(&self) -> bool {
        matches!(self, Checkout::Negotiating { .. })
    }

    pub fn completed(&self) -> bool {
        *self == Checkout::Completed
    }

    pub fn pending_input(&self) -> Option<&str> {
        match self {
            Checkout::Negotiating { input } => Some(input.as_str()),
            _ => None,
        }
    }

    /// Feeds one key while negotiating. Only `Submit` produces an outcome, everything else edits the input or
    /// aborts.
    pub fn type_key(&mut self, key: TextKey, change_due: f64, tolerance: f64) -> Option<SubmitOutcome> {
        let Checkout::Negotiating { input } = self else {
            return None;
        };

        match key {
            TextKey::Char(c) if c.is_ascii_digit() => input.push(c),
            TextKey::Char('.') if !input.contains('.') => input.push('.'),
            TextKey::Char(c) => log::warn!("ignoring {:?} in change input", c),
            TextKey::Backspace => {
                input.pop();
            }
            TextKey::Cancel => {
                log::info!("left the cashier");
                *self = Checkout::Idle;
            }
            TextKey::Submit => {
                let amount = parse_amount(input.as_str());
                if (amount - change_due).abs() <= tolerance {
                    log::info!("correct change: {:.2}", amount);
                    *self = Checkout::Completed;
                    return Some(SubmitOutcome::Accepted);
                }
                log::info!("wrong change: {:.2}, try again", amount);
                input.clear();
                return Some(SubmitOutcome::Rejected);
            }
        }
        None
    }
}

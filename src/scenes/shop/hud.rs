use std::fmt;

use super::{checkout::Checkout, state::ShopState};

/// The overlay text for one frame. Each line is what the renderer would print at its own row.
pub struct Hud<'a> {
    state: &'a ShopState,
}

impl<'a> Hud<'a> {
    pub fn new(state: &'a ShopState) -> Self {
        Self { state }
    }
}

/// `MM:SS`, seconds truncated.
pub fn clock(seconds: f32) -> String {
    let whole = seconds.max(0.0) as u32;
    format!("{:02}:{:02}", whole / 60, whole % 60)
}

impl fmt::Display for Hud<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state;

        writeln!(f, "Shopping list:")?;
        for entry in state.list().entries() {
            if entry.fulfilled {
                writeln!(
                    f,
                    "[x] {} - R$ {:.2}",
                    entry.item.name(),
                    state.prices().price(entry.item)
                )?;
            } else {
                writeln!(f, "[ ] {}", entry.item.name())?;
            }
        }
        writeln!(f, "Cash: R$ {:.2}", state.cash())?;
        write!(f, "Time: {}", clock(state.countdown().remaining()))?;

        if let Checkout::Negotiating { input } = state.checkout() {
            writeln!(f)?;
            writeln!(f, "Cashier: how much change do you get?")?;
            writeln!(f, "Total: R$ {:.2}", state.total_purchase())?;
            writeln!(f, "You handed over: R$ {:.2}", state.cash())?;
            if input.is_empty() {
                write!(f, "Change: R$ _____")?;
            } else {
                write!(f, "Change: R$ {}", input)?;
            }
        }

        if state.paid() && !state.won() {
            write!(f, "\nPaid. Now head home!")?;
        }

        if state.game_over() {
            write!(f, "\nGAME OVER!")?;
        } else if state.won() {
            write!(f, "\nYOU WIN!")?;
        }
        Ok(())
    }
}

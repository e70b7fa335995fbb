use rand::Rng;

use crate::{config::SessionConfig, engine::app::TextKey};

use super::{
    checkout::{Checkout, SubmitOutcome},
    shopping_list::ShoppingList,
    ItemKind, ItemPrices, ObjectId,
};

/// Counts down to zero and stays there.
#[derive(Debug, Copy, Clone)]
pub struct Countdown {
    remaining: f32,
    expired: bool,
}

impl Countdown {
    pub fn new(total: f32) -> Self {
        Self {
            remaining: total.max(0.0),
            expired: total <= 0.0,
        }
    }

    /// Returns true on the tick the countdown runs out.
    pub fn tick(&mut self, delta_seconds: f32) -> bool {
        if self.expired || delta_seconds <= 0.0 {
            return false;
        }
        self.remaining -= delta_seconds;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.expired = true;
            return true;
        }
        false
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn expired(&self) -> bool {
        self.expired
    }
}

/// What an interact press ended up doing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Interaction {
    PickedUp(ItemKind),
    CheckoutStarted,
    CheckoutRefused,
    Won,
}

/// All gameplay flags for one session.
#[derive(Debug, Clone)]
pub struct ShopState {
    picked: [bool; ItemKind::ALL.len()],
    list: ShoppingList,
    prices: ItemPrices,
    total_purchase: f64,
    cash: f64,
    paid: bool,
    checkout: Checkout,
    change_tolerance: f64,
    treasure_collected: bool,
    countdown: Countdown,
    won: bool,
}

impl ShopState {
    /// Rolls the starting cash and the shopping list from `rng`.
    pub fn new(session: &SessionConfig, prices: ItemPrices, rng: &mut impl Rng) -> Self {
        let list = ShoppingList::sample(rng, session.list_size);
        let spread = if session.cash_spread_cents > 0 {
            rng.gen_range(0..session.cash_spread_cents)
        } else {
            0
        };
        let cash = (f64::from(session.cash_base_cents.saturating_add(spread)) / 100.0).min(session.cash_cap);
        Self::with_list(session, prices, list, cash)
    }

    pub fn with_list(session: &SessionConfig, prices: ItemPrices, list: ShoppingList, cash: f64) -> Self {
        Self {
            picked: [false; ItemKind::ALL.len()],
            list,
            prices,
            total_purchase: 0.0,
            cash,
            paid: false,
            checkout: Checkout::Idle,
            change_tolerance: session.change_tolerance,
            treasure_collected: false,
            countdown: Countdown::new(session.time_limit),
            won: false,
        }
    }

    /// Advances the countdown. Returns true on the tick the time runs out.
    pub fn tick(&mut self, delta_seconds: f32) -> bool {
        // A won session is over too, so the clock stops with it.
        if self.won {
            return false;
        }
        let expired = self.countdown.tick(delta_seconds);
        if expired {
            log::info!("time is up");
        }
        expired
    }

    /// The interact key was pressed while the crosshair was on `target`.
    pub fn interact(&mut self, target: Option<ObjectId>) -> Option<Interaction> {
        if self.finished() {
            return None;
        }
        match target? {
            ObjectId::Item(item) => self.pick_up(item).then_some(Interaction::PickedUp(item)),
            ObjectId::PaymentTerminal => self.start_checkout(),
            ObjectId::Home => {
                if self.payment_completed() {
                    log::info!("made it home with the shopping");
                    self.won = true;
                    Some(Interaction::Won)
                } else {
                    None
                }
            }
            // Collected by walking into it, not by interacting.
            ObjectId::Treasure => None,
        }
    }

    pub fn pick_up(&mut self, item: ItemKind) -> bool {
        if self.picked[item.index()] {
            return false;
        }
        self.picked[item.index()] = true;
        if self.list.fulfill(item) {
            log::info!("collected {} from the list", item.name());
        } else {
            log::info!("picked up {}, not on the list", item.name());
        }
        self.checkout.refresh(self.list.complete());
        true
    }

    fn start_checkout(&mut self) -> Option<Interaction> {
        if self.paid || self.checkout.negotiating() {
            return None;
        }
        if !self.list.complete() {
            log::info!(
                "still missing items: {} of {} collected",
                self.list.fulfilled_count(),
                self.list.entries().len()
            );
            return Some(Interaction::CheckoutRefused);
        }

        self.checkout.refresh(true);
        if !self.checkout.begin() {
            return None;
        }
        self.total_purchase = self.list.total(&self.prices);
        log::info!("at the cashier, total {:.2}", self.total_purchase);
        Some(Interaction::CheckoutStarted)
    }

    /// Text typed this tick. Ignored unless the cashier dialog is open.
    pub fn type_key(&mut self, key: TextKey) {
        if self.finished() {
            return;
        }
        let change_due = self.change_due();
        let outcome = self.checkout.type_key(key, change_due, self.change_tolerance);
        if outcome == Some(SubmitOutcome::Accepted) {
            self.paid = true;
        }
    }

    /// Walking into the treasure. One-shot.
    pub fn collect_treasure(&mut self, reward: f64) -> bool {
        if self.treasure_collected || self.finished() {
            return false;
        }
        self.treasure_collected = true;
        self.cash += reward;
        log::info!("found the treasure, +{:.2}", reward);
        true
    }

    pub fn finished(&self) -> bool {
        self.won || self.countdown.expired()
    }

    pub fn change_due(&self) -> f64 {
        self.cash - self.total_purchase
    }

    pub fn picked_up(&self, item: ItemKind) -> bool {
        self.picked[item.index()]
    }

    pub fn list(&self) -> &ShoppingList {
        &self.list
    }

    pub fn prices(&self) -> &ItemPrices {
        &self.prices
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn total_purchase(&self) -> f64 {
        self.total_purchase
    }

    pub fn paid(&self) -> bool {
        self.paid
    }

    /// The cashier accepted the change. Unlocks going home.
    pub fn payment_completed(&self) -> bool {
        self.checkout.completed()
    }

    pub fn checkout(&self) -> &Checkout {
        &self.checkout
    }

    pub fn treasure_collected(&self) -> bool {
        self.treasure_collected
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn game_over(&self) -> bool {
        self.countdown.expired()
    }

    pub fn won(&self) -> bool {
        self.won
    }
}

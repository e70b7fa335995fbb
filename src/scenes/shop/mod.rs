//! The shopping game itself: what the player has picked up, what they still owe, and whether they made it home in
//! time. Nothing in here knows about geometry, it only reacts to "the crosshair is on X and interact was pressed".

pub(crate) mod checkout;
pub(crate) mod hud;
pub(crate) mod shopping_list;
pub(crate) mod state;

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Baguette,
    Cheese,
    Eggs,
    Butter,
}

impl ItemKind {
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Baguette,
        ItemKind::Cheese,
        ItemKind::Eggs,
        ItemKind::Butter,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Baguette => "baguette",
            ItemKind::Cheese => "cheese",
            ItemKind::Eggs => "eggs",
            ItemKind::Butter => "butter",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Everything the crosshair can be on. Attached to entities as a component.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ObjectId {
    Treasure,
    Item(ItemKind),
    PaymentTerminal,
    Home,
}

#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemPrices {
    pub baguette: f64,
    pub cheese: f64,
    pub eggs: f64,
    pub butter: f64,
}

impl Default for ItemPrices {
    fn default() -> Self {
        Self {
            baguette: 15.24,
            cheese: 17.99,
            eggs: 14.32,
            butter: 13.99,
        }
    }
}

impl ItemPrices {
    pub fn price(&self, item: ItemKind) -> f64 {
        match item {
            ItemKind::Baguette => self.baguette,
            ItemKind::Cheese => self.cheese,
            ItemKind::Eggs => self.eggs,
            ItemKind::Butter => self.butter,
        }
    }
}

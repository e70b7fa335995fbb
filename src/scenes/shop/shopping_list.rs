use rand::Rng;

use super::{ItemKind, ItemPrices};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub item: ItemKind,
    pub fulfilled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingList {
    entries: Vec<ListEntry>,
}

impl ShoppingList {
    pub fn new(items: impl IntoIterator<Item = ItemKind>) -> Self {
        Self {
            entries: items
                .into_iter()
                .map(|item| ListEntry {
                    item,
                    fulfilled: false,
                })
                .collect(),
        }
    }

    /// Draws `count` distinct items, without replacement, in draw order. Asking for more than exist gives them all.
    pub fn sample(rng: &mut impl Rng, count: usize) -> Self {
        let mut available = ItemKind::ALL.to_vec();
        let mut drawn = Vec::with_capacity(count.min(available.len()));
        while drawn.len() < count && !available.is_empty() {
            let index = rng.gen_range(0..available.len());
            drawn.push(available.remove(index));
        }
        Self::new(drawn)
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    /// Marks the entry for `item` fulfilled. Returns true only if this changed something.
    pub fn fulfill(&mut self, item: ItemKind) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.item == item && !entry.fulfilled)
        {
            Some(entry) => {
                entry.fulfilled = true;
                true
            }
            None => false,
        }
    }

    pub fn fulfilled_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.fulfilled).count()
    }

    pub fn complete(&self) -> bool {
        self.entries.iter().all(|entry| entry.fulfilled)
    }

    pub fn total(&self, prices: &ItemPrices) -> f64 {
        self.entries
            .iter()
            .map(|entry| prices.price(entry.item))
            .sum()
    }
}

use serde::Serialize;

use crate::domain::product::{Product, ProductId};

/// One cart line: a product plus how many of it the shopper holds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CartEntry {
    pub product: Product,
    pub quantity: u64,
}

impl CartEntry {
    /// Price times quantity, saturating at `u64::MAX`.
    pub fn line_total(&self) -> u64 {
        self.product.price.saturating_mul(self.quantity)
    }
}

/// Outcome of [`Cart::set_quantity`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuantityUpdate {
    Set { quantity: u64 },
    Removed { entry: CartEntry },
    NotInCart,
}

/// An in-memory shopping cart. Entries keep insertion order; each
/// product id appears at most once. Quantities are unbounded, so the
/// derived aggregates saturate at `u64::MAX` rather than overflowing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn entry(&self, product_id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|entry| entry.product.id == product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.entry(product_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds one unit of `product`. An existing entry is incremented in
    /// place; otherwise a new entry with quantity 1 is appended.
    /// Returns the entry's quantity after the add.
    pub fn add(&mut self, product: &Product) -> u64 {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.product.id == product.id) {
            entry.quantity = entry.quantity.saturating_add(1);
            return entry.quantity;
        }

        self.entries.push(CartEntry { product: product.clone(), quantity: 1 });
        1
    }

    /// Removes the entry for `product_id`, returning it if present.
    /// Removing an absent id is a no-op.
    pub fn remove(&mut self, product_id: ProductId) -> Option<CartEntry> {
        let position = self.entries.iter().position(|entry| entry.product.id == product_id)?;
        Some(self.entries.remove(position))
    }

    /// Sets the quantity of an existing entry. Non-positive quantities
    /// collapse to removal; ids not in the cart are left untouched, so
    /// this never creates an entry.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> QuantityUpdate {
        if quantity <= 0 {
            return match self.remove(product_id) {
                Some(entry) => QuantityUpdate::Removed { entry },
                None => QuantityUpdate::NotInCart,
            };
        }

        let Some(entry) = self.entries.iter_mut().find(|entry| entry.product.id == product_id)
        else {
            return QuantityUpdate::NotInCart;
        };

        entry.quantity = quantity as u64;
        QuantityUpdate::Set { quantity: entry.quantity }
    }

    /// Total units across all entries.
    pub fn item_count(&self) -> u64 {
        self.entries.iter().fold(0u64, |count, entry| count.saturating_add(entry.quantity))
    }

    /// Sum of price times quantity across all entries.
    pub fn total_amount(&self) -> u64 {
        self.entries.iter().fold(0u64, |total, entry| total.saturating_add(entry.line_total()))
    }
}

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use skbasket_core::{
    Cart, CartEntry, CartEvent, CartEventKind, CartEventSink, Catalog, ProductId, QuantityUpdate,
};

/// A cart action as the presentation layer phrases it. Intents carry
/// ids only; the session resolves them against its catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartIntent {
    AddToCart { product_id: ProductId },
    RemoveFromCart { product_id: ProductId },
    SetQuantity { product_id: ProductId, quantity: i64 },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CartCommandError {
    #[error("product {id} is not in the catalog")]
    UnknownProduct { id: ProductId },
    #[error("product {id} ({name}) is out of stock")]
    OutOfStock { id: ProductId, name: String },
}

/// One shopper's storefront session: an immutable catalog, a cart, and
/// an optional event sink that hears about every actual mutation.
pub struct CartSession {
    catalog: Catalog,
    cart: Cart,
    sink: Option<Arc<dyn CartEventSink>>,
}

impl CartSession {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog, cart: Cart::new(), sink: None }
    }

    pub fn with_sink(catalog: Catalog, sink: Arc<dyn CartEventSink>) -> Self {
        Self { catalog, cart: Cart::new(), sink: Some(sink) }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    pub fn total_amount(&self) -> u64 {
        self.cart.total_amount()
    }

    /// Dispatches an intent to the matching operation. Only adds can
    /// fail; removals and quantity updates are total.
    pub fn apply(&mut self, intent: CartIntent) -> Result<(), CartCommandError> {
        match intent {
            CartIntent::AddToCart { product_id } => self.add_to_cart(product_id).map(|_| ()),
            CartIntent::RemoveFromCart { product_id } => {
                self.remove_from_cart(product_id);
                Ok(())
            }
            CartIntent::SetQuantity { product_id, quantity } => {
                self.set_quantity(product_id, quantity);
                Ok(())
            }
        }
    }

    /// Adds one unit of a catalog product, gating on stock. Returns the
    /// entry's quantity after the add.
    pub fn add_to_cart(&mut self, product_id: ProductId) -> Result<u64, CartCommandError> {
        let Some(product) = self.catalog.find(product_id) else {
            warn!(
                event_name = "cart.add_rejected",
                product_id = %product_id,
                reason = "unknown_product",
                "rejected add of a product not in the catalog"
            );
            return Err(CartCommandError::UnknownProduct { id: product_id });
        };

        if !product.in_stock {
            warn!(
                event_name = "cart.add_rejected",
                product_id = %product_id,
                reason = "out_of_stock",
                "rejected add of an out-of-stock product"
            );
            return Err(CartCommandError::OutOfStock {
                id: product_id,
                name: product.name.clone(),
            });
        }

        let quantity = self.cart.add(product);
        info!(
            event_name = "cart.item_added",
            product_id = %product_id,
            quantity,
            cart_total = self.cart.total_amount(),
            "added product to cart"
        );
        self.emit(CartEventKind::ItemAdded { product_id, quantity });

        Ok(quantity)
    }

    /// Removes a product's entry if present. Absent ids are a no-op and
    /// emit nothing.
    pub fn remove_from_cart(&mut self, product_id: ProductId) -> Option<CartEntry> {
        let removed = self.cart.remove(product_id)?;
        info!(
            event_name = "cart.item_removed",
            product_id = %product_id,
            cart_total = self.cart.total_amount(),
            "removed product from cart"
        );
        self.emit(CartEventKind::ItemRemoved { product_id });

        Some(removed)
    }

    /// Sets an existing entry's quantity; non-positive values remove the
    /// entry. Ids not in the cart are a no-op and emit nothing.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> QuantityUpdate {
        let outcome = self.cart.set_quantity(product_id, quantity);
        match &outcome {
            QuantityUpdate::Set { quantity } => {
                info!(
                    event_name = "cart.quantity_changed",
                    product_id = %product_id,
                    quantity = *quantity,
                    cart_total = self.cart.total_amount(),
                    "set cart quantity"
                );
                self.emit(CartEventKind::QuantityChanged { product_id, quantity: *quantity });
            }
            QuantityUpdate::Removed { .. } => {
                info!(
                    event_name = "cart.item_removed",
                    product_id = %product_id,
                    cart_total = self.cart.total_amount(),
                    "removed product from cart via non-positive quantity"
                );
                self.emit(CartEventKind::ItemRemoved { product_id });
            }
            QuantityUpdate::NotInCart => {}
        }

        outcome
    }

    fn emit(&self, kind: CartEventKind) {
        if let Some(sink) = &self.sink {
            sink.emit(CartEvent::new(kind));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use skbasket_core::{
        CartEventKind, Catalog, InMemoryCartEventSink, Product, ProductId, QuantityUpdate,
    };

    use super::{CartCommandError, CartIntent, CartSession};

    fn product(id: u32, price: u64, in_stock: bool) -> Product {
        Product {
            id: ProductId(id),
            name: format!("Sneaker {id}"),
            brand: "Nike".to_string(),
            price,
            image: format!("https://cdn.example/{id}.jpg"),
            is_new: false,
            in_stock,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            product(1, 12_990, true),
            product(2, 15_990, true),
            product(9, 7_990, false),
        ])
        .expect("test catalog ids are unique")
    }

    #[test]
    fn add_rejects_unknown_products() {
        let mut session = CartSession::new(catalog());

        let error = session.add_to_cart(ProductId(77)).expect_err("unknown id is rejected");
        assert_eq!(error, CartCommandError::UnknownProduct { id: ProductId(77) });
        assert!(session.cart().is_empty());
    }

    #[test]
    fn add_rejects_out_of_stock_products() {
        let mut session = CartSession::new(catalog());

        let error = session.add_to_cart(ProductId(9)).expect_err("out-of-stock add is rejected");
        assert!(matches!(error, CartCommandError::OutOfStock { id: ProductId(9), .. }));
        assert_eq!(session.item_count(), 0);
        assert_eq!(session.total_amount(), 0);
    }

    #[test]
    fn intents_drive_the_same_operations() {
        let mut session = CartSession::new(catalog());

        session.apply(CartIntent::AddToCart { product_id: ProductId(1) }).expect("in-stock add");
        session.apply(CartIntent::AddToCart { product_id: ProductId(1) }).expect("in-stock add");
        session
            .apply(CartIntent::SetQuantity { product_id: ProductId(1), quantity: 5 })
            .expect("quantity updates are total");
        assert_eq!(session.total_amount(), 5 * 12_990);

        session
            .apply(CartIntent::RemoveFromCart { product_id: ProductId(1) })
            .expect("removals are total");
        assert!(session.cart().is_empty());
    }

    #[test]
    fn mutations_reach_the_sink_in_order() {
        let sink = Arc::new(InMemoryCartEventSink::default());
        let mut session = CartSession::with_sink(catalog(), sink.clone());

        session.add_to_cart(ProductId(1)).expect("in-stock add");
        session.add_to_cart(ProductId(1)).expect("in-stock add");
        session.set_quantity(ProductId(1), 4);
        session.set_quantity(ProductId(1), 0);
        assert!(session.remove_from_cart(ProductId(1)).is_none());

        let kinds: Vec<CartEventKind> =
            sink.events().into_iter().map(|event| event.kind).collect();
        assert_eq!(
            kinds,
            vec![
                CartEventKind::ItemAdded { product_id: ProductId(1), quantity: 1 },
                CartEventKind::ItemAdded { product_id: ProductId(1), quantity: 2 },
                CartEventKind::QuantityChanged { product_id: ProductId(1), quantity: 4 },
                CartEventKind::ItemRemoved { product_id: ProductId(1) },
            ]
        );
    }

    #[test]
    fn no_op_mutations_stay_silent() {
        let sink = Arc::new(InMemoryCartEventSink::default());
        let mut session = CartSession::with_sink(catalog(), sink.clone());

        assert!(session.remove_from_cart(ProductId(1)).is_none());
        assert_eq!(session.set_quantity(ProductId(2), 3), QuantityUpdate::NotInCart);
        assert!(session.add_to_cart(ProductId(9)).is_err());

        assert!(sink.events().is_empty());
    }

    #[test]
    fn intent_json_uses_snake_case_tags() {
        let intent = CartIntent::SetQuantity { product_id: ProductId(3), quantity: 2 };
        let json = serde_json::to_value(&intent).expect("intent serializes");

        assert_eq!(json["type"], "set_quantity");
        assert_eq!(json["product_id"], 3);
        assert_eq!(json["quantity"], 2);
    }
}

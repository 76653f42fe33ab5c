use serde::Serialize;

use skbasket_core::{Cart, CartEntry, Catalog, Product, ProductId};

use crate::session::CartIntent;

pub const EMPTY_CART_MESSAGE: &str = "Корзина пуста";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProductCardView {
    pub product_id: ProductId,
    pub brand: String,
    pub name: String,
    pub price_label: String,
    pub image: String,
    pub show_new_badge: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_to_cart: Option<CartIntent>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub name: String,
    pub brand: String,
    pub unit_price_label: String,
    pub quantity: u64,
    pub line_total_label: String,
    pub decrement: CartIntent,
    pub increment: CartIntent,
    pub remove: CartIntent,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartPanelView {
    Empty { message: String },
    Filled { lines: Vec<CartLineView>, item_count: u64, total_label: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StorefrontPage {
    pub shop_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_badge: Option<u64>,
    pub catalog: Vec<ProductCardView>,
    pub cart: CartPanelView,
}

pub fn product_card(product: &Product) -> ProductCardView {
    ProductCardView {
        product_id: product.id,
        brand: product.brand.clone(),
        name: product.name.clone(),
        price_label: format_price(product.price),
        image: product.image.clone(),
        show_new_badge: product.is_new,
        add_to_cart: product
            .in_stock
            .then_some(CartIntent::AddToCart { product_id: product.id }),
    }
}

fn cart_line(entry: &CartEntry) -> CartLineView {
    let product_id = entry.product.id;
    // Intent payloads are i64; quantities past that clamp to i64::MAX.
    let quantity = i64::try_from(entry.quantity).unwrap_or(i64::MAX);

    CartLineView {
        product_id,
        name: entry.product.name.clone(),
        brand: entry.product.brand.clone(),
        unit_price_label: format_price(entry.product.price),
        quantity: entry.quantity,
        line_total_label: format_price(entry.line_total()),
        decrement: CartIntent::SetQuantity { product_id, quantity: quantity.saturating_sub(1) },
        increment: CartIntent::SetQuantity { product_id, quantity: quantity.saturating_add(1) },
        remove: CartIntent::RemoveFromCart { product_id },
    }
}

pub fn cart_panel(cart: &Cart) -> CartPanelView {
    if cart.is_empty() {
        return CartPanelView::Empty { message: EMPTY_CART_MESSAGE.to_string() };
    }

    CartPanelView::Filled {
        lines: cart.entries().iter().map(cart_line).collect(),
        item_count: cart.item_count(),
        total_label: format_price(cart.total_amount()),
    }
}

pub fn storefront_page(shop_name: &str, catalog: &Catalog, cart: &Cart) -> StorefrontPage {
    let count = cart.item_count();

    StorefrontPage {
        shop_name: shop_name.to_string(),
        cart_badge: (count > 0).then_some(count),
        catalog: catalog.iter().map(product_card).collect(),
        cart: cart_panel(cart),
    }
}

/// Ruble label with space-grouped thousands: 12990 -> "12 990 ₽".
pub fn format_price(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    grouped.push_str(" ₽");
    grouped
}

pub mod catalog;
pub mod domain;
pub mod events;

pub use catalog::{Catalog, CatalogError};
pub use domain::cart::{Cart, CartEntry, QuantityUpdate};
pub use domain::product::{Product, ProductId};
pub use events::{CartEvent, CartEventKind, CartEventSink, InMemoryCartEventSink};

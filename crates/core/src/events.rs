use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::product::ProductId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartEventKind {
    ItemAdded { product_id: ProductId, quantity: u64 },
    ItemRemoved { product_id: ProductId },
    QuantityChanged { product_id: ProductId, quantity: u64 },
}

impl CartEventKind {
    pub fn product_id(&self) -> ProductId {
        match self {
            Self::ItemAdded { product_id, .. }
            | Self::ItemRemoved { product_id }
            | Self::QuantityChanged { product_id, .. } => *product_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEvent {
    pub event_id: String,
    pub kind: CartEventKind,
    pub occurred_at: DateTime<Utc>,
}

impl CartEvent {
    pub fn new(kind: CartEventKind) -> Self {
        Self { event_id: Uuid::new_v4().to_string(), kind, occurred_at: Utc::now() }
    }
}

pub trait CartEventSink: Send + Sync {
    fn emit(&self, event: CartEvent);
}

#[derive(Clone, Default)]
pub struct InMemoryCartEventSink {
    events: Arc<Mutex<Vec<CartEvent>>>,
}

impl InMemoryCartEventSink {
    pub fn events(&self) -> Vec<CartEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl CartEventSink for InMemoryCartEventSink {
    fn emit(&self, event: CartEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

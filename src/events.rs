use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::{ProductId, ProductStatus};

/// all breadcrumbs that can be emitted by the product manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // lifecycle events
    ProductCreated {
        product_id: ProductId,
        name: String,
        principal: Money,
        apr: Rate,
        timestamp: DateTime<Utc>,
    },
    ProductUpdated {
        product_id: ProductId,
        timestamp: DateTime<Utc>,
    },
    ProductDeleted {
        product_id: ProductId,
        timestamp: DateTime<Utc>,
    },

    // accrual and payment events
    InterestAccrued {
        product_id: ProductId,
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    PaymentApplied {
        product_id: ProductId,
        amount: Money,
        applied_to_interest: Money,
        applied_to_principal: Money,
        remaining_balance: Money,
        timestamp: DateTime<Utc>,
    },
    ChargeAdded {
        product_id: ProductId,
        amount: Money,
        remaining_balance: Money,
        timestamp: DateTime<Utc>,
    },

    // status change events
    StatusChanged {
        product_id: ProductId,
        old_status: ProductStatus,
        new_status: ProductStatus,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting breadcrumbs during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

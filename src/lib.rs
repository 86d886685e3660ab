pub mod decimal;
pub mod errors;
pub mod events;
pub mod interest;
pub mod manager;
pub mod payments;
pub mod product;
pub mod store;
pub mod types;

// re-export key types
pub use decimal::{Money, Rate};
pub use errors::{ProductError, Result};
pub use events::{Event, EventStore};
pub use interest::{days_between, interest_for_period};
pub use manager::ProductManager;
pub use payments::PaymentOutcome;
pub use product::CreditProduct;
pub use store::{JsonFileStore, MemoryStore, ProductStore, StoreError};
pub use types::{
    CreditKind, NewProduct, PaymentBreakdown, ProductId, ProductPatch, ProductStatus,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;

//! Durable storage for the product collection.
//!
//! Only the store implementations touch the filesystem; the manager and
//! everything above it go through the `ProductStore` trait.

pub mod json;
pub mod memory;

use thiserror::Error;

use crate::product::CreditProduct;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage encoding: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("storage unavailable: {message}")]
    Unavailable {
        message: String,
    },
}

/// persistence collaborator for the product collection
///
/// `load` returns the empty collection when nothing has been stored yet;
/// `save` replaces the stored collection wholesale
pub trait ProductStore {
    fn load(&self) -> Result<Vec<CreditProduct>, StoreError>;

    fn save(&self, products: &[CreditProduct]) -> Result<(), StoreError>;
}

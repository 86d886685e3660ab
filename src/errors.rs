use thiserror::Error;

use crate::decimal::{Money, Rate};
use crate::store::StoreError;
use crate::types::ProductId;

#[derive(Error, Debug)]
pub enum ProductError {
    #[error("invalid amount: {amount}")]
    InvalidAmount {
        amount: Money,
    },

    #[error("invalid principal: {principal}")]
    InvalidPrincipal {
        principal: Money,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidRate {
        rate: Rate,
    },

    #[error("product not found: {id}")]
    NotFound {
        id: ProductId,
    },

    #[error("charges not supported for {kind} products")]
    ChargeNotSupported {
        kind: &'static str,
    },

    /// the in-memory mutation stands; retry the write via
    /// `ProductManager::retry_persist`
    #[error("persistence failed: {0}")]
    Persistence(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, ProductError>;

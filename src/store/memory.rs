use std::cell::RefCell;
use std::rc::Rc;

use crate::product::CreditProduct;

use super::{ProductStore, StoreError};

/// in-process store for tests and ephemeral use
///
/// clones share the same backing collection, so a handle kept by the test
/// can observe what the manager persisted and toggle write failures to
/// exercise the retry path
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    products: Vec<CreditProduct>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// seed the store with an existing collection
    pub fn with_products(products: Vec<CreditProduct>) -> Self {
        let store = Self::new();
        store.inner.borrow_mut().products = products;
        store
    }

    /// make subsequent saves fail until switched back off
    pub fn fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }

    /// copy of what has been persisted so far
    pub fn snapshot(&self) -> Vec<CreditProduct> {
        self.inner.borrow().products.clone()
    }
}

impl ProductStore for MemoryStore {
    fn load(&self) -> Result<Vec<CreditProduct>, StoreError> {
        Ok(self.inner.borrow().products.clone())
    }

    fn save(&self, products: &[CreditProduct]) -> Result<(), StoreError> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_writes {
            return Err(StoreError::Unavailable {
                message: "write failure injected".to_string(),
            });
        }
        inner.products = products.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::{Money, Rate};
    use crate::types::{CreditKind, NewProduct};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn sample_product() -> CreditProduct {
        CreditProduct::new(
            NewProduct {
                name: "store card".to_string(),
                principal: Money::from_major(500),
                apr: Rate::from_percentage(dec!(24.9)),
                kind: CreditKind::Revolving {
                    due_day: None,
                    minimum_payment: Some(Money::from_major(25)),
                },
                start_date: None,
                note: None,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_seeded_store_loads_products() {
        let store = MemoryStore::with_products(vec![sample_product()]);
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let store = MemoryStore::new();
        let handle = store.clone();

        store.save(&[sample_product()]).unwrap();

        assert_eq!(handle.load().unwrap().len(), 1);
    }

    #[test]
    fn test_injected_write_failure() {
        let store = MemoryStore::new();
        store.save(&[sample_product()]).unwrap();

        store.fail_writes(true);
        assert!(store.save(&[]).is_err());
        // the previously persisted snapshot is untouched
        assert_eq!(store.snapshot().len(), 1);

        store.fail_writes(false);
        store.save(&[]).unwrap();
        assert!(store.snapshot().is_empty());
    }
}

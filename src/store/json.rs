use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::product::CreditProduct;

use super::{ProductStore, StoreError};

/// JSON snapshot of the full product collection at a single path
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProductStore for JsonFileStore {
    fn load(&self) -> Result<Vec<CreditProduct>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn save(&self, products: &[CreditProduct]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(products)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::{Money, Rate};
    use crate::types::{CreditKind, NewProduct};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn temp_store() -> JsonFileStore {
        let path = std::env::temp_dir().join(format!("credit-products-{}.json", Uuid::new_v4()));
        JsonFileStore::new(path)
    }

    fn sample_product() -> CreditProduct {
        CreditProduct::new(
            NewProduct {
                name: "car loan".to_string(),
                principal: Money::from_major(12_000),
                apr: Rate::from_percentage(dec!(7.9)),
                kind: CreditKind::FixedLoan {
                    term_months: 48,
                    due_day: Some(1),
                },
                start_date: None,
                note: Some("family car".to_string()),
            },
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let store = temp_store();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_round_trip() {
        let store = temp_store();
        let products = vec![sample_product(), sample_product()];

        store.save(&products).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, products);

        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn test_save_replaces_previous_snapshot() {
        let store = temp_store();

        store.save(&[sample_product(), sample_product()]).unwrap();
        store.save(&[sample_product()]).unwrap();

        assert_eq!(store.load().unwrap().len(), 1);

        let _ = fs::remove_file(store.path());
    }
}

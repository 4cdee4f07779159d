//! Catalog configuration loading

use std::fs;
use std::path::Path;

use thiserror::Error;

use super::product::ProductCatalog;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read product catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse product catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("product {id}: {reason}")]
    InvalidProduct { id: String, reason: String },
}

impl ProductCatalog {
    /// Load a catalog document, falling back to the built-in default when
    /// the file is absent. A document that is present but malformed or
    /// numerically inconsistent fails here, never at calculation time.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            log::info!(
                "catalog config {} not found, using default catalog",
                path.display()
            );
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)?;
        let catalog: ProductCatalog = serde_json::from_str(&raw)?;
        catalog.validate()?;

        log::info!(
            "loaded {} credit and {} leasing products from {}",
            catalog.credit_products.len(),
            catalog.leasing_products.len(),
            path.display()
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let catalog = ProductCatalog::load(Path::new("/nonexistent/products.json")).unwrap();
        assert_eq!(catalog.credit_products.len(), 2);
        assert_eq!(catalog.leasing_products.len(), 1);
    }

    #[test]
    fn test_load_custom_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{
                "credit_products": [{{
                    "id": "c1", "name": "Credit",
                    "min_amount": 100000, "max_amount": 1000000,
                    "min_months": 12, "max_months": 60,
                    "min_initial": 0.15,
                    "available_for": ["used"]
                }}]
            }}"#
        )
        .unwrap();

        let catalog = ProductCatalog::load(&path).unwrap();
        assert_eq!(catalog.credit_products.len(), 1);
        assert!(catalog.leasing_products.is_empty());
    }

    #[test]
    fn test_invalid_catalog_fails_at_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{
                "credit_products": [{{
                    "id": "broken", "name": "Broken",
                    "min_amount": 1000000, "max_amount": 100,
                    "min_months": 12, "max_months": 60,
                    "available_for": ["used"]
                }}]
            }}"#
        )
        .unwrap();

        assert!(matches!(
            ProductCatalog::load(&path),
            Err(CatalogError::InvalidProduct { .. })
        ));
    }

    #[test]
    fn test_malformed_json_fails_at_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            ProductCatalog::load(&path),
            Err(CatalogError::Parse(_))
        ));
    }
}

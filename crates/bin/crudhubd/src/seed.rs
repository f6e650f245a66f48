//! JSON fixture loaded into the services at startup.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{Customer, Order, Product};

/// Entities to save before serving, grouped by type.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Seed {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
}

impl Seed {
    /// Read a fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid fixture.
    pub fn from_file(path: &Path) -> Result<Self, SeedError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a fixture from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Json`] if the text is not a valid fixture.
    pub fn from_json(content: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(content)?)
    }
}

/// Number of entities saved per type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub customers: usize,
    pub products: usize,
    pub orders: usize,
}

/// Fixture loading errors.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// File I/O failure.
    #[error("failed to read seed file")]
    Io(#[from] std::io::Error),
    /// JSON parse failure.
    #[error("failed to parse seed file")]
    Json(#[from] serde_json::Error),
}

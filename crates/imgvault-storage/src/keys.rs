//! Object keys and raw id generation.
//!
//! Key resolution is centralized here so the repository and every backend
//! address a given object the same way.

use imgvault_core::Category;
use rand::distr::Alphanumeric;
use rand::Rng;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Length of generated raw ids.
pub const RAW_ID_LEN: usize = 20;

/// Generate a random alphanumeric raw id of [`RAW_ID_LEN`] characters.
pub fn generate_raw_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(RAW_ID_LEN)
        .map(char::from)
        .collect()
}

/// Address of one object: a category and the raw id within it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    category: Category,
    raw_id: String,
}

impl ObjectKey {
    pub fn new(category: Category, raw_id: impl Into<String>) -> Self {
        Self {
            category,
            raw_id: raw_id.into(),
        }
    }

    /// Resolve an id given by a caller, with or without the category prefix.
    pub fn resolve(id: &str, category: Category) -> Self {
        Self::new(category, category.strip(id))
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn raw_id(&self) -> &str {
        &self.raw_id
    }

    /// Category-qualified id, used as the remote object path and as the
    /// metadata index key.
    pub fn qualified(&self) -> String {
        self.category.qualify(&self.raw_id)
    }
}

impl Display for ObjectKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}{}", self.category.prefix(), self.raw_id)
    }
}

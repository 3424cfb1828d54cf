//! Category namespacing.
//!
//! Every stored object lives under a namespace prefix derived from its
//! category: `user/`, `location/`, or nothing for unscoped media. The mapping
//! is pure and total; unknown category names resolve to the unscoped
//! namespace so that unprefixed access always remains possible.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

/// Logical partition of stored media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    User,
    Location,
    #[serde(rename = "none")]
    Unscoped,
}

impl Category {
    /// All categories, namespaced ones first.
    pub const ALL: [Category; 3] = [Category::User, Category::Location, Category::Unscoped];

    /// Resolve a category name. Anything unrecognised is unscoped.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "user" => Category::User,
            "location" => Category::Location,
            _ => Category::Unscoped,
        }
    }

    /// Namespace prefix for this category.
    pub fn prefix(self) -> &'static str {
        match self {
            Category::User => "user/",
            Category::Location => "location/",
            Category::Unscoped => "",
        }
    }

    /// Folder name handed to object stores, if the category has one.
    pub fn folder(self) -> Option<&'static str> {
        self.prefix().strip_suffix('/')
    }

    /// Prepend this category's prefix to a raw id.
    pub fn qualify(self, raw_id: &str) -> String {
        format!("{}{}", self.prefix(), raw_id)
    }

    /// Remove this category's prefix from an id, if present.
    ///
    /// Ids that do not carry the prefix are returned unchanged, so
    /// `qualify(strip(id))` is the qualified form whichever form was given.
    pub fn strip(self, id: &str) -> &str {
        id.strip_prefix(self.prefix()).unwrap_or(id)
    }

    /// Split a qualified id into its category and raw id.
    pub fn split(id: &str) -> (Category, &str) {
        for category in [Category::User, Category::Location] {
            if let Some(raw) = id.strip_prefix(category.prefix()) {
                return (category, raw);
            }
        }
        (Category::Unscoped, id)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Category::User => write!(f, "user"),
            Category::Location => write!(f, "location"),
            Category::Unscoped => write!(f, "none"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(Category::User.prefix(), "user/");
        assert_eq!(Category::Location.prefix(), "location/");
        assert_eq!(Category::Unscoped.prefix(), "");
    }

    #[test]
    fn test_unknown_name_is_unscoped() {
        assert_eq!(Category::from_name("user"), Category::User);
        assert_eq!(Category::from_name(" Location "), Category::Location);
        assert_eq!(Category::from_name("none"), Category::Unscoped);
        assert_eq!(Category::from_name("avatars"), Category::Unscoped);
        assert_eq!(Category::from_name(""), Category::Unscoped);
    }

    #[test]
    fn test_qualify_and_strip() {
        assert_eq!(Category::User.qualify("abc"), "user/abc");
        assert_eq!(Category::User.strip("user/abc"), "abc");
        assert_eq!(Category::User.strip("abc"), "abc");
        assert_eq!(Category::Location.strip("user/abc"), "user/abc");
        assert_eq!(Category::Unscoped.qualify("abc"), "abc");
        assert_eq!(Category::Unscoped.strip("user/abc"), "user/abc");
    }

    #[test]
    fn test_qualify_strip_is_idempotent() {
        for category in Category::ALL {
            let once = category.qualify(category.strip("xyz"));
            let twice = category.qualify(category.strip(&once));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_split() {
        assert_eq!(Category::split("user/abc"), (Category::User, "abc"));
        assert_eq!(Category::split("location/abc"), (Category::Location, "abc"));
        assert_eq!(Category::split("abc"), (Category::Unscoped, "abc"));
    }

    #[test]
    fn test_folder() {
        assert_eq!(Category::User.folder(), Some("user"));
        assert_eq!(Category::Location.folder(), Some("location"));
        assert_eq!(Category::Unscoped.folder(), None);
    }
}

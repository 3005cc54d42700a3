//! The standard chemistry catalog.
//!
//! Seventeen elements, nineteen compounds (five of them recognised by
//! structural rules) and seven reactions. Loaders that ship their own
//! content build a `CatalogDefinition` instead.

mod catalog;

pub use catalog::definition;

use crate::cards::Catalog;
use crate::core::CatalogError;

/// Load the standard catalog.
pub fn load() -> Result<Catalog, CatalogError> {
    Catalog::load(&definition())
}

/// The standard catalog.
///
/// Panics only if the built-in content is malformed, which the tests
/// below rule out.
#[must_use]
pub fn catalog() -> Catalog {
    load().expect("standard catalog is well-formed")
}

//! Card system: elements, compounds, reactions and the catalog.
//!
//! ## Key Types
//!
//! - `Element`: a card type with a symbol, oxidation number and group
//! - `Compound`: built from elements, grants a `CompoundEffect`
//! - `Reaction`: turns owned compounds into further compounds and elements
//! - `Catalog`: immutable, id-indexed rule data loaded once per game
//! - `CatalogDefinition`: what an external loader supplies to `Catalog::load`

pub mod catalog;
pub mod compound;
pub mod definition;
pub mod element;
pub mod reaction;

pub use catalog::{Catalog, RuleElements};
pub use compound::{Compound, CompoundEffect, CompoundId, ElementCounts, Requirement, SpecialRule};
pub use definition::{
    CatalogDefinition, CompoundDef, EffectDef, ElementDef, ReactionDef, RequirementDef,
};
pub use element::{Element, ElementGroup, ElementId};
pub use reaction::{Reaction, ReactionId};

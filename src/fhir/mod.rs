//! FHIR R4 terminology resource models and the bundle store
//!
//! Only the fields the engine inspects are modeled as typed fields; everything
//! else a server or export file carries is preserved through flattened
//! pass-through maps so a round-tripped document stays submittable.

pub mod bundle;
pub mod identity;
pub mod resource;

pub use bundle::{Bundle, BundleEntry};
pub use identity::ResourceKey;
pub use resource::{
    CodeSystem, Compose, Concept, Identifier, IncludeRule, Resource, ValueSet,
};

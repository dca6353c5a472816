//! termbundle - FHIR terminology bundle assembly engine
//!
//! Assembles FHIR R4 `ValueSet` and `CodeSystem` resources from heterogeneous
//! inputs (FHIR JSON documents, OMOP Atlas concept exports, ZIP archives, and
//! remote terminology servers) into a portable collection `Bundle` with
//! identity-based deduplication and one-hop dependency resolution.

pub mod assembler;
pub mod client;
pub mod config;
pub mod error;
pub mod fhir;
pub mod ingest;
pub mod resolver;
pub mod submit;

#[cfg(test)]
pub(crate) mod test_fixtures;

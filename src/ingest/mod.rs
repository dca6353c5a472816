//! Batch ingestion orchestration
//!
//! Fans a batch of heterogeneous input artifacts out across the format
//! adapters and folds the resulting resources into the bundle through the
//! assembler. Artifacts settle independently: one artifact's failure never
//! prevents the others from completing, and within an expandable artifact
//! each resource succeeds or fails on its own. The bundle is only ever
//! touched by the serialized fold, never concurrently.

pub mod archive;
pub mod csv;
pub mod format;
pub mod json;

pub use format::{ArtifactFormat, InputArtifact};

use futures::future::join_all;
use tracing::{debug, info};

use crate::assembler;
use crate::client::TerminologyClient;
use crate::error::{Result, TermError};
use crate::fhir::{Bundle, Resource};

/// Settlement status of one artifact or one resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    Fulfilled,
    Rejected,
}

/// Outcome for one resource of an expandable artifact
#[derive(Debug)]
pub struct ResourceOutcome {
    pub label: String,
    pub status: OutcomeStatus,
    pub error: Option<String>,
}

/// Outcome for one top-level input artifact
#[derive(Debug)]
pub struct IngestionOutcome {
    /// Source label (file name)
    pub source: String,

    pub status: OutcomeStatus,

    /// Labels of every resource appended to the bundle for this artifact,
    /// including resolved dependencies
    pub added: Vec<String>,

    /// First failure for this artifact, when rejected
    pub error: Option<String>,

    /// Per-resource outcomes for expandable artifacts
    pub resources: Vec<ResourceOutcome>,
}

impl IngestionOutcome {
    fn rejected(source: String, error: &TermError) -> Self {
        Self {
            source,
            status: OutcomeStatus::Rejected,
            added: Vec::new(),
            error: Some(error.to_string()),
            resources: Vec::new(),
        }
    }
}

/// Result of one batch ingestion
#[derive(Debug)]
pub struct IngestReport {
    /// The bundle with every successful addition folded in
    pub bundle: Bundle,

    /// One outcome per input artifact, in input order
    pub outcomes: Vec<IngestionOutcome>,
}

impl IngestReport {
    pub fn rejected_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == OutcomeStatus::Rejected)
            .count()
    }
}

/// Expand one artifact into canonical resources via its adapter
fn expand_artifact(artifact: &InputArtifact) -> Result<Vec<Resource>> {
    let format = ArtifactFormat::classify(artifact)?;
    debug!(name = %artifact.name, ?format, "expanding artifact");

    match format {
        ArtifactFormat::Json => json::parse_document(&artifact.data),
        ArtifactFormat::Csv => Ok(csv::concept_csv_to_value_sets(&artifact.data)?
            .into_iter()
            .map(Resource::ValueSet)
            .collect()),
        ArtifactFormat::Zip => Ok(archive::archive_to_value_sets(&artifact.data)?
            .into_iter()
            .map(Resource::ValueSet)
            .collect()),
    }
}

/// Ingest a batch of artifacts into the bundle
///
/// All artifacts are expanded concurrently and settle independently; the
/// successful expansions are then folded into the bundle deterministically
/// in artifact-then-resource order. When `source` is given, value sets pull
/// in their missing dependencies during the fold.
pub async fn ingest(
    artifacts: Vec<InputArtifact>,
    bundle: Bundle,
    source: Option<&dyn TerminologyClient>,
) -> IngestReport {
    let expansions = join_all(artifacts.into_iter().map(|artifact| async move {
        let resources = expand_artifact(&artifact);
        (artifact.name, resources)
    }))
    .await;

    let mut bundle = bundle;
    let mut outcomes = Vec::with_capacity(expansions.len());

    for (source_label, expansion) in expansions {
        let resources = match expansion {
            Ok(resources) => resources,
            Err(err) => {
                outcomes.push(IngestionOutcome::rejected(source_label, &err));
                continue;
            }
        };

        let mut added = Vec::new();
        let mut resource_outcomes = Vec::with_capacity(resources.len());

        for resource in resources {
            let label = resource.label();
            let folded = match resource {
                Resource::ValueSet(vs) => assembler::add_value_set(&bundle, vs, source).await,
                Resource::CodeSystem(cs) => assembler::add_code_system(&bundle, cs),
            };

            match folded {
                Ok(outcome) => {
                    bundle = outcome.bundle;
                    added.extend(outcome.added);
                    match outcome.dependency_failure {
                        None => resource_outcomes.push(ResourceOutcome {
                            label,
                            status: OutcomeStatus::Fulfilled,
                            error: None,
                        }),
                        Some(err) => resource_outcomes.push(ResourceOutcome {
                            label,
                            status: OutcomeStatus::Rejected,
                            error: Some(err.to_string()),
                        }),
                    }
                }
                Err(err) => resource_outcomes.push(ResourceOutcome {
                    label,
                    status: OutcomeStatus::Rejected,
                    error: Some(err.to_string()),
                }),
            }
        }

        let first_error = resource_outcomes
            .iter()
            .find(|r| r.status == OutcomeStatus::Rejected)
            .and_then(|r| r.error.clone());

        outcomes.push(IngestionOutcome {
            source: source_label,
            status: if first_error.is_none() {
                OutcomeStatus::Fulfilled
            } else {
                OutcomeStatus::Rejected
            },
            added,
            error: first_error,
            resources: resource_outcomes,
        });
    }

    info!(
        artifacts = outcomes.len(),
        entries = bundle.len(),
        "batch ingestion settled"
    );

    IngestReport { bundle, outcomes }
}

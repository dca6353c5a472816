//! Bundle submission to a target terminology server
//!
//! A total transport failure (no response at all) propagates as
//! `NetworkFailure`; a server response with per-entry issues is a successful
//! submission whose issues the caller renders. In most cases those issues
//! just mean the code systems or value sets already exist on the server.

use tracing::info;

use crate::client::TerminologyClient;
use crate::error::Result;
use crate::fhir::Bundle;

/// Outcome of a completed submission
#[derive(Debug)]
pub struct SubmissionReport {
    /// Non-informational issues the server reported, in entry order
    pub issues: Vec<String>,
}

impl SubmissionReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Submit the bundle and collect per-entry issues from the response
pub async fn submit_bundle(
    client: &dyn TerminologyClient,
    bundle: &Bundle,
) -> Result<SubmissionReport> {
    let response = client.submit(bundle).await?;
    let issues = response.issue_messages();

    info!(
        entries = bundle.len(),
        issues = issues.len(),
        "bundle submitted"
    );

    Ok(SubmissionReport { issues })
}

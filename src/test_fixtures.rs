//! Shared fixtures for unit tests: resource builders, a canned ZIP writer,
//! and an in-memory terminology server double

use std::collections::{HashMap, HashSet};
use std::io::Write;

use async_trait::async_trait;

use crate::client::{
    EntryResponse, FetchedResource, OperationOutcome, OutcomeIssue, ResourceKind, ResponseBundle,
    ResponseEntry, SearchParams, TerminologyClient,
};
use crate::error::{Result, TermError};
use crate::fhir::{Bundle, CodeSystem, Compose, IncludeRule, ValueSet};

/// A value set with a stable identity (name == id, plus canonical url)
pub fn value_set(id: &str, url: &str) -> ValueSet {
    ValueSet {
        id: Some(id.to_string()),
        url: Some(url.to_string()),
        name: Some(id.to_string()),
        status: Some("active".to_string()),
        ..Default::default()
    }
}

/// A code system with a stable identity (name == id, plus canonical url)
pub fn code_system(id: &str, url: &str) -> CodeSystem {
    CodeSystem {
        id: Some(id.to_string()),
        url: Some(url.to_string()),
        name: Some(id.to_string()),
        status: Some("active".to_string()),
        content: Some("complete".to_string()),
        ..Default::default()
    }
}

/// A value set whose composition references the given code systems and
/// value sets, in that order
pub fn value_set_with_refs(
    id: &str,
    url: &str,
    systems: &[&str],
    value_sets: &[&str],
) -> ValueSet {
    let mut include: Vec<IncludeRule> = systems
        .iter()
        .map(|system| IncludeRule {
            system: Some((*system).to_string()),
            ..Default::default()
        })
        .collect();

    if !value_sets.is_empty() {
        include.push(IncludeRule {
            value_set: value_sets.iter().map(|v| (*v).to_string()).collect(),
            ..Default::default()
        });
    }

    ValueSet {
        compose: Some(Compose {
            include,
            ..Default::default()
        }),
        ..value_set(id, url)
    }
}

/// Build an in-memory ZIP archive from (member name, contents) pairs
pub fn zip_archive(members: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();

    for (name, contents) in members {
        writer.start_file(*name, options).unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }

    writer.finish().unwrap().into_inner()
}

/// In-memory stand-in for a FHIR terminology server
#[derive(Default)]
pub struct MockClient {
    value_sets_by_id: HashMap<String, ValueSet>,
    value_sets_by_url: HashMap<String, ValueSet>,
    code_systems_by_url: HashMap<String, CodeSystem>,
    others_by_url: HashMap<String, String>,
    failing_urls: HashSet<String>,
    search_results: Vec<ValueSet>,
    expansions: HashMap<String, ValueSet>,
    submit_issues: Vec<String>,
    submit_fails: bool,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value_set(mut self, value_set: ValueSet) -> Self {
        if let Some(id) = value_set.id.clone() {
            self.value_sets_by_id.insert(id, value_set.clone());
        }
        if let Some(url) = value_set.url.clone() {
            self.value_sets_by_url.insert(url, value_set);
        }
        self
    }

    pub fn with_code_system(mut self, code_system: CodeSystem) -> Self {
        if let Some(url) = code_system.url.clone() {
            self.code_systems_by_url.insert(url, code_system);
        }
        self
    }

    /// Serve a resource of an unexpected kind at `url`
    pub fn with_other(mut self, url: &str, resource_type: &str) -> Self {
        self.others_by_url
            .insert(url.to_string(), resource_type.to_string());
        self
    }

    /// Fail every fetch of `url` with a network error
    pub fn with_failure(mut self, url: &str) -> Self {
        self.failing_urls.insert(url.to_string());
        self
    }

    pub fn with_search_results(mut self, results: Vec<ValueSet>) -> Self {
        self.search_results = results;
        self
    }

    pub fn with_expansion(mut self, id: &str, expanded: ValueSet) -> Self {
        self.expansions.insert(id.to_string(), expanded);
        self
    }

    pub fn with_submit_issues(mut self, issues: &[&str]) -> Self {
        self.submit_issues = issues.iter().map(|i| (*i).to_string()).collect();
        self
    }

    pub fn with_submit_failure(mut self) -> Self {
        self.submit_fails = true;
        self
    }
}

#[async_trait]
impl TerminologyClient for MockClient {
    async fn fetch_value_set_by_id(&self, id: &str) -> Result<ValueSet> {
        self.value_sets_by_id
            .get(id)
            .cloned()
            .ok_or_else(|| TermError::ResourceNotFound {
                resource_type: "ValueSet".to_string(),
                id: id.to_string(),
            })
    }

    async fn fetch_by_url(&self, kind: ResourceKind, url: &str) -> Result<FetchedResource> {
        if self.failing_urls.contains(url) {
            return Err(TermError::NetworkFailure {
                message: format!("connection refused fetching {url}"),
            });
        }

        if let Some(resource_type) = self.others_by_url.get(url) {
            return Ok(FetchedResource::Other {
                resource_type: resource_type.clone(),
            });
        }

        match kind {
            ResourceKind::ValueSet => self
                .value_sets_by_url
                .get(url)
                .cloned()
                .map(FetchedResource::ValueSet),
            ResourceKind::CodeSystem => self
                .code_systems_by_url
                .get(url)
                .cloned()
                .map(FetchedResource::CodeSystem),
        }
        .ok_or_else(|| TermError::ResourceNotFound {
            resource_type: kind.as_str().to_string(),
            id: url.to_string(),
        })
    }

    async fn search_value_sets(&self, _params: &SearchParams) -> Result<Vec<ValueSet>> {
        Ok(self.search_results.clone())
    }

    async fn expand(&self, value_set_id: &str) -> Result<ValueSet> {
        self.expansions
            .get(value_set_id)
            .cloned()
            .ok_or_else(|| TermError::ResourceNotFound {
                resource_type: "ValueSet".to_string(),
                id: value_set_id.to_string(),
            })
    }

    async fn submit(&self, _bundle: &Bundle) -> Result<ResponseBundle> {
        if self.submit_fails {
            return Err(TermError::NetworkFailure {
                message: "connection reset during submit".to_string(),
            });
        }

        let entry = self
            .submit_issues
            .iter()
            .map(|message| ResponseEntry {
                response: Some(EntryResponse {
                    status: Some("400 Bad Request".to_string()),
                    outcome: Some(OperationOutcome {
                        issue: vec![OutcomeIssue {
                            severity: Some("error".to_string()),
                            code: None,
                            diagnostics: Some(message.clone()),
                        }],
                    }),
                }),
            })
            .collect();

        Ok(ResponseBundle { entry })
    }
}

//! FHIR R4 REST transport
//!
//! Speaks plain FHIR REST against a base URL: read by id, search by
//! canonical URL or parameters, `$expand`, and transaction POST of the
//! assembled bundle.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::config::FhirConnection;
use crate::error::{Result, TermError};
use crate::fhir::{Bundle, ValueSet};

use super::{FetchedResource, ResourceKind, ResponseBundle, SearchParams, TerminologyClient};

/// A client for one FHIR server connection
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(connection: &FhirConnection) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: connection.base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value> {
        debug!(url, "GET");
        let response = self
            .http
            .get(url)
            .query(query)
            .header("Accept", "application/fhir+json")
            .send()
            .await?
            .error_for_status()?;

        let value = response.json::<Value>().await?;
        Ok(value)
    }

    /// Entries of a searchset bundle, as raw documents
    fn search_entries(searchset: Value) -> Vec<Value> {
        match searchset.get("entry") {
            Some(Value::Array(entries)) => entries
                .iter()
                .filter_map(|e| e.get("resource").cloned())
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[async_trait]
impl TerminologyClient for RestClient {
    async fn fetch_value_set_by_id(&self, id: &str) -> Result<ValueSet> {
        let url = format!("{}/ValueSet/{id}", self.base_url);
        let document = self.get_json(&url, &[]).await?;

        let value_set: ValueSet = serde_json::from_value(document)?;
        Ok(value_set)
    }

    async fn fetch_by_url(&self, kind: ResourceKind, url: &str) -> Result<FetchedResource> {
        let endpoint = format!("{}/{}", self.base_url, kind.as_str());
        let searchset = self.get_json(&endpoint, &[("url", url)]).await?;

        let first = Self::search_entries(searchset)
            .into_iter()
            .next()
            .ok_or_else(|| TermError::ResourceNotFound {
                resource_type: kind.as_str().to_string(),
                id: url.to_string(),
            })?;

        FetchedResource::classify(first)
    }

    async fn search_value_sets(&self, params: &SearchParams) -> Result<Vec<ValueSet>> {
        let endpoint = format!("{}/ValueSet", self.base_url);

        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(url) = params.url.as_deref() {
            query.push(("url", url));
        }
        if let Some(name) = params.name.as_deref() {
            query.push(("name", name));
        }
        if let Some(identifier) = params.identifier.as_deref() {
            query.push(("identifier", identifier));
        }

        let searchset = self.get_json(&endpoint, &query).await?;

        let mut results = Vec::new();
        for document in Self::search_entries(searchset) {
            // Servers may interleave OperationOutcome entries; skip them
            if document.get("resourceType").and_then(Value::as_str) == Some("ValueSet") {
                results.push(serde_json::from_value(document)?);
            }
        }
        Ok(results)
    }

    async fn expand(&self, value_set_id: &str) -> Result<ValueSet> {
        let url = format!("{}/ValueSet/{value_set_id}/$expand", self.base_url);
        let document = self.get_json(&url, &[]).await?;

        let value_set: ValueSet = serde_json::from_value(document)?;
        Ok(value_set)
    }

    async fn submit(&self, bundle: &Bundle) -> Result<ResponseBundle> {
        debug!(entries = bundle.len(), "POST transaction bundle");

        // A collection bundle is submitted as a transaction so the server
        // reports one outcome per entry
        let mut document = serde_json::to_value(bundle)?;
        document["type"] = Value::String("transaction".to_string());

        let response = self
            .http
            .post(&self.base_url)
            .header("Content-Type", "application/fhir+json")
            .json(&document)
            .send()
            .await?
            .error_for_status()?;

        let response_bundle = response.json::<ResponseBundle>().await?;
        Ok(response_bundle)
    }
}

//! OMOP Atlas concept export adapter
//!
//! Atlas exports concept tables (e.g. `mappedConcepts.csv`,
//! `includedConcepts.csv`) with one row per concept. Rows are grouped by
//! concept set name into one value set each; within a value set, codes are
//! grouped by vocabulary into compose.include rules whose `system` is the
//! vocabulary's canonical URL.

use std::collections::HashMap;

use crate::error::{Result, TermError};
use crate::fhir::{Compose, Concept, IncludeRule, ValueSet};

/// Map an OMOP vocabulary id to its canonical FHIR system URL; unknown
/// vocabularies pass through verbatim
fn vocabulary_system(vocabulary: &str) -> String {
    match vocabulary {
        "SNOMED" => "http://snomed.info/sct",
        "ICD10CM" => "http://hl7.org/fhir/sid/icd-10-cm",
        "ICD9CM" => "http://hl7.org/fhir/sid/icd-9-cm",
        "RxNorm" => "http://www.nlm.nih.gov/research/umls/rxnorm",
        "LOINC" => "http://loinc.org",
        "CPT4" => "http://www.ama-assn.org/go/cpt",
        "HCPCS" => "http://www.nlm.nih.gov/research/umls/hcpcs",
        "NDC" => "http://hl7.org/fhir/sid/ndc",
        other => other,
    }
    .to_string()
}

/// Atlas has shipped both "Concept Set Name" and "CONCEPT_SET_NAME" style
/// headers; compare with casing and separators stripped
fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

struct ColumnIndexes {
    set_name: usize,
    code: usize,
    name: usize,
    vocabulary: usize,
}

impl ColumnIndexes {
    fn from_headers(headers: &csv::StringRecord) -> Result<ColumnIndexes> {
        let mut indexes: HashMap<String, usize> = HashMap::new();
        for (i, header) in headers.iter().enumerate() {
            indexes.entry(normalize_header(header)).or_insert(i);
        }

        let lookup = |candidates: &[&str], label: &str| -> Result<usize> {
            candidates
                .iter()
                .find_map(|c| indexes.get(*c))
                .copied()
                .ok_or_else(|| TermError::MalformedRow {
                    reason: format!("missing required column '{label}'"),
                })
        };

        Ok(ColumnIndexes {
            set_name: lookup(&["conceptsetname"], "Concept Set Name")?,
            code: lookup(&["conceptcode"], "Concept Code")?,
            name: lookup(&["conceptname"], "Concept Name")?,
            vocabulary: lookup(&["vocabulary", "vocabularyid"], "Vocabulary")?,
        })
    }
}

/// Build one identity-bearing id from a concept set name
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Parse a concept export table into value sets, grouped by concept set
/// name, in first-appearance order
pub fn concept_csv_to_value_sets(data: &[u8]) -> Result<Vec<ValueSet>> {
    let mut reader = csv::ReaderBuilder::new().from_reader(data);

    let headers = reader.headers()?.clone();
    let columns = ColumnIndexes::from_headers(&headers)?;

    // Grouping preserves first-appearance order for sets and vocabularies
    let mut set_order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, Vec<(String, String, String)>> = HashMap::new();

    for (row_number, record) in reader.records().enumerate() {
        let record = record?;

        let field = |index: usize| record.get(index).unwrap_or("").trim().to_string();

        let set_name = field(columns.set_name);
        let code = field(columns.code);
        let vocabulary = field(columns.vocabulary);

        if set_name.is_empty() || code.is_empty() || vocabulary.is_empty() {
            return Err(TermError::MalformedRow {
                reason: format!(
                    "row {}: empty concept set name, code, or vocabulary",
                    row_number + 2
                ),
            });
        }

        if !grouped.contains_key(&set_name) {
            set_order.push(set_name.clone());
        }
        grouped
            .entry(set_name)
            .or_default()
            .push((vocabulary, code, field(columns.name)));
    }

    let mut value_sets = Vec::with_capacity(set_order.len());
    for set_name in set_order {
        let rows = grouped.remove(&set_name).unwrap_or_default();

        let mut system_order: Vec<String> = Vec::new();
        let mut by_system: HashMap<String, Vec<Concept>> = HashMap::new();
        for (vocabulary, code, display) in rows {
            let system = vocabulary_system(&vocabulary);
            if !by_system.contains_key(&system) {
                system_order.push(system.clone());
            }
            by_system.entry(system).or_default().push(Concept {
                code,
                display: (!display.is_empty()).then_some(display),
                extra: serde_json::Map::new(),
            });
        }

        let include = system_order
            .into_iter()
            .map(|system| {
                let concept = by_system.remove(&system).unwrap_or_default();
                IncludeRule {
                    system: Some(system),
                    concept,
                    ..Default::default()
                }
            })
            .collect();

        value_sets.push(ValueSet {
            id: Some(slugify(&set_name)),
            name: Some(set_name),
            status: Some("draft".to_string()),
            compose: Some(Compose {
                include,
                ..Default::default()
            }),
            ..Default::default()
        });
    }

    Ok(value_sets)
}

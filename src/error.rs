//! Error types and handling for termbundle
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Parse and dependency-resolution errors are caught at the smallest
//! enclosing unit (one artifact or one resource) and reported as a failed
//! ingestion outcome; they never abort sibling units.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for termbundle operations
#[derive(Error, Diagnostic, Debug)]
pub enum TermError {
    // Ingestion format errors
    #[error("Unsupported file format: {name}")]
    #[diagnostic(
        code(termbundle::ingest::unsupported_format),
        help("Supported inputs: FHIR JSON (ValueSet, CodeSystem, Bundle), OMOP concept CSV, and ZIP exports containing mappedConcepts.csv")
    )]
    UnsupportedFormat { name: String },

    #[error("Not a 'Bundle', 'ValueSet', or 'CodeSystem' resource: {resource_type}")]
    #[diagnostic(code(termbundle::ingest::unrecognized_resource_type))]
    UnrecognizedResourceType { resource_type: String },

    #[error("Malformed concept export: {reason}")]
    #[diagnostic(
        code(termbundle::ingest::malformed_row),
        help("Concept CSV exports need Concept Set Name, Concept Code, Concept Name and Vocabulary columns")
    )]
    MalformedRow { reason: String },

    #[error("'{member}' not found in ZIP file")]
    #[diagnostic(code(termbundle::ingest::required_member_missing))]
    RequiredMemberMissing { member: String },

    // Dependency resolution errors
    #[error("Unknown dependency type: {resource_type}")]
    #[diagnostic(
        code(termbundle::resolve::unknown_dependency_type),
        help("Value set dependencies must resolve to ValueSet or CodeSystem resources")
    )]
    UnknownDependencyType { resource_type: String },

    // Transport errors
    #[error("FHIR server request failed: {message}")]
    #[diagnostic(code(termbundle::client::network_failure))]
    NetworkFailure { message: String },

    #[error("Resource not found on server: {resource_type}/{id}")]
    #[diagnostic(code(termbundle::client::resource_not_found))]
    ResourceNotFound { resource_type: String, id: String },

    // Bundle store errors
    #[error("No bundle entry at index {index} (bundle has {len} entries)")]
    #[diagnostic(code(termbundle::bundle::index_out_of_range))]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Bundle already contains {resource_type} '{label}'")]
    #[diagnostic(code(termbundle::bundle::duplicate_entry))]
    DuplicateEntry {
        resource_type: String,
        label: String,
    },

    // Connection configuration errors
    #[error("Connection '{name}' not found in connections file")]
    #[diagnostic(
        code(termbundle::config::connection_not_found),
        help("List available connections with their names in connections.yaml")
    )]
    ConnectionNotFound { name: String },

    #[error("Connections file not found: {path}")]
    #[diagnostic(code(termbundle::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to parse connections file: {path}")]
    #[diagnostic(code(termbundle::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    // Serialization errors
    #[error("Failed to parse JSON document: {reason}")]
    #[diagnostic(code(termbundle::json::parse_failed))]
    JsonParseFailed { reason: String },

    #[error("Failed to read ZIP archive: {reason}")]
    #[diagnostic(code(termbundle::ingest::archive_read_failed))]
    ArchiveReadFailed { reason: String },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(termbundle::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(termbundle::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(termbundle::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for TermError {
    fn from(err: std::io::Error) -> Self {
        TermError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for TermError {
    fn from(err: serde_json::Error) -> Self {
        TermError::JsonParseFailed {
            reason: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for TermError {
    fn from(err: serde_yaml::Error) -> Self {
        TermError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for TermError {
    fn from(err: reqwest::Error) -> Self {
        TermError::NetworkFailure {
            message: err.to_string(),
        }
    }
}

impl From<csv::Error> for TermError {
    fn from(err: csv::Error) -> Self {
        TermError::MalformedRow {
            reason: err.to_string(),
        }
    }
}

impl From<zip::result::ZipError> for TermError {
    fn from(err: zip::result::ZipError) -> Self {
        TermError::ArchiveReadFailed {
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, TermError>;

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_error_contains {
        ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
            #[test]
            fn $test_name() {
                let err = $err;
                let error_string = err.to_string();
                $(
                    assert!(error_string.contains($contains),
                        "Error message should contain '{}', got: {}",
                        $contains,
                        error_string
                    );
                )+
            }
        };
    }

    #[test]
    fn test_error_code() {
        let err = TermError::UnsupportedFormat {
            name: "notes.txt".to_string(),
        };
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("termbundle::ingest::unsupported_format".to_string())
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let term_err: TermError = io_err.into();
        assert!(matches!(term_err, TermError::IoError { .. }));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str("not json");
        let json_err = parse_result.unwrap_err();
        let term_err: TermError = json_err.into();
        assert!(matches!(term_err, TermError::JsonParseFailed { .. }));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let parse_result: std::result::Result<serde_yaml::Value, _> =
            serde_yaml::from_str("invalid: yaml: content: [unclosed");
        let yaml_err = parse_result.unwrap_err();
        let term_err: TermError = yaml_err.into();
        assert!(matches!(term_err, TermError::ConfigParseFailed { .. }));
    }

    test_error_contains!(
        test_unsupported_format_error,
        TermError::UnsupportedFormat {
            name: "report.docx".to_string()
        },
        "Unsupported file format",
        "report.docx"
    );

    test_error_contains!(
        test_unrecognized_resource_type_error,
        TermError::UnrecognizedResourceType {
            resource_type: "Patient".to_string()
        },
        "Not a 'Bundle', 'ValueSet', or 'CodeSystem' resource",
        "Patient"
    );

    test_error_contains!(
        test_required_member_missing_error,
        TermError::RequiredMemberMissing {
            member: "mappedConcepts.csv".to_string()
        },
        "'mappedConcepts.csv' not found in ZIP file"
    );

    test_error_contains!(
        test_unknown_dependency_type_error,
        TermError::UnknownDependencyType {
            resource_type: "ConceptMap".to_string()
        },
        "Unknown dependency type",
        "ConceptMap"
    );

    test_error_contains!(
        test_index_out_of_range_error,
        TermError::IndexOutOfRange { index: 7, len: 3 },
        "index 7",
        "3 entries"
    );

    test_error_contains!(
        test_connection_not_found_error,
        TermError::ConnectionNotFound {
            name: "vsac".to_string()
        },
        "Connection 'vsac' not found"
    );
}

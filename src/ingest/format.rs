//! Input artifact classification
//!
//! An artifact is routed to an adapter by its declared media type first and
//! its file extension second; anything matching neither is rejected with
//! `UnsupportedFormat` before any adapter runs.

use std::path::Path;

use crate::error::{Result, TermError};

/// One top-level input artifact (a file) submitted for ingestion
#[derive(Debug, Clone)]
pub struct InputArtifact {
    /// Source label used in outcome reporting (usually the file name)
    pub name: String,

    /// Declared media type, when the caller knows it
    pub media_type: Option<String>,

    pub data: Vec<u8>,
}

impl InputArtifact {
    pub fn new(name: impl Into<String>, media_type: Option<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type,
            data,
        }
    }

    /// Read an artifact from disk; the media type is left undeclared and
    /// classification falls back to the extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| TermError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(name, None, data))
    }
}

/// The recognized input encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    /// Single FHIR resource or composite bundle document
    Json,
    /// OMOP Atlas concept export table
    Csv,
    /// ZIP archive of an OMOP Atlas export
    Zip,
}

impl ArtifactFormat {
    /// Classify an artifact, media type first, extension second
    pub fn classify(artifact: &InputArtifact) -> Result<ArtifactFormat> {
        if let Some(media_type) = artifact.media_type.as_deref() {
            if let Some(format) = Self::from_media_type(media_type) {
                return Ok(format);
            }
        }

        if let Some(format) = Self::from_extension(&artifact.name) {
            return Ok(format);
        }

        Err(TermError::UnsupportedFormat {
            name: artifact.name.clone(),
        })
    }

    fn from_media_type(media_type: &str) -> Option<ArtifactFormat> {
        // Parameters like "; charset=utf-8" are irrelevant here
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or(media_type)
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "application/json" | "application/fhir+json" => Some(ArtifactFormat::Json),
            "text/csv" => Some(ArtifactFormat::Csv),
            "application/zip" | "application/x-zip-compressed" => Some(ArtifactFormat::Zip),
            _ => None,
        }
    }

    fn from_extension(name: &str) -> Option<ArtifactFormat> {
        let extension = name.rsplit('.').next()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(ArtifactFormat::Json),
            "csv" => Some(ArtifactFormat::Csv),
            "zip" => Some(ArtifactFormat::Zip),
            _ => None,
        }
    }
}

//! Named FHIR server connections (connections.yaml)
//!
//! ```yaml
//! connections:
//!   - name: vsac
//!     base_url: https://cts.nlm.nih.gov/fhir
//!   - name: local
//!     base_url: http://localhost:8080/fhir
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TermError};

/// One named FHIR server endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FhirConnection {
    /// Name used to select the connection on the command line
    pub name: String,

    /// FHIR R4 base URL
    pub base_url: String,
}

/// The connections file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConnectionsConfig {
    #[serde(default)]
    pub connections: Vec<FhirConnection>,
}

impl ConnectionsConfig {
    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(TermError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let yaml = std::fs::read_to_string(path).map_err(|e| TermError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_yaml(&yaml).map_err(|e| TermError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Find a connection by name
    pub fn find(&self, name: &str) -> Result<&FhirConnection> {
        self.connections
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| TermError::ConnectionNotFound {
                name: name.to_string(),
            })
    }
}

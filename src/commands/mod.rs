//! Command implementations for the termbundle CLI

pub mod add;
pub mod expand;
pub mod export;
pub mod ingest;
pub mod list;
pub mod remove;
pub mod search;
pub mod submit;

use std::path::Path;

use termbundle::client::RestClient;
use termbundle::config::ConnectionsConfig;
use termbundle::error::Result;
use termbundle::fhir::Bundle;

/// Load the bundle file, or start a fresh empty bundle when it does not
/// exist yet
fn load_or_new_bundle(path: &Path) -> Result<Bundle> {
    if path.is_file() {
        Bundle::load(path)
    } else {
        Ok(Bundle::new())
    }
}

/// Open a client for a named connection from the connections file
fn connect(connections_path: &Path, name: &str) -> Result<RestClient> {
    let config = ConnectionsConfig::load(connections_path)?;
    let connection = config.find(name)?;
    Ok(RestClient::new(connection))
}

//! Canonical resource identity
//!
//! Two resource representations denote the same real-world resource when
//! their identity keys match. The key is the first available of: canonical
//! URL, first identifier (system, value) pair, plain id. A resource with
//! none of these is anonymous and never equal to anything, which prevents
//! false de-duplication of hand-built resources.

use super::resource::Identifier;

/// Identity key used for bundle membership tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceKey {
    /// Canonical URL (`ValueSet.url` / `CodeSystem.url`)
    Url(String),
    /// First identifier tuple
    Identifier {
        system: Option<String>,
        value: String,
    },
    /// Plain resource id
    Id(String),
}

impl ResourceKey {
    /// Derive the key for a resource from its identity fields, in precedence
    /// order. Returns `None` for anonymous resources.
    pub fn derive(
        url: Option<&str>,
        identifiers: &[Identifier],
        id: Option<&str>,
    ) -> Option<ResourceKey> {
        if let Some(url) = url.filter(|u| !u.is_empty()) {
            return Some(ResourceKey::Url(url.to_string()));
        }

        if let Some(identifier) = identifiers.first() {
            if let Some(value) = identifier.value.as_deref().filter(|v| !v.is_empty()) {
                return Some(ResourceKey::Identifier {
                    system: identifier.system.clone(),
                    value: value.to_string(),
                });
            }
        }

        id.filter(|i| !i.is_empty())
            .map(|i| ResourceKey::Id(i.to_string()))
    }
}

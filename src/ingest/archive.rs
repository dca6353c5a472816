//! ZIP archive adapter for OMOP Atlas exports
//!
//! An `exportedConceptSet` ZIP from Atlas carries several concept tables;
//! only `mappedConcepts.csv` is read and everything else is ignored. Some
//! exports wrap their contents in a folder, so the member is accepted at any
//! depth.

use std::io::{Cursor, Read};

use tracing::debug;

use crate::error::{Result, TermError};
use crate::fhir::ValueSet;

/// The single member file the adapter reads
pub const REQUIRED_MEMBER: &str = "mappedConcepts.csv";

/// Parse an archive artifact into value sets by delegating the required
/// member to the CSV adapter
pub fn archive_to_value_sets(data: &[u8]) -> Result<Vec<ValueSet>> {
    let member = read_required_member(data)?;
    super::csv::concept_csv_to_value_sets(&member)
}

fn read_required_member(data: &[u8]) -> Result<Vec<u8>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;

    let member_index = (0..archive.len()).find(|&i| {
        archive
            .by_index(i)
            .map(|entry| {
                !entry.is_dir()
                    && entry
                        .name()
                        .rsplit(['/', '\\'])
                        .next()
                        .is_some_and(|segment| segment == REQUIRED_MEMBER)
            })
            .unwrap_or(false)
    });

    let Some(index) = member_index else {
        return Err(TermError::RequiredMemberMissing {
            member: REQUIRED_MEMBER.to_string(),
        });
    };

    let mut entry = archive.by_index(index)?;
    debug!(member = entry.name(), "reading archive member");

    let mut contents = Vec::with_capacity(entry.size() as usize);
    entry
        .read_to_end(&mut contents)
        .map_err(|e| TermError::ArchiveReadFailed {
            reason: e.to_string(),
        })?;
    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::zip_archive;

    const EXPORT: &str = "\
Concept Set Name,Concept Code,Concept Name,Vocabulary
Diabetes,44054006,Type 2 diabetes mellitus,SNOMED
";

    #[test]
    fn test_reads_member_at_root() {
        let data = zip_archive(&[("mappedConcepts.csv", EXPORT)]);
        let value_sets = archive_to_value_sets(&data).unwrap();
        assert_eq!(value_sets.len(), 1);
        assert_eq!(value_sets[0].name.as_deref(), Some("Diabetes"));
    }

    #[test]
    fn test_reads_member_in_subdirectory() {
        let data = zip_archive(&[("exportedConceptSet/mappedConcepts.csv", EXPORT)]);
        let value_sets = archive_to_value_sets(&data).unwrap();
        assert_eq!(value_sets.len(), 1);
    }

    #[test]
    fn test_other_members_ignored() {
        let data = zip_archive(&[
            ("includedConcepts.csv", "some,other,table\n"),
            ("mappedConcepts.csv", EXPORT),
            ("readme.txt", "notes"),
        ]);
        let value_sets = archive_to_value_sets(&data).unwrap();
        assert_eq!(value_sets.len(), 1);
    }

    #[test]
    fn test_missing_member_rejected() {
        let data = zip_archive(&[("includedConcepts.csv", EXPORT)]);
        let err = archive_to_value_sets(&data).unwrap_err();
        assert!(matches!(
            err,
            TermError::RequiredMemberMissing { member } if member == "mappedConcepts.csv"
        ));
    }

    #[test]
    fn test_not_an_archive() {
        let err = archive_to_value_sets(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, TermError::ArchiveReadFailed { .. }));
    }
}

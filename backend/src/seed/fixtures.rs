//! Fixture directory access.
//!
//! Fixture files live in one directory, one JSON array per entity type,
//! named by the declared file stems on [`EntityKind`]. The directory is
//! opened once through a capability handle; reads never escape it.

use std::path::Path;

use cap_std::{ambient_authority, fs::Dir};

use crate::domain::{EntityKind, EntityRecords, FixtureError};

/// Read-only handle on the directory holding the fixture files.
#[derive(Debug)]
pub struct FixtureDirectory {
    dir: Dir,
}

impl FixtureDirectory {
    /// Open the fixture directory.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::OpenDirectory`] when the directory does not
    /// exist or cannot be opened.
    pub fn open(path: &Path) -> Result<Self, FixtureError> {
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(|source| {
            FixtureError::OpenDirectory {
                path: path.display().to_string(),
                source,
            }
        })?;
        Ok(Self { dir })
    }

    /// Read and decode the fixture file for one entity type.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Read`] when the file is missing or unreadable
    /// and the parse errors from [`EntityRecords::parse`] otherwise.
    pub fn load(&self, kind: EntityKind) -> Result<EntityRecords, FixtureError> {
        let file = kind.fixture_file_name();
        let payload = self
            .dir
            .read_to_string(&file)
            .map_err(|source| FixtureError::Read {
                file: file.clone(),
                source,
            })?;
        EntityRecords::parse(kind, &payload, &file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture_dir(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("create temp dir");
        for (name, contents) in files {
            fs::write(dir.path().join(name), contents).expect("write fixture");
        }
        dir
    }

    #[test]
    fn load_reads_the_declared_file_for_the_entity_type() {
        let dir = fixture_dir(&[("team.json", r#"[{"id": 1, "teamName": "Core"}]"#)]);
        let fixtures = FixtureDirectory::open(dir.path()).expect("open");

        let records = fixtures.load(EntityKind::Team).expect("load");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn load_reports_missing_files_as_read_errors() {
        let dir = fixture_dir(&[]);
        let fixtures = FixtureDirectory::open(dir.path()).expect("open");

        let err = fixtures
            .load(EntityKind::Comment)
            .expect_err("missing file");
        assert!(matches!(err, FixtureError::Read { .. }));
        assert!(err.to_string().contains("comment.json"));
    }

    #[test]
    fn open_reports_missing_directories() {
        let dir = fixture_dir(&[]);
        let missing = dir.path().join("nope");
        let err = FixtureDirectory::open(&missing).expect_err("missing dir");
        assert!(matches!(err, FixtureError::OpenDirectory { .. }));
    }
}

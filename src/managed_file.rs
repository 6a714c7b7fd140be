//! One named store: template lookup, copy-on-first-access and whole-file I/O

use crate::error::StoreError;
use crate::storage::{Locations, read_dictionary, write_dictionary};
use plist::Dictionary;
use std::fs;
use std::path::{Path, PathBuf};

/// A store whose writable copy has been materialized from its template
///
/// Constructing one is cheap once the copy exists: only paths are recomputed.
#[derive(Clone, Debug)]
pub struct ManagedFile {
    name: String,
    template: PathBuf,
    writable: PathBuf,
}

impl ManagedFile {
    /// Resolve the store `name` and copy its template into the documents
    /// directory if no writable copy exists yet
    ///
    /// An existing writable copy is never touched, so repeated calls are
    /// idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TemplateMissing`] when there is no bundled
    /// template, and [`StoreError::Copy`] when the copy cannot be made.
    pub fn initialize(name: &str, locations: &Locations) -> Result<Self, StoreError> {
        let template = locations.template_path(name);
        let writable = locations.writable_path(name);

        if !template.is_file() {
            return Err(StoreError::TemplateMissing {
                name: name.to_string(),
                path: template,
            });
        }

        if !writable.exists() {
            let copy = |dest: &Path| -> std::io::Result<()> {
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(&template, dest)?;
                Ok(())
            };
            copy(&writable).map_err(|source| StoreError::Copy {
                name: name.to_string(),
                source,
            })?;
        }

        Ok(Self {
            name: name.to_string(),
            template,
            writable,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template_path(&self) -> &Path {
        &self.template
    }

    pub fn writable_path(&self) -> &Path {
        &self.writable
    }

    /// Load the whole mapping from the writable copy
    pub fn load(&self) -> Result<Dictionary, StoreError> {
        read_dictionary(&self.writable)
    }

    /// Load the mapping for a read-modify-write cycle
    ///
    /// Returns `None` if the file is gone or cannot be parsed.
    pub fn load_mutable(&self) -> Option<Dictionary> {
        self.load().ok()
    }

    /// Replace the writable copy with `dict`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StoreMissing`] if the writable copy was removed
    /// since initialization, or [`StoreError::Write`] if persisting fails.
    pub fn overwrite(&self, dict: &Dictionary) -> Result<(), StoreError> {
        if !self.writable.exists() {
            return Err(StoreError::StoreMissing {
                path: self.writable.clone(),
            });
        }
        write_dictionary(&self.writable, dict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plist::Value;
    use tempfile::TempDir;

    fn setup(entries: &[(&str, Value)]) -> (TempDir, Locations) {
        let dir = TempDir::new().unwrap();
        let templates = dir.path().join("bundle");
        fs::create_dir_all(&templates).unwrap();

        let mut dict = Dictionary::new();
        for (key, value) in entries {
            dict.insert(key.to_string(), value.clone());
        }
        Value::Dictionary(dict)
            .to_file_xml(templates.join("Settings.plist"))
            .unwrap();

        let locations = Locations::new(templates, dir.path().join("docs"));
        (dir, locations)
    }

    #[test]
    fn initialize_copies_template() {
        let (_dir, locations) = setup(&[("theme", Value::from("light"))]);

        let file = ManagedFile::initialize("Settings", &locations).unwrap();
        assert!(file.writable_path().exists());
        assert_eq!(file.name(), "Settings");

        let dict = file.load().unwrap();
        assert_eq!(dict.get("theme"), Some(&Value::from("light")));
    }

    #[test]
    fn initialize_fails_without_template() {
        let (_dir, locations) = setup(&[]);

        let err = ManagedFile::initialize("Missing", &locations).unwrap_err();
        assert!(matches!(err, StoreError::TemplateMissing { .. }));
        assert!(!locations.writable_path("Missing").exists());
    }

    #[test]
    fn initialize_is_idempotent() {
        let (_dir, locations) = setup(&[("theme", Value::from("light"))]);

        let file = ManagedFile::initialize("Settings", &locations).unwrap();
        let mut dict = file.load().unwrap();
        dict.insert("volume".to_string(), Value::from(7i64));
        file.overwrite(&dict).unwrap();

        let again = ManagedFile::initialize("Settings", &locations).unwrap();
        assert_eq!(again.load().unwrap(), dict);
    }

    #[test]
    fn load_reports_externally_deleted_copy() {
        let (_dir, locations) = setup(&[]);

        let file = ManagedFile::initialize("Settings", &locations).unwrap();
        fs::remove_file(file.writable_path()).unwrap();

        assert!(matches!(
            file.load().unwrap_err(),
            StoreError::StoreMissing { .. }
        ));
        assert!(file.load_mutable().is_none());
        assert!(matches!(
            file.overwrite(&Dictionary::new()).unwrap_err(),
            StoreError::StoreMissing { .. }
        ));
        assert!(!file.writable_path().exists());
    }

    #[test]
    fn copy_failure_is_reported() {
        let (dir, _) = setup(&[]);
        // a regular file where the documents directory should be
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();
        let locations = Locations::new(dir.path().join("bundle"), blocker.join("docs"));

        let err = ManagedFile::initialize("Settings", &locations).unwrap_err();
        assert!(matches!(err, StoreError::Copy { .. }));
    }
}

//! Storage locations and whole-file plist reads and writes

use crate::app_name::AppName;
use crate::error::StoreError;
use plist::{Dictionary, Value};
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

/// File extension shared by templates and writable copies
pub const EXTENSION: &str = "plist";

/// The two directory roots a store is resolved against
///
/// Templates are the read-only originals shipped with the application. The
/// documents directory holds the mutable per-installation copies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locations {
    templates: PathBuf,
    documents: PathBuf,
}

impl Locations {
    /// Use explicit template and documents directories
    pub fn new(templates: impl Into<PathBuf>, documents: impl Into<PathBuf>) -> Self {
        Self {
            templates: templates.into(),
            documents: documents.into(),
        }
    }

    /// Resolve both directories for an application
    ///
    /// Writable copies go to [`AppName::documents_dir`]. Templates are looked
    /// up in a `resources` directory next to the running executable.
    pub fn for_app(app_name: &AppName) -> Self {
        let documents = app_name.documents_dir();

        let templates = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("resources");

        Self {
            templates,
            documents,
        }
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates
    }

    pub fn documents_dir(&self) -> &Path {
        &self.documents
    }

    /// Path of the bundled template for `name`
    pub fn template_path(&self, name: &str) -> PathBuf {
        self.templates.join(file_name(name))
    }

    /// Path of the writable copy for `name`
    pub fn writable_path(&self, name: &str) -> PathBuf {
        self.documents.join(file_name(name))
    }
}

fn file_name(name: &str) -> String {
    format!("{}.{}", name, EXTENSION)
}

/// Read a plist file whose root is a dictionary
///
/// # Errors
///
/// Returns [`StoreError::StoreMissing`] if the file is absent,
/// [`StoreError::Parse`] if it cannot be decoded and
/// [`StoreError::NotADictionary`] if the root is any other value.
pub fn read_dictionary(path: &Path) -> Result<Dictionary, StoreError> {
    if !path.exists() {
        return Err(StoreError::StoreMissing {
            path: path.to_path_buf(),
        });
    }

    let value = Value::from_file(path).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    value
        .into_dictionary()
        .ok_or_else(|| StoreError::NotADictionary {
            path: path.to_path_buf(),
        })
}

/// Replace the file at `path` with `dict` serialized as XML
///
/// The data goes to a sibling temporary file first and is renamed into place,
/// so readers observe either the old contents or the new ones.
pub fn write_dictionary(path: &Path, dict: &Dictionary) -> Result<(), StoreError> {
    let tmp_path = temp_path(path);

    let result = (|| -> io::Result<()> {
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        plist::to_writer_xml(&mut writer, dict)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    })();

    if let Err(source) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn paths_use_store_name_and_extension() {
        let locations = Locations::new("/bundle", "/docs");
        assert_eq!(
            locations.template_path("Settings"),
            PathBuf::from("/bundle/Settings.plist")
        );
        assert_eq!(
            locations.writable_path("Settings"),
            PathBuf::from("/docs/Settings.plist")
        );
    }

    #[test]
    fn for_app_places_documents_under_app_data() {
        let locations = Locations::for_app(&AppName::new("com", "example", "plisttest"));
        assert!(locations.documents_dir().ends_with("documents"));
        assert!(locations.templates_dir().ends_with("resources"));
    }

    #[test]
    fn write_then_read_keeps_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Data.plist");
        let mut dict = Dictionary::new();
        dict.insert("name".to_string(), Value::from("plist"));
        dict.insert("count".to_string(), Value::from(3i64));
        dict.insert("data".to_string(), Value::Data(vec![1, 2, 3]));
        write_dictionary(&path, &dict).unwrap();

        let loaded = read_dictionary(&path).unwrap();
        assert_eq!(loaded, dict);
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn read_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_dictionary(&dir.path().join("Nope.plist")).unwrap_err();
        assert!(matches!(err, StoreError::StoreMissing { .. }));
    }

    #[test]
    fn read_rejects_non_dictionary_root() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Array.plist");
        Value::Array(vec![Value::from(1i64)])
            .to_file_xml(&path)
            .unwrap();

        let err = read_dictionary(&path).unwrap_err();
        assert!(matches!(err, StoreError::NotADictionary { .. }));
    }

    #[test]
    fn read_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Broken.plist");
        fs::write(&path, b"definitely not a plist").unwrap();

        let err = read_dictionary(&path).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }
}

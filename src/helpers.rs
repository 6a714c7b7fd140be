//! Typed access on top of raw plist values
//!
//! These helpers let callers store any `Serialize` type and read entries back
//! into `DeserializeOwned` types, converting through the plist serde format.

use crate::error::StoreError;
use crate::manager::StoreManager;
use crate::outcome::{AddOutcome, Lookup};
use plist::Value;
use serde::{Serialize, de::DeserializeOwned};
use std::io::Cursor;

/// Convert a serializable value into a plist value
///
/// Structs and maps become dictionaries, sequences become arrays.
///
/// # Errors
///
/// Returns [`StoreError::Codec`] if the type cannot be represented in a plist
/// (for example a unit value or a map with non-string keys).
pub fn to_value<T>(value: &T) -> Result<Value, StoreError>
where
    T: Serialize,
{
    let mut buf = Vec::new();
    plist::to_writer_xml(&mut buf, value)?;
    Ok(Value::from_reader(Cursor::new(buf))?)
}

/// Convert a plist value into a deserializable type
pub fn from_value<T>(value: Value) -> Result<T, StoreError>
where
    T: DeserializeOwned,
{
    let mut buf = Vec::new();
    value.to_writer_xml(&mut buf)?;
    Ok(plist::from_bytes(&buf)?)
}

impl StoreManager {
    /// Serialize `value` and add it under `key`
    ///
    /// # Example
    ///
    /// ```no_run
    /// use plist_store::{AppName, StoreManager};
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct Window { width: u32, height: u32 }
    ///
    /// let manager = StoreManager::for_app(&AppName::new("com", "example", "myapp"));
    /// let window = Window { width: 800, height: 600 };
    /// manager.add_serialized(&window, "window", "Settings").unwrap();
    /// ```
    pub fn add_serialized<T>(
        &self,
        value: &T,
        key: &str,
        store: &str,
    ) -> Result<AddOutcome, StoreError>
    where
        T: Serialize,
    {
        let value = to_value(value)?;
        Ok(self.add_entry(value, key, store))
    }

    /// Read `key` and deserialize it
    ///
    /// Returns `Ok(None)` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StoreUnavailable`] if the store cannot be loaded
    /// and [`StoreError::Codec`] if the stored value does not match `T`.
    pub fn check_value_as<T>(&self, key: &str, store: &str) -> Result<Option<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        match self.check_value(key, store) {
            Lookup::Found(value) => from_value(value).map(Some),
            Lookup::NotFound => Ok(None),
            Lookup::StoreUnavailable => Err(StoreError::StoreUnavailable {
                name: store.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Locations;
    use plist::Dictionary;
    use serde::Deserialize;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        theme: String,
        font_size: u32,
        auto_save: bool,
    }

    fn manager() -> (TempDir, StoreManager) {
        let dir = TempDir::new().unwrap();
        let templates = dir.path().join("bundle");
        fs::create_dir_all(&templates).unwrap();
        Value::Dictionary(Dictionary::new())
            .to_file_xml(templates.join("Prefs.plist"))
            .unwrap();
        let manager = StoreManager::new(Locations::new(templates, dir.path().join("docs")));
        (dir, manager)
    }

    #[test]
    fn struct_becomes_dictionary() {
        let prefs = Prefs {
            theme: "dark".to_string(),
            font_size: 14,
            auto_save: true,
        };

        let value = to_value(&prefs).unwrap();
        let dict = value.as_dictionary().unwrap();
        assert_eq!(dict.get("theme"), Some(&Value::from("dark")));
        assert_eq!(dict.get("font_size"), Some(&Value::from(14u64)));
        assert_eq!(dict.get("auto_save"), Some(&Value::from(true)));
    }

    #[test]
    fn add_serialized_then_read_back() {
        let (_dir, manager) = manager();
        let prefs = Prefs {
            theme: "dark".to_string(),
            font_size: 16,
            auto_save: false,
        };

        assert_eq!(
            manager.add_serialized(&prefs, "user", "Prefs").unwrap(),
            AddOutcome::Accepted
        );
        assert_eq!(manager.check_value_as::<Prefs>("user", "Prefs").unwrap(), Some(prefs));
        assert_eq!(manager.check_value_as::<Prefs>("other", "Prefs").unwrap(), None);
    }

    #[test]
    fn mismatched_type_is_a_codec_error() {
        let (_dir, manager) = manager();
        manager.add_entry("not a number", "count", "Prefs");

        let err = manager.check_value_as::<u32>("count", "Prefs").unwrap_err();
        assert!(matches!(err, StoreError::Codec(_)));
    }

    #[test]
    fn unavailable_store_is_an_error() {
        let (_dir, manager) = manager();
        let err = manager.check_value_as::<String>("k", "Ghost").unwrap_err();
        assert!(matches!(err, StoreError::StoreUnavailable { .. }));
    }
}

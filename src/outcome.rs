//! Outcome values reported by the store operations
//!
//! Rejections such as an existing key are not faults, so every operation
//! reports one of these enums instead of an error.

use plist::Value;

/// Result of [`StoreManager::add_entry`](crate::StoreManager::add_entry)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    /// The entry was inserted and written
    Accepted,
    /// The key was already present; nothing was written
    KeyExists,
    /// The store could not be initialized or loaded
    StoreUnavailable,
    /// The updated mapping could not be written back
    WriteFailed,
}

/// Result of [`StoreManager::remove_entry`](crate::StoreManager::remove_entry)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    KeyAbsent,
    StoreUnavailable,
    WriteFailed,
}

/// Result of [`StoreManager::save_entry`](crate::StoreManager::save_entry)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The existing value was replaced
    Saved,
    /// The key must be added before it can be saved
    KeyAbsent,
    StoreUnavailable,
    WriteFailed,
}

/// Result of [`StoreManager::purge_all`](crate::StoreManager::purge_all)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PurgeOutcome {
    Purged,
    /// The store had no entries; nothing was written
    AlreadyEmpty,
    StoreUnavailable,
    WriteFailed,
}

/// Result of [`StoreManager::check_value`](crate::StoreManager::check_value)
///
/// # Example
///
/// ```
/// use plist_store::{Lookup, Value};
///
/// fn describe(lookup: Lookup) -> String {
///     match lookup {
///         Lookup::Found(Value::String(s)) => format!("found '{}'", s),
///         Lookup::Found(other) => format!("found {:?}", other),
///         Lookup::NotFound => "not found".to_string(),
///         Lookup::StoreUnavailable => "store unavailable".to_string(),
///     }
/// }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Lookup {
    Found(Value),
    NotFound,
    StoreUnavailable,
}

impl Lookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// The value, if one was found
    pub fn value(&self) -> Option<&Value> {
        match self {
            Lookup::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Lookup::Found(value) => Some(value),
            _ => None,
        }
    }
}

//! Application identity and the writable directory derived from it

use std::path::PathBuf;

/// Names the application whose stores are being managed
///
/// Only the writable side depends on it: copies of the bundled templates live
/// in a `documents` folder under the application's local data directory.
/// Templates themselves ship with the executable and are resolved by
/// [`Locations`](crate::Locations).
///
/// # Example
///
/// ```
/// use plist_store::AppName;
///
/// let app_name = AppName::new("com", "example", "myapp");
/// assert!(app_name.documents_dir().ends_with("documents"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppName {
    pub qualifier: String,
    pub organization: String,
    pub application: String,
}

impl AppName {
    /// `qualifier` is usually a reverse domain ("com"), `organization` the
    /// vendor and `application` the program name.
    pub fn new(
        qualifier: impl Into<String>,
        organization: impl Into<String>,
        application: impl Into<String>,
    ) -> Self {
        Self {
            qualifier: qualifier.into(),
            organization: organization.into(),
            application: application.into(),
        }
    }

    /// Directory holding the writable store copies
    ///
    /// - Linux: `$XDG_DATA_HOME/<app>/documents` or `~/.local/share/<app>/documents`
    /// - macOS: `~/Library/Application Support/<app>/documents`
    /// - Windows: `%LOCALAPPDATA%\<org>\<app>\data\documents`
    ///
    /// Falls back to `./documents` when no home directory can be determined.
    pub fn documents_dir(&self) -> PathBuf {
        directories::ProjectDirs::from(&self.qualifier, &self.organization, &self.application)
            .map(|dirs| dirs.data_local_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("documents")
    }
}

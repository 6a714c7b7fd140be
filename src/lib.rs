//! Plist Store
//!
//! Key-value persistence over property-list files. Each store starts life as a
//! template bundled with the application (`<name>.plist`). On first use the
//! template is copied into a writable per-installation directory, and every
//! later operation reads and rewrites that copy.
//!
//! # Features
//!
//! - Copy-on-first-access of bundled templates
//! - Add, save, remove, purge and lookup of entries by exact key
//! - Whole-file atomic rewrites
//! - Typed access through serde
//! - Optional async facade (`tokio` feature)
//!
//! # Example
//!
//! ```no_run
//! use plist_store::{AddOutcome, AppName, Lookup, RemoveOutcome, StoreManager, Value};
//!
//! let mut manager = StoreManager::for_app(&AppName::new("com", "example", "myapp"));
//! manager.start_up(["Settings"], true);
//!
//! assert_eq!(manager.add_entry("dark", "theme", "Settings"), AddOutcome::Accepted);
//! assert_eq!(manager.add_entry("light", "theme", "Settings"), AddOutcome::KeyExists);
//! assert_eq!(
//!     manager.check_value("theme", "Settings"),
//!     Lookup::Found(Value::from("dark"))
//! );
//! assert_eq!(manager.remove_entry("theme", "Settings"), RemoveOutcome::Removed);
//! ```

mod app_name;
mod error;
mod helpers;
mod managed_file;
mod manager;
#[cfg(feature = "tokio")]
mod nonblocking;
mod outcome;
mod storage;

pub use app_name::AppName;
pub use error::StoreError;
pub use helpers::{from_value, to_value};
pub use managed_file::ManagedFile;
pub use manager::StoreManager;
#[cfg(feature = "tokio")]
pub use nonblocking::AsyncStoreManager;
pub use outcome::{AddOutcome, Lookup, PurgeOutcome, RemoveOutcome, SaveOutcome};
pub use plist::{Dictionary, Value};
pub use storage::{EXTENSION, Locations, read_dictionary, write_dictionary};

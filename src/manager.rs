//! The key-value API over named stores

use crate::app_name::AppName;
use crate::managed_file::ManagedFile;
use crate::outcome::{AddOutcome, Lookup, PurgeOutcome, RemoveOutcome, SaveOutcome};
use crate::storage::Locations;
use plist::{Dictionary, Value};

/// Emit a tracing event only when the manager was started with logging on
macro_rules! store_log {
    ($manager:expr, $level:ident, $($arg:tt)+) => {
        if $manager.logging {
            tracing::$level!(target: "plist_store", $($arg)+);
        }
    };
}

/// Coordinates the named stores of one application
///
/// Every operation re-opens the store, loads the whole mapping, applies one
/// change and writes the whole mapping back. Nothing is cached between calls.
///
/// There is no locking: two overlapping mutations of the same store can each
/// load a mapping that lacks the other's change, and the last write wins.
///
/// # Example
///
/// ```no_run
/// use plist_store::{AddOutcome, AppName, Lookup, StoreManager, Value};
///
/// let mut manager = StoreManager::for_app(&AppName::new("com", "example", "myapp"));
/// manager.start_up(["Settings"], true);
///
/// assert_eq!(manager.add_entry("dark", "theme", "Settings"), AddOutcome::Accepted);
/// assert_eq!(
///     manager.check_value("theme", "Settings"),
///     Lookup::Found(Value::from("dark"))
/// );
/// ```
#[derive(Clone, Debug)]
pub struct StoreManager {
    locations: Locations,
    logging: bool,
}

impl StoreManager {
    /// Create a manager over explicit locations, with logging disabled
    pub fn new(locations: Locations) -> Self {
        Self {
            locations,
            logging: false,
        }
    }

    /// Create a manager using the platform directories of `app_name`
    pub fn for_app(app_name: &AppName) -> Self {
        Self::new(Locations::for_app(app_name))
    }

    pub fn locations(&self) -> &Locations {
        &self.locations
    }

    pub fn logging_enabled(&self) -> bool {
        self.logging
    }

    /// Set the logging flag and materialize every named store
    ///
    /// Initialization is best-effort: a store that fails is logged and
    /// skipped. Use [`is_available`](Self::is_available) to confirm a store.
    pub fn start_up<I, S>(&mut self, names: I, logging: bool)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.logging = logging;
        store_log!(self, info, "starting plist store");

        let mut count = 0usize;
        for name in names {
            let name = name.as_ref();
            count += 1;
            match ManagedFile::initialize(name, &self.locations) {
                Ok(_) => store_log!(self, info, "{}.plist initialised", name),
                Err(err) => store_log!(self, error, store = name, "initialisation failed: {}", err),
            }
        }

        if count > 1 {
            store_log!(self, info, "finished initialising {} plists", count);
        } else {
            store_log!(self, info, "plist finished initialising");
        }
    }

    /// Insert `key → value` unless `key` is already present
    pub fn add_entry(&self, value: impl Into<Value>, key: &str, store: &str) -> AddOutcome {
        let value = value.into();
        store_log!(self, info, "attempting to add {:?} for '{}' to {}.plist", value, key, store);

        match self.lookup(key, store) {
            Lookup::StoreUnavailable => return AddOutcome::StoreUnavailable,
            Lookup::Found(_) => {
                store_log!(self, warn, "'{}' already exists, not overwritten", key);
                return AddOutcome::KeyExists;
            }
            Lookup::NotFound => {}
        }

        let Some((file, mut dict)) = self.load_mutable(store) else {
            return AddOutcome::StoreUnavailable;
        };
        dict.insert(key.to_string(), value);

        if self.write(&file, &dict) {
            AddOutcome::Accepted
        } else {
            AddOutcome::WriteFailed
        }
    }

    /// Replace the value of an existing key
    ///
    /// Keys have to be added with [`add_entry`](Self::add_entry) first. A
    /// warning is logged when the new value has a different plist type than
    /// the stored one.
    pub fn save_entry(&self, value: impl Into<Value>, key: &str, store: &str) -> SaveOutcome {
        let value = value.into();
        store_log!(self, info, "attempting to save {:?} for '{}' in {}.plist", value, key, store);

        match self.lookup(key, store) {
            Lookup::StoreUnavailable => return SaveOutcome::StoreUnavailable,
            Lookup::NotFound => {
                store_log!(self, warn, "'{}' cannot be saved before having been added", key);
                return SaveOutcome::KeyAbsent;
            }
            Lookup::Found(current) => {
                if value_kind(&current) != value_kind(&value) {
                    store_log!(
                        self,
                        warn,
                        "saving {} over {} for '{}', readers expecting the old type will fail",
                        value_kind(&value),
                        value_kind(&current),
                        key
                    );
                }
            }
        }

        let Some((file, mut dict)) = self.load_mutable(store) else {
            return SaveOutcome::StoreUnavailable;
        };
        dict.insert(key.to_string(), value);

        if self.write(&file, &dict) {
            SaveOutcome::Saved
        } else {
            SaveOutcome::WriteFailed
        }
    }

    /// Remove `key` if it is present
    pub fn remove_entry(&self, key: &str, store: &str) -> RemoveOutcome {
        store_log!(self, info, "attempting to remove '{}' from {}.plist", key, store);

        match self.lookup(key, store) {
            Lookup::StoreUnavailable => return RemoveOutcome::StoreUnavailable,
            Lookup::NotFound => {
                store_log!(
                    self,
                    warn,
                    "nothing to remove, '{}' does not exist in {}.plist",
                    key,
                    store
                );
                return RemoveOutcome::KeyAbsent;
            }
            Lookup::Found(_) => {}
        }

        let Some((file, mut dict)) = self.load_mutable(store) else {
            return RemoveOutcome::StoreUnavailable;
        };
        dict.remove(key);

        if self.write(&file, &dict) {
            RemoveOutcome::Removed
        } else {
            RemoveOutcome::WriteFailed
        }
    }

    /// Remove every entry, keeping the (now empty) store file
    pub fn purge_all(&self, store: &str) -> PurgeOutcome {
        store_log!(self, info, "attempting to purge all values from {}.plist", store);

        let Some((file, mut dict)) = self.load_mutable(store) else {
            return PurgeOutcome::StoreUnavailable;
        };

        if dict.is_empty() {
            store_log!(self, warn, "{}.plist is already empty", store);
            return PurgeOutcome::AlreadyEmpty;
        }
        dict.clear();

        if self.write(&file, &dict) {
            PurgeOutcome::Purged
        } else {
            PurgeOutcome::WriteFailed
        }
    }

    /// Look up `key` by exact match
    pub fn check_value(&self, key: &str, store: &str) -> Lookup {
        store_log!(self, info, "checking if '{}' exists in {}.plist", key, store);

        let lookup = self.lookup(key, store);
        match &lookup {
            Lookup::Found(value) => store_log!(self, info, "'{}' found: {:?}", key, value),
            Lookup::NotFound => {
                store_log!(self, info, "'{}' does not exist in {}.plist", key, store)
            }
            Lookup::StoreUnavailable => {}
        }
        lookup
    }

    /// Whether `key` is present; `false` when the store is unavailable
    pub fn key_exists(&self, key: &str, store: &str) -> bool {
        self.lookup(key, store).is_found()
    }

    /// Log every entry of `store`; does nothing when logging is disabled
    pub fn reveal_all(&self, store: &str) {
        if !self.logging {
            return;
        }
        store_log!(self, info, "revealing all values in {}.plist", store);

        if let Some((_, dict)) = self.load(store) {
            self.log_contents(store, &dict);
        }
    }

    /// Whether `store` can be initialized and loaded right now
    pub fn is_available(&self, store: &str) -> bool {
        self.load(store).is_some()
    }

    /// All keys of `store`, or `None` when it is unavailable
    pub fn keys(&self, store: &str) -> Option<Vec<String>> {
        self.load(store)
            .map(|(_, dict)| dict.keys().cloned().collect())
    }

    fn open(&self, store: &str) -> Option<ManagedFile> {
        match ManagedFile::initialize(store, &self.locations) {
            Ok(file) => Some(file),
            Err(err) => {
                store_log!(self, error, store, "unable to open {}.plist: {}", store, err);
                None
            }
        }
    }

    fn load(&self, store: &str) -> Option<(ManagedFile, Dictionary)> {
        let file = self.open(store)?;
        match file.load() {
            Ok(dict) => Some((file, dict)),
            Err(err) => {
                store_log!(self, error, store, "unable to load {}.plist: {}", store, err);
                None
            }
        }
    }

    fn load_mutable(&self, store: &str) -> Option<(ManagedFile, Dictionary)> {
        let file = self.open(store)?;
        let Some(dict) = file.load_mutable() else {
            store_log!(self, error, store, "unable to load {}.plist for writing", store);
            return None;
        };
        Some((file, dict))
    }

    fn lookup(&self, key: &str, store: &str) -> Lookup {
        let Some((_, dict)) = self.load(store) else {
            return Lookup::StoreUnavailable;
        };
        match dict.get(key) {
            Some(value) => Lookup::Found(value.clone()),
            None => Lookup::NotFound,
        }
    }

    fn write(&self, file: &ManagedFile, dict: &Dictionary) -> bool {
        match file.overwrite(dict) {
            Ok(()) => {
                store_log!(self, debug, "checking for changes in {}.plist", file.name());
                self.log_contents(file.name(), dict);
                true
            }
            Err(err) => {
                store_log!(self, error, store = file.name(), "write failed: {}", err);
                false
            }
        }
    }

    fn log_contents(&self, store: &str, dict: &Dictionary) {
        if dict.is_empty() {
            store_log!(self, debug, "no values in {}.plist", store);
            return;
        }
        for (key, value) in dict.iter() {
            store_log!(self, debug, store, "{} = {:?}", key, value);
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Array(_) => "array",
        Value::Dictionary(_) => "dictionary",
        Value::Boolean(_) => "boolean",
        Value::Data(_) => "data",
        Value::Date(_) => "date",
        Value::Real(_) => "real",
        Value::Integer(_) => "integer",
        Value::String(_) => "string",
        Value::Uid(_) => "uid",
        _ => "unknown",
    }
}

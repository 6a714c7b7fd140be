//! Faults raised while materializing, reading or writing a store file

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no bundled template for '{name}' at {path}")]
    TemplateMissing { name: String, path: PathBuf },

    #[error("cannot copy template for '{name}': {source}")]
    Copy {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("store file does not exist: {path}")]
    StoreMissing { path: PathBuf },

    #[error("cannot parse store file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: plist::Error,
    },

    #[error("store file {path} does not hold a dictionary")]
    NotADictionary { path: PathBuf },

    #[error("cannot write store file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("value conversion failed: {0}")]
    Codec(#[from] plist::Error),

    #[error("store '{name}' is unavailable")]
    StoreUnavailable { name: String },
}

pub mod config;
pub mod error;
pub mod types;

pub use config::{
    MANIFEST_FILE_NAME, default_manifest, load_manifest, manifest_to_toml, parse_manifest_file,
    parse_manifest_toml,
};
pub use error::{Error, Result};
pub use types::*;

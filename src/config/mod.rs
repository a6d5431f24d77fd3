pub mod engine;
pub mod policy;

pub use engine::*;
pub use policy::*;

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{InputGuardError, Result};

/// Load a YAML document, returning the type's default if the file is absent.
pub(crate) fn load_yaml_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let contents = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(|e| InputGuardError::ConfigParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

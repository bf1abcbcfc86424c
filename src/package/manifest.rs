use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::runtime::Runtime;

/// The `package.json` an installed distribution package ships with. Only the
/// fields the launcher checks are read.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Manifest {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

impl Manifest {
    pub const FILE_NAME: &'static str = "package.json";

    pub fn load<R: Runtime + ?Sized>(runtime: &R, path: &Path) -> Result<Self> {
        let content = runtime.read_to_string(path)?;
        let manifest: Manifest = serde_json::from_str(&content)
            .with_context(|| format!("Invalid package manifest {}", path.display()))?;
        Ok(manifest)
    }

    /// Whether this manifest describes the package `scoped_name`.
    pub fn is_package(&self, scoped_name: &str) -> bool {
        self.name == scoped_name
    }
}

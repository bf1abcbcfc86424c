use anyhow::{Context, Result};
use log::debug;
use std::path::PathBuf;

use crate::runtime::Runtime;

/// Explicit path to the platform binary; skips every other lookup.
pub const BINARY_ENV: &str = "MCP_K8S_GO_BINARY";

/// Extra directory searched for platform packages before any other root.
pub const PACKAGES_DIR_ENV: &str = "MCP_K8S_PACKAGES_DIR";

/// Launcher settings. Every command-line argument belongs to the platform
/// binary, so settings come from the environment only.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchConfig {
    pub binary_override: Option<PathBuf>,
    pub packages_dir: Option<PathBuf>,
    /// Directory holding the running launcher executable.
    pub launcher_dir: PathBuf,
    pub data_dir: Option<PathBuf>,
}

impl LaunchConfig {
    pub fn from_runtime<R: Runtime + ?Sized>(runtime: &R) -> Result<Self> {
        let exe = runtime.current_exe()?;
        // Resolve symlinks so a linked launcher still finds its own package
        let exe = runtime.canonicalize(&exe).unwrap_or(exe);
        let launcher_dir = exe
            .parent()
            .map(PathBuf::from)
            .with_context(|| format!("Launcher path {} has no parent", exe.display()))?;

        let config = Self {
            binary_override: path_var(runtime, BINARY_ENV),
            packages_dir: path_var(runtime, PACKAGES_DIR_ENV),
            launcher_dir,
            data_dir: runtime.data_dir(),
        };
        debug!("Launch config: {:?}", config);
        Ok(config)
    }
}

fn path_var<R: Runtime + ?Sized>(runtime: &R, key: &str) -> Option<PathBuf> {
    runtime
        .env_var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

//! Path providers for the platform binary.
//!
//! Each [`BinaryProvider`] is one strategy for finding the binary on disk.
//! A [`ProviderChain`] asks its providers in order and stops at the first
//! [`Located::Found`]. A miss is an ordinary value, not an error, so falling
//! back to the next strategy is a plain conditional.

mod env;
mod package;
mod sibling;

use log::debug;
use std::path::PathBuf;

use crate::config::LaunchConfig;
use crate::platform::Platform;
use crate::runtime::Runtime;

pub use env::EnvOverrideProvider;
pub use package::PackageDirProvider;
pub use sibling::SiblingProvider;

/// What the launcher is looking for.
#[derive(Debug, Clone, PartialEq)]
pub struct LocateRequest<'a> {
    pub platform: &'a Platform,
    /// Distribution package for the platform, if the table has one.
    pub package: Option<&'a str>,
    pub executable_name: String,
}

impl<'a> LocateRequest<'a> {
    pub fn new(platform: &'a Platform, package: Option<&'a str>) -> Self {
        Self {
            platform,
            package,
            executable_name: platform.executable_name(),
        }
    }
}

/// Outcome of a single lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Located {
    Found(PathBuf),
    /// Nothing usable; the reason is only for diagnostics.
    NotFound(String),
}

impl Located {
    pub fn is_found(&self) -> bool {
        matches!(self, Located::Found(_))
    }
}

/// A strategy for finding the platform binary.
pub trait BinaryProvider: Send + Sync {
    /// Short label used in log output.
    fn name(&self) -> &'static str;

    /// Look for the binary. Must not fail; problems become [`Located::NotFound`].
    fn locate(&self, runtime: &dyn Runtime, request: &LocateRequest<'_>) -> Located;
}

/// Ordered list of providers.
pub struct ProviderChain {
    providers: Vec<Box<dyn BinaryProvider>>,
}

impl ProviderChain {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Append a provider; it is tried after all previously added ones.
    pub fn with(mut self, provider: impl BinaryProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// The launcher's lookup order: explicit override, installed platform
    /// package, then the sibling-directory guess.
    pub fn standard(config: &LaunchConfig) -> Self {
        Self::new()
            .with(EnvOverrideProvider::new(config.binary_override.clone()))
            .with(PackageDirProvider::from_config(config))
            .with(SiblingProvider::new(config.launcher_dir.clone()))
    }

    #[cfg(test)]
    pub fn names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Try each provider in order. Returns the first hit, or the collected
    /// reasons when every provider missed.
    pub fn locate(&self, runtime: &dyn Runtime, request: &LocateRequest<'_>) -> Located {
        let mut reasons = Vec::new();

        for provider in &self.providers {
            match provider.locate(runtime, request) {
                Located::Found(path) => {
                    debug!("{} provider found {}", provider.name(), path.display());
                    return Located::Found(path);
                }
                Located::NotFound(reason) => {
                    debug!("{} provider: {}", provider.name(), reason);
                    reasons.push(format!("{}: {}", provider.name(), reason));
                }
            }
        }

        if reasons.is_empty() {
            Located::NotFound("no providers configured".to_string())
        } else {
            Located::NotFound(reasons.join("; "))
        }
    }
}

impl Default for ProviderChain {
    fn default() -> Self {
        Self::new()
    }
}

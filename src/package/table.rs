use std::collections::BTreeMap;

use crate::platform::Platform;

/// Scope all distribution packages are published under.
pub const PACKAGE_SCOPE: &str = "@strowk";

const DISTRIBUTION_PACKAGES: &[(&str, &str)] = &[
    ("darwin_x64", "mcp-k8s-darwin-x64"),
    ("darwin_arm64", "mcp-k8s-darwin-arm64"),
    ("linux_x64", "mcp-k8s-linux-x64"),
    ("linux_arm64", "mcp-k8s-linux-arm64"),
    // No freebsd build exists; these rely on the Linux binary compatibility layer.
    ("freebsd_x64", "mcp-k8s-linux-x64"),
    ("freebsd_arm64", "mcp-k8s-linux-arm64"),
    ("win32_x64", "mcp-k8s-win32-x64"),
    ("win32_arm64", "mcp-k8s-win32-arm64"),
];

/// Immutable mapping from platform key (`<os>_<arch>`) to distribution
/// package name.
///
/// A missing key is not an error here; callers treat it as "no package",
/// which sends resolution straight to the fallback location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageTable {
    entries: BTreeMap<String, String>,
}

impl Default for PackageTable {
    fn default() -> Self {
        Self::from_entries(
            DISTRIBUTION_PACKAGES
                .iter()
                .map(|(key, package)| (key.to_string(), package.to_string())),
        )
    }
}

impl PackageTable {
    /// Build a table from `(key, package)` pairs. Later duplicates replace
    /// earlier ones, so keys stay unique.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn lookup_platform(&self, platform: &Platform) -> Option<&str> {
        self.lookup(&platform.key())
    }

    /// Fully qualified package name, e.g. `@strowk/mcp-k8s-linux-x64`.
    pub fn scoped_name(package: &str) -> String {
        format!("{}/{}", PACKAGE_SCOPE, package)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

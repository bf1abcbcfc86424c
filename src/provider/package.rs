use log::debug;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use super::{BinaryProvider, LocateRequest, Located};
use crate::config::LaunchConfig;
use crate::package::{Manifest, PACKAGE_SCOPE, PackageTable};
use crate::platform::{BinaryFormat, read_format};
use crate::runtime::Runtime;

const NODE_MODULES: &str = "node_modules";

/// Finds `@strowk/<package>/bin/<executable>` under a list of package roots.
pub struct PackageDirProvider {
    roots: Vec<PathBuf>,
}

impl PackageDirProvider {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Roots, in search order: the `MCP_K8S_PACKAGES_DIR` override, every
    /// `node_modules` from the launcher directory upwards, then
    /// `<data-dir>/mcp-k8s/node_modules`.
    pub fn from_config(config: &LaunchConfig) -> Self {
        let mut roots = Vec::new();
        if let Some(dir) = &config.packages_dir {
            roots.push(dir.clone());
        }
        roots.extend(node_modules_dirs(&config.launcher_dir));
        if let Some(data_dir) = &config.data_dir {
            roots.push(data_dir.join("mcp-k8s").join(NODE_MODULES));
        }
        Self::new(roots)
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Check one package root. `Err` carries why the root was skipped.
    fn inspect_root(
        &self,
        runtime: &dyn Runtime,
        root: &Path,
        package: &str,
        request: &LocateRequest<'_>,
    ) -> Result<PathBuf, String> {
        let package_dir = root.join(PACKAGE_SCOPE).join(package);
        let binary = package_dir.join("bin").join(&request.executable_name);

        if !runtime.is_file(&binary) {
            return Err(format!("{} does not exist", binary.display()));
        }

        let manifest_path = package_dir.join(Manifest::FILE_NAME);
        if runtime.is_file(&manifest_path) {
            let expected = PackageTable::scoped_name(package);
            let manifest = Manifest::load(runtime, &manifest_path).map_err(|e| format!("{:#}", e))?;
            if !manifest.is_package(&expected) {
                return Err(format!(
                    "{} belongs to {}, expected {}",
                    manifest_path.display(),
                    manifest.name,
                    expected
                ));
            }
            debug!(
                "Found {} {}",
                manifest.name,
                manifest.version.as_deref().unwrap_or("(unversioned)")
            );
        }

        // An unreadable header does not make the binary unrunnable
        let format = read_format(runtime, &binary).unwrap_or_else(|e| {
            debug!("Cannot inspect {}: {:#}", binary.display(), e);
            BinaryFormat::Other
        });
        if format.is_foreign_to(request.platform) {
            return Err(format!(
                "{} is a {:?} binary, not runnable on {}",
                binary.display(),
                format,
                request.platform
            ));
        }
        if request.platform.os == "freebsd" && format == BinaryFormat::Elf {
            debug!(
                "Using Linux build {} on freebsd; requires Linux binary compatibility",
                binary.display()
            );
        }

        Ok(binary)
    }
}

impl BinaryProvider for PackageDirProvider {
    fn name(&self) -> &'static str {
        "package"
    }

    fn locate(&self, runtime: &dyn Runtime, request: &LocateRequest<'_>) -> Located {
        let Some(package) = request.package else {
            return Located::NotFound(format!(
                "no distribution package for platform {}",
                request.platform.key()
            ));
        };

        for root in &self.roots {
            match self.inspect_root(runtime, root, package, request) {
                Ok(binary) => return Located::Found(binary),
                Err(reason) => debug!("Skipping package root {}: {}", root.display(), reason),
            }
        }

        Located::NotFound(format!(
            "{} not installed in any of {} package roots",
            PackageTable::scoped_name(package),
            self.roots.len()
        ))
    }
}

/// `node_modules` directories visible from `start`, nearest first, the way
/// the package manager's own resolver walks up the tree.
fn node_modules_dirs(start: &Path) -> Vec<PathBuf> {
    start
        .ancestors()
        .filter(|dir| dir.file_name() != Some(OsStr::new(NODE_MODULES)))
        .map(|dir| dir.join(NODE_MODULES))
        .collect()
}

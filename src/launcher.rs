//! Locate the platform binary and run it in place of the launcher.

use anyhow::Result;
use log::{debug, info};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::LaunchConfig;
use crate::error::LaunchError;
use crate::package::PackageTable;
use crate::platform::{Platform, PlatformDetector};
use crate::provider::{LocateRequest, Located, ProviderChain};
use crate::runtime::Runtime;

pub struct Launcher<'a, R: Runtime> {
    runtime: &'a R,
    table: &'a PackageTable,
    platform: Platform,
    providers: ProviderChain,
}

impl<'a, R: Runtime> Launcher<'a, R> {
    pub fn new(
        runtime: &'a R,
        table: &'a PackageTable,
        platform: Platform,
        providers: ProviderChain,
    ) -> Self {
        Self {
            runtime,
            table,
            platform,
            providers,
        }
    }

    /// Resolve the binary path for the launcher's platform.
    #[tracing::instrument(skip(self), fields(platform = %self.platform))]
    pub fn locate(&self) -> Result<PathBuf, LaunchError> {
        let package = self.table.lookup_platform(&self.platform);
        match package {
            Some(package) => debug!("Platform {} uses package {}", self.platform.key(), package),
            None => debug!("No distribution package for platform {}", self.platform.key()),
        }

        let request = LocateRequest::new(&self.platform, package);
        match self.providers.locate(self.runtime, &request) {
            Located::Found(path) => Ok(path),
            Located::NotFound(reason) => Err(LaunchError::NotLocated {
                executable: request.executable_name,
                platform: self.platform.to_string(),
                reason,
            }),
        }
    }

    /// Run the platform binary with `args`, inheriting stdio, and wait for
    /// it. A non-zero exit is returned as [`LaunchError::ChildFailed`].
    pub fn run(&self, args: &[OsString]) -> Result<()> {
        let path = self.locate()?;
        info!("Launching {} with {} argument(s)", path.display(), args.len());

        let status = self
            .runtime
            .run(&path, args)
            .map_err(|source| LaunchError::Spawn {
                path: path.clone(),
                source,
            })?;

        if !status.success() {
            debug!("{} exited with {}", path.display(), status);
            return Err(LaunchError::ChildFailed { path, status }.into());
        }
        Ok(())
    }
}

/// Run the platform binary for the detected host with `args` forwarded
/// unchanged.
pub fn run_binary<R: Runtime>(
    runtime: &R,
    detector: &dyn PlatformDetector,
    args: &[OsString],
) -> Result<()> {
    debug!("mcp-k8s launcher {}", env!("MCP_K8S_LAUNCHER_VERSION"));

    let config = LaunchConfig::from_runtime(runtime)?;
    let table = PackageTable::default();
    let launcher = Launcher::new(
        runtime,
        &table,
        detector.detect(),
        ProviderChain::standard(&config),
    );
    launcher.run(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BINARY_ENV, PACKAGES_DIR_ENV};
    use crate::provider::{PackageDirProvider, SiblingProvider};
    use crate::runtime::MockRuntime;
    use crate::test_utils::{elf_header, exit_status, test_launcher_dir, test_launcher_exe, test_prefix};
    use mockall::predicate::{always, eq};
    use std::io::Cursor;
    use std::path::Path;

    struct FixedDetector(Platform);

    impl PlatformDetector for FixedDetector {
        fn detect(&self) -> Platform {
            self.0.clone()
        }
    }

    fn package_root() -> PathBuf {
        test_prefix().parent().unwrap().parent().unwrap().to_path_buf()
    }

    fn package_binary(package: &str) -> PathBuf {
        package_root()
            .join("@strowk")
            .join(package)
            .join("bin")
            .join("mcp-k8s-go")
    }

    fn package_only_chain() -> ProviderChain {
        ProviderChain::new()
            .with(PackageDirProvider::new(vec![package_root()]))
            .with(SiblingProvider::new(test_launcher_dir()))
    }

    /// Mock a filesystem where exactly `present` exists, as an ELF binary.
    fn configure_installed(runtime: &mut MockRuntime, present: Option<PathBuf>) {
        runtime
            .expect_is_file()
            .returning(move |p| present.as_deref() == Some(p));
        runtime
            .expect_open()
            .returning(|_| Ok(Box::new(Cursor::new(elf_header().to_vec()))));
    }

    #[test]
    fn test_locate_prefers_installed_package() {
        let mut runtime = MockRuntime::new();
        let expected = package_binary("mcp-k8s-linux-x64");
        configure_installed(&mut runtime, Some(expected.clone()));

        let table = PackageTable::default();
        let launcher = Launcher::new(
            &runtime,
            &table,
            Platform::new("linux", "x64"),
            package_only_chain(),
        );

        assert_eq!(launcher.locate().unwrap(), expected);
    }

    #[test]
    fn test_locate_falls_back_when_package_missing() {
        let mut runtime = MockRuntime::new();
        configure_installed(&mut runtime, None);

        let table = PackageTable::default();
        let launcher = Launcher::new(
            &runtime,
            &table,
            Platform::new("darwin", "arm64"),
            package_only_chain(),
        );

        assert_eq!(launcher.locate().unwrap(), test_prefix().join("mcp-k8s-go"));
    }

    #[test]
    fn test_locate_falls_back_for_unmapped_platform() {
        // Unmapped platforms never touch the filesystem
        let runtime = MockRuntime::new();

        let table = PackageTable::default();
        let launcher = Launcher::new(
            &runtime,
            &table,
            Platform::new("openbsd", "x64"),
            package_only_chain(),
        );

        assert_eq!(launcher.locate().unwrap(), test_prefix().join("mcp-k8s-go"));
    }

    #[test]
    fn test_locate_without_fallback_reports_not_located() {
        let mut runtime = MockRuntime::new();
        configure_installed(&mut runtime, None);

        let table = PackageTable::default();
        let launcher = Launcher::new(
            &runtime,
            &table,
            Platform::new("linux", "x64"),
            ProviderChain::new().with(PackageDirProvider::new(vec![package_root()])),
        );

        match launcher.locate() {
            Err(LaunchError::NotLocated { executable, platform, .. }) => {
                assert_eq!(executable, "mcp-k8s-go");
                assert_eq!(platform, "linux/x64");
            }
            other => panic!("expected NotLocated, got {:?}", other),
        }
    }

    #[test]
    fn test_run_forwards_single_argument() {
        let mut runtime = MockRuntime::new();
        let expected = package_binary("mcp-k8s-linux-x64");
        configure_installed(&mut runtime, Some(expected.clone()));
        runtime
            .expect_run()
            .with(eq(expected), eq(vec![OsString::from("version")]))
            .times(1)
            .returning(|_, _| Ok(exit_status(0)));

        let table = PackageTable::default();
        let launcher = Launcher::new(
            &runtime,
            &table,
            Platform::new("linux", "x64"),
            package_only_chain(),
        );

        launcher.run(&[OsString::from("version")]).unwrap();
    }

    #[test]
    fn test_run_forwards_no_arguments() {
        let mut runtime = MockRuntime::new();
        configure_installed(&mut runtime, None);
        runtime
            .expect_run()
            .withf(|path: &Path, args: &[OsString]| {
                path == test_prefix().join("mcp-k8s-go") && args.is_empty()
            })
            .times(1)
            .returning(|_, _| Ok(exit_status(0)));

        let table = PackageTable::default();
        let launcher = Launcher::new(
            &runtime,
            &table,
            Platform::new("linux", "arm64"),
            package_only_chain(),
        );

        launcher.run(&[]).unwrap();
    }

    #[test]
    fn test_run_propagates_child_exit_code() {
        let mut runtime = MockRuntime::new();
        configure_installed(&mut runtime, None);
        runtime
            .expect_run()
            .returning(|_, _| Ok(exit_status(42)));

        let table = PackageTable::default();
        let launcher = Launcher::new(
            &runtime,
            &table,
            Platform::new("linux", "x64"),
            package_only_chain(),
        );

        let err = launcher.run(&[OsString::from("version")]).unwrap_err();
        let launch_err = err.downcast_ref::<LaunchError>().unwrap();
        assert!(matches!(launch_err, LaunchError::ChildFailed { .. }));
        assert_eq!(launch_err.exit_code(), 42);
    }

    #[test]
    fn test_run_surfaces_spawn_failure() {
        let mut runtime = MockRuntime::new();
        configure_installed(&mut runtime, None);
        runtime.expect_run().returning(|_, _| {
            Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No such file or directory",
            ))
        });

        let table = PackageTable::default();
        let launcher = Launcher::new(
            &runtime,
            &table,
            Platform::new("linux", "x64"),
            package_only_chain(),
        );

        let err = launcher.run(&[]).unwrap_err();
        match err.downcast_ref::<LaunchError>() {
            Some(LaunchError::Spawn { path, .. }) => {
                assert_eq!(path, &test_prefix().join("mcp-k8s-go"));
            }
            other => panic!("expected Spawn error, got {:?}", other),
        }
    }

    #[test]
    fn test_run_binary_uses_env_override() {
        let mut runtime = MockRuntime::new();
        let custom = PathBuf::from("/opt/custom/mcp-k8s-go");

        runtime
            .expect_current_exe()
            .returning(|| Ok(test_launcher_exe()));
        runtime
            .expect_canonicalize()
            .returning(|p| Ok(p.to_path_buf()));
        runtime.expect_data_dir().returning(|| None);
        runtime
            .expect_env_var()
            .with(eq(BINARY_ENV))
            .returning(|_| Ok("/opt/custom/mcp-k8s-go".to_string()));
        runtime
            .expect_env_var()
            .with(eq(PACKAGES_DIR_ENV))
            .returning(|_| Err(std::env::VarError::NotPresent));
        let expected = custom.clone();
        runtime
            .expect_is_file()
            .returning(move |p| p == expected.as_path());
        runtime
            .expect_run()
            .with(eq(custom), always())
            .times(1)
            .returning(|_, _| Ok(exit_status(0)));

        let detector = FixedDetector(Platform::new("linux", "x64"));
        run_binary(&runtime, &detector, &[OsString::from("--help")]).unwrap();
    }

    #[test]
    fn test_run_binary_falls_back_to_sibling() {
        let mut runtime = MockRuntime::new();

        runtime
            .expect_current_exe()
            .returning(|| Ok(test_launcher_exe()));
        runtime
            .expect_canonicalize()
            .returning(|p| Ok(p.to_path_buf()));
        runtime.expect_data_dir().returning(|| None);
        runtime
            .expect_env_var()
            .returning(|_| Err(std::env::VarError::NotPresent));
        runtime.expect_is_file().returning(|_| false);
        runtime
            .expect_run()
            .with(
                eq(test_prefix().join("mcp-k8s-go.exe")),
                eq(vec![OsString::from("version")]),
            )
            .times(1)
            .returning(|_, _| Ok(exit_status(0)));

        let detector = FixedDetector(Platform::new("win32", "arm64"));
        run_binary(&runtime, &detector, &[OsString::from("version")]).unwrap();
    }
}

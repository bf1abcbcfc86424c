use std::path::PathBuf;

use super::{BinaryProvider, LocateRequest, Located};
use crate::runtime::Runtime;

/// Last-resort guess: the binary sits one directory above the launcher.
///
/// Existence is not checked; a missing file surfaces when it is launched.
pub struct SiblingProvider {
    launcher_dir: PathBuf,
}

impl SiblingProvider {
    pub fn new(launcher_dir: PathBuf) -> Self {
        Self { launcher_dir }
    }

    pub fn path_for(&self, executable_name: &str) -> PathBuf {
        self.launcher_dir
            .parent()
            .unwrap_or(&self.launcher_dir)
            .join(executable_name)
    }
}

impl BinaryProvider for SiblingProvider {
    fn name(&self) -> &'static str {
        "sibling"
    }

    fn locate(&self, _runtime: &dyn Runtime, request: &LocateRequest<'_>) -> Located {
        Located::Found(self.path_for(&request.executable_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;
    use crate::runtime::MockRuntime;
    use crate::test_utils::{test_launcher_dir, test_prefix};

    #[test]
    fn test_sibling_path_is_one_level_above_launcher() {
        // No runtime calls expected: the guess is never checked
        let runtime = MockRuntime::new();
        let platform = Platform::new("linux", "x64");
        let request = LocateRequest::new(&platform, None);

        let located = SiblingProvider::new(test_launcher_dir()).locate(&runtime, &request);
        assert_eq!(located, Located::Found(test_prefix().join("mcp-k8s-go")));
    }

    #[test]
    fn test_sibling_path_on_windows_uses_exe_name() {
        let runtime = MockRuntime::new();
        let platform = Platform::new("win32", "x64");
        let request = LocateRequest::new(&platform, Some("mcp-k8s-win32-x64"));

        let located = SiblingProvider::new(test_launcher_dir()).locate(&runtime, &request);
        assert_eq!(
            located,
            Located::Found(test_prefix().join("mcp-k8s-go.exe"))
        );
    }

    #[test]
    fn test_launcher_at_filesystem_root() {
        let root = test_prefix()
            .ancestors()
            .last()
            .map(PathBuf::from)
            .unwrap();
        let provider = SiblingProvider::new(root.clone());
        assert_eq!(provider.path_for("mcp-k8s-go"), root.join("mcp-k8s-go"));
    }
}

use std::path::PathBuf;

use super::{BinaryProvider, LocateRequest, Located};
use crate::config::BINARY_ENV;
use crate::runtime::Runtime;

/// Uses the binary named by `MCP_K8S_GO_BINARY`, when it exists.
pub struct EnvOverrideProvider {
    path: Option<PathBuf>,
}

impl EnvOverrideProvider {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl BinaryProvider for EnvOverrideProvider {
    fn name(&self) -> &'static str {
        "env"
    }

    fn locate(&self, runtime: &dyn Runtime, _request: &LocateRequest<'_>) -> Located {
        match &self.path {
            None => Located::NotFound(format!("{} not set", BINARY_ENV)),
            Some(path) if runtime.is_file(path) => Located::Found(path.clone()),
            Some(path) => Located::NotFound(format!(
                "{} points at {}, which is not a file",
                BINARY_ENV,
                path.display()
            )),
        }
    }
}

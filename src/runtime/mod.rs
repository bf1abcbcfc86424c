//! Runtime abstraction for system operations.
//!
//! Every side effect the launcher performs goes through the [`Runtime`]
//! trait, so locating and launching logic can be exercised against a mock.
//!
//! # Structure
//!
//! - `env` - Environment variables, the launcher's own location, data directory
//! - `fs` - File probing and reading
//! - `process` - Spawning the platform binary with inherited stdio

mod env;
mod fs;
mod process;

use anyhow::Result;
use std::env as std_env;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;

    /// Path of the running launcher executable.
    fn current_exe(&self) -> Result<PathBuf>;

    /// Per-user data directory (e.g. `~/.local/share` on Linux).
    fn data_dir(&self) -> Option<PathBuf>;

    // File System
    fn is_file(&self, path: &Path) -> bool;
    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn open(&self, path: &Path) -> Result<Box<dyn std::io::Read + Send>>;

    // Process
    /// Run `program` with `args`, inheriting stdin, stdout and stderr, and
    /// block until it exits.
    fn run(&self, program: &Path, args: &[OsString]) -> io::Result<ExitStatus>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    fn current_exe(&self) -> Result<PathBuf> {
        self.current_exe_impl()
    }

    fn data_dir(&self) -> Option<PathBuf> {
        self.data_dir_impl()
    }

    fn is_file(&self, path: &Path) -> bool {
        self.is_file_impl(path)
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        self.canonicalize_impl(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn open(&self, path: &Path) -> Result<Box<dyn std::io::Read + Send>> {
        self.open_impl(path)
    }

    fn run(&self, program: &Path, args: &[OsString]) -> io::Result<ExitStatus> {
        self.run_impl(program, args)
    }
}

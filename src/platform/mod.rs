//! Platform detection and binary format checks
//!
//! This module reports the host platform in the vocabulary the platform
//! packages are published under (`darwin`, `linux`, `freebsd`, `win32` and
//! `x64`, `arm64`), and inspects candidate binaries to tell whether they
//! were built for another operating system.

mod detection;
mod format;

pub use detection::{DefaultPlatformDetector, Platform, PlatformDetector, BINARY_BASE_NAME};
pub use format::{BinaryFormat, read_format};

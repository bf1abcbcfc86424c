//! Platform distribution packages
//!
//! This module knows which distribution package carries the binary for each
//! platform, and how to read the manifest an installed package ships with.

mod manifest;
mod table;

pub use manifest::Manifest;
pub use table::{PACKAGE_SCOPE, PackageTable};

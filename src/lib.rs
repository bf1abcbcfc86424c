pub mod config;
pub mod error;
pub mod launcher;
pub mod package;
pub mod platform;
pub mod provider;
pub mod runtime;

pub use launcher::{Launcher, run_binary};

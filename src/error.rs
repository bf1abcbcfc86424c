use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Failures that end the launch. Lookup misses never show up here; they
/// are handled by falling back to the next provider.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("no location found for {executable} on {platform}: {reason}")]
    NotLocated {
        executable: String,
        platform: String,
        reason: String,
    },

    #[error("failed to launch {}", path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} failed with {status}", path.display())]
    ChildFailed { path: PathBuf, status: ExitStatus },
}

impl LaunchError {
    /// Exit code the launcher should end with for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::ChildFailed { status, .. } => status_exit_code(status),
            LaunchError::NotLocated { .. } | LaunchError::Spawn { .. } => 1,
        }
    }
}

/// Map a child's exit status onto the launcher's own exit code: the child's
/// code unchanged (on Windows that includes values above 255 and NTSTATUS
/// codes), `128 + signal` for a signal death on unix, otherwise 1.
pub fn status_exit_code(status: &ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

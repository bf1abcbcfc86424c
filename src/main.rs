use mcp_k8s::error::LaunchError;
use mcp_k8s::platform::DefaultPlatformDetector;
use mcp_k8s::runtime::RealRuntime;
use std::ffi::OsString;

/// mcp-k8s - launcher for the mcp-k8s-go MCP server
///
/// Finds the prebuilt `mcp-k8s-go` binary for this OS and CPU and runs it,
/// passing every argument through untouched. The launcher's exit code is
/// the binary's exit code.
///
/// Environment:
///   MCP_K8S_GO_BINARY     run this binary instead of looking one up
///   MCP_K8S_PACKAGES_DIR  extra directory holding @strowk/mcp-k8s-<platform> packages
///   RUST_LOG              launcher log level (default: warn)
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<OsString> = std::env::args_os().skip(1).collect();

    if let Err(err) = mcp_k8s::run_binary(&RealRuntime, &DefaultPlatformDetector, &args) {
        // `exit` takes the full i32 so wide Windows codes survive
        std::process::exit(failure_code(&err));
    }
}

/// Exit code for a failed launch. The child's own failure is mirrored
/// silently since it already reported on the inherited streams; anything
/// else is printed.
fn failure_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<LaunchError>() {
        Some(launch_err @ LaunchError::ChildFailed { .. }) => launch_err.exit_code(),
        Some(launch_err) => {
            eprintln!("Error: {:#}", err);
            launch_err.exit_code()
        }
        None => {
            eprintln!("Error: {:#}", err);
            1
        }
    }
}

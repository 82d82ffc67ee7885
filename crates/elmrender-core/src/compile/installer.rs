//! Optional package installation step.
//!
//! The install command's exit status is logged but never fails the batch;
//! only the compiler's status is enforced.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

/// Run `command` through the platform shell inside `workspace_dir`.
///
/// Does nothing when no command is configured.
pub async fn run_install(command: Option<&str>, workspace_dir: &Path) {
    let Some(command) = command else {
        return;
    };

    tracing::info!("Running install command: {}", command);

    let mut cmd = shell_command(command);
    cmd.current_dir(workspace_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    match cmd.output().await {
        Ok(output) if output.status.success() => {
            tracing::debug!("Install command finished");
        }
        Ok(output) => {
            tracing::warn!(
                "Install command exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Err(e) => {
            tracing::warn!("Failed to run install command '{}': {}", command, e);
        }
    }
}

#[cfg(unix)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

use super::scm_gateway::ScmError;
use std::path::Path;
use std::process::{Output, Stdio};
use tokio::process::Command;
use tracing::debug;

/// Flags whose following argument must never be echoed.
const SECRET_FLAGS: &[&str] = &["--password"];

/// Render a command line for logs and errors, masking secret values.
pub(crate) fn display_command(executable: &str, args: &[String]) -> String {
    let mut rendered = Vec::with_capacity(args.len() + 1);
    rendered.push(executable.to_string());

    let mut mask_next = false;
    for arg in args {
        if mask_next {
            rendered.push("****".to_string());
            mask_next = false;
        } else {
            mask_next = SECRET_FLAGS.contains(&arg.as_str());
            rendered.push(arg.clone());
        }
    }

    rendered.join(" ")
}

/// Check that the executable can be launched at all
pub(crate) async fn check_availability(executable: &str) -> Result<(), ScmError> {
    let output = run(executable, &["--version".to_string()], None).await?;

    if !output.status.success() {
        return Err(ScmError::executable_not_found(executable));
    }

    Ok(())
}

/// Execute a command in the given directory
pub(crate) async fn run(
    executable: &str,
    args: &[String],
    working_dir: Option<&Path>,
) -> Result<Output, ScmError> {
    let mut cmd = Command::new(executable);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    if let Some(dir) = working_dir {
        cmd.current_dir(dir);
    }

    debug!(command = %display_command(executable, args), "Running SCM command");

    cmd.output().await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ScmError::executable_not_found(executable),
        _ => ScmError::from(e),
    })
}

/// Execute a command and check for success, returning trimmed stdout
pub(crate) async fn run_checked(
    executable: &str,
    args: &[String],
    working_dir: Option<&Path>,
) -> Result<String, ScmError> {
    let output = run(executable, args, working_dir).await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ScmError::command_failed(
            display_command(executable, args),
            output.status.code().unwrap_or(-1),
            stderr.trim(),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

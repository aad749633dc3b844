use std::path::Path;
use std::process::{Command, Stdio};

/// Launch the platform's default viewer for `path`.
///
/// Failures are logged and reported as `false`; they never fail the caller.
pub fn open_in_viewer(path: &Path) -> bool {
    let mut cmd = viewer_command(path);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    match cmd.spawn() {
        Ok(_) => {
            tracing::debug!(path = %path.display(), "viewer launched");
            true
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to launch viewer");
            false
        }
    }
}

fn viewer_command(path: &Path) -> Command {
    if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]).arg(path);
        c
    } else if cfg!(target_os = "macos") {
        let mut c = Command::new("open");
        c.arg(path);
        c
    } else {
        let mut c = Command::new("xdg-open");
        c.arg(path);
        c
    }
}

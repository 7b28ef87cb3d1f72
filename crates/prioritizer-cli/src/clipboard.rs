//! System clipboard via the platform's copy command.

use std::io::Write;
use std::process::{Command, Stdio};

#[cfg(target_os = "macos")]
const COMMANDS: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(target_os = "windows")]
const COMMANDS: &[(&str, &[&str])] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const COMMANDS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

fn pipe_to(program: &str, args: &[&str], text: &str) -> std::io::Result<bool> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    // stdin is dropped before waiting so the child sees EOF
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };
    let status = child.wait()?;
    written?;
    Ok(status.success())
}

/// Copy `text`, trying each known command in turn.
///
/// Returns `false` if none of them worked.
pub fn copy(text: &str) -> bool {
    copy_with(COMMANDS, text)
}

fn copy_with(commands: &[(&str, &[&str])], text: &str) -> bool {
    for (program, args) in commands {
        match pipe_to(program, args, text) {
            Ok(true) => return true,
            Ok(false) => tracing::debug!("{program} exited with failure"),
            Err(e) => tracing::debug!("{program} unavailable: {e}"),
        }
    }
    false
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    const NO_ARGS: &[&str] = &[];

    #[test]
    fn child_that_ignores_stdin_still_returns() {
        // The child exits without reading; the write may fail with a broken pipe
        let text = "x".repeat(1 << 20);
        let result = pipe_to("sh", &["-c", "exit 3"], &text);
        assert!(!matches!(result, Ok(true)));
    }

    #[test]
    fn first_working_command_wins() {
        let commands: &[(&str, &[&str])] = &[("missing-clipboard-tool", NO_ARGS), ("cat", NO_ARGS)];
        assert!(copy_with(commands, "line"));
    }

    #[test]
    fn failing_commands_report_failure() {
        let commands: &[(&str, &[&str])] = &[("missing-clipboard-tool", NO_ARGS), ("false", NO_ARGS)];
        assert!(!copy_with(commands, "line"));
    }
}

use std::env;
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;

/// An external program that copies its standard input to the system clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipboardTool {
    pub bin: &'static str,
    pub args: &'static [&'static str],
}

pub const CANDIDATES: &[ClipboardTool] = &[
    ClipboardTool {
        bin: "pbcopy",
        args: &[],
    },
    ClipboardTool {
        bin: "wl-copy",
        args: &[],
    },
    ClipboardTool {
        bin: "xclip",
        args: &["-selection", "clipboard"],
    },
    ClipboardTool {
        bin: "xsel",
        args: &["--clipboard", "--input"],
    },
];

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no clipboard tool found, install one of: {candidates}")]
    NoToolFound { candidates: String },

    #[error("clipboard command {tool} failed to start")]
    Spawn {
        tool: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("clipboard command {tool} failed to accept input")]
    Write {
        tool: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("clipboard command {tool} failed: {status}")]
    Failed {
        tool: &'static str,
        status: ExitStatus,
    },
}

/// Copies `text` with the first clipboard tool found on `PATH`.
///
/// Returns the name of the tool that was used.
pub fn copy_to_clipboard(text: &str) -> Result<&'static str, ClipboardError> {
    let search_path = env::var_os("PATH");
    copy_with(CANDIDATES, text, search_path.as_deref())
}

/// Copies `text` with the first of `tools` found in `search_path`.
///
/// Only the first resolvable tool is tried. If it fails, its error is returned
/// and the remaining candidates are left alone.
pub fn copy_with(
    tools: &[ClipboardTool],
    text: &str,
    search_path: Option<&OsStr>,
) -> Result<&'static str, ClipboardError> {
    for tool in tools {
        let Some(path) = search_path.and_then(|dirs| find_executable(tool.bin, dirs)) else {
            log::debug!("clipboard tool {} not found", tool.bin);
            continue;
        };

        log::debug!("copying with {}", path.display());
        run(tool, &path, text)?;
        return Ok(tool.bin);
    }

    Err(ClipboardError::NoToolFound {
        candidates: tools
            .iter()
            .map(|tool| tool.bin)
            .collect::<Vec<_>>()
            .join(", "),
    })
}

fn run(tool: &ClipboardTool, path: &Path, text: &str) -> Result<(), ClipboardError> {
    let mut child = Command::new(path)
        .args(tool.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| ClipboardError::Spawn {
            tool: tool.bin,
            source,
        })?;

    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Err(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "stdin was not captured",
        )),
    };

    let status = child.wait().map_err(|source| ClipboardError::Spawn {
        tool: tool.bin,
        source,
    })?;

    if !status.success() {
        return Err(ClipboardError::Failed {
            tool: tool.bin,
            status,
        });
    }

    written.map_err(|source| ClipboardError::Write {
        tool: tool.bin,
        source,
    })
}

pub fn find_executable(bin: &str, search_path: &OsStr) -> Option<PathBuf> {
    env::split_paths(search_path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(bin))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

// wowsdirectory - platform/fs.rs
//
// Small filesystem helpers shared by the discovery strategies.

use std::io;
use std::path::Path;

/// Read the full content of a file as a string.
///
/// For files with invalid UTF-8, uses lossy conversion. Launcher-written
/// metadata is occasionally saved in a legacy code page.
pub fn read_file_lossy(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Why a path cannot be used as an install directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallDirProblem {
    Empty,
    Relative,
    Missing,
    NotADirectory,
}

impl InstallDirProblem {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty path",
            Self::Relative => "path is not absolute",
            Self::Missing => "path does not exist",
            Self::NotADirectory => "path is not a directory",
        }
    }
}

/// Check that `path` is a usable install directory: non-empty, absolute,
/// and an existing directory.
///
/// Uses `fs::metadata` so a dangling symlink reports `Missing` rather than
/// passing a bare `exists()` check on some platforms.
pub fn check_install_dir(path: &Path) -> Result<(), InstallDirProblem> {
    if path.as_os_str().is_empty() {
        return Err(InstallDirProblem::Empty);
    }
    if !path.is_absolute() {
        return Err(InstallDirProblem::Relative);
    }
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(InstallDirProblem::NotADirectory),
        Err(_) => Err(InstallDirProblem::Missing),
    }
}

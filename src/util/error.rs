// wowsdirectory - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Discovery errors never escape `GameDirectory::locate`; they exist so that
// strategies can report *why* a candidate was rejected in the debug log.
// Config errors are rendered into the startup warning list.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Fatal errors of the command-line front end.
#[derive(Debug)]
pub enum WowsDirError {
    /// Output serialisation failed.
    Json(serde_json::Error),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for WowsDirError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for WowsDirError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<serde_json::Error> for WowsDirError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

// ---------------------------------------------------------------------------
// Discovery errors
// ---------------------------------------------------------------------------

/// Errors raised while probing a single discovery strategy or candidate.
#[derive(Debug)]
pub enum DiscoveryError {
    /// The candidate directory has no `game_info.xml`.
    GameInfoMissing { path: PathBuf },

    /// `game_info.xml` exists but could not be read.
    GameInfoUnreadable { path: PathBuf, source: io::Error },

    /// `game_info.xml` is larger than any real client metadata file.
    GameInfoTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// `game_info.xml` carries no `<id>` element.
    MissingGameId { path: PathBuf },

    /// `game_info.xml` names a product that is not a known server.
    UnknownGameId { path: PathBuf, id: String },

    /// Registry key or value access failed.
    Registry { key: String, source: io::Error },

    /// Steam installation lookup failed.
    Steam { source: steamlocate::Error },

    /// A default-path glob pattern is malformed.
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    /// Walkdir traversal error under a search root.
    Traversal {
        path: PathBuf,
        source: walkdir::Error,
    },
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GameInfoMissing { path } => {
                write!(f, "No game_info.xml at '{}'", path.display())
            }
            Self::GameInfoUnreadable { path, source } => {
                write!(f, "Cannot read '{}': {source}", path.display())
            }
            Self::GameInfoTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "'{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::MissingGameId { path } => {
                write!(f, "'{}' has no <id> element", path.display())
            }
            Self::UnknownGameId { path, id } => {
                write!(f, "'{}' names unknown game id '{id}'", path.display())
            }
            Self::Registry { key, source } => {
                write!(f, "Registry access to '{key}' failed: {source}")
            }
            Self::Steam { source } => write!(f, "Steam lookup failed: {source}"),
            Self::Pattern { pattern, source } => {
                write!(f, "Invalid path pattern '{pattern}': {source}")
            }
            Self::Traversal { path, source } => {
                write!(f, "Error traversing '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::GameInfoUnreadable { source, .. } => Some(source),
            Self::Registry { source, .. } => Some(source),
            Self::Steam { source } => Some(source),
            Self::Pattern { source, .. } => Some(source),
            Self::Traversal { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Problems found while reading `config.toml`. None of them is fatal: each
/// becomes a startup warning and the affected setting keeps its default.
#[derive(Debug)]
pub enum ConfigError {
    /// A config file named on the command line does not exist.
    NotFound { path: PathBuf },

    /// The file exists but could not be read.
    Read { path: PathBuf, source: io::Error },

    /// The file is not valid TOML or has the wrong shape.
    Syntax {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A setting holds a value outside its accepted range.
    InvalidValue {
        key: &'static str,
        value: String,
        accepted: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => {
                write!(f, "config file '{}' does not exist", path.display())
            }
            Self::Read { path, source } => {
                write!(f, "cannot read config file '{}': {source}", path.display())
            }
            Self::Syntax { path, source } => {
                write!(f, "malformed config file '{}': {source}", path.display())
            }
            Self::InvalidValue {
                key,
                value,
                accepted,
            } => write!(f, "{key} = {value} is not accepted (allowed: {accepted})"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Syntax { source, .. } => Some(source),
            Self::NotFound { .. } | Self::InvalidValue { .. } => None,
        }
    }
}

/// Convenience type alias for wowsdirectory results.
pub type Result<T> = std::result::Result<T, WowsDirError>;

// wowsdirectory - platform/config.rs
//
// Platform directory resolution and config.toml loading with startup
// validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::server::GameServer;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::{BaseDirs, ProjectDirs};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Resolved platform paths.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/wowsdirectory/ or
    /// %APPDATA%\wowsdirectory\config\)
    pub config_dir: PathBuf,

    /// The user's home directory, used to expand per-user default install
    /// patterns. `None` when it cannot be determined.
    pub home_dir: Option<PathBuf>,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        let home_dir = BaseDirs::new().map(|b| b.home_dir().to_path_buf());

        let config_dir = match ProjectDirs::from("", "", constants::APP_ID) {
            Some(proj_dirs) => proj_dirs.config_dir().to_path_buf(),
            None => {
                tracing::warn!("Could not determine platform directories, using current directory");
                PathBuf::from(".")
            }
        };

        tracing::debug!(
            config = %config_dir.display(),
            home = ?home_dir,
            "Platform paths resolved"
        );

        Self {
            config_dir,
            home_dir,
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[discovery]` section.
    pub discovery: DiscoverySection,
    /// `[overrides]` section: region code -> install path.
    pub overrides: BTreeMap<String, String>,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[discovery]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DiscoverySection {
    /// Consult the Windows uninstall registry.
    pub registry: Option<bool>,
    /// Consult Steam libraries.
    pub steam: Option<bool>,
    /// Probe well-known default install paths.
    pub default_paths: Option<bool>,
    /// Extra directories to walk for client installs.
    pub search_roots: Option<Vec<String>>,
    /// Directory depth below each search root.
    pub max_depth: Option<usize>,
    /// Publisher names accepted from uninstall entries.
    pub publishers: Option<Vec<String>>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- Discovery --
    pub use_registry: bool,
    pub use_steam: bool,
    pub use_default_paths: bool,
    /// Absolute directories walked for `game_info.xml`.
    pub search_roots: Vec<PathBuf>,
    pub max_depth: usize,
    pub publishers: Vec<String>,

    // -- Overrides --
    /// Paths that take priority over every discovery strategy.
    pub overrides: BTreeMap<GameServer, PathBuf>,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            use_registry: true,
            use_steam: true,
            use_default_paths: true,
            search_roots: Vec::new(),
            max_depth: constants::DEFAULT_SEARCH_DEPTH,
            publishers: constants::DEFAULT_PUBLISHERS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            overrides: BTreeMap::new(),
            log_level: None,
        }
    }
}

/// Load and validate the config file at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// A missing file yields defaults; it is only worth a warning when the user
/// named the file explicitly (`explicit`), since the platform default path
/// is absent on first run. An unreadable or unparseable file yields defaults
/// with a warning.
///
/// Runs before logging is initialised, so warnings are returned for the
/// caller to log rather than emitted here.
pub fn load_config(config_path: &Path, explicit: bool) -> (AppConfig, Vec<String>) {
    if !config_path.exists() {
        let warnings = if explicit {
            let err = ConfigError::NotFound {
                path: config_path.to_path_buf(),
            };
            vec![format!("{err}. Using defaults.")]
        } else {
            Vec::new()
        };
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(source) => {
            let err = ConfigError::Read {
                path: config_path.to_path_buf(),
                source,
            };
            return (AppConfig::default(), vec![format!("{err}. Using defaults.")]);
        }
    };

    parse_config(&content, config_path)
}

/// Parse and validate config.toml content. `origin` is used in messages only.
pub fn parse_config(content: &str, origin: &Path) -> (AppConfig, Vec<String>) {
    let raw: RawConfig = match toml::from_str(content) {
        Ok(r) => r,
        Err(source) => {
            let err = ConfigError::Syntax {
                path: origin.to_path_buf(),
                source,
            };
            return (
                AppConfig::default(),
                vec![format!(
                    "{err}. Using defaults. See config.example.toml for the expected format."
                )],
            );
        }
    };

    let mut warnings: Vec<String> = Vec::new();
    let mut config = AppConfig::default();

    // -- Discovery: toggles --
    if let Some(enabled) = raw.discovery.registry {
        config.use_registry = enabled;
    }
    if let Some(enabled) = raw.discovery.steam {
        config.use_steam = enabled;
    }
    if let Some(enabled) = raw.discovery.default_paths {
        config.use_default_paths = enabled;
    }

    // -- Discovery: max_depth --
    if let Some(depth) = raw.discovery.max_depth {
        if depth <= constants::ABSOLUTE_MAX_SEARCH_DEPTH {
            config.max_depth = depth;
        } else {
            warnings.push(
                ConfigError::InvalidValue {
                    key: "discovery.max_depth",
                    value: depth.to_string(),
                    accepted: format!(
                        "0-{}; using default ({})",
                        constants::ABSOLUTE_MAX_SEARCH_DEPTH,
                        constants::DEFAULT_SEARCH_DEPTH
                    ),
                }
                .to_string(),
            );
        }
    }

    // -- Discovery: search_roots --
    if let Some(roots) = raw.discovery.search_roots {
        for root in roots {
            let trimmed = root.trim();
            if trimmed.is_empty() {
                warnings.push("[discovery] search_roots contains an empty entry; skipped.".into());
                continue;
            }
            let path = PathBuf::from(trimmed);
            if !path.is_absolute() {
                warnings.push(format!(
                    "[discovery] search root \"{trimmed}\" is not an absolute path; skipped."
                ));
                continue;
            }
            if config.search_roots.len() == constants::MAX_SEARCH_ROOTS {
                warnings.push(format!(
                    "[discovery] search_roots has more than {} entries; the rest are ignored.",
                    constants::MAX_SEARCH_ROOTS
                ));
                break;
            }
            config.search_roots.push(path);
        }
    }

    // -- Discovery: publishers --
    if let Some(publishers) = raw.discovery.publishers {
        let publishers: Vec<String> = publishers
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if publishers.is_empty() {
            warnings.push(
                "[discovery] publishers is empty. Using the built-in publisher list.".into(),
            );
        } else {
            config.publishers = publishers;
        }
    }

    // -- Overrides --
    for (key, value) in raw.overrides {
        let server = match key.parse::<GameServer>() {
            Ok(s) => s,
            Err(e) => {
                warnings.push(format!("[overrides] {e}; entry ignored."));
                continue;
            }
        };
        let path = PathBuf::from(value.trim());
        if !path.is_absolute() {
            warnings.push(format!(
                "[overrides] {key} = \"{value}\" is not an absolute path; entry ignored."
            ));
            continue;
        }
        config.overrides.insert(server, path);
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: {}. Using default ({}).",
                constants::VALID_LOG_LEVELS.join(", "),
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    (config, warnings)
}

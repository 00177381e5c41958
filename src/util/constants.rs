// wowsdirectory - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "wowsdirectory";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "wowsdirectory";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Game identification
// =============================================================================

/// Metadata file present at the root of every client installation.
pub const GAME_INFO_FILE_NAME: &str = "game_info.xml";

/// Maximum size of `game_info.xml` we are willing to read. Real files are a
/// few KB; anything larger is not a client metadata file.
pub const MAX_GAME_INFO_FILE_SIZE: u64 = 1024 * 1024; // 1 MB

/// Steam application id of World of Warships.
pub const STEAM_APP_ID: u32 = 552_990;

/// Registry path (under HKEY_CURRENT_USER) holding one subkey per installed
/// product.
pub const UNINSTALL_REGISTRY_PATH: &str =
    r"SOFTWARE\Microsoft\Windows\CurrentVersion\Uninstall";

/// Registry value naming the product publisher.
pub const REGISTRY_PUBLISHER_VALUE: &str = "Publisher";

/// Registry value naming the install directory.
pub const REGISTRY_INSTALL_LOCATION_VALUE: &str = "InstallLocation";

/// Publishers whose uninstall entries are inspected for a `game_info.xml`.
pub const DEFAULT_PUBLISHERS: &[&str] = &[
    "Wargaming.net",
    "Wargaming Group Limited",
    "360.cn",
    "Lesta Games",
];

// =============================================================================
// Default install locations
// =============================================================================

/// Well-known install directory patterns on Windows. Absolute glob patterns.
pub const WINDOWS_DEFAULT_PATTERNS: &[&str] = &[
    r"C:\Games\World_of_Warships*",
    r"D:\Games\World_of_Warships*",
    r"C:\Program Files (x86)\Steam\steamapps\common\World of Warships",
    r"C:\Program Files\Wargaming.net\World_of_Warships*",
];

/// Well-known install directory patterns relative to the user's home
/// directory on Linux (Wine prefixes, Lutris, Proton).
pub const LINUX_HOME_PATTERNS: &[&str] = &[
    "Games/world-of-warships/drive_c/Games/World_of_Warships*",
    ".wine/drive_c/Games/World_of_Warships*",
    ".local/share/Steam/steamapps/common/World of Warships",
];

/// Well-known install directory patterns relative to the user's home
/// directory on macOS.
pub const MACOS_HOME_PATTERNS: &[&str] = &[
    "Library/Application Support/Steam/steamapps/common/World of Warships",
];

/// Maximum number of matches accepted from a single glob pattern.
pub const MAX_GLOB_MATCHES: usize = 16;

// =============================================================================
// Search-root traversal
// =============================================================================

/// Default directory recursion depth when walking configured search roots.
pub const DEFAULT_SEARCH_DEPTH: usize = 3;

/// Hard upper bound on search depth (prevents walking whole drives).
pub const ABSOLUTE_MAX_SEARCH_DEPTH: usize = 8;

/// Maximum number of configured search roots.
pub const MAX_SEARCH_ROOTS: usize = 32;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

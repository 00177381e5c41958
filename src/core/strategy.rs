// wowsdirectory - core/strategy.rs
//
// Discovery strategies. Each strategy is one independent way of finding
// client installs; the locator runs them in priority order and keeps the
// first valid candidate per region.
//
// Strategies report candidates, not verdicts: path validation happens once,
// in the locator. Per-candidate failures (unreadable game_info.xml, dangling
// registry entries) are logged at debug level and skipped; only a failure
// that makes the whole strategy unusable is returned as `Err`.

use crate::core::game_info;
use crate::core::model::DiscoveredInstall;
use crate::core::server::GameServer;
use crate::platform::registry::UninstallSource;
use crate::platform::steam;
use crate::util::constants;
use crate::util::error::DiscoveryError;
use std::path::{Path, PathBuf};

/// One way of locating client installations.
pub trait DiscoveryStrategy {
    /// Short name used in logs and in the install record.
    fn name(&self) -> &'static str;

    /// Produce installation candidates.
    fn probe(&self) -> Result<Vec<DiscoveredInstall>, DiscoveryError>;
}

/// Identify the server of the client rooted at `dir`, logging and
/// swallowing failures.
fn identify(dir: &Path, source: &'static str) -> Option<DiscoveredInstall> {
    match game_info::read_game_id(dir) {
        Ok(server) => Some(DiscoveredInstall {
            server,
            path: dir.to_path_buf(),
            source,
        }),
        Err(e) => {
            tracing::debug!(strategy = source, dir = %dir.display(), error = %e, "Candidate rejected");
            None
        }
    }
}

// =============================================================================
// Overrides
// =============================================================================

/// Paths given explicitly by the user. Highest priority.
#[derive(Debug, Clone, Default)]
pub struct OverrideStrategy {
    paths: Vec<(GameServer, PathBuf)>,
}

impl OverrideStrategy {
    pub fn new(paths: impl IntoIterator<Item = (GameServer, PathBuf)>) -> Self {
        Self {
            paths: paths.into_iter().collect(),
        }
    }
}

impl DiscoveryStrategy for OverrideStrategy {
    fn name(&self) -> &'static str {
        "override"
    }

    fn probe(&self) -> Result<Vec<DiscoveredInstall>, DiscoveryError> {
        Ok(self
            .paths
            .iter()
            .map(|(server, path)| DiscoveredInstall {
                server: *server,
                path: path.clone(),
                source: self.name(),
            })
            .collect())
    }
}

// =============================================================================
// Uninstall registry
// =============================================================================

/// Reads the launcher's uninstall entries.
///
/// An entry whose key name is a known product id (`WOWS.WW.PRODUCTION`)
/// maps straight to that region. Other entries are considered only when
/// their publisher is in the accepted list; their region is read from the
/// install's `game_info.xml`.
#[derive(Debug, Clone)]
pub struct RegistryStrategy<S> {
    source: S,
    publishers: Vec<String>,
}

impl<S: UninstallSource> RegistryStrategy<S> {
    pub fn new(source: S, publishers: Vec<String>) -> Self {
        Self { source, publishers }
    }

    fn is_known_publisher(&self, publisher: Option<&str>) -> bool {
        publisher.is_some_and(|p| {
            self.publishers
                .iter()
                .any(|known| known.eq_ignore_ascii_case(p.trim()))
        })
    }
}

impl<S: UninstallSource> DiscoveryStrategy for RegistryStrategy<S> {
    fn name(&self) -> &'static str {
        "registry"
    }

    fn probe(&self) -> Result<Vec<DiscoveredInstall>, DiscoveryError> {
        let mut found = Vec::new();

        for entry in self.source.entries()? {
            let location = match entry.install_location.as_deref().map(str::trim) {
                Some(l) if !l.is_empty() => PathBuf::from(l),
                _ => {
                    tracing::trace!(key = %entry.key_name, "No install location");
                    continue;
                }
            };

            if let Some(server) = GameServer::from_game_id(&entry.key_name) {
                found.push(DiscoveredInstall {
                    server,
                    path: location,
                    source: self.name(),
                });
                continue;
            }

            if !self.is_known_publisher(entry.publisher.as_deref()) {
                continue;
            }

            if let Some(install) = identify(&location, self.name()) {
                found.push(install);
            }
        }

        Ok(found)
    }
}

// =============================================================================
// Steam
// =============================================================================

/// Looks the game up in the user's Steam libraries.
///
/// Steam only distributes the global client, so a Steam install without a
/// readable id is reported as `WW`.
#[derive(Debug, Clone)]
pub struct SteamStrategy {
    app_id: u32,
}

impl SteamStrategy {
    pub fn new(app_id: u32) -> Self {
        Self { app_id }
    }
}

impl Default for SteamStrategy {
    fn default() -> Self {
        Self::new(constants::STEAM_APP_ID)
    }
}

impl DiscoveryStrategy for SteamStrategy {
    fn name(&self) -> &'static str {
        "steam"
    }

    fn probe(&self) -> Result<Vec<DiscoveredInstall>, DiscoveryError> {
        let Some(dir) = steam::find_app_dir(self.app_id)? else {
            tracing::debug!(app_id = self.app_id, "App not installed in any Steam library");
            return Ok(Vec::new());
        };

        Ok(classify_steam_dir(dir, self.name()).into_iter().collect())
    }
}

/// Decide the region of a Steam app directory. A missing or unreadable
/// `game_info.xml` means the global client; an id naming another product
/// drops the directory.
fn classify_steam_dir(dir: PathBuf, source: &'static str) -> Option<DiscoveredInstall> {
    let server = match game_info::read_game_id(&dir) {
        Ok(server) => server,
        Err(DiscoveryError::UnknownGameId { id, .. }) => {
            tracing::debug!(dir = %dir.display(), id = %id, "Steam app has an unknown game id");
            return None;
        }
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "Assuming global client");
            GameServer::Ww
        }
    };

    Some(DiscoveredInstall {
        server,
        path: dir,
        source,
    })
}

// =============================================================================
// Default install paths
// =============================================================================

/// Probes well-known install directories expressed as glob patterns.
#[derive(Debug, Clone, Default)]
pub struct DefaultPathStrategy {
    patterns: Vec<String>,
}

impl DefaultPathStrategy {
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }

    /// Patterns for the platform this binary was built for. Per-user
    /// patterns are skipped when `home` is unknown.
    pub fn for_current_platform(home: Option<&Path>) -> Self {
        let mut patterns = Vec::new();

        if cfg!(windows) {
            patterns.extend(
                constants::WINDOWS_DEFAULT_PATTERNS
                    .iter()
                    .map(|p| (*p).to_string()),
            );
        }

        let home_patterns: &[&str] = if cfg!(target_os = "macos") {
            constants::MACOS_HOME_PATTERNS
        } else if cfg!(windows) {
            &[]
        } else {
            constants::LINUX_HOME_PATTERNS
        };

        if let Some(home) = home {
            // Escape the home prefix so characters like '[' in a user name
            // are matched literally.
            let prefix = glob::Pattern::escape(&home.to_string_lossy());
            patterns.extend(
                home_patterns
                    .iter()
                    .map(|p| format!("{prefix}{}{p}", std::path::MAIN_SEPARATOR)),
            );
        }

        Self::new(patterns)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl DiscoveryStrategy for DefaultPathStrategy {
    fn name(&self) -> &'static str {
        "default-path"
    }

    fn probe(&self) -> Result<Vec<DiscoveredInstall>, DiscoveryError> {
        let mut found = Vec::new();

        for pattern in &self.patterns {
            let matches = match glob::glob(pattern) {
                Ok(m) => m,
                Err(source) => {
                    let err = DiscoveryError::Pattern {
                        pattern: pattern.clone(),
                        source,
                    };
                    tracing::warn!(error = %err, "Invalid default path pattern, skipping");
                    continue;
                }
            };

            for entry in matches.take(constants::MAX_GLOB_MATCHES) {
                match entry {
                    Ok(path) if path.is_dir() => {
                        if let Some(install) = identify(&path, self.name()) {
                            found.push(install);
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::debug!(pattern = %pattern, error = %e, "Unreadable glob match");
                    }
                }
            }
        }

        Ok(found)
    }
}

// =============================================================================
// Search roots
// =============================================================================

/// Walks user-configured directories for `game_info.xml` files.
///
/// `max_depth` counts directories below the root: 0 only considers the root
/// itself as a client directory.
#[derive(Debug, Clone)]
pub struct SearchRootStrategy {
    roots: Vec<PathBuf>,
    max_depth: usize,
}

impl SearchRootStrategy {
    pub fn new(roots: Vec<PathBuf>, max_depth: usize) -> Self {
        Self {
            roots,
            max_depth: max_depth.min(constants::ABSOLUTE_MAX_SEARCH_DEPTH),
        }
    }
}

impl DiscoveryStrategy for SearchRootStrategy {
    fn name(&self) -> &'static str {
        "search-root"
    }

    fn probe(&self) -> Result<Vec<DiscoveredInstall>, DiscoveryError> {
        let mut found = Vec::new();

        for root in &self.roots {
            tracing::debug!(root = %root.display(), max_depth = self.max_depth, "Walking search root");

            let walker = walkdir::WalkDir::new(root)
                .max_depth(self.max_depth + 1)
                .follow_links(false)
                .sort_by_file_name();

            for entry_result in walker {
                let entry = match entry_result {
                    Ok(e) => e,
                    Err(source) => {
                        let err = DiscoveryError::Traversal {
                            path: root.clone(),
                            source,
                        };
                        tracing::debug!(error = %err, "Search root traversal warning");
                        continue;
                    }
                };

                if !entry.file_type().is_file()
                    || entry.file_name() != constants::GAME_INFO_FILE_NAME
                {
                    continue;
                }

                if let Some(dir) = entry.path().parent() {
                    if let Some(install) = identify(dir, self.name()) {
                        found.push(install);
                    }
                }
            }
        }

        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::registry::UninstallEntry;
    use std::fs;

    struct FakeRegistry(Vec<UninstallEntry>);

    impl UninstallSource for FakeRegistry {
        fn entries(&self) -> Result<Vec<UninstallEntry>, DiscoveryError> {
            Ok(self.0.clone())
        }
    }

    fn make_client(parent: &Path, name: &str, game_id: &str) -> PathBuf {
        let dir = parent.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("game_info.xml"),
            format!("<protocol><game><id>{game_id}</id></game></protocol>"),
        )
        .unwrap();
        dir
    }

    fn publishers() -> Vec<String> {
        constants::DEFAULT_PUBLISHERS
            .iter()
            .map(|s| (*s).to_string())
            .collect()
    }

    #[test]
    fn test_override_reports_every_path() {
        let strategy = OverrideStrategy::new([
            (GameServer::Cn, PathBuf::from("/cn")),
            (GameServer::Pt, PathBuf::from("/pt")),
        ]);
        let found = strategy.probe().unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|f| f.source == "override"));
    }

    #[test]
    fn test_registry_matches_key_name_without_reading_game_info() {
        let registry = FakeRegistry(vec![UninstallEntry {
            key_name: "WOWS.WW.PRODUCTION".into(),
            publisher: None,
            install_location: Some(r"C:\Games\World_of_Warships".into()),
        }]);
        let found = RegistryStrategy::new(registry, publishers())
            .probe()
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].server, GameServer::Ww);
        assert_eq!(found[0].path, PathBuf::from(r"C:\Games\World_of_Warships"));
    }

    #[test]
    fn test_registry_reads_game_info_for_known_publisher() {
        let dir = tempfile::tempdir().unwrap();
        let client = make_client(dir.path(), "wows_cn", "WOWS.CN.PRODUCTION");
        let foreign = make_client(dir.path(), "other", "WOWS.PT.PRODUCTION");

        let registry = FakeRegistry(vec![
            UninstallEntry {
                key_name: "{6B3F-360}".into(),
                publisher: Some("360.cn".into()),
                install_location: Some(client.display().to_string()),
            },
            UninstallEntry {
                key_name: "SomethingElse".into(),
                publisher: Some("Other Corp".into()),
                install_location: Some(foreign.display().to_string()),
            },
            UninstallEntry {
                key_name: "Empty".into(),
                publisher: Some("Wargaming.net".into()),
                install_location: Some("   ".into()),
            },
        ]);

        let found = RegistryStrategy::new(registry, publishers())
            .probe()
            .unwrap();
        assert_eq!(found.len(), 1, "found: {found:?}");
        assert_eq!(found[0].server, GameServer::Cn);
        assert_eq!(found[0].path, client);
    }

    #[test]
    fn test_registry_source_error_propagates() {
        struct Broken;
        impl UninstallSource for Broken {
            fn entries(&self) -> Result<Vec<UninstallEntry>, DiscoveryError> {
                Err(DiscoveryError::Registry {
                    key: "Uninstall".into(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
                })
            }
        }
        let result = RegistryStrategy::new(Broken, publishers()).probe();
        assert!(matches!(result, Err(DiscoveryError::Registry { .. })));
    }

    #[test]
    fn test_steam_dir_without_game_info_is_global_client() {
        let dir = tempfile::tempdir().unwrap();
        let found = classify_steam_dir(dir.path().to_path_buf(), "steam").unwrap();
        assert_eq!(found.server, GameServer::Ww);
        assert_eq!(found.path, dir.path());
        assert_eq!(found.source, "steam");
    }

    #[test]
    fn test_steam_dir_region_comes_from_game_info() {
        let dir = tempfile::tempdir().unwrap();
        let client = make_client(dir.path(), "World of Warships", "WOWS.PT.PRODUCTION");
        let found = classify_steam_dir(client.clone(), "steam").unwrap();
        assert_eq!(found.server, GameServer::Pt);
        assert_eq!(found.path, client);
    }

    #[test]
    fn test_steam_dir_of_other_product_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let client = make_client(dir.path(), "World of Tanks", "WOT.EU.PRODUCTION");
        assert!(classify_steam_dir(client, "steam").is_none());
    }

    #[test]
    fn test_default_path_pattern_matches_clients() {
        let dir = tempfile::tempdir().unwrap();
        make_client(dir.path(), "World_of_Warships", "WOWS.WW.PRODUCTION");
        make_client(dir.path(), "World_of_Warships_PT", "WOWS.PT.PRODUCTION");
        fs::create_dir(dir.path().join("World_of_Warships_broken")).unwrap();

        let pattern = format!(
            "{}{}World_of_Warships*",
            glob::Pattern::escape(&dir.path().to_string_lossy()),
            std::path::MAIN_SEPARATOR
        );
        let mut found = DefaultPathStrategy::new(vec![pattern]).probe().unwrap();
        found.sort_by_key(|f| f.server);
        let servers: Vec<_> = found.iter().map(|f| f.server).collect();
        assert_eq!(servers, vec![GameServer::Ww, GameServer::Pt]);
    }

    #[test]
    fn test_default_path_skips_invalid_pattern() {
        let found = DefaultPathStrategy::new(vec!["[".to_string()])
            .probe()
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_platform_patterns_use_home_prefix() {
        let home = std::env::temp_dir().join("home[1]");
        let strategy = DefaultPathStrategy::for_current_platform(Some(&home));
        if !cfg!(windows) {
            assert!(!strategy.patterns().is_empty());
            assert!(strategy.patterns().iter().all(|p| p.contains("home[[]1[]]")));
        }
        let without_home = DefaultPathStrategy::for_current_platform(None);
        assert!(without_home
            .patterns()
            .iter()
            .all(|p| !p.contains("home")));
    }

    #[test]
    fn test_search_root_respects_depth() {
        let dir = tempfile::tempdir().unwrap();
        make_client(dir.path(), "wows", "WOWS.WW.PRODUCTION");
        make_client(&dir.path().join("a").join("b"), "wows_cn", "WOWS.CN.PRODUCTION");

        let shallow = SearchRootStrategy::new(vec![dir.path().to_path_buf()], 1)
            .probe()
            .unwrap();
        assert_eq!(shallow.len(), 1);
        assert_eq!(shallow[0].server, GameServer::Ww);

        let deep = SearchRootStrategy::new(vec![dir.path().to_path_buf()], 3)
            .probe()
            .unwrap();
        assert_eq!(deep.len(), 2);
    }

    #[test]
    fn test_search_root_missing_root_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let found = SearchRootStrategy::new(vec![dir.path().join("nope")], 2)
            .probe()
            .unwrap();
        assert!(found.is_empty());
    }
}

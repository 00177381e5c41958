// wowsdirectory - tests/e2e_locate.rs
//
// End-to-end tests for the locator.
//
// These tests exercise real config.toml parsing, real game_info.xml files on
// disk, real walkdir and glob traversal. Host-dependent strategies (registry,
// Steam, default paths) are disabled through config so results do not depend
// on what is installed on the machine running the tests.

use std::fs;
use std::path::{Path, PathBuf};
use wowsdirectory::core::strategy::{DefaultPathStrategy, RegistryStrategy};
use wowsdirectory::platform::config::{load_config, parse_config, AppConfig};
use wowsdirectory::platform::registry::{UninstallEntry, UninstallSource};
use wowsdirectory::util::error::DiscoveryError;
use wowsdirectory::{GameDirectory, GameServer, GAME_SERVERS};

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to the on-disk fixture clients.
fn clients_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("clients")
}

fn client(name: &str) -> PathBuf {
    clients_dir().join(name)
}

/// Config with every host-dependent strategy switched off.
fn isolated_config() -> AppConfig {
    AppConfig {
        use_registry: false,
        use_steam: false,
        use_default_paths: false,
        ..AppConfig::default()
    }
}

/// TOML basic strings treat backslashes as escapes; literal strings do not.
fn toml_literal(path: &Path) -> String {
    format!("'{}'", path.display())
}

// =============================================================================
// No installation present
// =============================================================================

/// With nothing installed, every region stays unresolved and locate() does
/// not fail.
#[test]
fn e2e_no_installation_resolves_nothing() {
    let empty = tempfile::tempdir().unwrap();
    let config = AppConfig {
        search_roots: vec![empty.path().to_path_buf()],
        ..isolated_config()
    };

    let mut locator = GameDirectory::from_config(&config, None);
    locator.locate().info();

    assert!(locator.get_game_directory(GameServer::Ww).is_none());
    for server in GAME_SERVERS {
        assert!(
            locator.get_game_directory(server).is_none(),
            "{server} should be unresolved"
        );
    }
    assert!(locator.available_paths().is_empty());
}

/// Reads before locate() report nothing even when installs exist.
#[test]
fn e2e_reads_before_locate_are_empty() {
    let config = AppConfig {
        search_roots: vec![clients_dir()],
        ..isolated_config()
    };
    let locator = GameDirectory::from_config(&config, None);
    for server in GAME_SERVERS {
        assert!(locator.get_game_directory(server).is_none());
    }
}

// =============================================================================
// Search roots
// =============================================================================

/// Walking the fixtures finds all three regions and ignores the foreign
/// product.
#[test]
fn e2e_search_root_resolves_every_fixture_region() {
    let config = AppConfig {
        search_roots: vec![clients_dir()],
        max_depth: 1,
        ..isolated_config()
    };

    let mut locator = GameDirectory::from_config(&config, None);
    locator.locate();

    assert_eq!(
        locator.get_game_directory(GameServer::Ww),
        Some(client("World_of_Warships").as_path())
    );
    assert_eq!(
        locator.get_game_directory(GameServer::Cn),
        Some(client("World_of_Warships_CN").as_path())
    );
    assert_eq!(
        locator.get_game_directory(GameServer::Pt),
        Some(client("World_of_Warships_PT").as_path())
    );
    assert_eq!(locator.available_servers(), GAME_SERVERS.to_vec());
    for path in locator.available_paths() {
        assert!(path.is_absolute(), "{} is not absolute", path.display());
        assert!(!path.ends_with("World_of_Tanks"));
    }
}

// =============================================================================
// Config file
// =============================================================================

/// A config.toml on disk drives the whole chain, overrides first.
#[test]
fn e2e_config_file_override_beats_search_root() {
    let dir = tempfile::tempdir().unwrap();
    let override_dir = dir.path().join("custom_ww");
    fs::create_dir(&override_dir).unwrap();

    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "[discovery]\nregistry = false\nsteam = false\ndefault_paths = false\n\
             search_roots = [{}]\nmax_depth = 1\n\n[overrides]\nww = {}\n",
            toml_literal(&clients_dir()),
            toml_literal(&override_dir),
        ),
    )
    .unwrap();

    let (config, warnings) = load_config(&config_path, true);
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");

    let mut locator = GameDirectory::from_config(&config, None);
    locator.locate();

    assert_eq!(
        locator.get_game_directory(GameServer::Ww),
        Some(override_dir.as_path())
    );
    assert_eq!(
        locator.record().get(GameServer::Ww).map(|i| i.source),
        Some("override")
    );
    assert_eq!(
        locator.record().get(GameServer::Cn).map(|i| i.source),
        Some("search-root")
    );
}

/// An override pointing at a missing directory falls through to discovery.
#[test]
fn e2e_stale_override_falls_through() {
    let dir = tempfile::tempdir().unwrap();
    let content = format!(
        "[discovery]\nregistry = false\nsteam = false\ndefault_paths = false\n\
         search_roots = [{}]\n\n[overrides]\npt = {}\n",
        toml_literal(&clients_dir()),
        toml_literal(&dir.path().join("uninstalled")),
    );
    let (config, warnings) = parse_config(&content, Path::new("config.toml"));
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");

    let mut locator = GameDirectory::from_config(&config, None);
    locator.locate();
    assert_eq!(
        locator.get_game_directory(GameServer::Pt),
        Some(client("World_of_Warships_PT").as_path())
    );
}

// =============================================================================
// Registry and default paths against fixtures
// =============================================================================

struct FixtureRegistry;

impl UninstallSource for FixtureRegistry {
    fn entries(&self) -> Result<Vec<UninstallEntry>, DiscoveryError> {
        Ok(vec![
            UninstallEntry {
                key_name: "WOWS.WW.PRODUCTION".into(),
                publisher: Some("Wargaming.net".into()),
                install_location: Some(client("World_of_Warships").display().to_string()),
            },
            UninstallEntry {
                key_name: "{C3B1-360-WOWS}".into(),
                publisher: Some("360.cn".into()),
                install_location: Some(client("World_of_Warships_CN").display().to_string()),
            },
            UninstallEntry {
                key_name: "WOT.EU.PRODUCTION".into(),
                publisher: Some("Wargaming.net".into()),
                install_location: Some(client("World_of_Tanks").display().to_string()),
            },
        ])
    }
}

#[test]
fn e2e_registry_then_default_paths() {
    let pattern = format!(
        "{}{}World_of_Warships*",
        glob::Pattern::escape(&clients_dir().to_string_lossy()),
        std::path::MAIN_SEPARATOR
    );

    let publishers = AppConfig::default().publishers;
    let mut locator = GameDirectory::new(vec![
        Box::new(RegistryStrategy::new(FixtureRegistry, publishers)),
        Box::new(DefaultPathStrategy::new(vec![pattern])),
    ]);
    locator.locate();

    let source = |s| locator.record().get(s).map(|i| i.source);
    assert_eq!(source(GameServer::Ww), Some("registry"));
    assert_eq!(source(GameServer::Cn), Some("registry"));
    assert_eq!(source(GameServer::Pt), Some("default-path"));
}

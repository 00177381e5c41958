// wowsdirectory - core/locator.rs
//
// The game directory locator: runs the discovery strategies in priority
// order and keeps the first valid install per region.
//
// Lifecycle: construct once, call `locate()`, then pass `&GameDirectory` to
// whoever needs paths. Reads never trigger discovery. `locate()` builds a new
// record and swaps it in only when every strategy has run, so a reader never
// sees a half-populated record.

use crate::core::model::{DiscoveredInstall, InstallRecord, ResolvedInstall};
use crate::core::server::{GameServer, GAME_SERVERS};
use crate::core::strategy::{
    DefaultPathStrategy, DiscoveryStrategy, OverrideStrategy, RegistryStrategy,
    SearchRootStrategy, SteamStrategy,
};
use crate::platform::config::AppConfig;
use crate::platform::fs;
use crate::platform::registry::SystemUninstallSource;
use std::fmt;
use std::path::{Path, PathBuf};

/// Locates World of Warships installations for every server region.
pub struct GameDirectory {
    strategies: Vec<Box<dyn DiscoveryStrategy>>,
    record: InstallRecord,
}

impl GameDirectory {
    /// Build a locator over an explicit, ordered strategy list.
    pub fn new(strategies: Vec<Box<dyn DiscoveryStrategy>>) -> Self {
        Self {
            strategies,
            record: InstallRecord::default(),
        }
    }

    /// Build the standard strategy chain from validated configuration.
    ///
    /// Order: overrides, uninstall registry, Steam, default paths, search
    /// roots. Disabled and empty strategies are left out of the chain.
    pub fn from_config(config: &AppConfig, home_dir: Option<&Path>) -> Self {
        let mut strategies: Vec<Box<dyn DiscoveryStrategy>> = Vec::new();

        if !config.overrides.is_empty() {
            strategies.push(Box::new(OverrideStrategy::new(
                config.overrides.iter().map(|(s, p)| (*s, p.clone())),
            )));
        }
        if config.use_registry {
            strategies.push(Box::new(RegistryStrategy::new(
                SystemUninstallSource,
                config.publishers.clone(),
            )));
        }
        if config.use_steam {
            strategies.push(Box::new(SteamStrategy::default()));
        }
        if config.use_default_paths {
            strategies.push(Box::new(DefaultPathStrategy::for_current_platform(home_dir)));
        }
        if !config.search_roots.is_empty() {
            strategies.push(Box::new(SearchRootStrategy::new(
                config.search_roots.clone(),
                config.max_depth,
            )));
        }

        Self::new(strategies)
    }

    /// Names of the configured strategies, in priority order.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Probe every strategy and replace the install record.
    ///
    /// Never fails: a strategy that errors contributes nothing, and a region
    /// no strategy resolves is simply absent. Calling again re-probes from
    /// scratch, so an install removed since the last call disappears.
    pub fn locate(&mut self) -> &Self {
        let mut record = InstallRecord::default();

        for strategy in &self.strategies {
            if record.is_complete() {
                tracing::debug!(
                    skipped = strategy.name(),
                    "All regions resolved; skipping remaining strategies"
                );
                break;
            }

            let candidates = match strategy.probe() {
                Ok(c) => c,
                Err(e) => {
                    tracing::debug!(strategy = strategy.name(), error = %e, "Discovery strategy failed");
                    continue;
                }
            };

            tracing::debug!(
                strategy = strategy.name(),
                candidates = candidates.len(),
                "Strategy probed"
            );

            for candidate in candidates {
                accept_candidate(&mut record, candidate);
            }
        }

        self.record = record;
        self
    }

    /// Log a summary of the resolved regions.
    pub fn info(&self) -> &Self {
        if self.record.is_empty() {
            tracing::warn!("No game directory found");
            return self;
        }

        tracing::info!(count = self.record.len(), "Found game directories");
        for (server, install) in self.record.iter() {
            tracing::info!(
                server = %server,
                path = %install.path.display(),
                source = install.source,
                "Game directory"
            );
        }
        self
    }

    /// Resolved install directory of `server`, or `None` if `locate()` has
    /// not run or found nothing for it.
    pub fn get_game_directory(&self, server: GameServer) -> Option<&Path> {
        self.record.path(server)
    }

    /// Every resolved install directory, in `GAME_SERVERS` order.
    pub fn available_paths(&self) -> Vec<PathBuf> {
        GAME_SERVERS
            .iter()
            .filter_map(|s| self.record.path(*s))
            .map(Path::to_path_buf)
            .collect()
    }

    /// Every resolved region, in `GAME_SERVERS` order.
    pub fn available_servers(&self) -> Vec<GameServer> {
        GAME_SERVERS
            .into_iter()
            .filter(|s| self.record.contains(*s))
            .collect()
    }

    pub fn record(&self) -> &InstallRecord {
        &self.record
    }
}

impl fmt::Debug for GameDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameDirectory")
            .field("strategies", &self.strategy_names())
            .field("record", &self.record)
            .finish()
    }
}

/// Validate `candidate` and store it unless its region is already resolved.
fn accept_candidate(record: &mut InstallRecord, candidate: DiscoveredInstall) {
    if record.contains(candidate.server) {
        tracing::trace!(
            server = %candidate.server,
            path = %candidate.path.display(),
            strategy = candidate.source,
            "Region already resolved by a higher-priority strategy"
        );
        return;
    }

    if let Err(problem) = fs::check_install_dir(&candidate.path) {
        tracing::debug!(
            server = %candidate.server,
            path = %candidate.path.display(),
            strategy = candidate.source,
            reason = problem.as_str(),
            "Candidate path rejected"
        );
        return;
    }

    tracing::debug!(
        server = %candidate.server,
        path = %candidate.path.display(),
        strategy = candidate.source,
        "Candidate accepted"
    );
    record.insert_first(
        candidate.server,
        ResolvedInstall {
            path: candidate.path,
            source: candidate.source,
        },
    );
}

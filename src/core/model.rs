// wowsdirectory - core/model.rs
//
// Core data model types shared by the strategies and the locator.
// Pure data definitions with no I/O.

use crate::core::server::{GameServer, GAME_SERVERS};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// =============================================================================
// Discovered install (strategy output)
// =============================================================================

/// One installation candidate reported by a discovery strategy.
///
/// Candidates are unvalidated: the locator checks that the path is absolute
/// and exists before accepting it into the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredInstall {
    /// Region the install belongs to.
    pub server: GameServer,

    /// Client root directory (the one holding `game_info.xml`).
    pub path: PathBuf,

    /// Name of the strategy that produced the candidate.
    pub source: &'static str,
}

// =============================================================================
// Install record (locator state)
// =============================================================================

/// An accepted installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInstall {
    pub path: PathBuf,
    pub source: &'static str,
}

/// Resolved region -> install mapping. At most one entry per region.
///
/// Iteration follows `GAME_SERVERS` order because `GameServer`'s `Ord`
/// matches declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallRecord {
    entries: BTreeMap<GameServer, ResolvedInstall>,
}

impl InstallRecord {
    /// Insert `install` for `server` unless the region is already resolved.
    ///
    /// Returns true if the entry was stored.
    pub fn insert_first(&mut self, server: GameServer, install: ResolvedInstall) -> bool {
        if self.entries.contains_key(&server) {
            return false;
        }
        self.entries.insert(server, install);
        true
    }

    pub fn get(&self, server: GameServer) -> Option<&ResolvedInstall> {
        self.entries.get(&server)
    }

    pub fn path(&self, server: GameServer) -> Option<&Path> {
        self.get(server).map(|i| i.path.as_path())
    }

    pub fn contains(&self, server: GameServer) -> bool {
        self.entries.contains_key(&server)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True once every known region has been resolved.
    pub fn is_complete(&self) -> bool {
        GAME_SERVERS.iter().all(|s| self.entries.contains_key(s))
    }

    pub fn iter(&self) -> impl Iterator<Item = (GameServer, &ResolvedInstall)> {
        self.entries.iter().map(|(s, i)| (*s, i))
    }
}

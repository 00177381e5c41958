// wowsdirectory - core/server.rs
//
// Game server regions. Each region is a separately installable client with
// its own product id, registry key, and install directory.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One supported game server region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum GameServer {
    /// Global client (ASIA, EU, NA, RU clusters).
    #[serde(rename = "WW")]
    Ww,
    /// The Chinese server, published by 360.cn.
    #[serde(rename = "CN")]
    Cn,
    /// The Public Test server.
    #[serde(rename = "PT")]
    Pt,
}

/// Every known server region, in display order.
pub const GAME_SERVERS: [GameServer; 3] = [GameServer::Ww, GameServer::Cn, GameServer::Pt];

impl GameServer {
    /// Numeric code of the region, stable across releases.
    pub fn number(self) -> i32 {
        match self {
            Self::Ww => 0,
            Self::Cn => 1,
            Self::Pt => 2,
        }
    }

    /// Resolve a numeric region code. Unknown codes yield `None`.
    pub fn from_number(value: i32) -> Option<Self> {
        GAME_SERVERS.into_iter().find(|s| s.number() == value)
    }

    /// Short lowercase code used on the CLI and in config.toml.
    pub fn code(self) -> &'static str {
        match self {
            Self::Ww => "ww",
            Self::Cn => "cn",
            Self::Pt => "pt",
        }
    }

    /// Product id as written in `game_info.xml` and used as the uninstall
    /// registry key name.
    pub fn game_id(self) -> &'static str {
        match self {
            Self::Ww => "WOWS.WW.PRODUCTION",
            Self::Cn => "WOWS.CN.PRODUCTION",
            Self::Pt => "WOWS.PT.PRODUCTION",
        }
    }

    /// Resolve a product id. Matching ignores surrounding whitespace and case.
    pub fn from_game_id(id: &str) -> Option<Self> {
        let id = id.trim();
        GAME_SERVERS
            .into_iter()
            .find(|s| s.game_id().eq_ignore_ascii_case(id))
    }
}

impl fmt::Display for GameServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when a string names no known region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownServer(pub String);

impl fmt::Display for UnknownServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown game server '{}' (expected ww, cn or pt)",
            self.0
        )
    }
}

impl std::error::Error for UnknownServer {}

impl FromStr for GameServer {
    type Err = UnknownServer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GAME_SERVERS
            .into_iter()
            .find(|server| server.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownServer(s.to_string()))
    }
}

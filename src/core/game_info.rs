// wowsdirectory - core/game_info.rs
//
// Identifies which server a client directory belongs to by reading the
// `<id>` element of its `game_info.xml`.
//
// The file is a small XML document written by the game launcher:
//
//   <protocol name="game_info" version="3.0">
//     <game>
//       <id>WOWS.WW.PRODUCTION</id>
//       ...
//
// Only the first `<id>` matters, so a regex scan is enough; no XML parser.

use crate::core::server::GameServer;
use crate::platform::fs;
use crate::util::constants;
use crate::util::error::DiscoveryError;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

fn id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<id>\s*([^<]*?)\s*</id>").expect("id_regex: invalid regex"))
}

/// Extract the first `<id>` value from `game_info.xml` content.
pub fn extract_game_id(content: &str) -> Option<&str> {
    id_regex()
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .filter(|id| !id.is_empty())
}

/// Read `<dir>/game_info.xml` and resolve the server it names.
pub fn read_game_id(dir: &Path) -> Result<GameServer, DiscoveryError> {
    let path = dir.join(constants::GAME_INFO_FILE_NAME);

    let metadata = match std::fs::metadata(&path) {
        Ok(m) if m.is_file() => m,
        Ok(_) => return Err(DiscoveryError::GameInfoMissing { path }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DiscoveryError::GameInfoMissing { path });
        }
        Err(source) => return Err(DiscoveryError::GameInfoUnreadable { path, source }),
    };

    if metadata.len() > constants::MAX_GAME_INFO_FILE_SIZE {
        return Err(DiscoveryError::GameInfoTooLarge {
            size: metadata.len(),
            max_size: constants::MAX_GAME_INFO_FILE_SIZE,
            path,
        });
    }

    let content = match fs::read_file_lossy(&path) {
        Ok(c) => c,
        Err(source) => return Err(DiscoveryError::GameInfoUnreadable { path, source }),
    };

    let id = match extract_game_id(&content) {
        Some(id) => id,
        None => return Err(DiscoveryError::MissingGameId { path }),
    };

    tracing::debug!(path = %path.display(), id, "Read game id");

    GameServer::from_game_id(id).ok_or_else(|| DiscoveryError::UnknownGameId {
        id: id.to_string(),
        path,
    })
}

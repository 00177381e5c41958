// wowsdirectory - platform/steam.rs
//
// Steam library lookup. Steam keeps its own library metadata, so a Steam
// install is found without the launcher's registry entries.

use crate::util::error::DiscoveryError;
use std::path::PathBuf;
use steamlocate::SteamDir;

/// Resolve the install directory of `app_id` across all Steam libraries.
///
/// `Ok(None)` means Steam is installed but the app is not.
pub fn find_app_dir(app_id: u32) -> Result<Option<PathBuf>, DiscoveryError> {
    let steam = SteamDir::locate().map_err(|source| DiscoveryError::Steam { source })?;
    tracing::debug!(steam = %steam.path().display(), "Located Steam");

    let found = steam
        .find_app(app_id)
        .map_err(|source| DiscoveryError::Steam { source })?;

    Ok(found.map(|(app, library)| library.resolve_app_dir(&app)))
}

// wowsdirectory - platform/registry.rs
//
// Read-only access to the Windows "Uninstall" registry keys, where the game
// launcher records one subkey per installed client.
//
// The `UninstallSource` trait lets the registry strategy be tested on every
// platform with an in-memory source. On non-Windows targets the system
// source reports no entries.

use crate::util::error::DiscoveryError;

/// One subkey under the Uninstall registry path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UninstallEntry {
    /// Subkey name, e.g. `WOWS.WW.PRODUCTION`.
    pub key_name: String,

    /// `Publisher` value, if present.
    pub publisher: Option<String>,

    /// `InstallLocation` value, if present.
    pub install_location: Option<String>,
}

/// A provider of uninstall entries.
pub trait UninstallSource {
    /// List every uninstall entry visible to the current user.
    ///
    /// Returns `Err` only when the Uninstall key itself cannot be opened;
    /// unreadable individual subkeys are skipped.
    fn entries(&self) -> Result<Vec<UninstallEntry>, DiscoveryError>;
}

/// The operating system's registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemUninstallSource;

#[cfg(windows)]
impl UninstallSource for SystemUninstallSource {
    fn entries(&self) -> Result<Vec<UninstallEntry>, DiscoveryError> {
        use crate::util::constants;
        use winreg::enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE};
        use winreg::RegKey;

        let mut entries = Vec::new();
        let mut last_error = None;
        let mut opened_any = false;

        // The launcher installs per-user; older 360.cn installers wrote to
        // the machine hive.
        for (hive_name, hive) in [
            ("HKCU", HKEY_CURRENT_USER),
            ("HKLM", HKEY_LOCAL_MACHINE),
        ] {
            let uninstall =
                match RegKey::predef(hive).open_subkey(constants::UNINSTALL_REGISTRY_PATH) {
                    Ok(key) => key,
                    Err(source) => {
                        tracing::debug!(hive = hive_name, error = %source, "Cannot open Uninstall key");
                        last_error = Some(DiscoveryError::Registry {
                            key: format!(r"{hive_name}\{}", constants::UNINSTALL_REGISTRY_PATH),
                            source,
                        });
                        continue;
                    }
                };
            opened_any = true;

            for key_result in uninstall.enum_keys() {
                let key_name = match key_result {
                    Ok(name) => name,
                    Err(e) => {
                        tracing::debug!(hive = hive_name, error = %e, "Skipping unreadable subkey name");
                        continue;
                    }
                };
                let subkey = match uninstall.open_subkey(&key_name) {
                    Ok(k) => k,
                    Err(e) => {
                        tracing::debug!(key = %key_name, error = %e, "Skipping unreadable subkey");
                        continue;
                    }
                };
                entries.push(UninstallEntry {
                    publisher: subkey
                        .get_value::<String, _>(constants::REGISTRY_PUBLISHER_VALUE)
                        .ok(),
                    install_location: subkey
                        .get_value::<String, _>(constants::REGISTRY_INSTALL_LOCATION_VALUE)
                        .ok(),
                    key_name,
                });
            }
        }

        match (opened_any, last_error) {
            (false, Some(e)) => Err(e),
            _ => {
                tracing::debug!(count = entries.len(), "Read uninstall entries");
                Ok(entries)
            }
        }
    }
}

#[cfg(not(windows))]
impl UninstallSource for SystemUninstallSource {
    fn entries(&self) -> Result<Vec<UninstallEntry>, DiscoveryError> {
        tracing::trace!("No uninstall registry on this platform");
        Ok(Vec::new())
    }
}

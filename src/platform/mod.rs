// wowsdirectory - platform/mod.rs
//
// Platform abstraction layer: OS directories, config file, registry,
// Steam, and filesystem helpers.
// Dependencies: standard library, directories, winreg, steamlocate.

pub mod config;
pub mod fs;
pub mod registry;
pub mod steam;

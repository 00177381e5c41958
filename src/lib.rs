// wowsdirectory - lib.rs
//
// Library entry point, exposing the locator for the CLI binary, integration
// tests, and programmatic use.

pub mod core;
pub mod platform;
pub mod util;

pub use crate::core::locator::GameDirectory;
pub use crate::core::server::{GameServer, GAME_SERVERS};

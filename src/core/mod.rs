// wowsdirectory - core/mod.rs
//
// Core locator logic: server regions, install record, game_info.xml reading,
// discovery strategies, and the locator itself.
// Dependencies: util, and platform for OS access.

pub mod game_info;
pub mod locator;
pub mod model;
pub mod server;
pub mod strategy;

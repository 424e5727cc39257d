// FwReport - platform/mod.rs
//
// Platform abstraction layer: filesystem access and config loading.
// Dependencies: standard library, directories, toml.
// Must NOT depend on: app.

pub mod config;
pub mod fs;

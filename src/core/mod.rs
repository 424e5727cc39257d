// FwReport - core/mod.rs
//
// Core business logic layer: matching, filtering, aggregation, report data.
// Dependencies: regex, csv, standard library.
// Must NOT depend on: app or platform.

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod matcher;
pub mod model;
pub mod report;

// FwReport - app/mod.rs
//
// Application layer: orchestration of a reporting run.
// Dependencies: core layer, platform::fs for reading the log and opening sinks.

pub mod run;

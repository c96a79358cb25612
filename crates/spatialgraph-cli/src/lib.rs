//! Spatial graph CLI library.
//!
//! Command handlers and output rendering for the `spatialgraph-cli` binary.
//! The binary only parses arguments and dispatches to these modules.

pub mod commands;
pub mod output;

//! Core module: the curriculum board model and its editing operations

pub mod config;
pub mod error;
pub mod ids;
pub mod models;
pub mod options;
pub mod payload;
pub mod prerequisites;
pub mod reorder;
pub mod report;
pub mod selection;
pub mod store;

/// Returns the current version of the `NuBoard` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

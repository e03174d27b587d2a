//! CLI command handlers for `NuBoard`.
//!
//! Each command group is implemented in its own submodule. Handlers return a
//! user-facing message on failure; `main` prints it and exits non-zero.

pub mod config;
pub mod draft;
pub mod edit;
pub mod export;
pub mod report;
pub mod search;

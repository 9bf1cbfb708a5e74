//! GitHub activity log CLI library.
//!
//! This crate provides the CLI interface for the activity log.

mod cli;
pub mod commands;
mod config;
mod source;

pub use cli::Cli;
pub use config::Config;

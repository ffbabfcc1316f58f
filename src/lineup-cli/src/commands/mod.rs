//! Command handlers for lineup CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod build;
pub mod configure;
pub mod items;
pub mod level;

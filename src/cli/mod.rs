//! CLI command handlers
//!
//! Each subcommand of the edufeedback CLI lives in its own module.

pub mod export;
pub mod helpers;
pub mod init;
pub mod serve;
pub mod stats;

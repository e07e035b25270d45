//! Subcommand implementations

pub mod check;
pub mod info;
pub mod init;
pub mod notify;
pub mod relocate;

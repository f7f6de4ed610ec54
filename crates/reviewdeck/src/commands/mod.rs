//! CLI command implementations

pub mod check;
pub mod common;
pub mod completion;
pub mod generate;
pub mod init;
pub mod models;
pub mod serve;

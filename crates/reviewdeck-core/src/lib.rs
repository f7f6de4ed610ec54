//! Core types and configuration for reviewdeck

pub mod config;
pub mod credentials;
pub mod generation;
pub mod prompt;
pub mod provider;

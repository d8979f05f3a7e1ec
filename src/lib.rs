pub mod cli;
pub mod config;
pub mod error;
pub mod files;
pub mod http;
pub mod session;
pub mod spinner;

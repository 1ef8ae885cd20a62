pub mod bootstrap;
pub mod config;
pub mod file;
pub mod listing;
pub mod server;

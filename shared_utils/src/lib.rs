pub mod config;
pub mod env;

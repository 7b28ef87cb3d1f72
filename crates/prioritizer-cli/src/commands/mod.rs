pub mod config;
pub mod rate;

pub mod client;
pub mod config;
pub mod panel;
pub mod poll;
pub mod types;

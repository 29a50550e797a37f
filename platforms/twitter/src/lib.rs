pub mod client;
pub mod config;
pub mod oauth;

pub use client::TwitterClient;
pub use config::TwitterConfig;

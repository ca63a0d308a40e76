pub mod aggregate;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod html;
pub mod render;
pub mod scrape;
pub mod teams;
pub mod types;

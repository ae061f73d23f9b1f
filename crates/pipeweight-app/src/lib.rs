//! Application service layer - config, form state, HTTP client, export

pub mod client;
pub mod config;
pub mod export;
pub mod form;
pub mod repository;

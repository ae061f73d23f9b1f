//! Domain layer for pipe weight calculation
//!
//! The spec table, the aggregation service and the formatting rules that
//! the endpoint and every client share.

pub mod model;
pub mod repository;
pub mod service;

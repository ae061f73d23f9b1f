//! Domain services

pub mod rounding;
pub mod weight_calculator;

pub use rounding::to_fixed;
pub use weight_calculator::{aggregate, calculate, Aggregate, LineItem};

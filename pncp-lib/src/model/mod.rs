//! Typed models

mod contract;
pub mod fields;
mod record;

pub use contract::*;
pub use record::*;

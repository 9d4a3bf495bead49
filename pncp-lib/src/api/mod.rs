//! Web API operations

pub mod search;

pub use search::*;

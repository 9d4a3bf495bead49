//! PNCP search API client library
//!
//! A Rust async client for the search endpoint of Brazil's public-procurement
//! portal (Portal Nacional de Contratações Públicas). It walks every page of a
//! search, checks the collected records against the server-reported total, and
//! turns the result into a table that can be filtered, summarized and exported
//! to CSV.

pub mod api;
pub mod dataset;
pub mod error;
pub mod model;

mod client;

pub use client::*;

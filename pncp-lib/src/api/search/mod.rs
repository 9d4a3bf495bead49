//! Paginated search over the PNCP `/api/search/` endpoint.
//!
//! The entry point is [`fetch_all`], which walks pages sequentially until the
//! server-reported total is accounted for and reports whether the collected
//! set is complete.

mod fetch;
mod page;
mod pages;
mod query;
mod source;

pub use fetch::*;
pub use page::*;
pub use query::*;
pub use source::*;

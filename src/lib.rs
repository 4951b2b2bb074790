//! crime-api - read-only HTTP API over Karnataka crime statistics.
//!
//! A single delimited file is loaded into memory at startup and exposed
//! through JSON query endpoints: full dump, filters by district and year,
//! top districts by crime count, summary statistics and filter values.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod server;

pub use config::Settings;
pub use dataset::{LoadOutcome, Table, TableLoader};
pub use server::{create_router, AppState};

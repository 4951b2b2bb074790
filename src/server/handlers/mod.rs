//! HTTP request handlers for the web server.

mod api;
mod params;

pub use api::{
    all_records, filters, health, home, not_found, records_by_district, records_by_year, stats,
    top_crime_districts, WELCOME_MESSAGE,
};

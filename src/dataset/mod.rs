//! In-memory crime dataset.
//!
//! The backing file is read once at startup by [`TableLoader`] into an
//! immutable [`Table`]; queries borrow the table and never mutate it.

mod error;
mod loader;
mod query;
mod record;
mod table;
mod value;

pub use error::{LoadError, ParseError};
pub use loader::{LoadOutcome, TableLoader};
pub use query::{DistrictTotal, Filters, Summary, TOP_DISTRICTS_LIMIT};
pub use record::{normalize_column, Columns, Record, DISTRICT, TOTAL_CRIMES, YEAR};
pub use table::Table;
pub use value::{Total, Value};

pub mod aggregate;
pub mod coerce;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod expand;
pub mod filter;
pub mod ingest;
pub mod io;
pub mod model;
pub mod report;
pub mod resolve;
pub mod summary;
pub mod window;

pub use error::{Result, SummaryError};

//! I/O module
//!
//! Handles CSV statement output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (row conversion, statement serialization)

pub mod csv_format;

pub use csv_format::{write_statement_csv, StatementRow};

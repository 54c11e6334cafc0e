//! DataFrame operations behind the dashboard views.
//!
//! Each function takes a Polars `DataFrame` (or a column of it) and returns plain
//! Rust data that the views turn into chart specifications.

pub mod correlation;
pub mod counts;
pub mod describe;
pub mod drop;
pub mod impute;
pub mod missing;
pub mod numeric;
pub mod replace;

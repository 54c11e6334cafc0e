#![warn(clippy::all)]
#![doc = include_str!("../README.md")]

// Modules that make up the Puck View library.
mod args;
mod charts;
mod dataset;
mod enrich;
mod error;
mod excel;
mod file_extension;
mod layout;
mod merge;
mod metadata;
mod narrative;
mod polars;
mod schema;
mod source;
mod table;
mod traits;
mod views;

// Publicly expose the contents of these modules.
pub use self::{
    args::Arguments,
    charts::*,
    dataset::*,
    enrich::*,
    error::*,
    file_extension::*,
    layout::*,
    merge::*,
    metadata::*,
    narrative::*,
    polars::correlation::*,
    polars::counts::*,
    polars::describe::*,
    polars::drop::*,
    polars::impute::*,
    polars::missing::*,
    polars::replace::*,
    schema::*,
    source::*,
    table::*,
    traits::*,
    views::correlation::*,
    views::distribution::*,
    views::missing::*,
    views::overview::*,
    views::scatter::*,
    views::*,
};

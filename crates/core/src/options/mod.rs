//! Dimension option lists for filter dropdowns.

pub mod reduce;

pub use reduce::{DimensionOption, OptionSet, build_options};

//! Request-parameter assembly.
//!
//! Turns a resolved date range plus optional dimension filters into the flat
//! query-parameter set sent to the metrics API. Unset dimensions and the
//! `"all"` sentinel never reach the wire.

pub mod builder;
pub mod dimension;
pub mod memo;


pub use builder::{RequestParams, RequestParamsBuilder};
pub use dimension::{ALL_SENTINEL, Dimension, DimensionSelections, is_active_value};
pub use memo::ParamsMemo;

//! Filter derivation and table contract for Pulseboard.
//!
//! This crate contains pure logic with ZERO network or runtime dependencies.
//! Everything a dashboard widget needs to turn UI selections into a request,
//! and a response back into rows, lives here.
//!
//! # Modules
//!
//! - `period` - Filter modes, selections and date-range resolution
//! - `params` - Request-parameter assembly and dimension filters
//! - `filter` - The per-dashboard filter state container
//! - `options` - Dimension option lists for dropdowns
//! - `table` - Envelope decoding, query state and result state of tables

pub mod filter;
pub mod options;
pub mod params;
pub mod period;
pub mod table;

pub use filter::{DashboardScope, FilterState, ScopedParams};
pub use params::{Dimension, RequestParams};
pub use period::{DateRange, FilterMode};

//! Filter state container.
//!
//! One [`FilterState`] is the single source of truth for a dashboard's (or a
//! warehouse's) active filter. It is owned by whoever hosts the dashboard and
//! handed to widgets explicitly; there is no global default instance.

pub mod scope;
pub mod state;
pub mod summary;


pub use scope::{DashboardScope, ScopedParams};
pub use state::{FilterState, today};
pub use summary::{describe_range, summarize};

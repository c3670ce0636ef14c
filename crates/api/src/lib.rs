//! Network side of Pulseboard.
//!
//! This crate provides:
//! - An HTTP client for the metrics API
//! - The [`DataSource`] seam used by widgets and loaders
//! - A debounce combinator for search input
//! - The shared filter context with its dimension-option loaders
//! - The table widget controller

pub mod client;
pub mod context;
pub mod debounce;
pub mod options;
pub mod source;
pub mod widget;

#[cfg(test)]
mod testing;

pub use client::ApiClient;
pub use context::FilterContext;
pub use debounce::Debouncer;
pub use options::DimensionOptionLoader;
pub use source::DataSource;
pub use widget::{TableWidget, TableWidgetBuilder, WidgetSnapshot};

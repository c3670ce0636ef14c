//! Common wire types shared by the core and API crates.

pub mod pagination;

pub use pagination::{PageRequest, PaginationInfo};

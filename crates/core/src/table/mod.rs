//! Contract shared by every paginated table widget.
//!
//! - [`envelope`] decodes the three response shapes the API uses, once.
//! - [`query`] owns search, page, page size and sort.
//! - [`state`] owns rows, pagination, error and loading, and discards
//!   responses that were superseded by a newer request.

pub mod envelope;
pub mod query;
pub mod state;


pub use envelope::{Envelope, field_is_null};
pub use query::{SortOrder, SortState, TableQueryState};
pub use state::{FetchTicket, TableState, TableView};

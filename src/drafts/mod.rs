pub mod handoff;
pub mod query;
pub mod store;

pub use handoff::EditHandoff;
pub use query::{DraftFilter, DraftQuery, SortOrder};
pub use store::{DraftStore, StoreError};

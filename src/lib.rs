//! Property listing form, local drafts and lead submission.

pub mod client;
pub mod config;
pub mod drafts;
pub mod form;
pub mod models;
pub mod storage;

pub use client::{LeadClient, LeadSubmitter, SubmitError};
pub use config::Config;
pub use drafts::{DraftFilter, DraftQuery, DraftStore, EditHandoff, SortOrder};
pub use form::FormState;
pub use models::{Draft, DraftId, PropertyListing};

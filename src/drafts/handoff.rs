use tracing::{debug, warn};

use crate::models::Draft;
use crate::storage::{KeyValueStorage, StorageError};

/// Slot carrying a draft from the drafts view into the form
pub const EDITING_DRAFT_KEY: &str = "editingDraft";

/// One-shot handoff of a draft being edited.
///
/// The drafts view stages a draft; the form takes it when it starts,
/// which empties the slot.
pub struct EditHandoff<S> {
    storage: S,
}

impl<S: KeyValueStorage> EditHandoff<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn stage(&self, draft: &Draft) -> Result<(), StorageError> {
        let json = serde_json::to_string(draft).map_err(|source| StorageError::Encode {
            key: EDITING_DRAFT_KEY.to_string(),
            source,
        })?;
        self.storage.set(EDITING_DRAFT_KEY, &json)?;
        debug!("Staged draft {} for editing", draft.id);
        Ok(())
    }

    /// Consume the staged draft, if any
    pub fn take(&self) -> Result<Option<Draft>, StorageError> {
        let Some(raw) = self.storage.get(EDITING_DRAFT_KEY)? else {
            return Ok(None);
        };
        self.storage.remove(EDITING_DRAFT_KEY)?;

        match serde_json::from_str(&raw) {
            Ok(draft) => Ok(Some(draft)),
            Err(e) => {
                warn!("Discarding malformed staged draft: {}", e);
                Ok(None)
            }
        }
    }
}

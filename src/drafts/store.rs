use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Draft, DraftId, PropertyListing};
use crate::storage::{KeyValueStorage, StorageError};

/// Slot holding the whole draft collection
pub const DRAFTS_KEY: &str = "propertyDrafts";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode drafts: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to read drafts: {0}")]
    Read(#[source] StorageError),
    #[error("stored drafts are not a JSON list, refusing to overwrite: {0}")]
    Unreadable(#[source] serde_json::Error),
    #[error("failed to persist drafts: {0}")]
    Write(#[from] StorageError),
}

/// One stored record: a decoded draft, or JSON that does not decode and is
/// carried through rewrites untouched.
enum Entry {
    Draft(Draft),
    Opaque(serde_json::Value),
}

impl Entry {
    fn decode(value: serde_json::Value) -> Self {
        match Draft::deserialize(&value) {
            Ok(draft) => Entry::Draft(draft),
            Err(e) => {
                warn!("Skipping unreadable draft {}: {}", value.get("id").unwrap_or(&value), e);
                Entry::Opaque(value)
            }
        }
    }

    fn id(&self) -> Option<DraftId> {
        match self {
            Entry::Draft(draft) => Some(draft.id.clone()),
            Entry::Opaque(value) => value
                .get("id")
                .and_then(|id| DraftId::deserialize(id).ok()),
        }
    }
}

/// Ordered collection of drafts persisted under a single key.
///
/// Every mutation rewrites the whole collection. Reads fail closed: a
/// missing or unreadable collection is an empty one, and a record that
/// does not decode is left out of [`DraftStore::list`]. Mutations never
/// drop such records, and refuse to touch a slot they cannot parse.
pub struct DraftStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> DraftStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// All readable drafts in stored order
    pub fn list(&self) -> Vec<Draft> {
        match self.load() {
            Ok(entries) => entries
                .into_iter()
                .filter_map(|entry| match entry {
                    Entry::Draft(draft) => Some(draft),
                    Entry::Opaque(_) => None,
                })
                .collect(),
            Err(e) => {
                warn!("Treating drafts as empty: {}", e);
                Vec::new()
            }
        }
    }

    pub fn get(&self, id: &DraftId) -> Option<Draft> {
        self.list().into_iter().find(|d| &d.id == id)
    }

    /// Replace the draft with the same id, or append it
    pub fn save(&self, draft: Draft) -> Result<(), StoreError> {
        let mut entries = self.load()?;
        match entries.iter().position(|e| e.id().as_ref() == Some(&draft.id)) {
            Some(i) => {
                debug!("Replacing draft {}", draft.id);
                entries[i] = Entry::Draft(draft);
            }
            None => {
                debug!("Appending draft {}", draft.id);
                entries.push(Entry::Draft(draft));
            }
        }
        self.write(&entries)
    }

    /// Save `data` as a new draft with a fresh id and timestamp
    pub fn create(&self, data: PropertyListing) -> Result<Draft, StoreError> {
        let draft = Draft::new(data);
        self.save(draft.clone())?;
        Ok(draft)
    }

    /// Remove the record with `id`. Returns `false` (and writes nothing) if absent.
    pub fn delete(&self, id: &DraftId) -> Result<bool, StoreError> {
        let mut entries = self.load()?;
        let before = entries.len();
        entries.retain(|e| e.id().as_ref() != Some(id));
        if entries.len() == before {
            debug!("No draft {} to delete", id);
            return Ok(false);
        }
        self.write(&entries)?;
        debug!("Deleted draft {}", id);
        Ok(true)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.write(&[])?;
        debug!("Cleared all drafts");
        Ok(())
    }

    /// Decode the collection record by record. Absent or `null` is empty.
    fn load(&self) -> Result<Vec<Entry>, StoreError> {
        let Some(raw) = self.storage.get(DRAFTS_KEY).map_err(StoreError::Read)? else {
            return Ok(Vec::new());
        };
        let values = serde_json::from_str::<Option<Vec<serde_json::Value>>>(&raw)
            .map_err(StoreError::Unreadable)?;
        Ok(values
            .unwrap_or_default()
            .into_iter()
            .map(Entry::decode)
            .collect())
    }

    fn write(&self, entries: &[Entry]) -> Result<(), StoreError> {
        let values = entries
            .iter()
            .map(|entry| match entry {
                Entry::Draft(draft) => serde_json::to_value(draft),
                Entry::Opaque(value) => Ok(value.clone()),
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::Encode)?;
        let json = serde_json::to_string(&values).map_err(StoreError::Encode)?;
        self.storage.set(DRAFTS_KEY, &json)?;
        Ok(())
    }
}

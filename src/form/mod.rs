pub mod fields;
pub mod templates;

use thiserror::Error;
use tracing::{debug, info};

use crate::client::{LeadSubmitter, SubmitError};
use crate::drafts::{DraftStore, StoreError};
use crate::models::{Category, Draft, DraftId, PropertyListing, SubType};
use crate::storage::KeyValueStorage;

pub use fields::{FieldError, FieldPath};
pub use templates::{template, TEMPLATE_NAMES};

/// A listing that cannot be submitted yet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{} is required", .0.label())]
    MissingField(RequiredField),
    #[error("subtype `{sub_type}` is not a {category} property")]
    SubTypeMismatch { category: Category, sub_type: SubType },
}

/// Fields that must be filled in before submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Location,
    ExpectedPrice,
    PropertySize,
    Phone,
    Email,
    Name,
}

impl RequiredField {
    pub fn label(&self) -> &'static str {
        match self {
            RequiredField::Location => "Location",
            RequiredField::ExpectedPrice => "Expected price",
            RequiredField::PropertySize => "Property size",
            RequiredField::Phone => "Phone",
            RequiredField::Email => "Email",
            RequiredField::Name => "Name",
        }
    }
}

/// Working state of the property submission form.
///
/// Holds the listing being edited. Nothing here is persisted until
/// [`FormState::save_draft`] or sent until [`FormState::submit`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    listing: PropertyListing,
    editing: Option<Draft>,
}

impl FormState {
    /// A blank form
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume editing a saved draft; saving will replace it
    pub fn from_draft(draft: Draft) -> Self {
        Self {
            listing: draft.data.clone(),
            editing: Some(draft),
        }
    }

    pub fn listing(&self) -> &PropertyListing {
        &self.listing
    }

    /// Id of the draft being edited, if any
    pub fn editing_id(&self) -> Option<&DraftId> {
        self.editing.as_ref().map(|d| &d.id)
    }

    /// Replace the whole listing with a named preset. Unknown names change nothing.
    pub fn apply_template(&mut self, name: &str) -> bool {
        match template(name) {
            Some(listing) => {
                self.listing = listing;
                info!("Auto-filled with {} template", name);
                true
            }
            None => {
                debug!("No template named {:?}", name);
                false
            }
        }
    }

    pub fn set_field(&mut self, path: FieldPath, value: &str) -> Result<(), FieldError> {
        path.apply(&mut self.listing, value)
    }

    /// Flip `name` in the amenity set, returning whether it is now selected
    pub fn toggle_amenity(&mut self, name: &str) -> bool {
        self.listing.additional_details.toggle_amenity(name)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let contact = &self.listing.contact_details;
        let details = &self.listing.property_details;
        let required = [
            (RequiredField::Location, &details.location),
            (RequiredField::ExpectedPrice, &details.expected_price),
            (RequiredField::PropertySize, &details.property_size),
            (RequiredField::Phone, &contact.phone),
            (RequiredField::Email, &contact.email),
            (RequiredField::Name, &contact.name),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(ValidationError::MissingField(*field));
        }

        let property_type = &self.listing.property_type;
        if let Some(sub_type) = property_type.sub_type {
            if sub_type.category() != property_type.category {
                return Err(ValidationError::SubTypeMismatch {
                    category: property_type.category,
                    sub_type,
                });
            }
        }
        Ok(())
    }

    /// Persist the working listing as a draft. Incomplete listings are allowed.
    pub fn save_draft<S: KeyValueStorage>(
        &mut self,
        store: &DraftStore<S>,
    ) -> Result<Draft, StoreError> {
        let draft = match &self.editing {
            Some(existing) => Draft {
                data: self.listing.clone(),
                ..existing.clone()
            },
            None => Draft::new(self.listing.clone()),
        };
        store.save(draft.clone())?;
        info!("Saved draft {}", draft.id);
        self.editing = Some(draft.clone());
        Ok(draft)
    }

    /// Validate, then send the listing to the lead service once.
    /// The working state is kept whatever the outcome.
    pub async fn submit(&self, submitter: &dyn LeadSubmitter) -> Result<(), SubmitError> {
        self.validate()?;
        info!("Submitting listing to {}", submitter.endpoint());
        submitter.submit_lead(&self.listing).await
    }
}

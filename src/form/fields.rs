use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::models::PropertyListing;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("invalid value `{value}` for {field}")]
    InvalidValue { field: FieldPath, value: String },
}

/// A single editable field of the listing, addressed by its JSON path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    Intent,
    Category,
    SubType,
    Phone,
    Email,
    Name,
    Location,
    ExpectedPrice,
    PropertySize,
    Unit,
    Bedrooms,
    Bathrooms,
    Furnishing,
    Availability,
    Description,
}

impl FieldPath {
    pub const ALL: [FieldPath; 15] = [
        FieldPath::Intent,
        FieldPath::Category,
        FieldPath::SubType,
        FieldPath::Phone,
        FieldPath::Email,
        FieldPath::Name,
        FieldPath::Location,
        FieldPath::ExpectedPrice,
        FieldPath::PropertySize,
        FieldPath::Unit,
        FieldPath::Bedrooms,
        FieldPath::Bathrooms,
        FieldPath::Furnishing,
        FieldPath::Availability,
        FieldPath::Description,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldPath::Intent => "propertyType.intent",
            FieldPath::Category => "propertyType.category",
            FieldPath::SubType => "propertyType.subType",
            FieldPath::Phone => "contactDetails.phone",
            FieldPath::Email => "contactDetails.email",
            FieldPath::Name => "contactDetails.name",
            FieldPath::Location => "propertyDetails.location",
            FieldPath::ExpectedPrice => "propertyDetails.expectedPrice",
            FieldPath::PropertySize => "propertyDetails.propertySize",
            FieldPath::Unit => "propertyDetails.unit",
            FieldPath::Bedrooms => "propertyDetails.bedrooms",
            FieldPath::Bathrooms => "propertyDetails.bathrooms",
            FieldPath::Furnishing => "propertyDetails.furnishing",
            FieldPath::Availability => "propertyDetails.availability",
            FieldPath::Description => "additionalDetails.description",
        }
    }

    /// Write `value` into the one field this path names.
    /// On error `listing` is left untouched.
    pub(crate) fn apply(&self, listing: &mut PropertyListing, value: &str) -> Result<(), FieldError> {
        let invalid = || FieldError::InvalidValue {
            field: *self,
            value: value.to_string(),
        };
        let property_type = &mut listing.property_type;
        let contact = &mut listing.contact_details;
        let details = &mut listing.property_details;

        match self {
            FieldPath::Intent => property_type.intent = value.parse().map_err(|_| invalid())?,
            FieldPath::Category => property_type.category = value.parse().map_err(|_| invalid())?,
            FieldPath::SubType => {
                property_type.sub_type = if value.is_empty() {
                    None
                } else {
                    Some(value.parse().map_err(|_| invalid())?)
                }
            }
            FieldPath::Phone => contact.phone = value.to_string(),
            FieldPath::Email => contact.email = value.to_string(),
            FieldPath::Name => contact.name = value.to_string(),
            FieldPath::Location => details.location = value.to_string(),
            FieldPath::ExpectedPrice => details.expected_price = value.to_string(),
            FieldPath::PropertySize => details.property_size = value.to_string(),
            FieldPath::Unit => details.unit = value.parse().map_err(|_| invalid())?,
            FieldPath::Bedrooms => details.bedrooms = value.to_string(),
            FieldPath::Bathrooms => details.bathrooms = value.to_string(),
            FieldPath::Furnishing => details.furnishing = value.parse().map_err(|_| invalid())?,
            FieldPath::Availability => details.availability = value.to_string(),
            FieldPath::Description => {
                listing.additional_details.description = value.to_string()
            }
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldPath::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| FieldError::UnknownField(s.to_string()))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

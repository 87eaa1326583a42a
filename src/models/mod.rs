use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

mod id;

pub use id::DraftId;

/// Amenities offered by the submission form
pub const AMENITY_OPTIONS: [&str; 10] = [
    "Parking",
    "Security",
    "Lift",
    "Power Backup",
    "Gas Pipeline",
    "Swimming Pool",
    "Gym",
    "Club House",
    "Kids Play Area",
    "Garden",
];

/// Why the owner is listing the property
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    #[default]
    Sell,
    Rent,
    Pg,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Sell => "sell",
            Intent::Rent => "rent",
            Intent::Pg => "pg",
        }
    }

    /// Label used on the form's intent buttons
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Sell => "Sell",
            Intent::Rent => "Rent / Lease",
            Intent::Pg => "Pg",
        }
    }
}

/// Residential or commercial property
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Residential,
    Commercial,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Residential => "residential",
            Category::Commercial => "commercial",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Residential => "Residential",
            Category::Commercial => "Commercial",
        }
    }

    /// Subtypes that can be picked once this category is selected
    pub fn sub_types(&self) -> &'static [SubType] {
        match self {
            Category::Residential => &[
                SubType::Flat,
                SubType::Villa,
                SubType::BuilderFloor,
                SubType::Plot,
            ],
            Category::Commercial => &[SubType::Office, SubType::Shop, SubType::CommercialLand],
        }
    }
}

/// Property subtype. The residential and commercial vocabularies are disjoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SubType {
    Flat,
    Villa,
    BuilderFloor,
    Plot,
    Office,
    Shop,
    CommercialLand,
}

impl SubType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubType::Flat => "flat",
            SubType::Villa => "villa",
            SubType::BuilderFloor => "builder-floor",
            SubType::Plot => "plot",
            SubType::Office => "office",
            SubType::Shop => "shop",
            SubType::CommercialLand => "commercial-land",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubType::Flat => "Flat/Apartment",
            SubType::Villa => "Independent House / Villa",
            SubType::BuilderFloor => "Independent / Builder Floor",
            SubType::Plot => "Plot / Land",
            SubType::Office => "Office Space",
            SubType::Shop => "Shop/Showroom",
            SubType::CommercialLand => "Commercial Land",
        }
    }

    /// Category whose vocabulary contains this subtype
    pub fn category(&self) -> Category {
        match self {
            SubType::Flat | SubType::Villa | SubType::BuilderFloor | SubType::Plot => {
                Category::Residential
            }
            SubType::Office | SubType::Shop | SubType::CommercialLand => Category::Commercial,
        }
    }
}

/// Unit the property size is measured in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AreaUnit {
    #[default]
    Sqft,
    Sqm,
    Acres,
}

impl AreaUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            AreaUnit::Sqft => "sqft",
            AreaUnit::Sqm => "sqm",
            AreaUnit::Acres => "acres",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AreaUnit::Sqft => "sq.ft",
            AreaUnit::Sqm => "sq.m",
            AreaUnit::Acres => "acres",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Furnishing {
    Furnished,
    SemiFurnished,
    #[default]
    Unfurnished,
}

impl Furnishing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Furnishing::Furnished => "furnished",
            Furnishing::SemiFurnished => "semi-furnished",
            Furnishing::Unfurnished => "unfurnished",
        }
    }
}

macro_rules! impl_from_str {
    ($ty:ty, $what:literal, [$($variant:expr),+ $(,)?]) => {
        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                [$($variant),+]
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| UnknownVariant {
                        kind: $what,
                        value: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_from_str!(Intent, "intent", [Intent::Sell, Intent::Rent, Intent::Pg]);
impl_from_str!(Category, "category", [Category::Residential, Category::Commercial]);
impl_from_str!(
    SubType,
    "subtype",
    [
        SubType::Flat,
        SubType::Villa,
        SubType::BuilderFloor,
        SubType::Plot,
        SubType::Office,
        SubType::Shop,
        SubType::CommercialLand,
    ]
);
impl_from_str!(AreaUnit, "unit", [AreaUnit::Sqft, AreaUnit::Sqm, AreaUnit::Acres]);
impl_from_str!(
    Furnishing,
    "furnishing",
    [
        Furnishing::Furnished,
        Furnishing::SemiFurnished,
        Furnishing::Unfurnished,
    ]
);

/// A string that did not name any variant of an enumerated field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// What is being listed and how
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PropertyType {
    pub intent: Intent,
    pub category: Category,
    /// Unset is stored as `""`
    #[serde(
        default,
        serialize_with = "serialize_sub_type",
        deserialize_with = "deserialize_sub_type"
    )]
    pub sub_type: Option<SubType>,
}

impl PropertyType {
    /// Display text such as `Sell - Residential - Flat/Apartment`
    pub fn display_text(&self) -> String {
        let mut text = format!("{} - {}", capitalize(self.intent.as_str()), self.category.label());
        if let Some(sub_type) = self.sub_type {
            text.push_str(" - ");
            text.push_str(sub_type.label());
        }
        text
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn serialize_sub_type<S: Serializer>(value: &Option<SubType>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(value.map(|v| v.as_str()).unwrap_or(""))
}

fn deserialize_sub_type<'de, D: Deserializer<'de>>(d: D) -> Result<Option<SubType>, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ContactDetails {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
}

/// Size, price and condition of the property.
///
/// Numeric values are kept exactly as typed; they are parsed only where
/// they are compared (see [`PropertyDetails::price_value`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetails {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub expected_price: String,
    #[serde(default)]
    pub property_size: String,
    #[serde(default)]
    pub unit: AreaUnit,
    #[serde(default)]
    pub bedrooms: String,
    #[serde(default)]
    pub bathrooms: String,
    #[serde(default)]
    pub furnishing: Furnishing,
    #[serde(default = "default_availability")]
    pub availability: String,
}

pub const DEFAULT_AVAILABILITY: &str = "immediate";

fn default_availability() -> String {
    DEFAULT_AVAILABILITY.to_string()
}

impl Default for PropertyDetails {
    fn default() -> Self {
        Self {
            location: String::new(),
            expected_price: String::new(),
            property_size: String::new(),
            unit: AreaUnit::default(),
            bedrooms: String::new(),
            bathrooms: String::new(),
            furnishing: Furnishing::default(),
            availability: default_availability(),
        }
    }
}

impl PropertyDetails {
    /// Expected price as a number; blank or non-numeric text counts as zero
    pub fn price_value(&self) -> f64 {
        self.expected_price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AdditionalDetails {
    #[serde(default)]
    pub description: String,
    /// Treated as a set: no duplicates, order carries no meaning
    #[serde(default, deserialize_with = "deserialize_amenities")]
    pub amenities: Vec<String>,
}

/// Stored lists may repeat an amenity; keep the first occurrence only
fn deserialize_amenities<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let raw = Vec::<String>::deserialize(d)?;
    let mut amenities: Vec<String> = Vec::with_capacity(raw.len());
    for name in raw {
        if !amenities.contains(&name) {
            amenities.push(name);
        }
    }
    Ok(amenities)
}

impl AdditionalDetails {
    pub fn has_amenity(&self, name: &str) -> bool {
        self.amenities.iter().any(|a| a == name)
    }

    /// Flip membership of `name`, returning whether it is present afterwards
    pub fn toggle_amenity(&mut self, name: &str) -> bool {
        if self.has_amenity(name) {
            self.amenities.retain(|a| a != name);
            false
        } else {
            self.amenities.push(name.to_string());
            true
        }
    }
}

/// The property submission payload, sent as-is to the lead endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListing {
    #[serde(default)]
    pub property_type: PropertyType,
    #[serde(default)]
    pub contact_details: ContactDetails,
    #[serde(default)]
    pub property_details: PropertyDetails,
    #[serde(default)]
    pub additional_details: AdditionalDetails,
}

/// A locally saved, not yet submitted listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: DraftId,
    pub created_at: DateTime<Utc>,
    pub data: PropertyListing,
}

impl Draft {
    /// Wrap a listing with a fresh id and the current time
    pub fn new(data: PropertyListing) -> Self {
        Self {
            id: DraftId::generate(),
            created_at: Utc::now(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn listing_uses_camel_case_field_names() {
        let listing = PropertyListing::default();
        let value = serde_json::to_value(&listing).unwrap();

        assert_eq!(value["propertyType"]["intent"], "sell");
        assert_eq!(value["propertyType"]["subType"], "");
        assert_eq!(value["propertyDetails"]["expectedPrice"], "");
        assert_eq!(value["propertyDetails"]["furnishing"], "unfurnished");
        assert_eq!(value["propertyDetails"]["availability"], "immediate");
        assert_eq!(value["additionalDetails"]["amenities"], json!([]));
    }

    #[test]
    fn reads_draft_written_by_the_web_form() {
        let raw = json!({
            "id": 1717171717171u64,
            "createdAt": "2024-05-31T15:28:37.171Z",
            "data": {
                "propertyType": { "intent": "rent", "category": "commercial", "subType": "commercial-land" },
                "contactDetails": { "phone": "9876543211", "email": "a@b.c", "name": "Jane" },
                "propertyDetails": {
                    "location": "Tech Park",
                    "expectedPrice": "150000",
                    "propertySize": "1500",
                    "unit": "sqm",
                    "bedrooms": "",
                    "bathrooms": "2",
                    "furnishing": "semi-furnished",
                    "availability": "immediate"
                },
                "additionalDetails": { "description": "", "amenities": ["Lift"] }
            }
        });

        let draft: Draft = serde_json::from_value(raw).unwrap();
        assert_eq!(draft.id.as_str(), "1717171717171");
        assert_eq!(draft.data.property_type.sub_type, Some(SubType::CommercialLand));
        assert_eq!(draft.data.property_details.unit, AreaUnit::Sqm);
        assert_eq!(draft.data.property_details.furnishing, Furnishing::SemiFurnished);
    }

    #[test]
    fn price_value_defaults_to_zero() {
        let mut details = PropertyDetails::default();
        assert_eq!(details.price_value(), 0.0);

        details.expected_price = "abc".to_string();
        assert_eq!(details.price_value(), 0.0);

        details.expected_price = " 2500000 ".to_string();
        assert_eq!(details.price_value(), 2_500_000.0);
    }

    #[test]
    fn subtypes_belong_to_their_category() {
        for category in [Category::Residential, Category::Commercial] {
            for sub_type in category.sub_types() {
                assert_eq!(sub_type.category(), category);
            }
        }
    }

    #[test]
    fn display_text_skips_missing_subtype() {
        let mut property_type = PropertyType::default();
        assert_eq!(property_type.display_text(), "Sell - Residential");

        property_type.sub_type = Some(SubType::BuilderFloor);
        assert_eq!(
            property_type.display_text(),
            "Sell - Residential - Independent / Builder Floor"
        );
    }

    #[test]
    fn repeated_stored_amenities_load_once() {
        let details: AdditionalDetails = serde_json::from_value(json!({
            "description": "",
            "amenities": ["Gym", "Lift", "Gym", "Lift", "Garden"]
        }))
        .unwrap();

        assert_eq!(details.amenities, ["Gym", "Lift", "Garden"]);
    }

    #[test]
    fn toggling_amenity_twice_restores_membership() {
        let mut details = AdditionalDetails::default();
        assert!(details.toggle_amenity("Gym"));
        assert!(!details.toggle_amenity("Gym"));
        assert!(details.amenities.is_empty());
    }
}

use crate::models::{
    AdditionalDetails, AreaUnit, Category, ContactDetails, Furnishing, Intent, PropertyDetails,
    PropertyListing, PropertyType, SubType, DEFAULT_AVAILABILITY,
};

/// Names of the auto-fill presets, in menu order
pub const TEMPLATE_NAMES: [&str; 3] = ["Luxury Apartment", "Commercial Office", "Residential Plot"];

/// Look up an auto-fill preset by its menu name
pub fn template(name: &str) -> Option<PropertyListing> {
    match name {
        "Luxury Apartment" => Some(luxury_apartment()),
        "Commercial Office" => Some(commercial_office()),
        "Residential Plot" => Some(residential_plot()),
        _ => None,
    }
}

fn amenities(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn luxury_apartment() -> PropertyListing {
    PropertyListing {
        property_type: PropertyType {
            intent: Intent::Sell,
            category: Category::Residential,
            sub_type: Some(SubType::Flat),
        },
        contact_details: ContactDetails {
            phone: "9876543210".to_string(),
            email: "luxury@example.com".to_string(),
            name: "John Doe".to_string(),
        },
        property_details: PropertyDetails {
            location: "Palm Heights, Marine Drive".to_string(),
            expected_price: "15000000".to_string(),
            property_size: "2500".to_string(),
            unit: AreaUnit::Sqft,
            bedrooms: "4".to_string(),
            bathrooms: "3".to_string(),
            furnishing: Furnishing::Furnished,
            availability: DEFAULT_AVAILABILITY.to_string(),
        },
        additional_details: AdditionalDetails {
            description: "Luxury apartment with sea view".to_string(),
            amenities: amenities(&["Parking", "Security", "Lift", "Swimming Pool", "Gym"]),
        },
    }
}

fn commercial_office() -> PropertyListing {
    PropertyListing {
        property_type: PropertyType {
            intent: Intent::Rent,
            category: Category::Commercial,
            sub_type: Some(SubType::Office),
        },
        contact_details: ContactDetails {
            phone: "9876543211".to_string(),
            email: "office@example.com".to_string(),
            name: "Jane Smith".to_string(),
        },
        property_details: PropertyDetails {
            location: "Business District, Tech Park".to_string(),
            expected_price: "150000".to_string(),
            property_size: "1500".to_string(),
            unit: AreaUnit::Sqft,
            bedrooms: String::new(),
            bathrooms: "2".to_string(),
            furnishing: Furnishing::SemiFurnished,
            availability: DEFAULT_AVAILABILITY.to_string(),
        },
        additional_details: AdditionalDetails {
            description: "Modern office space in prime location".to_string(),
            amenities: amenities(&["Parking", "Security", "Lift", "Power Backup"]),
        },
    }
}

fn residential_plot() -> PropertyListing {
    PropertyListing {
        property_type: PropertyType {
            intent: Intent::Sell,
            category: Category::Residential,
            sub_type: Some(SubType::Plot),
        },
        contact_details: ContactDetails {
            phone: "9876543212".to_string(),
            email: "plot@example.com".to_string(),
            name: "Robert Wilson".to_string(),
        },
        property_details: PropertyDetails {
            location: "Green Valley, Suburb Area".to_string(),
            expected_price: "5000000".to_string(),
            property_size: "2000".to_string(),
            unit: AreaUnit::Sqft,
            bedrooms: String::new(),
            bathrooms: String::new(),
            furnishing: Furnishing::Unfurnished,
            availability: DEFAULT_AVAILABILITY.to_string(),
        },
        additional_details: AdditionalDetails {
            description: "Corner plot in gated community".to_string(),
            amenities: amenities(&["Security", "Garden"]),
        },
    }
}

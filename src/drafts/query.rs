use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::{Category, Draft, Intent, UnknownVariant};

/// Type filter offered on the drafts page.
///
/// Intent and category share one flat list, so a draft cannot be
/// filtered by both at once and `pg` drafts only show under `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftFilter {
    #[default]
    All,
    Sell,
    Rent,
    Residential,
    Commercial,
}

impl DraftFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftFilter::All => "all",
            DraftFilter::Sell => "sell",
            DraftFilter::Rent => "rent",
            DraftFilter::Residential => "residential",
            DraftFilter::Commercial => "commercial",
        }
    }

    pub fn matches(&self, draft: &Draft) -> bool {
        let property_type = &draft.data.property_type;
        match self {
            DraftFilter::All => true,
            DraftFilter::Sell => property_type.intent == Intent::Sell,
            DraftFilter::Rent => property_type.intent == Intent::Rent,
            DraftFilter::Residential => property_type.category == Category::Residential,
            DraftFilter::Commercial => property_type.category == Category::Commercial,
        }
    }
}

/// Ordering of the drafts page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    PriceHigh,
    PriceLow,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::PriceHigh => "price-high",
            SortOrder::PriceLow => "price-low",
        }
    }

    fn compare(&self, a: &Draft, b: &Draft) -> Ordering {
        let price = |d: &Draft| d.data.property_details.price_value();
        match self {
            SortOrder::Newest => b.created_at.cmp(&a.created_at),
            SortOrder::Oldest => a.created_at.cmp(&b.created_at),
            SortOrder::PriceHigh => price(b).total_cmp(&price(a)),
            SortOrder::PriceLow => price(a).total_cmp(&price(b)),
        }
    }
}

impl FromStr for DraftFilter {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            DraftFilter::All,
            DraftFilter::Sell,
            DraftFilter::Rent,
            DraftFilter::Residential,
            DraftFilter::Commercial,
        ]
        .into_iter()
        .find(|f| f.as_str() == s)
        .ok_or_else(|| UnknownVariant {
            kind: "filter",
            value: s.to_string(),
        })
    }
}

impl FromStr for SortOrder {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            SortOrder::Newest,
            SortOrder::Oldest,
            SortOrder::PriceHigh,
            SortOrder::PriceLow,
        ]
        .into_iter()
        .find(|o| o.as_str() == s)
        .ok_or_else(|| UnknownVariant {
            kind: "sort order",
            value: s.to_string(),
        })
    }
}

impl fmt::Display for DraftFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search, filter and sort parameters of the drafts page
#[derive(Debug, Clone, Default)]
pub struct DraftQuery {
    /// Case-insensitive text matched against location, contact name and description
    pub search: String,
    pub filter: DraftFilter,
    pub sort: SortOrder,
}

impl DraftQuery {
    fn matches_search(&self, draft: &Draft) -> bool {
        let term = self.search.to_lowercase();
        if term.is_empty() {
            return true;
        }
        let data = &draft.data;
        [
            &data.property_details.location,
            &data.contact_details.name,
            &data.additional_details.description,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
    }

    /// Derive the visible drafts. Ties keep their input order.
    pub fn apply(&self, drafts: &[Draft]) -> Vec<Draft> {
        let mut result: Vec<Draft> = drafts
            .iter()
            .filter(|d| self.matches_search(d) && self.filter.matches(d))
            .cloned()
            .collect();
        // sort_by is stable
        result.sort_by(|a, b| self.sort.compare(a, b));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DraftId, PropertyListing};
    use chrono::{TimeZone, Utc};

    fn draft(id: &str, minute: u32, price: &str) -> Draft {
        let mut data = PropertyListing::default();
        data.property_details.expected_price = price.to_string();
        Draft {
            id: DraftId::from(id),
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, minute, 0).unwrap(),
            data,
        }
    }

    fn ids(drafts: &[Draft]) -> Vec<&str> {
        drafts.iter().map(|d| d.id.as_str()).collect()
    }

    fn sorted(drafts: &[Draft], sort: SortOrder) -> Vec<Draft> {
        DraftQuery {
            sort,
            ..Default::default()
        }
        .apply(drafts)
    }

    #[test]
    fn sorts_by_price_and_creation_time() {
        let drafts = vec![
            draft("mid", 0, "500000"),
            draft("high", 1, "2000000"),
            draft("low", 2, "100000"),
        ];

        assert_eq!(ids(&sorted(&drafts, SortOrder::PriceHigh)), ["high", "mid", "low"]);
        assert_eq!(ids(&sorted(&drafts, SortOrder::PriceLow)), ["low", "mid", "high"]);
        assert_eq!(ids(&sorted(&drafts, SortOrder::Oldest)), ["mid", "high", "low"]);
        assert_eq!(ids(&sorted(&drafts, SortOrder::Newest)), ["low", "high", "mid"]);
    }

    #[test]
    fn missing_or_garbage_price_sorts_as_zero_and_ties_are_stable() {
        let drafts = vec![
            draft("blank", 0, ""),
            draft("ten", 1, "10"),
            draft("garbage", 2, "n/a"),
            draft("zero", 3, "0"),
        ];

        assert_eq!(
            ids(&sorted(&drafts, SortOrder::PriceLow)),
            ["blank", "garbage", "zero", "ten"]
        );
        assert_eq!(
            ids(&sorted(&drafts, SortOrder::PriceHigh)),
            ["ten", "blank", "garbage", "zero"]
        );
    }

    #[test]
    fn sorting_is_idempotent() {
        let drafts = vec![
            draft("a", 5, "3"),
            draft("b", 1, "3"),
            draft("c", 3, "1"),
            draft("d", 3, "7"),
        ];

        for order in [
            SortOrder::Newest,
            SortOrder::Oldest,
            SortOrder::PriceHigh,
            SortOrder::PriceLow,
        ] {
            let once = sorted(&drafts, order);
            let twice = sorted(&once, order);
            assert_eq!(once, twice, "{order}");
        }
    }

    #[test]
    fn residential_filter_ignores_intent() {
        let mut drafts = Vec::new();
        for (i, (intent, category)) in [
            (Intent::Sell, Category::Residential),
            (Intent::Rent, Category::Commercial),
            (Intent::Pg, Category::Residential),
            (Intent::Sell, Category::Commercial),
        ]
        .into_iter()
        .enumerate()
        {
            let mut d = draft(&i.to_string(), i as u32, "");
            d.data.property_type.intent = intent;
            d.data.property_type.category = category;
            drafts.push(d);
        }

        let query = DraftQuery {
            filter: DraftFilter::Residential,
            sort: SortOrder::Oldest,
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&drafts)), ["0", "2"]);

        let query = DraftQuery {
            filter: DraftFilter::Sell,
            sort: SortOrder::Oldest,
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&drafts)), ["0", "3"]);

        assert_eq!(DraftQuery::default().apply(&drafts).len(), 4);
    }

    #[test]
    fn search_matches_any_of_three_fields_case_insensitively() {
        let mut by_location = draft("location", 0, "");
        by_location.data.property_details.location = "Palm Heights, Marine Drive".to_string();
        let mut by_name = draft("name", 1, "");
        by_name.data.contact_details.name = "John MARINER".to_string();
        let mut by_description = draft("description", 2, "");
        by_description.data.additional_details.description = "Sea view".to_string();
        let mut other = draft("other", 3, "");
        other.data.contact_details.email = "marine@example.com".to_string();
        let drafts = vec![by_location, by_name, by_description, other];

        let search = |term: &str| {
            let query = DraftQuery {
                search: term.to_string(),
                sort: SortOrder::Oldest,
                ..Default::default()
            };
            query.apply(&drafts)
        };

        assert_eq!(ids(&search("marine")), ["location", "name"]);
        assert_eq!(ids(&search("SEA")), ["description"]);
        assert_eq!(ids(&search("")).len(), 4);
        assert!(search("nowhere").is_empty());

        for term in ["marine", "sea", "e", "zz"] {
            let found = search(term);
            for d in &drafts {
                let data = &d.data;
                let expected = [
                    &data.property_details.location,
                    &data.contact_details.name,
                    &data.additional_details.description,
                ]
                .iter()
                .any(|f| f.to_lowercase().contains(term));
                assert_eq!(found.contains(d), expected, "{term} / {}", d.id);
            }
        }
    }

    #[test]
    fn parses_page_vocabulary() {
        assert_eq!("price-high".parse::<SortOrder>().unwrap(), SortOrder::PriceHigh);
        assert_eq!("commercial".parse::<DraftFilter>().unwrap(), DraftFilter::Commercial);
        assert!("pg".parse::<DraftFilter>().is_err());
    }
}

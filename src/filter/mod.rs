//! Property browse filtering, sorting and pagination.
//!
//! Translates the optional browse query parameters into an in-memory match
//! over the publicly browsable set (available + approved). Bounds are
//! inclusive, location is a case-insensitive substring of the address, and
//! amenities are an all-of match. Pages are 1-based; the page size is capped
//! by configuration.

use serde::Deserialize;

use crate::config;
use crate::domain::property::{Property, PropertyStatus, PropertyType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Price,
    Bedrooms,
    Bathrooms,
    Area,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyFilter {
    pub property_type: Option<PropertyType>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub location: Option<String>,
    /// Comma-separated list; every entry must be present on the property.
    pub amenities: Option<String>,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortOrder>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// One page of browse results with totals for the whole match set.
#[derive(Debug)]
pub struct PropertyPage {
    pub properties: Vec<Property>,
    pub total: usize,
    pub total_pages: usize,
    pub current_page: usize,
}

impl PropertyFilter {
    fn amenity_list(&self) -> Vec<String> {
        self.amenities
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(|a| a.trim().to_lowercase())
                    .filter(|a| !a.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether a property belongs in the result set. The browsable-set
    /// restriction (available + approved) is unconditional.
    pub fn matches(&self, p: &Property) -> bool {
        if p.status != PropertyStatus::Available || !p.approved {
            return false;
        }
        if let Some(pt) = self.property_type {
            if p.property_type != pt {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if p.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if p.price > max {
                return false;
            }
        }
        if let Some(bedrooms) = self.bedrooms {
            if p.bedrooms != bedrooms {
                return false;
            }
        }
        if let Some(bathrooms) = self.bathrooms {
            if p.bathrooms != bathrooms {
                return false;
            }
        }
        if let Some(min) = self.min_area {
            if p.area < min {
                return false;
            }
        }
        if let Some(max) = self.max_area {
            if p.area > max {
                return false;
            }
        }
        if let Some(ref location) = self.location {
            if !p
                .address
                .to_lowercase()
                .contains(&location.to_lowercase())
            {
                return false;
            }
        }
        let wanted = self.amenity_list();
        if !wanted.is_empty() {
            let have: Vec<String> = p.amenities.iter().map(|a| a.to_lowercase()).collect();
            if !wanted.iter().all(|w| have.contains(w)) {
                return false;
            }
        }
        true
    }

    fn sort(&self, properties: &mut [Property]) {
        let field = self.sort_by.unwrap_or(SortField::CreatedAt);
        // Creation-time sorts default to newest first, everything else ascending.
        let order = self.sort_order.unwrap_or(match field {
            SortField::CreatedAt => SortOrder::Desc,
            _ => SortOrder::Asc,
        });

        properties.sort_by(|a, b| {
            let ord = match field {
                SortField::Price => a.price.total_cmp(&b.price),
                SortField::Bedrooms => a.bedrooms.cmp(&b.bedrooms),
                SortField::Bathrooms => a.bathrooms.cmp(&b.bathrooms),
                SortField::Area => a.area.total_cmp(&b.area),
                SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            match order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
    }

    /// Filter, sort and slice out the requested page.
    pub fn apply(&self, properties: Vec<Property>) -> PropertyPage {
        let api = &config::config().api;
        let limit = self
            .limit
            .unwrap_or(api.default_page_size)
            .clamp(1, api.max_page_size);
        let page = self.page.unwrap_or(1).max(1);

        let mut matched: Vec<Property> =
            properties.into_iter().filter(|p| self.matches(p)).collect();
        self.sort(&mut matched);

        let total = matched.len();
        let total_pages = total.div_ceil(limit);
        let slice: Vec<Property> = matched
            .into_iter()
            .skip((page - 1) * limit)
            .take(limit)
            .collect();

        PropertyPage {
            properties: slice,
            total,
            total_pages,
            current_page: page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn property(price: f64, bedrooms: u32, address: &str, amenities: &[&str]) -> Property {
        Property::new(
            "Test".into(),
            None,
            address.into(),
            PropertyType::Apartment,
            price,
            bedrooms,
            1,
            75.0,
            amenities.iter().map(|a| a.to_string()).collect(),
            vec![],
            Uuid::new_v4(),
            true,
        )
    }

    #[test]
    fn browsable_set_is_always_restricted() {
        let filter = PropertyFilter::default();
        let mut unapproved = property(1000.0, 2, "1 Elm St", &[]);
        unapproved.approved = false;
        let mut occupied = property(1000.0, 2, "2 Elm St", &[]);
        occupied.status = PropertyStatus::Occupied;

        assert!(!filter.matches(&unapproved));
        assert!(!filter.matches(&occupied));
        assert!(filter.matches(&property(1000.0, 2, "3 Elm St", &[])));
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let filter = PropertyFilter {
            min_price: Some(1000.0),
            max_price: Some(2000.0),
            ..Default::default()
        };
        assert!(filter.matches(&property(1000.0, 2, "1 Elm St", &[])));
        assert!(filter.matches(&property(2000.0, 2, "1 Elm St", &[])));
        assert!(!filter.matches(&property(999.99, 2, "1 Elm St", &[])));
        assert!(!filter.matches(&property(2000.01, 2, "1 Elm St", &[])));
    }

    #[test]
    fn bedrooms_is_an_exact_match() {
        let filter = PropertyFilter {
            bedrooms: Some(2),
            ..Default::default()
        };
        assert!(filter.matches(&property(1000.0, 2, "1 Elm St", &[])));
        assert!(!filter.matches(&property(1000.0, 3, "1 Elm St", &[])));
    }

    #[test]
    fn location_is_case_insensitive_substring() {
        let filter = PropertyFilter {
            location: Some("elm".into()),
            ..Default::default()
        };
        assert!(filter.matches(&property(1000.0, 2, "14 ELM Street", &[])));
        assert!(!filter.matches(&property(1000.0, 2, "14 Oak Street", &[])));
    }

    #[test]
    fn amenities_require_all_requested() {
        let filter = PropertyFilter {
            amenities: Some("parking, gym".into()),
            ..Default::default()
        };
        assert!(filter.matches(&property(1000.0, 2, "1 Elm St", &["Parking", "Gym", "Pool"])));
        assert!(!filter.matches(&property(1000.0, 2, "1 Elm St", &["Parking"])));
    }

    #[test]
    fn pagination_reports_totals() {
        let filter = PropertyFilter {
            limit: Some(2),
            page: Some(2),
            sort_by: Some(SortField::Price),
            ..Default::default()
        };
        let props: Vec<Property> = (0..5)
            .map(|i| property(1000.0 + i as f64, 2, "1 Elm St", &[]))
            .collect();

        let page = filter.apply(props);
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.properties.len(), 2);
        // Third and fourth cheapest
        assert_eq!(page.properties[0].price, 1002.0);
        assert_eq!(page.properties[1].price, 1003.0);
    }

    #[test]
    fn identical_filters_return_identical_results() {
        let filter = PropertyFilter {
            min_price: Some(500.0),
            ..Default::default()
        };
        let props: Vec<Property> = (0..4)
            .map(|i| property(400.0 + 100.0 * i as f64, 2, "1 Elm St", &[]))
            .collect();

        let a = filter.apply(props.clone());
        let b = filter.apply(props);
        assert_eq!(a.total, b.total);
        assert_eq!(a.total_pages, b.total_pages);
        let ids =
            |page: &PropertyPage| page.properties.iter().map(|p| p.id).collect::<Vec<_>>();
        assert_eq!(ids(&a), ids(&b));
    }
}

//! Search filters over the three listing dimensions.

use crate::executor::FoodError;
use crate::schema::FoodListings;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Sentinel that disables a filter dimension
pub const ALL: &str = "All";

/// Equality filter on one column, or no filter at all
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    #[default]
    All,
    Only(String),
}

impl FilterValue {
    /// `"all"` in any case means no filter; anything else is an exact match
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case(ALL) {
            FilterValue::All
        } else {
            FilterValue::Only(raw.to_string())
        }
    }

    pub fn as_option(&self) -> Option<&str> {
        match self {
            FilterValue::All => None,
            FilterValue::Only(v) => Some(v),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(raw: &str) -> Self {
        FilterValue::parse(raw)
    }
}

impl From<Option<String>> for FilterValue {
    fn from(raw: Option<String>) -> Self {
        raw.map_or(FilterValue::All, |v| FilterValue::parse(&v))
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::All => f.write_str(ALL),
            FilterValue::Only(v) => f.write_str(v),
        }
    }
}

/// Filters for [`search_listings`](super::search_listings); the default matches everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListingFilter {
    pub location: FilterValue,
    pub provider_type: FilterValue,
    pub food_type: FilterValue,
}

impl ListingFilter {
    pub fn new(
        location: impl Into<FilterValue>,
        provider_type: impl Into<FilterValue>,
        food_type: impl Into<FilterValue>,
    ) -> Self {
        Self {
            location: location.into(),
            provider_type: provider_type.into(),
            food_type: food_type.into(),
        }
    }

    /// Active `(column, value)` pairs
    pub(crate) fn conditions(&self) -> Vec<(FoodListings, &str)> {
        [
            (ListingColumn::Location, &self.location),
            (ListingColumn::ProviderType, &self.provider_type),
            (ListingColumn::FoodType, &self.food_type),
        ]
        .into_iter()
        .filter_map(|(col, value)| value.as_option().map(|v| (col.column(), v)))
        .collect()
    }
}

/// A listing column offered as a search dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ListingColumn {
    Location,
    ProviderType,
    FoodType,
}

impl ListingColumn {
    pub const ALL: [ListingColumn; 3] = [
        ListingColumn::Location,
        ListingColumn::ProviderType,
        ListingColumn::FoodType,
    ];

    pub(crate) fn column(self) -> FoodListings {
        match self {
            ListingColumn::Location => FoodListings::Location,
            ListingColumn::ProviderType => FoodListings::ProviderType,
            ListingColumn::FoodType => FoodListings::FoodType,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ListingColumn::Location => "Location",
            ListingColumn::ProviderType => "Provider_Type",
            ListingColumn::FoodType => "Food_Type",
        }
    }
}

impl FromStr for ListingColumn {
    type Err = FoodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "location" => Ok(ListingColumn::Location),
            "provider_type" => Ok(ListingColumn::ProviderType),
            "food_type" => Ok(ListingColumn::FoodType),
            other => Err(FoodError::Validation(format!(
                "unknown filter column {other:?}, expected location, provider_type or food_type"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sentinel_is_case_insensitive() {
        assert_eq!(FilterValue::parse("All"), FilterValue::All);
        assert_eq!(FilterValue::parse("ALL"), FilterValue::All);
        assert_eq!(FilterValue::parse(" all "), FilterValue::All);
        assert_eq!(FilterValue::parse("NY"), FilterValue::Only("NY".to_string()));
    }

    #[test]
    fn test_conditions_skip_all() {
        let filter = ListingFilter::new("NY", "all", "Vegan");
        let conditions = filter.conditions();
        assert_eq!(
            conditions,
            vec![(FoodListings::Location, "NY"), (FoodListings::FoodType, "Vegan")]
        );
        assert!(ListingFilter::default().conditions().is_empty());
    }

    #[test]
    fn test_column_from_str() {
        assert_eq!("food-type".parse::<ListingColumn>().unwrap(), ListingColumn::FoodType);
        assert_eq!("Location".parse::<ListingColumn>().unwrap(), ListingColumn::Location);
        assert!("meal_type".parse::<ListingColumn>().is_err());
    }
}

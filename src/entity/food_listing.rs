//! Food listings, the donatable unit, plus the insert payload and provider contact view.

use super::dates::{self, format_date, parse_date};
use super::{text_or_empty, Record};
use crate::executor::FoodError;
use crate::row::{FromRow, Row};
use crate::schema::FoodListings;
use chrono::NaiveDate;
use sea_query::Value;
use serde::{Deserialize, Serialize};

/// A stored listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodListing {
    #[serde(rename = "Food_ID")]
    pub id: i64,
    #[serde(rename = "Food_Name")]
    pub name: String,
    #[serde(rename = "Quantity")]
    pub quantity: i64,
    #[serde(rename = "Expiry_Date", deserialize_with = "dates::deserialize_date")]
    pub expiry_date: NaiveDate,
    #[serde(rename = "Provider_ID")]
    pub provider_id: i64,
    #[serde(rename = "Provider_Type")]
    pub provider_type: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Food_Type")]
    pub food_type: String,
    #[serde(rename = "Meal_Type")]
    pub meal_type: String,
}

impl FromRow for FoodListing {
    fn from_row(row: &Row) -> Result<Self, FoodError> {
        let raw_date: String = row.try_get(3)?;
        let expiry_date = parse_date(&raw_date)
            .map_err(|e| FoodError::ParseError(format!("column Expiry_Date: {e}")))?;
        Ok(Self {
            id: row.try_get(0)?,
            name: text_or_empty(row, 1)?,
            quantity: row.try_get(2)?,
            expiry_date,
            provider_id: row.try_get(4)?,
            provider_type: text_or_empty(row, 5)?,
            location: text_or_empty(row, 6)?,
            food_type: text_or_empty(row, 7)?,
            meal_type: text_or_empty(row, 8)?,
        })
    }
}

impl Record for FoodListing {
    type Column = FoodListings;
    const TABLE: FoodListings = FoodListings::Table;
    const COLUMNS: &'static [FoodListings] = &FoodListings::COLUMNS;

    fn values(&self) -> Vec<Value> {
        vec![
            self.id.into(),
            self.name.clone().into(),
            self.quantity.into(),
            format_date(self.expiry_date).into(),
            self.provider_id.into(),
            self.provider_type.clone().into(),
            self.location.clone().into(),
            self.food_type.clone().into(),
            self.meal_type.clone().into(),
        ]
    }

    fn validate(&self) -> Result<(), String> {
        if self.id < 1 {
            return Err(format!("Food_ID must be positive, got {}", self.id));
        }
        if self.quantity < 0 {
            return Err(format!(
                "Quantity must not be negative, got {} for Food_ID {}",
                self.quantity, self.id
            ));
        }
        Ok(())
    }
}

/// Payload for creating a listing; the id is assigned by the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewListing {
    pub name: String,
    pub quantity: i64,
    pub expiry_date: NaiveDate,
    pub provider_id: i64,
    pub provider_type: String,
    pub location: String,
    pub food_type: String,
    pub meal_type: String,
}

impl NewListing {
    /// Check the numeric constraints: quantity at least 1, provider id at least 1
    ///
    /// # Errors
    ///
    /// Returns `FoodError::Validation` naming the offending field.
    pub fn validate(&self) -> Result<(), FoodError> {
        if self.quantity < 1 {
            return Err(FoodError::Validation(format!(
                "quantity must be at least 1, got {}",
                self.quantity
            )));
        }
        if self.provider_id < 1 {
            return Err(FoodError::Validation(format!(
                "provider id must be at least 1, got {}",
                self.provider_id
            )));
        }
        Ok(())
    }

    /// Columns written on insert, in the order of [`NewListing::values`]
    pub(crate) const COLUMNS: [FoodListings; 8] = [
        FoodListings::FoodName,
        FoodListings::Quantity,
        FoodListings::ExpiryDate,
        FoodListings::ProviderId,
        FoodListings::ProviderType,
        FoodListings::Location,
        FoodListings::FoodType,
        FoodListings::MealType,
    ];

    pub(crate) fn values(&self) -> Vec<Value> {
        vec![
            self.name.clone().into(),
            self.quantity.into(),
            format_date(self.expiry_date).into(),
            self.provider_id.into(),
            self.provider_type.clone().into(),
            self.location.clone().into(),
            self.food_type.clone().into(),
            self.meal_type.clone().into(),
        ]
    }

    /// The stored listing this payload becomes once assigned `id`
    pub fn into_listing(self, id: i64) -> FoodListing {
        FoodListing {
            id,
            name: self.name,
            quantity: self.quantity,
            expiry_date: self.expiry_date,
            provider_id: self.provider_id,
            provider_type: self.provider_type,
            location: self.location,
            food_type: self.food_type,
            meal_type: self.meal_type,
        }
    }
}

/// Contact details of a provider that appears in a search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderContact {
    pub provider_id: i64,
    pub name: String,
    pub contact: String,
}

impl FromRow for ProviderContact {
    fn from_row(row: &Row) -> Result<Self, FoodError> {
        Ok(Self {
            provider_id: row.try_get(0)?,
            name: text_or_empty(row, 1)?,
            contact: text_or_empty(row, 2)?,
        })
    }
}

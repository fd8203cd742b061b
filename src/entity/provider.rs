use super::{text_or_empty, Record};
use crate::executor::{FoodError, FoodExecutor};
use crate::query::{fetch_models, SqliteQueryBuilder};
use crate::row::{FromRow, Row};
use crate::schema::Providers;
use sea_query::{Order, Query, Value};
use serde::{Deserialize, Serialize};

/// A party offering surplus food
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    #[serde(rename = "Provider_ID")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub provider_type: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Contact")]
    pub contact: String,
}

impl Provider {
    /// Every provider ordered by id
    pub fn find_all<E: FoodExecutor + ?Sized>(executor: &E) -> Result<Vec<Provider>, FoodError> {
        let built = Query::select()
            .columns(Providers::COLUMNS)
            .from(Providers::Table)
            .order_by(Providers::ProviderId, Order::Asc)
            .build(SqliteQueryBuilder);
        fetch_models(executor, &built)
    }
}

impl FromRow for Provider {
    fn from_row(row: &Row) -> Result<Self, FoodError> {
        Ok(Self {
            id: row.try_get(0)?,
            name: text_or_empty(row, 1)?,
            provider_type: text_or_empty(row, 2)?,
            address: text_or_empty(row, 3)?,
            city: text_or_empty(row, 4)?,
            contact: text_or_empty(row, 5)?,
        })
    }
}

impl Record for Provider {
    type Column = Providers;
    const TABLE: Providers = Providers::Table;
    const COLUMNS: &'static [Providers] = &Providers::COLUMNS;

    fn values(&self) -> Vec<Value> {
        vec![
            self.id.into(),
            self.name.clone().into(),
            self.provider_type.clone().into(),
            self.address.clone().into(),
            self.city.clone().into(),
            self.contact.clone().into(),
        ]
    }

    fn validate(&self) -> Result<(), String> {
        if self.id < 1 {
            return Err(format!("Provider_ID must be positive, got {}", self.id));
        }
        Ok(())
    }
}

use super::{text_or_empty, Record};
use crate::executor::{FoodError, FoodExecutor};
use crate::query::{fetch_models, SqliteQueryBuilder};
use crate::row::{FromRow, Row};
use crate::schema::Receivers;
use sea_query::{Order, Query, Value};
use serde::{Deserialize, Serialize};

/// A party claiming food
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receiver {
    #[serde(rename = "Receiver_ID")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub receiver_type: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Contact")]
    pub contact: String,
}

impl Receiver {
    pub fn find_all<E: FoodExecutor + ?Sized>(executor: &E) -> Result<Vec<Receiver>, FoodError> {
        let built = Query::select()
            .columns(Receivers::COLUMNS)
            .from(Receivers::Table)
            .order_by(Receivers::ReceiverId, Order::Asc)
            .build(SqliteQueryBuilder);
        fetch_models(executor, &built)
    }
}

impl FromRow for Receiver {
    fn from_row(row: &Row) -> Result<Self, FoodError> {
        Ok(Self {
            id: row.try_get(0)?,
            name: text_or_empty(row, 1)?,
            receiver_type: text_or_empty(row, 2)?,
            city: text_or_empty(row, 3)?,
            contact: text_or_empty(row, 4)?,
        })
    }
}

impl Record for Receiver {
    type Column = Receivers;
    const TABLE: Receivers = Receivers::Table;
    const COLUMNS: &'static [Receivers] = &Receivers::COLUMNS;

    fn values(&self) -> Vec<Value> {
        vec![
            self.id.into(),
            self.name.clone().into(),
            self.receiver_type.clone().into(),
            self.city.clone().into(),
            self.contact.clone().into(),
        ]
    }

    fn validate(&self) -> Result<(), String> {
        if self.id < 1 {
            return Err(format!("Receiver_ID must be positive, got {}", self.id));
        }
        Ok(())
    }
}

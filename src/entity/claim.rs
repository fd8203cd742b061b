use super::{text_or_empty, Record};
use crate::executor::{FoodError, FoodExecutor};
use crate::query::{fetch_models, SqliteQueryBuilder};
use crate::row::{FromRow, Row};
use crate::schema::Claims;
use sea_query::{Order, Query, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    Pending,
    Completed,
    Cancelled,
}

impl ClaimStatus {
    pub const ALL: [ClaimStatus; 3] = [
        ClaimStatus::Pending,
        ClaimStatus::Completed,
        ClaimStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "Pending",
            ClaimStatus::Completed => "Completed",
            ClaimStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = FoodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClaimStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| FoodError::Validation(format!("unknown claim status {s:?}")))
    }
}

/// A receiver's claim against a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    #[serde(rename = "Claim_ID")]
    pub id: i64,
    #[serde(rename = "Food_ID")]
    pub food_id: i64,
    #[serde(rename = "Receiver_ID")]
    pub receiver_id: i64,
    #[serde(rename = "Status")]
    pub status: ClaimStatus,
    /// Stored verbatim; never interpreted
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
}

impl Claim {
    /// Every claim ordered by id
    pub fn find_all<E: FoodExecutor + ?Sized>(executor: &E) -> Result<Vec<Claim>, FoodError> {
        let built = Query::select()
            .columns(Claims::COLUMNS)
            .from(Claims::Table)
            .order_by(Claims::ClaimId, Order::Asc)
            .build(SqliteQueryBuilder);
        fetch_models(executor, &built)
    }
}

impl FromRow for Claim {
    fn from_row(row: &Row) -> Result<Self, FoodError> {
        let status: String = row.try_get(3)?;
        Ok(Self {
            id: row.try_get(0)?,
            food_id: row.try_get(1)?,
            receiver_id: row.try_get(2)?,
            status: status
                .parse()
                .map_err(|e: FoodError| FoodError::ParseError(format!("column Status: {e}")))?,
            timestamp: text_or_empty(row, 4)?,
        })
    }
}

impl Record for Claim {
    type Column = Claims;
    const TABLE: Claims = Claims::Table;
    const COLUMNS: &'static [Claims] = &Claims::COLUMNS;

    fn values(&self) -> Vec<Value> {
        vec![
            self.id.into(),
            self.food_id.into(),
            self.receiver_id.into(),
            self.status.as_str().into(),
            self.timestamp.clone().into(),
        ]
    }

    fn validate(&self) -> Result<(), String> {
        if self.id < 1 {
            return Err(format!("Claim_ID must be positive, got {}", self.id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_text() {
        for status in ClaimStatus::ALL {
            assert_eq!(status.to_string().parse::<ClaimStatus>().unwrap(), status);
        }
        assert!("Shipped".parse::<ClaimStatus>().is_err());
    }

    #[test]
    fn test_unknown_status_fails_csv_deserialize() {
        let data = "Claim_ID,Food_ID,Receiver_ID,Status,Timestamp\n1,2,3,Lost,2025-03-05 05:26:00\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let row: Result<Claim, _> = reader.deserialize().next().unwrap();
        assert!(row.is_err());
    }
}

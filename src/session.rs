//! An explicitly passed handle that owns one database connection.
//!
//! Every mutation runs in its own transaction and the reporting pass runs in one, so a
//! caller never observes a half-applied write or a report set mixing two snapshots.

use crate::config::FoodlinkConfig;
use crate::entity::{FoodListing, NewListing};
use crate::executor::{FoodError, SqliteExecutor};
use crate::listings::{self, ListingColumn, ListingFilter, SearchResult};
use crate::loader::{self, LoadError, LoadSummary};
use crate::report::{self, ReportId, ReportOutcome, ReportTable};
use chrono::NaiveDate;

pub struct Session {
    executor: SqliteExecutor,
}

impl Session {
    pub fn new(executor: SqliteExecutor) -> Self {
        Self { executor }
    }

    /// Open the configured database, creating its directory and the schema if needed
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the directory or database cannot be created.
    pub fn open(config: &FoodlinkConfig) -> Result<Self, LoadError> {
        let executor = loader::open_database(config)?;
        crate::schema::SchemaManager::new(&executor).create_all()?;
        Ok(Self::new(executor))
    }

    pub fn executor(&self) -> &SqliteExecutor {
        &self.executor
    }

    /// Reload every table from the dataset CSVs
    pub fn reload(&self, config: &FoodlinkConfig) -> Result<LoadSummary, LoadError> {
        loader::load_csvs(&self.executor, &config.dataset)
    }

    pub fn insert_listing(&self, listing: &NewListing) -> Result<i64, FoodError> {
        self.executor
            .in_transaction(|tx| listings::insert_listing(tx, listing))
    }

    pub fn insert_listing_checked(&self, listing: &NewListing) -> Result<i64, FoodError> {
        self.executor
            .in_transaction(|tx| listings::insert_listing_checked(tx, listing))
    }

    pub fn update_quantity(&self, food_id: i64, quantity: i64) -> Result<u64, FoodError> {
        self.executor
            .in_transaction(|tx| listings::update_quantity(tx, food_id, quantity))
    }

    pub fn delete_listing(&self, food_id: i64) -> Result<u64, FoodError> {
        self.executor
            .in_transaction(|tx| listings::delete_listing(tx, food_id))
    }

    pub fn search_listings(&self, filter: &ListingFilter) -> Result<SearchResult, FoodError> {
        listings::search_listings(&self.executor, filter)
    }

    pub fn all_listings(&self) -> Result<Vec<FoodListing>, FoodError> {
        listings::all_listings(&self.executor)
    }

    pub fn find_listing(&self, food_id: i64) -> Result<Option<FoodListing>, FoodError> {
        listings::find_listing(&self.executor, food_id)
    }

    pub fn distinct_values(&self, column: ListingColumn) -> Result<Vec<String>, FoodError> {
        listings::distinct_values(&self.executor, column)
    }

    pub fn run_report(&self, id: ReportId, today: NaiveDate) -> Result<ReportTable, FoodError> {
        report::run_report(&self.executor, id, today)
    }

    /// Run the whole catalog against one snapshot
    ///
    /// # Errors
    ///
    /// Only fails if the read transaction cannot be opened or closed; individual report
    /// failures are carried in their outcome.
    pub fn run_reports(&self, today: NaiveDate) -> Result<Vec<ReportOutcome>, FoodError> {
        self.executor
            .in_transaction(|tx| Ok(report::run_catalog(tx, today)))
    }
}

/// Today's date in the local time zone
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{listing, seeded_executor};

    #[test]
    fn test_mutations_commit() {
        let session = Session::new(seeded_executor());
        let id = session.insert_listing(&listing("Stew", 2, "LA")).unwrap();
        assert_eq!(session.update_quantity(id, 9).unwrap(), 1);
        assert_eq!(session.find_listing(id).unwrap().unwrap().quantity, 9);
        assert_eq!(session.delete_listing(id).unwrap(), 1);
        assert!(session.find_listing(id).unwrap().is_none());
    }

    #[test]
    fn test_failed_checked_insert_writes_nothing() {
        let session = Session::new(seeded_executor());
        let before = session.all_listings().unwrap().len();
        let mut orphan = listing("Stew", 2, "LA");
        orphan.provider_id = 77;
        assert!(session.insert_listing_checked(&orphan).is_err());
        assert_eq!(session.all_listings().unwrap().len(), before);
    }

    #[test]
    fn test_run_reports_returns_full_catalog() {
        let session = Session::new(seeded_executor());
        let outcomes = session.run_reports(today()).unwrap();
        assert_eq!(outcomes.len(), 15);
        assert!(outcomes.iter().all(ReportOutcome::is_ok));
        // the read transaction is closed again
        assert!(session.update_quantity(1, 3).is_ok());
    }

    #[test]
    fn test_open_creates_schema() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = FoodlinkConfig::default();
        config.database.path = dir.path().join("db/food.db");
        let session = Session::open(&config).unwrap();
        assert!(session.all_listings().unwrap().is_empty());
    }
}

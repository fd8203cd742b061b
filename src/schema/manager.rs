//! SchemaManager - schema operations for the dashboard tables

use super::tables::{
    create_claims_table, create_food_listings_table, create_join_indexes, create_providers_table,
    create_receivers_table,
};
use crate::executor::{FoodError, FoodExecutor};
use crate::query::{execute_built, SqliteQueryBuilder};
use crate::raw_sql::find_all_by_statement;
use sea_query::{IndexCreateStatement, IntoIden, Query, TableCreateStatement, TableDropStatement};

/// SchemaManager performs DDL and whole-table operations
///
/// It borrows any [`FoodExecutor`], so schema work can share a transaction with a reload.
pub struct SchemaManager<'e> {
    executor: &'e dyn FoodExecutor,
}

impl<'e> SchemaManager<'e> {
    pub fn new(executor: &'e dyn FoodExecutor) -> Self {
        Self { executor }
    }

    /// Create the four tables and the join indexes if they do not exist
    ///
    /// Existing tables and their rows are left untouched.
    pub fn create_all(&self) -> Result<(), FoodError> {
        for table in [
            create_providers_table(),
            create_receivers_table(),
            create_food_listings_table(),
            create_claims_table(),
        ] {
            self.create_table(table)?;
        }
        for index in create_join_indexes() {
            self.create_index(index)?;
        }
        log::debug!("schema ready");
        Ok(())
    }

    /// Create a table
    ///
    /// # Example
    /// ```rust,no_run
    /// use foodlink::schema::{tables::create_providers_table, SchemaManager};
    /// # let manager: &SchemaManager = todo!();
    /// manager.create_table(create_providers_table())?;
    /// # Ok::<(), foodlink::FoodError>(())
    /// ```
    pub fn create_table(&self, table: TableCreateStatement) -> Result<(), FoodError> {
        let sql = table.build(SqliteQueryBuilder);
        self.executor.execute(&sql, &[]).map(|_| ())
    }

    /// Drop a table
    pub fn drop_table(&self, table: TableDropStatement) -> Result<(), FoodError> {
        let sql = table.build(SqliteQueryBuilder);
        self.executor.execute(&sql, &[]).map(|_| ())
    }

    /// Create an index
    pub fn create_index(&self, index: IndexCreateStatement) -> Result<(), FoodError> {
        let sql = index.build(SqliteQueryBuilder);
        self.executor.execute(&sql, &[]).map(|_| ())
    }

    /// Delete every row of `table`, returning how many were removed
    pub fn clear_table<T: IntoIden>(&self, table: T) -> Result<u64, FoodError> {
        let built = Query::delete().from_table(table).build(SqliteQueryBuilder);
        execute_built(self.executor, &built)
    }

    /// Whether a table called `name` exists
    pub fn has_table(&self, name: &str) -> Result<bool, FoodError> {
        let rows = find_all_by_statement(
            self.executor,
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
            &[&name],
        )?;
        Ok(!rows.is_empty())
    }

    /// Get a reference to the underlying executor
    pub fn executor(&self) -> &dyn FoodExecutor {
        self.executor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::SqliteExecutor;
    use crate::raw_sql::query_value;
    use crate::schema::tables::{Providers, TABLE_NAMES};
    use sea_query::Table;

    #[test]
    fn test_create_all_is_idempotent() {
        let executor = SqliteExecutor::open_in_memory().unwrap();
        let manager = SchemaManager::new(&executor);
        manager.create_all().unwrap();
        manager.create_all().unwrap();
        for name in TABLE_NAMES {
            assert!(manager.has_table(name).unwrap(), "missing {name}");
        }
    }

    #[test]
    fn test_create_all_keeps_existing_rows() {
        let executor = SqliteExecutor::open_in_memory().unwrap();
        let manager = SchemaManager::new(&executor);
        manager.create_all().unwrap();
        executor
            .execute("INSERT INTO providers (Name, City) VALUES ('Ann', 'Austin')", &[])
            .unwrap();
        manager.create_all().unwrap();
        let n: i64 = query_value(&executor, "SELECT COUNT(*) FROM providers", &[]).unwrap();
        assert_eq!(n, 1);
    }

    #[test]
    fn test_primary_key_assigned_on_insert() {
        let executor = SqliteExecutor::open_in_memory().unwrap();
        let manager = SchemaManager::new(&executor);
        manager.create_all().unwrap();
        executor
            .execute("INSERT INTO claims (Food_ID, Receiver_ID, Status) VALUES (1, 2, 'Pending')", &[])
            .unwrap();
        executor
            .execute("INSERT INTO claims (Food_ID, Receiver_ID, Status) VALUES (1, 3, 'Pending')", &[])
            .unwrap();
        let max: i64 = query_value(&executor, "SELECT MAX(Claim_ID) FROM claims", &[]).unwrap();
        assert_eq!(max, 2);
    }

    #[test]
    fn test_clear_and_drop_table() {
        let executor = SqliteExecutor::open_in_memory().unwrap();
        let manager = SchemaManager::new(&executor);
        manager.create_all().unwrap();
        executor
            .execute("INSERT INTO providers (Name) VALUES ('a'), ('b')", &[])
            .unwrap();
        assert_eq!(manager.clear_table(Providers::Table).unwrap(), 2);

        manager
            .drop_table(Table::drop().table(Providers::Table).to_owned())
            .unwrap();
        assert!(!manager.has_table("providers").unwrap());
    }
}

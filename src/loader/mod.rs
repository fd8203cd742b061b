//! CSV bulk loader and one-shot initializer.
//!
//! Each table is replaced wholesale from its CSV: the file is parsed and validated first,
//! then the table is cleared and refilled inside a single transaction. A file that fails
//! to parse leaves its table untouched. Missing files are skipped.

mod error;

pub use error::LoadError;

use crate::config::{DatasetConfig, FoodlinkConfig};
use crate::entity::{Claim, FoodListing, Provider, Receiver, Record};
use crate::executor::{FoodError, FoodExecutor, SqliteExecutor};
use crate::query::{execute_built, SqliteQueryBuilder};
use crate::schema::SchemaManager;
use sea_query::{Iden, Query};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Rows per multi-row `INSERT`
const INSERT_CHUNK: usize = 500;

/// Outcome of loading a single table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableLoad {
    /// The table was replaced with this many rows
    Loaded(usize),
    /// No CSV was found; the table was left as it was
    Skipped,
}

impl fmt::Display for TableLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableLoad::Loaded(n) => write!(f, "{} row(s)", n),
            TableLoad::Skipped => f.write_str("skipped (no CSV)"),
        }
    }
}

/// Per-table result of [`load_csvs`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub providers: TableLoad,
    pub receivers: TableLoad,
    pub food_listings: TableLoad,
    pub claims: TableLoad,
}

impl LoadSummary {
    /// `(table name, outcome)` pairs in load order
    pub fn tables(&self) -> [(&'static str, TableLoad); 4] {
        [
            ("providers", self.providers),
            ("receivers", self.receivers),
            ("food_listings", self.food_listings),
            ("claims", self.claims),
        ]
    }

    /// Total rows written across all tables
    pub fn total_rows(&self) -> usize {
        self.tables()
            .iter()
            .map(|(_, load)| match load {
                TableLoad::Loaded(n) => *n,
                TableLoad::Skipped => 0,
            })
            .sum()
    }
}

/// Parse and validate every row of the CSV at `path`
///
/// # Errors
///
/// Returns `LoadError::Csv` naming the file on the first row that does not deserialize
/// into `R` or fails [`Record::validate`].
pub fn read_csv<R: Record>(path: &Path) -> Result<Vec<R>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| LoadError::csv(path, e.to_string()))?;

    let mut records = Vec::new();
    for (idx, result) in reader.deserialize::<R>().enumerate() {
        let record = result.map_err(|e| LoadError::csv(path, e.to_string()))?;
        // header is line 1
        record
            .validate()
            .map_err(|msg| LoadError::csv(path, format!("line {}: {}", idx + 2, msg)))?;
        records.push(record);
    }
    Ok(records)
}

/// Replace the contents of `R`'s table with `records`
///
/// Runs on whatever executor it is given; callers wrap it in a transaction.
pub fn replace_table<R: Record>(
    executor: &dyn FoodExecutor,
    records: &[R],
) -> Result<usize, FoodError> {
    let removed = SchemaManager::new(executor).clear_table(R::TABLE)?;
    log::debug!("cleared {} row(s) from {}", removed, R::TABLE.unquoted());

    for chunk in records.chunks(INSERT_CHUNK) {
        let mut insert = Query::insert();
        insert
            .into_table(R::TABLE)
            .columns(R::COLUMNS.iter().copied());
        for record in chunk {
            insert
                .values(record.values().into_iter().map(Into::into))
                .map_err(|e| FoodError::QueryError(e.to_string()))?;
        }
        execute_built(executor, &insert.build(SqliteQueryBuilder))?;
    }
    Ok(records.len())
}

/// Reload one table from the CSV at `path`, or skip it when the file is missing
pub fn load_table<R: Record>(executor: &SqliteExecutor, path: &Path) -> Result<TableLoad, LoadError> {
    let table = R::TABLE.unquoted().to_string();
    if !path.is_file() {
        log::info!("{} not found, leaving {} unchanged", path.display(), table);
        return Ok(TableLoad::Skipped);
    }

    let records = read_csv::<R>(path)?;
    let loaded = executor.in_transaction(|tx| replace_table(tx, &records))?;
    log::info!("loaded {} row(s) into {} from {}", loaded, table, path.display());
    Ok(TableLoad::Loaded(loaded))
}

/// Reload all four tables from the dataset directory
///
/// Tables are loaded in order providers, receivers, food_listings, claims. A malformed file
/// stops the run; tables loaded before it keep their new contents.
pub fn load_csvs(executor: &SqliteExecutor, dataset: &DatasetConfig) -> Result<LoadSummary, LoadError> {
    Ok(LoadSummary {
        providers: load_table::<Provider>(executor, &dataset.providers_path())?,
        receivers: load_table::<Receiver>(executor, &dataset.receivers_path())?,
        food_listings: load_table::<FoodListing>(executor, &dataset.listings_path())?,
        claims: load_table::<Claim>(executor, &dataset.claims_path())?,
    })
}

/// Open the configured database, create the schema and load the CSVs
///
/// The database's parent directory is created when missing.
///
/// # Example
///
/// ```rust,no_run
/// use foodlink::{config::FoodlinkConfig, loader::initialize};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = FoodlinkConfig::load()?;
///     let summary = initialize(&config)?;
///     println!("{} rows loaded", summary.total_rows());
///     Ok(())
/// }
/// ```
pub fn initialize(config: &FoodlinkConfig) -> Result<LoadSummary, LoadError> {
    let executor = open_database(config)?;
    let summary = initialize_with(&executor, &config.dataset)?;
    Ok(summary)
}

/// Create the schema on an open database and load the CSVs into it
pub fn initialize_with(
    executor: &SqliteExecutor,
    dataset: &DatasetConfig,
) -> Result<LoadSummary, LoadError> {
    SchemaManager::new(executor).create_all()?;
    let summary = load_csvs(executor, dataset)?;
    log::info!("initialization finished, {} row(s) loaded", summary.total_rows());
    Ok(summary)
}

/// Open the configured database file, creating its directory first
pub fn open_database(config: &FoodlinkConfig) -> Result<SqliteExecutor, LoadError> {
    let path = &config.database.path;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| LoadError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let conn = crate::connection::connect_with_timeout(path, config.database.busy_timeout())?;
    Ok(SqliteExecutor::new(conn))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw_sql::query_value;
    use std::fs;

    const PROVIDERS: &str = "Provider_ID,Name,Type,Address,City,Contact\n\
                             1,Gonzales-Cochran,Supermarket,74347 Christopher Extensions,New Jessicamouth,+1-600-220-0480\n\
                             2,Nielsen Group,Restaurant,91228 Hanson Stream,East Sheena,+1-925-283-8901\n";

    fn executor() -> SqliteExecutor {
        let executor = SqliteExecutor::open_in_memory().unwrap();
        SchemaManager::new(&executor).create_all().unwrap();
        executor
    }

    fn count(executor: &SqliteExecutor, table: &str) -> i64 {
        query_value(executor, &format!("SELECT COUNT(*) FROM {table}"), &[]).unwrap()
    }

    #[test]
    fn test_load_table_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("providers_data.csv");
        fs::write(&path, PROVIDERS).unwrap();

        let executor = executor();
        executor
            .execute(
                "INSERT INTO providers (Provider_ID, Name) VALUES (99, 'stale')",
                &[],
            )
            .unwrap();

        let load = load_table::<Provider>(&executor, &path).unwrap();
        assert_eq!(load, TableLoad::Loaded(2));
        assert_eq!(count(&executor, "providers"), 2);
        assert_eq!(
            count(&executor, "providers WHERE Provider_ID = 99"),
            0,
            "rows absent from the CSV are discarded"
        );
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let executor = executor();
        let load = load_table::<Claim>(&executor, &dir.path().join("claims_data.csv")).unwrap();
        assert_eq!(load, TableLoad::Skipped);
    }

    #[test]
    fn test_bad_row_leaves_table_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("providers_data.csv");
        fs::write(&path, PROVIDERS).unwrap();
        let executor = executor();
        load_table::<Provider>(&executor, &path).unwrap();

        fs::write(
            &path,
            "Provider_ID,Name,Type,Address,City,Contact\nabc,X,Y,Z,W,V\n",
        )
        .unwrap();
        let err = load_table::<Provider>(&executor, &path).unwrap_err();
        assert!(matches!(err, LoadError::Csv { .. }));
        assert!(err.to_string().contains("providers_data.csv"));
        assert_eq!(count(&executor, "providers"), 2);
    }

    #[test]
    fn test_chunked_insert_handles_many_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("providers_data.csv");
        let mut data = String::from("Provider_ID,Name,Type,Address,City,Contact\n");
        for id in 1..=1_203 {
            data.push_str(&format!("{id},P{id},Restaurant,Street {id},City,555-{id}\n"));
        }
        fs::write(&path, data).unwrap();

        let executor = executor();
        assert_eq!(
            load_table::<Provider>(&executor, &path).unwrap(),
            TableLoad::Loaded(1_203)
        );
        assert_eq!(count(&executor, "providers"), 1_203);
    }

    #[test]
    fn test_open_database_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = FoodlinkConfig::default();
        config.database.path = dir.path().join("nested/deeper/food.db");
        config.dataset = DatasetConfig::in_dir(dir.path());

        let summary = initialize(&config).unwrap();
        assert!(config.database.path.exists());
        assert_eq!(summary.total_rows(), 0);
        assert!(summary.tables().iter().all(|(_, l)| *l == TableLoad::Skipped));
    }
}

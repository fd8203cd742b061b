//! Listing operations: create, update quantity, delete and filtered search, plus the reads
//! a presentation layer needs around them.
//!
//! Every statement is built with SeaQuery and runs with bound parameters. Functions take any
//! [`FoodExecutor`], so they work on a plain connection or inside a transaction.

pub mod filter;

pub use filter::{FilterValue, ListingColumn, ListingFilter};

use crate::entity::{FoodListing, NewListing, ProviderContact};
use crate::executor::{FoodError, FoodExecutor};
use crate::query::{execute_built, fetch_built, fetch_models, SqliteQueryBuilder};
use crate::raw_sql::query_value;
use crate::schema::{FoodListings, Providers};
use sea_query::{Expr, ExprTrait, Order, Query};
use serde::Serialize;
use std::collections::BTreeSet;

/// Listings matching a filter and the contacts of their providers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// Ordered by `Food_ID`
    pub listings: Vec<FoodListing>,
    /// One entry per distinct provider in `listings` that exists, ordered by id
    pub contacts: Vec<ProviderContact>,
}

fn ensure_id(entity: &str, id: i64) -> Result<(), FoodError> {
    if id < 1 {
        return Err(FoodError::Validation(format!(
            "{entity} id must be at least 1, got {id}"
        )));
    }
    Ok(())
}

/// Insert a listing and return the id the database assigned
///
/// The provider id is not checked against `providers`; see [`insert_listing_checked`].
///
/// # Errors
///
/// Returns `FoodError::Validation` if quantity or provider id is below 1.
pub fn insert_listing<E: FoodExecutor + ?Sized>(
    executor: &E,
    listing: &NewListing,
) -> Result<i64, FoodError> {
    listing.validate()?;

    let built = Query::insert()
        .into_table(FoodListings::Table)
        .columns(NewListing::COLUMNS)
        .values(listing.values().into_iter().map(Into::into))
        .map_err(|e| FoodError::QueryError(e.to_string()))?
        .returning_col(FoodListings::FoodId)
        .build(SqliteQueryBuilder);

    let id: i64 = fetch_built(executor, &built)?
        .first()
        .ok_or_else(|| FoodError::QueryError("insert returned no id".to_string()))?
        .try_get(0)?;
    log::debug!("inserted listing {} ({})", id, listing.name);
    Ok(id)
}

/// Like [`insert_listing`], but first requires the provider to exist
///
/// # Errors
///
/// Returns `FoodError::NotFound` when no provider has `listing.provider_id`.
pub fn insert_listing_checked<E: FoodExecutor + ?Sized>(
    executor: &E,
    listing: &NewListing,
) -> Result<i64, FoodError> {
    listing.validate()?;
    let known: i64 = query_value(
        executor,
        "SELECT COUNT(*) FROM providers WHERE Provider_ID = ?",
        &[&listing.provider_id],
    )?;
    if known == 0 {
        return Err(FoodError::NotFound {
            entity: "provider",
            id: listing.provider_id,
        });
    }
    insert_listing(executor, listing)
}

/// Overwrite the quantity of one listing
///
/// Returns the number of rows changed; 0 means no listing had `food_id`.
///
/// # Errors
///
/// Returns `FoodError::Validation` for a negative quantity or an id below 1.
pub fn update_quantity<E: FoodExecutor + ?Sized>(
    executor: &E,
    food_id: i64,
    quantity: i64,
) -> Result<u64, FoodError> {
    ensure_id("listing", food_id)?;
    if quantity < 0 {
        return Err(FoodError::Validation(format!(
            "quantity must not be negative, got {quantity}"
        )));
    }

    let built = Query::update()
        .table(FoodListings::Table)
        .value(FoodListings::Quantity, quantity)
        .and_where(Expr::col(FoodListings::FoodId).eq(food_id))
        .build(SqliteQueryBuilder);
    let changed = execute_built(executor, &built)?;
    if changed == 0 {
        log::debug!("update_quantity: no listing with id {}", food_id);
    }
    Ok(changed)
}

/// Delete one listing; returns rows removed (0 when it did not exist)
pub fn delete_listing<E: FoodExecutor + ?Sized>(executor: &E, food_id: i64) -> Result<u64, FoodError> {
    ensure_id("listing", food_id)?;
    let built = Query::delete()
        .from_table(FoodListings::Table)
        .and_where(Expr::col(FoodListings::FoodId).eq(food_id))
        .build(SqliteQueryBuilder);
    execute_built(executor, &built)
}

/// Listings matching `filter`, with the contacts of the providers behind them
///
/// # Examples
///
/// ```no_run
/// use foodlink::listings::{search_listings, ListingFilter};
/// use foodlink::SqliteExecutor;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let executor = SqliteExecutor::open("dataset/food_wastage.db")?;
/// let found = search_listings(&executor, &ListingFilter::new("New York", "All", "Vegan"))?;
/// for contact in &found.contacts {
///     println!("{}: {}", contact.name, contact.contact);
/// }
/// # Ok(())
/// # }
/// ```
pub fn search_listings<E: FoodExecutor + ?Sized>(
    executor: &E,
    filter: &ListingFilter,
) -> Result<SearchResult, FoodError> {
    let mut select = Query::select();
    select
        .columns(FoodListings::COLUMNS)
        .from(FoodListings::Table)
        .order_by(FoodListings::FoodId, Order::Asc);
    for (column, value) in filter.conditions() {
        select.and_where(Expr::col(column).eq(value));
    }
    let listings: Vec<FoodListing> = fetch_models(executor, &select.build(SqliteQueryBuilder))?;

    let provider_ids: BTreeSet<i64> = listings.iter().map(|l| l.provider_id).collect();
    let contacts = provider_contacts(executor, &provider_ids)?;

    Ok(SearchResult { listings, contacts })
}

/// Name and contact of each provider in `ids` that exists, ordered by id
pub fn provider_contacts<E: FoodExecutor + ?Sized>(
    executor: &E,
    ids: &BTreeSet<i64>,
) -> Result<Vec<ProviderContact>, FoodError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let built = Query::select()
        .columns([Providers::ProviderId, Providers::Name, Providers::Contact])
        .from(Providers::Table)
        .and_where(Expr::col(Providers::ProviderId).is_in(ids.iter().copied()))
        .order_by(Providers::ProviderId, Order::Asc)
        .build(SqliteQueryBuilder);
    fetch_models(executor, &built)
}

/// Every listing ordered by id
pub fn all_listings<E: FoodExecutor + ?Sized>(executor: &E) -> Result<Vec<FoodListing>, FoodError> {
    search_listings(executor, &ListingFilter::default()).map(|found| found.listings)
}

pub fn find_listing<E: FoodExecutor + ?Sized>(
    executor: &E,
    food_id: i64,
) -> Result<Option<FoodListing>, FoodError> {
    let built = Query::select()
        .columns(FoodListings::COLUMNS)
        .from(FoodListings::Table)
        .and_where(Expr::col(FoodListings::FoodId).eq(food_id))
        .build(SqliteQueryBuilder);
    let mut found: Vec<FoodListing> = fetch_models(executor, &built)?;
    Ok(found.pop())
}

/// Distinct non-null values of a filter column, sorted; the choices offered next to "All"
pub fn distinct_values<E: FoodExecutor + ?Sized>(
    executor: &E,
    column: ListingColumn,
) -> Result<Vec<String>, FoodError> {
    let col = column.column();
    let built = Query::select()
        .distinct()
        .column(col)
        .from(FoodListings::Table)
        .and_where(Expr::col(col).is_not_null())
        .order_by(col, Order::Asc)
        .build(SqliteQueryBuilder);
    fetch_built(executor, &built)?
        .iter()
        .map(|row| row.try_get::<String>(0))
        .collect()
}

pub fn count_listings<E: FoodExecutor + ?Sized>(executor: &E) -> Result<i64, FoodError> {
    query_value(executor, "SELECT COUNT(*) FROM food_listings", &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{listing, seeded_executor};

    #[test]
    fn test_insert_assigns_next_id() {
        let executor = seeded_executor();
        let before = count_listings(&executor).unwrap();
        let id = insert_listing(&executor, &listing("Soup", 7, "NY")).unwrap();
        assert_eq!(count_listings(&executor).unwrap(), before + 1);

        let stored = find_listing(&executor, id).unwrap().unwrap();
        assert_eq!(stored, listing("Soup", 7, "NY").into_listing(id));
    }

    #[test]
    fn test_insert_rejects_zero_quantity() {
        let executor = seeded_executor();
        let before = count_listings(&executor).unwrap();
        let err = insert_listing(&executor, &listing("Soup", 0, "NY")).unwrap_err();
        assert!(matches!(err, FoodError::Validation(_)));
        assert_eq!(count_listings(&executor).unwrap(), before);
    }

    #[test]
    fn test_checked_insert_requires_provider() {
        let executor = seeded_executor();
        let mut orphan = listing("Soup", 3, "NY");
        orphan.provider_id = 404;
        let err = insert_listing_checked(&executor, &orphan).unwrap_err();
        assert!(matches!(err, FoodError::NotFound { entity: "provider", id: 404 }));

        assert!(insert_listing_checked(&executor, &listing("Soup", 3, "NY")).is_ok());
    }

    #[test]
    fn test_update_quantity() {
        let executor = seeded_executor();
        assert_eq!(update_quantity(&executor, 1, 0).unwrap(), 1);
        assert_eq!(find_listing(&executor, 1).unwrap().unwrap().quantity, 0);

        let before = all_listings(&executor).unwrap();
        assert_eq!(update_quantity(&executor, 9_999, 5).unwrap(), 0);
        assert_eq!(all_listings(&executor).unwrap(), before);

        assert!(matches!(
            update_quantity(&executor, 1, -1),
            Err(FoodError::Validation(_))
        ));
        assert!(matches!(
            update_quantity(&executor, 0, 1),
            Err(FoodError::Validation(_))
        ));
    }

    #[test]
    fn test_delete_listing() {
        let executor = seeded_executor();
        let before = count_listings(&executor).unwrap();
        assert_eq!(delete_listing(&executor, 2).unwrap(), 1);
        assert!(find_listing(&executor, 2).unwrap().is_none());
        assert_eq!(count_listings(&executor).unwrap(), before - 1);

        assert_eq!(delete_listing(&executor, 2).unwrap(), 0);
        assert_eq!(count_listings(&executor).unwrap(), before - 1);
    }

    #[test]
    fn test_search_by_location() {
        let executor = seeded_executor();
        let found = search_listings(&executor, &ListingFilter::new("NY", "All", "All")).unwrap();
        assert!(!found.listings.is_empty());
        assert!(found.listings.iter().all(|l| l.location == "NY"));
        assert!(found
            .listings
            .windows(2)
            .all(|pair| pair[0].id < pair[1].id));
    }

    #[test]
    fn test_search_all_equals_full_read() {
        let executor = seeded_executor();
        let found = search_listings(&executor, &ListingFilter::new("all", "ALL", "All")).unwrap();
        assert_eq!(found.listings, all_listings(&executor).unwrap());
    }

    #[test]
    fn test_search_contacts_cover_result_providers() {
        let executor = seeded_executor();
        let found = search_listings(&executor, &ListingFilter::default()).unwrap();
        let ids: Vec<i64> = found.contacts.iter().map(|c| c.provider_id).collect();
        let expected: BTreeSet<i64> = found.listings.iter().map(|l| l.provider_id).collect();
        assert_eq!(ids, expected.into_iter().collect::<Vec<_>>());

        let none = search_listings(&executor, &ListingFilter::new("Atlantis", "All", "All")).unwrap();
        assert!(none.listings.is_empty());
        assert!(none.contacts.is_empty());
    }

    #[test]
    fn test_search_value_is_bound_not_interpolated() {
        let executor = seeded_executor();
        let found =
            search_listings(&executor, &ListingFilter::new("NY' OR '1'='1", "All", "All")).unwrap();
        assert!(found.listings.is_empty());
    }

    #[test]
    fn test_distinct_values_sorted() {
        let executor = seeded_executor();
        let locations = distinct_values(&executor, ListingColumn::Location).unwrap();
        assert_eq!(locations, vec!["LA".to_string(), "NY".to_string()]);
    }
}

//! Table and column identifiers for the four dashboard tables, plus their DDL.
//!
//! Column names match the CSV headers exactly so a CSV row maps one-to-one onto a row.

use sea_query::{ColumnDef, Iden, Index, IndexCreateStatement, Table, TableCreateStatement};

/// `providers` table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Providers {
    Table,
    ProviderId,
    Name,
    Type,
    Address,
    City,
    Contact,
}

impl Providers {
    pub const COLUMNS: [Providers; 6] = [
        Providers::ProviderId,
        Providers::Name,
        Providers::Type,
        Providers::Address,
        Providers::City,
        Providers::Contact,
    ];
}

impl Iden for Providers {
    fn unquoted(&self) -> &str {
        match self {
            Providers::Table => "providers",
            Providers::ProviderId => "Provider_ID",
            Providers::Name => "Name",
            Providers::Type => "Type",
            Providers::Address => "Address",
            Providers::City => "City",
            Providers::Contact => "Contact",
        }
    }
}

/// `receivers` table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receivers {
    Table,
    ReceiverId,
    Name,
    Type,
    City,
    Contact,
}

impl Receivers {
    pub const COLUMNS: [Receivers; 5] = [
        Receivers::ReceiverId,
        Receivers::Name,
        Receivers::Type,
        Receivers::City,
        Receivers::Contact,
    ];
}

impl Iden for Receivers {
    fn unquoted(&self) -> &str {
        match self {
            Receivers::Table => "receivers",
            Receivers::ReceiverId => "Receiver_ID",
            Receivers::Name => "Name",
            Receivers::Type => "Type",
            Receivers::City => "City",
            Receivers::Contact => "Contact",
        }
    }
}

/// `food_listings` table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodListings {
    Table,
    FoodId,
    FoodName,
    Quantity,
    ExpiryDate,
    ProviderId,
    ProviderType,
    Location,
    FoodType,
    MealType,
}

impl FoodListings {
    pub const COLUMNS: [FoodListings; 9] = [
        FoodListings::FoodId,
        FoodListings::FoodName,
        FoodListings::Quantity,
        FoodListings::ExpiryDate,
        FoodListings::ProviderId,
        FoodListings::ProviderType,
        FoodListings::Location,
        FoodListings::FoodType,
        FoodListings::MealType,
    ];
}

impl Iden for FoodListings {
    fn unquoted(&self) -> &str {
        match self {
            FoodListings::Table => "food_listings",
            FoodListings::FoodId => "Food_ID",
            FoodListings::FoodName => "Food_Name",
            FoodListings::Quantity => "Quantity",
            FoodListings::ExpiryDate => "Expiry_Date",
            FoodListings::ProviderId => "Provider_ID",
            FoodListings::ProviderType => "Provider_Type",
            FoodListings::Location => "Location",
            FoodListings::FoodType => "Food_Type",
            FoodListings::MealType => "Meal_Type",
        }
    }
}

/// `claims` table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claims {
    Table,
    ClaimId,
    FoodId,
    ReceiverId,
    Status,
    Timestamp,
}

impl Claims {
    pub const COLUMNS: [Claims; 5] = [
        Claims::ClaimId,
        Claims::FoodId,
        Claims::ReceiverId,
        Claims::Status,
        Claims::Timestamp,
    ];
}

impl Iden for Claims {
    fn unquoted(&self) -> &str {
        match self {
            Claims::Table => "claims",
            Claims::ClaimId => "Claim_ID",
            Claims::FoodId => "Food_ID",
            Claims::ReceiverId => "Receiver_ID",
            Claims::Status => "Status",
            Claims::Timestamp => "Timestamp",
        }
    }
}

/// Names of the four tables in creation order
pub const TABLE_NAMES: [&str; 4] = ["providers", "receivers", "food_listings", "claims"];

pub fn create_providers_table() -> TableCreateStatement {
    Table::create()
        .table(Providers::Table)
        .if_not_exists()
        .col(ColumnDef::new(Providers::ProviderId).integer().not_null().primary_key())
        .col(ColumnDef::new(Providers::Name).text())
        .col(ColumnDef::new(Providers::Type).text())
        .col(ColumnDef::new(Providers::Address).text())
        .col(ColumnDef::new(Providers::City).text())
        .col(ColumnDef::new(Providers::Contact).text())
        .to_owned()
}

pub fn create_receivers_table() -> TableCreateStatement {
    Table::create()
        .table(Receivers::Table)
        .if_not_exists()
        .col(ColumnDef::new(Receivers::ReceiverId).integer().not_null().primary_key())
        .col(ColumnDef::new(Receivers::Name).text())
        .col(ColumnDef::new(Receivers::Type).text())
        .col(ColumnDef::new(Receivers::City).text())
        .col(ColumnDef::new(Receivers::Contact).text())
        .to_owned()
}

/// `Expiry_Date` is stored as ISO `YYYY-MM-DD` text so SQLite's `DATE()` understands it.
pub fn create_food_listings_table() -> TableCreateStatement {
    Table::create()
        .table(FoodListings::Table)
        .if_not_exists()
        .col(ColumnDef::new(FoodListings::FoodId).integer().not_null().primary_key())
        .col(ColumnDef::new(FoodListings::FoodName).text())
        .col(ColumnDef::new(FoodListings::Quantity).integer())
        .col(ColumnDef::new(FoodListings::ExpiryDate).text())
        .col(ColumnDef::new(FoodListings::ProviderId).integer())
        .col(ColumnDef::new(FoodListings::ProviderType).text())
        .col(ColumnDef::new(FoodListings::Location).text())
        .col(ColumnDef::new(FoodListings::FoodType).text())
        .col(ColumnDef::new(FoodListings::MealType).text())
        .to_owned()
}

pub fn create_claims_table() -> TableCreateStatement {
    Table::create()
        .table(Claims::Table)
        .if_not_exists()
        .col(ColumnDef::new(Claims::ClaimId).integer().not_null().primary_key())
        .col(ColumnDef::new(Claims::FoodId).integer())
        .col(ColumnDef::new(Claims::ReceiverId).integer())
        .col(ColumnDef::new(Claims::Status).text())
        .col(ColumnDef::new(Claims::Timestamp).text())
        .to_owned()
}

/// Join-column indexes used by the claim reports
pub fn create_join_indexes() -> Vec<IndexCreateStatement> {
    vec![
        Index::create()
            .if_not_exists()
            .name("idx_food_listings_provider_id")
            .table(FoodListings::Table)
            .col(FoodListings::ProviderId)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("idx_claims_food_id")
            .table(Claims::Table)
            .col(Claims::FoodId)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("idx_claims_receiver_id")
            .table(Claims::Table)
            .col(Claims::ReceiverId)
            .to_owned(),
    ]
}

//! Shared fixtures for the integration tests: a temporary dataset directory with CSVs and
//! a database file next to them.

#![allow(dead_code)]

use chrono::NaiveDate;
use foodlink::config::{DatasetConfig, FoodlinkConfig};
use foodlink::{NewListing, Session};
use std::fs;
use tempfile::TempDir;

pub const PROVIDERS_CSV: &str = "\
Provider_ID,Name,Type,Address,City,Contact
1,Harbor Bakery,Restaurant,12 Pier Rd,New York,555-1001
2,Sunrise Market,Supermarket,4 Elm St,Los Angeles,555-1002
3,Green Basket,Grocery Store,88 Oak Ave,New York,555-1003
";

pub const RECEIVERS_CSV: &str = "\
Receiver_ID,Name,Type,City,Contact
1,Hope Shelter,Shelter,New York,555-2001
2,Community Table,Charity,Los Angeles,555-2002
";

pub const LISTINGS_CSV: &str = "\
Food_ID,Food_Name,Quantity,Expiry_Date,Provider_ID,Provider_Type,Location,Food_Type,Meal_Type
1,Bagels,30,2025-03-17,1,Restaurant,NY,Vegetarian,Breakfast
2,Tortillas,12,3/19/2025,2,Supermarket,LA,Vegan,Lunch
3,Apples,50,2025/03/25,3,Grocery Store,NY,Vegan,Snacks
";

pub const CLAIMS_CSV: &str = "\
Claim_ID,Food_ID,Receiver_ID,Status,Timestamp
1,1,1,Completed,2025-03-05 05:26:00
2,1,2,Completed,2025-03-06 11:10:00
3,2,1,Pending,2025-03-07 09:00:00
";

/// A dataset directory plus the config pointing at it; the directory lives as long as this
pub struct Fixture {
    pub dir: TempDir,
    pub config: FoodlinkConfig,
}

impl Fixture {
    /// Directory with no CSVs yet
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut config = FoodlinkConfig::default();
        config.database.path = dir.path().join("db").join("food_wastage.db");
        config.dataset = DatasetConfig::in_dir(dir.path());
        Self { dir, config }
    }

    /// Directory holding all four stock CSVs
    pub fn with_stock_csvs() -> Self {
        let fixture = Self::empty();
        fixture.write("providers_data.csv", PROVIDERS_CSV);
        fixture.write("receivers_data.csv", RECEIVERS_CSV);
        fixture.write("food_listings_data.csv", LISTINGS_CSV);
        fixture.write("claims_data.csv", CLAIMS_CSV);
        fixture
    }

    pub fn write(&self, file: &str, contents: &str) {
        fs::write(self.dir.path().join(file), contents).unwrap();
    }

    /// Run the initializer and open a session on the result
    pub fn session(&self) -> Session {
        foodlink::initialize(&self.config).unwrap();
        Session::open(&self.config).unwrap()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn new_listing(name: &str, quantity: i64, location: &str, expiry: NaiveDate) -> NewListing {
    NewListing {
        name: name.to_string(),
        quantity,
        expiry_date: expiry,
        provider_id: 1,
        provider_type: "Restaurant".to_string(),
        location: location.to_string(),
        food_type: "Vegetarian".to_string(),
        meal_type: "Dinner".to_string(),
    }
}

//! Fixture data shared by the unit test modules.

use crate::entity::{Claim, ClaimStatus, FoodListing, NewListing, Provider, Receiver};
use crate::executor::SqliteExecutor;
use crate::loader::replace_table;
use crate::schema::SchemaManager;
use chrono::NaiveDate;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Insert payload from provider 1 with fixed type columns
pub fn listing(name: &str, quantity: i64, location: &str) -> NewListing {
    NewListing {
        name: name.to_string(),
        quantity,
        expiry_date: date(2025, 3, 21),
        provider_id: 1,
        provider_type: "Restaurant".to_string(),
        location: location.to_string(),
        food_type: "Vegetarian".to_string(),
        meal_type: "Dinner".to_string(),
    }
}

fn provider(id: i64, name: &str, kind: &str, city: &str) -> Provider {
    Provider {
        id,
        name: name.to_string(),
        provider_type: kind.to_string(),
        address: format!("{id} Main St"),
        city: city.to_string(),
        contact: format!("555-010{id}"),
    }
}

fn receiver(id: i64, name: &str, kind: &str, city: &str) -> Receiver {
    Receiver {
        id,
        name: name.to_string(),
        receiver_type: kind.to_string(),
        city: city.to_string(),
        contact: format!("555-020{id}"),
    }
}

#[allow(clippy::too_many_arguments)]
fn food(
    id: i64,
    name: &str,
    quantity: i64,
    expiry: NaiveDate,
    provider_id: i64,
    provider_type: &str,
    location: &str,
    food_type: &str,
    meal_type: &str,
) -> FoodListing {
    FoodListing {
        id,
        name: name.to_string(),
        quantity,
        expiry_date: expiry,
        provider_id,
        provider_type: provider_type.to_string(),
        location: location.to_string(),
        food_type: food_type.to_string(),
        meal_type: meal_type.to_string(),
    }
}

fn claim(id: i64, food_id: i64, receiver_id: i64, status: ClaimStatus) -> Claim {
    Claim {
        id,
        food_id,
        receiver_id,
        status,
        timestamp: format!("2025-03-0{id} 10:00:00"),
    }
}

pub fn providers() -> Vec<Provider> {
    vec![
        provider(1, "Alpha Foods", "Restaurant", "New York"),
        provider(2, "Beta Market", "Supermarket", "Los Angeles"),
        provider(3, "Gamma Grocers", "Grocery Store", "New York"),
    ]
}

pub fn receivers() -> Vec<Receiver> {
    vec![
        receiver(1, "Shelter One", "Shelter", "New York"),
        receiver(2, "Kitchen Two", "Charity", "Los Angeles"),
        receiver(3, "Family Three", "Individual", "Chicago"),
    ]
}

pub fn food_listings() -> Vec<FoodListing> {
    vec![
        food(1, "Bread", 10, date(2025, 3, 17), 1, "Restaurant", "NY", "Vegetarian", "Breakfast"),
        food(2, "Rice", 20, date(2025, 3, 20), 2, "Supermarket", "LA", "Vegan", "Dinner"),
        food(3, "Soup", 5, date(2025, 3, 18), 1, "Restaurant", "NY", "Non-Vegetarian", "Lunch"),
        food(4, "Fruit", 15, date(2025, 3, 30), 3, "Grocery Store", "NY", "Vegan", "Snacks"),
    ]
}

pub fn claims() -> Vec<Claim> {
    vec![
        claim(1, 1, 1, ClaimStatus::Completed),
        claim(2, 1, 2, ClaimStatus::Completed),
        claim(3, 2, 1, ClaimStatus::Pending),
        claim(4, 3, 3, ClaimStatus::Cancelled),
        claim(5, 4, 1, ClaimStatus::Completed),
    ]
}

/// In-memory database with the schema created and nothing loaded
pub fn empty_executor() -> SqliteExecutor {
    let executor = SqliteExecutor::open_in_memory().unwrap();
    SchemaManager::new(&executor).create_all().unwrap();
    executor
}

/// In-memory database holding the fixture rows above
pub fn seeded_executor() -> SqliteExecutor {
    let executor = empty_executor();
    replace_table(&executor, &providers()).unwrap();
    replace_table(&executor, &receivers()).unwrap();
    replace_table(&executor, &food_listings()).unwrap();
    replace_table(&executor, &claims()).unwrap();
    executor
}

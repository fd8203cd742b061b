//! The fifteen canned reports.
//!
//! Every ordered report carries a secondary ascending key after its main ordering so ties
//! come back in a stable order.

use super::table::{ChartSpec, ColumnKind, ReportColumn};
use crate::executor::FoodError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use ColumnKind::{Date, Integer, Real, Text};

/// Identifier of a catalog report, numbered 1 to 15
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReportId {
    ProvidersReceiversPerCity,
    TopProviderTypesByQuantity,
    NewYorkProviderContacts,
    TopReceiversByClaims,
    TotalFoodAvailable,
    TopLocationsByListings,
    ListingsByFoodType,
    ClaimsPerListing,
    TopProvidersByCompletedClaims,
    ClaimStatusShare,
    TopReceiversByAverageQuantity,
    ClaimsByMealType,
    TopProvidersByDonatedQuantity,
    ExpiringSoon,
    TopLocationsByClaims,
}

impl ReportId {
    /// Catalog order
    pub const ALL: [ReportId; 15] = [
        ReportId::ProvidersReceiversPerCity,
        ReportId::TopProviderTypesByQuantity,
        ReportId::NewYorkProviderContacts,
        ReportId::TopReceiversByClaims,
        ReportId::TotalFoodAvailable,
        ReportId::TopLocationsByListings,
        ReportId::ListingsByFoodType,
        ReportId::ClaimsPerListing,
        ReportId::TopProvidersByCompletedClaims,
        ReportId::ClaimStatusShare,
        ReportId::TopReceiversByAverageQuantity,
        ReportId::ClaimsByMealType,
        ReportId::TopProvidersByDonatedQuantity,
        ReportId::ExpiringSoon,
        ReportId::TopLocationsByClaims,
    ];

    pub fn number(self) -> u8 {
        match self {
            ReportId::ProvidersReceiversPerCity => 1,
            ReportId::TopProviderTypesByQuantity => 2,
            ReportId::NewYorkProviderContacts => 3,
            ReportId::TopReceiversByClaims => 4,
            ReportId::TotalFoodAvailable => 5,
            ReportId::TopLocationsByListings => 6,
            ReportId::ListingsByFoodType => 7,
            ReportId::ClaimsPerListing => 8,
            ReportId::TopProvidersByCompletedClaims => 9,
            ReportId::ClaimStatusShare => 10,
            ReportId::TopReceiversByAverageQuantity => 11,
            ReportId::ClaimsByMealType => 12,
            ReportId::TopProvidersByDonatedQuantity => 13,
            ReportId::ExpiringSoon => 14,
            ReportId::TopLocationsByClaims => 15,
        }
    }

    pub fn from_number(number: u8) -> Option<ReportId> {
        ReportId::ALL.into_iter().find(|id| id.number() == number)
    }

    pub fn title(self) -> &'static str {
        match self {
            ReportId::ProvidersReceiversPerCity => "Providers and receivers count per city",
            ReportId::TopProviderTypesByQuantity => "Top food provider types by quantity",
            ReportId::NewYorkProviderContacts => "Contact info of food providers in New York",
            ReportId::TopReceiversByClaims => "Receivers who claimed the most food",
            ReportId::TotalFoodAvailable => "Total quantity of food available",
            ReportId::TopLocationsByListings => "Cities with the most food listings",
            ReportId::ListingsByFoodType => "Most commonly available food types",
            ReportId::ClaimsPerListing => "Number of claims made for each food item",
            ReportId::TopProvidersByCompletedClaims => {
                "Providers with the most successful food claims"
            }
            ReportId::ClaimStatusShare => "Percentage of claims by status",
            ReportId::TopReceiversByAverageQuantity => "Average quantity of food claimed per receiver",
            ReportId::ClaimsByMealType => "Most claimed meal types",
            ReportId::TopProvidersByDonatedQuantity => "Total quantity of food donated by each provider",
            ReportId::ExpiringSoon => "Food items close to expiry (within 3 days)",
            ReportId::TopLocationsByClaims => "Number of claims per city",
        }
    }

    /// SQL text; [`ReportId::ExpiringSoon`] binds today's date as `?1`
    pub fn sql(self) -> &'static str {
        match self {
            ReportId::ProvidersReceiversPerCity => {
                "SELECT p.City AS City,
                        COUNT(DISTINCT p.Provider_ID) AS Provider_Count,
                        (SELECT COUNT(DISTINCT r.Receiver_ID) FROM receivers r WHERE r.City = p.City) AS Receiver_Count
                 FROM providers p
                 GROUP BY p.City
                 ORDER BY Provider_Count DESC, p.City ASC"
            }
            ReportId::TopProviderTypesByQuantity => {
                "SELECT Provider_Type AS Provider_Type, SUM(Quantity) AS Total_Quantity
                 FROM food_listings
                 GROUP BY Provider_Type
                 ORDER BY Total_Quantity DESC, Provider_Type ASC
                 LIMIT 5"
            }
            ReportId::NewYorkProviderContacts => {
                "SELECT Name AS Name, Contact AS Contact
                 FROM providers
                 WHERE City = 'New York'
                 ORDER BY Provider_ID ASC"
            }
            ReportId::TopReceiversByClaims => {
                "SELECT r.Name AS Name, COUNT(c.Claim_ID) AS Claim_Count
                 FROM receivers r
                 JOIN claims c ON r.Receiver_ID = c.Receiver_ID
                 GROUP BY r.Receiver_ID
                 ORDER BY Claim_Count DESC, r.Receiver_ID ASC
                 LIMIT 5"
            }
            ReportId::TotalFoodAvailable => {
                "SELECT COALESCE(SUM(Quantity), 0) AS Total_Food_Available FROM food_listings"
            }
            ReportId::TopLocationsByListings => {
                "SELECT Location AS Location, COUNT(*) AS Listings_Count
                 FROM food_listings
                 GROUP BY Location
                 ORDER BY Listings_Count DESC, Location ASC
                 LIMIT 5"
            }
            ReportId::ListingsByFoodType => {
                "SELECT Food_Type AS Food_Type, COUNT(*) AS Count
                 FROM food_listings
                 GROUP BY Food_Type
                 ORDER BY Count DESC, Food_Type ASC"
            }
            ReportId::ClaimsPerListing => {
                "SELECT f.Food_Name AS Food_Name, COUNT(c.Claim_ID) AS Claims_Made
                 FROM food_listings f
                 LEFT JOIN claims c ON f.Food_ID = c.Food_ID
                 GROUP BY f.Food_ID
                 ORDER BY Claims_Made DESC, f.Food_ID ASC"
            }
            ReportId::TopProvidersByCompletedClaims => {
                "SELECT p.Name AS Name, COUNT(c.Claim_ID) AS Completed_Claims
                 FROM providers p
                 JOIN food_listings f ON p.Provider_ID = f.Provider_ID
                 JOIN claims c ON f.Food_ID = c.Food_ID
                 WHERE c.Status = 'Completed'
                 GROUP BY p.Provider_ID
                 ORDER BY Completed_Claims DESC, p.Provider_ID ASC
                 LIMIT 5"
            }
            ReportId::ClaimStatusShare => {
                "SELECT Status AS Status,
                        ROUND(100.0 * COUNT(*) / (SELECT COUNT(*) FROM claims), 2) AS Percentage
                 FROM claims
                 GROUP BY Status
                 ORDER BY Percentage DESC, Status ASC"
            }
            ReportId::TopReceiversByAverageQuantity => {
                "SELECT r.Name AS Name, AVG(f.Quantity) AS Avg_Quantity_Claimed
                 FROM receivers r
                 JOIN claims c ON r.Receiver_ID = c.Receiver_ID
                 JOIN food_listings f ON c.Food_ID = f.Food_ID
                 WHERE c.Status = 'Completed'
                 GROUP BY r.Receiver_ID
                 ORDER BY Avg_Quantity_Claimed DESC, r.Receiver_ID ASC
                 LIMIT 5"
            }
            ReportId::ClaimsByMealType => {
                "SELECT f.Meal_Type AS Meal_Type, COUNT(c.Claim_ID) AS Claims_Count
                 FROM food_listings f
                 JOIN claims c ON f.Food_ID = c.Food_ID
                 GROUP BY f.Meal_Type
                 ORDER BY Claims_Count DESC, f.Meal_Type ASC"
            }
            ReportId::TopProvidersByDonatedQuantity => {
                "SELECT p.Name AS Name, SUM(f.Quantity) AS Total_Quantity_Donated
                 FROM providers p
                 JOIN food_listings f ON p.Provider_ID = f.Provider_ID
                 GROUP BY p.Provider_ID
                 ORDER BY Total_Quantity_Donated DESC, p.Provider_ID ASC
                 LIMIT 5"
            }
            ReportId::ExpiringSoon => {
                "SELECT Food_Name AS Food_Name, Expiry_Date AS Expiry_Date,
                        Quantity AS Quantity, Location AS Location
                 FROM food_listings
                 WHERE DATE(Expiry_Date) BETWEEN DATE(?1) AND DATE(?1, '+3 days')
                 ORDER BY Expiry_Date ASC, Food_ID ASC"
            }
            ReportId::TopLocationsByClaims => {
                "SELECT l.Location AS Location, COUNT(c.Claim_ID) AS Claims_Count
                 FROM food_listings l
                 JOIN claims c ON l.Food_ID = c.Food_ID
                 GROUP BY l.Location
                 ORDER BY Claims_Count DESC, l.Location ASC
                 LIMIT 5"
            }
        }
    }

    /// Whether the SQL expects today's date as its single parameter
    pub fn takes_today(self) -> bool {
        matches!(self, ReportId::ExpiringSoon)
    }

    pub fn columns(self) -> &'static [ReportColumn] {
        match self {
            ReportId::ProvidersReceiversPerCity => &[
                ReportColumn { name: "City", kind: Text },
                ReportColumn { name: "Provider_Count", kind: Integer },
                ReportColumn { name: "Receiver_Count", kind: Integer },
            ],
            ReportId::TopProviderTypesByQuantity => &[
                ReportColumn { name: "Provider_Type", kind: Text },
                ReportColumn { name: "Total_Quantity", kind: Integer },
            ],
            ReportId::NewYorkProviderContacts => &[
                ReportColumn { name: "Name", kind: Text },
                ReportColumn { name: "Contact", kind: Text },
            ],
            ReportId::TopReceiversByClaims => &[
                ReportColumn { name: "Name", kind: Text },
                ReportColumn { name: "Claim_Count", kind: Integer },
            ],
            ReportId::TotalFoodAvailable => &[
                ReportColumn { name: "Total_Food_Available", kind: Integer },
            ],
            ReportId::TopLocationsByListings => &[
                ReportColumn { name: "Location", kind: Text },
                ReportColumn { name: "Listings_Count", kind: Integer },
            ],
            ReportId::ListingsByFoodType => &[
                ReportColumn { name: "Food_Type", kind: Text },
                ReportColumn { name: "Count", kind: Integer },
            ],
            ReportId::ClaimsPerListing => &[
                ReportColumn { name: "Food_Name", kind: Text },
                ReportColumn { name: "Claims_Made", kind: Integer },
            ],
            ReportId::TopProvidersByCompletedClaims => &[
                ReportColumn { name: "Name", kind: Text },
                ReportColumn { name: "Completed_Claims", kind: Integer },
            ],
            ReportId::ClaimStatusShare => &[
                ReportColumn { name: "Status", kind: Text },
                ReportColumn { name: "Percentage", kind: Real },
            ],
            ReportId::TopReceiversByAverageQuantity => &[
                ReportColumn { name: "Name", kind: Text },
                ReportColumn { name: "Avg_Quantity_Claimed", kind: Real },
            ],
            ReportId::ClaimsByMealType => &[
                ReportColumn { name: "Meal_Type", kind: Text },
                ReportColumn { name: "Claims_Count", kind: Integer },
            ],
            ReportId::TopProvidersByDonatedQuantity => &[
                ReportColumn { name: "Name", kind: Text },
                ReportColumn { name: "Total_Quantity_Donated", kind: Integer },
            ],
            ReportId::ExpiringSoon => &[
                ReportColumn { name: "Food_Name", kind: Text },
                ReportColumn { name: "Expiry_Date", kind: Date },
                ReportColumn { name: "Quantity", kind: Integer },
                ReportColumn { name: "Location", kind: Text },
            ],
            ReportId::TopLocationsByClaims => &[
                ReportColumn { name: "Location", kind: Text },
                ReportColumn { name: "Claims_Count", kind: Integer },
            ],
        }
    }

    /// Bar-chart hint; first column labels the bars, second gives their height
    pub fn chart(self) -> Option<ChartSpec> {
        let (category, value) = match self {
            ReportId::TopProviderTypesByQuantity => ("Provider_Type", "Total_Quantity"),
            ReportId::TopLocationsByListings => ("Location", "Listings_Count"),
            ReportId::ListingsByFoodType => ("Food_Type", "Count"),
            ReportId::ClaimStatusShare => ("Status", "Percentage"),
            ReportId::TopLocationsByClaims => ("Location", "Claims_Count"),
            _ => return None,
        };
        Some(ChartSpec { category, value })
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.title())
    }
}

impl Serialize for ReportId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

impl FromStr for ReportId {
    type Err = FoodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(ReportId::from_number)
            .ok_or_else(|| {
                FoodError::Validation(format!("report must be a number from 1 to 15, got {s:?}"))
            })
    }
}

//! Merchant reference data. Read-only for the whole run.

use crate::types::{CountryCode, EntityId, Mcc};
use serde::{Deserialize, Serialize};

pub const MCC_COFFEE: Mcc = 5812;
pub const MCC_BOOK_STORE: Mcc = 5942;
pub const MCC_FAST_FOOD: Mcc = 5814;
pub const MCC_AIRLINE: Mcc = 4511;
pub const MCC_GROCERY: Mcc = 5411;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Merchant {
    pub merchant_id: EntityId,
    pub merchant_name: String,
    pub mcc: Mcc,
    pub city: String,
    pub country: CountryCode,
    pub lat: f64,
    pub lon: f64,
}

impl Merchant {
    pub fn new(
        merchant_id: &str,
        merchant_name: &str,
        mcc: Mcc,
        city: &str,
        country: &str,
        lat: f64,
        lon: f64,
    ) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            merchant_name: merchant_name.into(),
            mcc,
            city: city.into(),
            country: country.into(),
            lat,
            lon,
        }
    }

    pub fn is_domestic(&self, home_country: &str) -> bool {
        self.country == home_country
    }
}

/// The built-in five-merchant catalog.
pub fn default_catalog() -> Vec<Merchant> {
    vec![
        Merchant::new("M001", "Starbucks", MCC_COFFEE, "New York", "US", 40.7128, -74.0060),
        Merchant::new("M002", "Amazon", MCC_BOOK_STORE, "Seattle", "US", 47.6062, -122.3321),
        Merchant::new("M003", "McDonalds", MCC_FAST_FOOD, "Chicago", "US", 41.8781, -87.6298),
        Merchant::new("M004", "British Airways", MCC_AIRLINE, "London", "GB", 51.4700, -0.4543),
        Merchant::new("M005", "Reliance Retail", MCC_GROCERY, "Mumbai", "IN", 19.0760, 72.8777),
    ]
}

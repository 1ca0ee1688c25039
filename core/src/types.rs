//! Shared primitive types used across the generator.

/// A stable, unique identifier for any generated or catalog entity.
pub type EntityId = String;

/// Merchant category code.
pub type Mcc = u32;

/// ISO 3166-1 alpha-2 country code, e.g. "US".
pub type CountryCode = String;

/// ISO 4217 currency code, e.g. "USD".
pub type CurrencyCode = String;

/// Round a monetary or rate value to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

use crate::{
    customer::CardNetwork,
    error::{GenError, GenResult},
    merchant::{self, Merchant},
    transaction::{Channel, EntryMode},
    types::{CountryCode, CurrencyCode, Mcc},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Smallest amount a category range may start at. Anything lower could
/// round to 0.00 and break the refund sign.
pub const MIN_AMOUNT: f64 = 0.01;

/// Lower and upper bound for a uniform draw.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ValueRange {
    pub low: f64,
    pub high: f64,
}

impl ValueRange {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn is_finite(&self) -> bool {
        self.low.is_finite() && self.high.is_finite()
    }
}

/// One row of the entry mode to channel table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntryChannel {
    pub entry_mode: EntryMode,
    pub channel: Channel,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub customer_count: usize,
    pub transaction_count: usize,
    pub home_country: CountryCode,
    pub home_currency: CurrencyCode,
    /// Currency enumeration. Foreign transactions draw from the non-home entries.
    pub currencies: Vec<CurrencyCode>,
    pub card_networks: Vec<CardNetwork>,
    pub merchants: Vec<Merchant>,
    /// Sampled uniformly; order is the sampling order.
    pub entry_modes: Vec<EntryChannel>,
    pub start_date: NaiveDate,
    /// Transaction dates fall in [start_date, start_date + max_day_offset].
    pub max_day_offset: u32,
    pub posting_lag_days: Vec<u32>,
    pub amount_ranges: BTreeMap<Mcc, ValueRange>,
    pub refund_probability: f64,
    pub exchange_rate_range: ValueRange,
    pub fee_rate_range: ValueRange,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let amount_ranges = BTreeMap::from([
            (merchant::MCC_COFFEE, ValueRange::new(3.0, 15.0)),
            (merchant::MCC_BOOK_STORE, ValueRange::new(20.0, 200.0)),
            (merchant::MCC_FAST_FOOD, ValueRange::new(5.0, 30.0)),
            (merchant::MCC_AIRLINE, ValueRange::new(200.0, 900.0)),
            (merchant::MCC_GROCERY, ValueRange::new(10.0, 100.0)),
        ]);

        Self {
            customer_count: 50,
            transaction_count: 2000,
            home_country: "US".into(),
            home_currency: "USD".into(),
            currencies: vec!["USD".into(), "EUR".into(), "GBP".into(), "INR".into()],
            card_networks: CardNetwork::ALL.to_vec(),
            merchants: merchant::default_catalog(),
            entry_modes: EntryMode::ALL
                .iter()
                .map(|&entry_mode| EntryChannel {
                    entry_mode,
                    channel: entry_mode.default_channel(),
                })
                .collect(),
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid start date"),
            max_day_offset: 600,
            posting_lag_days: vec![1, 2],
            amount_ranges,
            refund_probability: 0.1,
            exchange_rate_range: ValueRange::new(0.7, 1.3),
            fee_rate_range: ValueRange::new(0.005, 0.03),
        }
    }
}

impl GeneratorConfig {
    /// Load from a JSON file. Missing fields keep their defaults.
    /// In tests, use GeneratorConfig::default_test().
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: GeneratorConfig = serde_json::from_str(&content)?;
        log::info!("loaded generator config from {}", path.display());
        Ok(config)
    }

    /// Config with hardcoded defaults and a small population, for tests.
    pub fn default_test() -> Self {
        Self {
            customer_count: 10,
            transaction_count: 200,
            ..Self::default()
        }
    }

    /// Channel for an entry mode per the configured table.
    pub fn channel_for(&self, mode: EntryMode) -> Option<Channel> {
        self.entry_modes
            .iter()
            .find(|e| e.entry_mode == mode)
            .map(|e| e.channel)
    }

    /// Currencies a foreign transaction may be billed in.
    pub fn foreign_currencies(&self) -> Vec<CurrencyCode> {
        self.currencies
            .iter()
            .filter(|c| **c != self.home_currency)
            .cloned()
            .collect()
    }

    /// Check configuration integrity. Every failure here is fatal:
    /// the run must not start with a config that cannot produce a full output.
    pub fn validate(&self) -> GenResult<()> {
        if self.merchants.is_empty() {
            return Err(GenError::EmptyMerchantCatalog);
        }

        for m in &self.merchants {
            let range = self.amount_ranges.get(&m.mcc).ok_or_else(|| {
                GenError::MissingAmountRange {
                    mcc: m.mcc,
                    merchant_id: m.merchant_id.clone(),
                }
            })?;
            if !(range.is_finite() && range.low >= MIN_AMOUNT && range.low < range.high) {
                return Err(GenError::Config(format!(
                    "amount range for MCC {} must satisfy {MIN_AMOUNT} <= low < high, got [{}, {})",
                    m.mcc, range.low, range.high
                )));
            }
        }

        let used: BTreeSet<Mcc> = self.merchants.iter().map(|m| m.mcc).collect();
        for mcc in self.amount_ranges.keys().filter(|mcc| !used.contains(mcc)) {
            log::warn!("amount range for MCC {mcc} is not used by any merchant");
        }

        if !(0.0..=1.0).contains(&self.refund_probability) {
            return Err(GenError::Config(format!(
                "refund_probability must be in [0, 1], got {}",
                self.refund_probability
            )));
        }

        check_rate_range("exchange_rate_range", &self.exchange_rate_range)?;
        check_rate_range("fee_rate_range", &self.fee_rate_range)?;

        if self.entry_modes.is_empty() {
            return Err(GenError::Config("entry_modes table is empty".into()));
        }
        let mut seen = BTreeSet::new();
        for e in &self.entry_modes {
            if !seen.insert(e.entry_mode) {
                return Err(GenError::Config(format!(
                    "entry mode {} is mapped more than once",
                    e.entry_mode
                )));
            }
        }

        if self.card_networks.is_empty() {
            return Err(GenError::Config("card_networks is empty".into()));
        }

        if self.posting_lag_days.is_empty() || self.posting_lag_days.contains(&0) {
            return Err(GenError::Config(
                "posting_lag_days must be non-empty and every lag must be >= 1".into(),
            ));
        }

        let has_foreign = self
            .merchants
            .iter()
            .any(|m| !m.is_domestic(&self.home_country));
        if has_foreign && self.foreign_currencies().is_empty() {
            return Err(GenError::Config(format!(
                "foreign merchants exist but currencies has no entry other than {}",
                self.home_currency
            )));
        }

        if self.transaction_count > 0 && self.customer_count == 0 {
            return Err(GenError::Config(
                "transaction_count > 0 requires at least one customer".into(),
            ));
        }

        Ok(())
    }
}

fn check_rate_range(name: &str, range: &ValueRange) -> GenResult<()> {
    if !(range.is_finite() && range.low >= 0.0 && range.low <= range.high) {
        return Err(GenError::Config(format!(
            "{name} must be finite with 0 <= low <= high, got [{}, {}]",
            range.low, range.high
        )));
    }
    Ok(())
}

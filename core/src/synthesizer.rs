//! Transaction synthesizer.
//!
//! DRAW ORDER (fixed, per record, never reordered):
//!   customer, merchant, date offset, time of day, posting lag,
//!   entry mode, base amount, type, currency + rate, fee rate,
//!   auth code, terminal id, transaction id.
//!
//! Reordering draws changes every seeded dataset.

use crate::{
    config::GeneratorConfig,
    customer::Customer,
    error::{GenError, GenResult},
    merchant::Merchant,
    rng::StageRng,
    transaction::{Transaction, TransactionType},
    types::{round2, CurrencyCode},
};
use chrono::{Days, NaiveDate, NaiveTime};
use uuid::Builder;

pub const AUTH_CODE_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const AUTH_CODE_LEN: usize = 6;
pub const TERMINAL_MIN: u64 = 1000;
pub const TERMINAL_MAX: u64 = 9999;
pub const SECONDS_PER_DAY: u64 = 86_400;

const PROGRESS_INTERVAL: usize = 500;

pub struct TransactionSynthesizer<'a> {
    config: &'a GeneratorConfig,
    foreign_currencies: Vec<CurrencyCode>,
}

impl<'a> TransactionSynthesizer<'a> {
    /// Validates `config` so every later lookup is known to succeed.
    pub fn new(config: &'a GeneratorConfig) -> GenResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            foreign_currencies: config.foreign_currencies(),
        })
    }

    /// Produce `config.transaction_count` records in generation order.
    pub fn synthesize(
        &self,
        customers: &[Customer],
        rng: &mut StageRng,
    ) -> GenResult<Vec<Transaction>> {
        let n = self.config.transaction_count;
        let mut out = Vec::with_capacity(n);

        for i in 0..n {
            out.push(self.synthesize_one(customers, rng)?);
            if (i + 1) % PROGRESS_INTERVAL == 0 {
                log::debug!("{}: {}/{n} transactions", rng.name, i + 1);
            }
        }
        Ok(out)
    }

    /// Build a single record.
    pub fn synthesize_one(
        &self,
        customers: &[Customer],
        rng: &mut StageRng,
    ) -> GenResult<Transaction> {
        let cfg = self.config;

        let customer = rng
            .pick(customers)
            .ok_or_else(|| GenError::Config("customer pool is empty".into()))?;
        let merchant = rng.pick(&cfg.merchants).ok_or(GenError::EmptyMerchantCatalog)?;

        let offset = rng.range_inclusive(0, u64::from(cfg.max_day_offset));
        let transaction_date = add_days(cfg.start_date, offset)?;
        let transaction_time = random_time_of_day(rng)?;
        let lag = *rng
            .pick(&cfg.posting_lag_days)
            .ok_or_else(|| GenError::Config("posting_lag_days is empty".into()))?;
        let posting_date = add_days(transaction_date, u64::from(lag))?;

        let entry = *rng
            .pick(&cfg.entry_modes)
            .ok_or_else(|| GenError::Config("entry_modes table is empty".into()))?;

        let mut amount = self.base_amount(merchant, rng)?;
        let transaction_type = if rng.chance(cfg.refund_probability) {
            TransactionType::Refund
        } else {
            TransactionType::Purchase
        };
        if transaction_type == TransactionType::Refund {
            amount = -amount;
        }

        let (currency, exchange_rate) = self.currency_and_rate(merchant, rng)?;

        let fee_rate = rng.uniform(cfg.fee_rate_range.low, cfg.fee_rate_range.high);
        let merchant_fee = round2(amount.abs() * fee_rate);

        let (authorization_code, terminal_id, transaction_id) = record_identifiers(rng);

        Ok(Transaction {
            transaction_id,
            card_number_masked: customer.card_number_masked.clone(),
            account_id: customer.account_id.clone(),
            customer_id: customer.customer_id.clone(),
            card_network: customer.card_network,
            transaction_date,
            transaction_time,
            posting_date,
            transaction_type,
            channel: entry.channel,
            amount,
            currency,
            exchange_rate,
            merchant_fee,
            authorization_code,
            merchant_id: merchant.merchant_id.clone(),
            merchant_name: merchant.merchant_name.clone(),
            merchant_category_code: merchant.mcc,
            merchant_city: merchant.city.clone(),
            merchant_country: merchant.country.clone(),
            terminal_id,
            transaction_country: merchant.country.clone(),
            transaction_latitude: merchant.lat,
            transaction_longitude: merchant.lon,
            entry_mode: entry.entry_mode,
        })
    }

    /// Category-typical spend, rounded to cents. Always positive.
    fn base_amount(&self, merchant: &Merchant, rng: &mut StageRng) -> GenResult<f64> {
        let range = self
            .config
            .amount_ranges
            .get(&merchant.mcc)
            .ok_or_else(|| GenError::MissingAmountRange {
                mcc: merchant.mcc,
                merchant_id: merchant.merchant_id.clone(),
            })?;
        Ok(round2(rng.uniform(range.low, range.high)))
    }

    /// Domestic merchants bill in the home currency at exactly 1.0 and
    /// consume no entropy here.
    fn currency_and_rate(
        &self,
        merchant: &Merchant,
        rng: &mut StageRng,
    ) -> GenResult<(CurrencyCode, f64)> {
        let cfg = self.config;
        if merchant.is_domestic(&cfg.home_country) {
            return Ok((cfg.home_currency.clone(), 1.0));
        }

        let currency = rng.pick(&self.foreign_currencies).cloned().ok_or_else(|| {
            GenError::Config(format!(
                "no foreign currency available for merchant '{}'",
                merchant.merchant_id
            ))
        })?;
        let range = cfg.exchange_rate_range;
        let rate = round2(rng.uniform(range.low, range.high));
        Ok((currency, rate))
    }
}

fn add_days(date: NaiveDate, days: u64) -> GenResult<NaiveDate> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| GenError::Config(format!("date {date} + {days} days is out of range")))
}

fn random_time_of_day(rng: &mut StageRng) -> GenResult<NaiveTime> {
    let secs = rng.next_u64_below(SECONDS_PER_DAY) as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, 0)
        .ok_or_else(|| GenError::Config(format!("invalid second of day {secs}")))
}

/// Auth code, terminal id, then transaction id, in that draw order.
fn record_identifiers(rng: &mut StageRng) -> (String, String, String) {
    let authorization_code = auth_code(rng);
    let terminal_id = terminal_id(rng);
    let transaction_id = transaction_id(rng);
    (authorization_code, terminal_id, transaction_id)
}

fn terminal_id(rng: &mut StageRng) -> String {
    format!("TERM{}", rng.range_inclusive(TERMINAL_MIN, TERMINAL_MAX))
}

/// Random (version 4) UUID built from the stage stream, so seeded runs repeat.
fn transaction_id(rng: &mut StageRng) -> String {
    Builder::from_random_bytes(rng.next_bytes_16())
        .into_uuid()
        .to_string()
}

fn auth_code(rng: &mut StageRng) -> String {
    (0..AUTH_CODE_LEN)
        .map(|_| {
            let i = rng.next_u64_below(AUTH_CODE_ALPHABET.len() as u64) as usize;
            AUTH_CODE_ALPHABET[i] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        customer::build_customer_pool,
        rng::{RngBank, StageSlot},
        transaction::{Channel, EntryMode},
    };

    fn pool(config: &GeneratorConfig) -> Vec<Customer> {
        let mut rng = RngBank::new(1).for_stage(StageSlot::Customer);
        build_customer_pool(config.customer_count, &config.card_networks, &mut rng).unwrap()
    }

    #[test]
    fn auth_code_is_six_uppercase_alphanumerics() {
        let mut rng = RngBank::new(8).for_stage(StageSlot::Transaction);
        for _ in 0..200 {
            let code = auth_code(&mut rng);
            assert_eq!(code.len(), AUTH_CODE_LEN);
            assert!(code
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn terminal_id_is_drawn_right_after_auth_code() {
        let mut a = RngBank::new(21).for_stage(StageSlot::Transaction);
        let mut b = RngBank::new(21).for_stage(StageSlot::Transaction);

        let (code, terminal, txn_id) = record_identifiers(&mut a);

        assert_eq!(code, auth_code(&mut b));
        assert_eq!(terminal, terminal_id(&mut b));
        assert_eq!(txn_id, transaction_id(&mut b));
        assert_eq!(a.next_u64(), b.next_u64(), "identifier draws out of step");
    }

    #[test]
    fn transaction_id_is_a_v4_uuid() {
        let mut rng = RngBank::new(22).for_stage(StageSlot::Transaction);
        let id = uuid::Uuid::parse_str(&transaction_id(&mut rng)).unwrap();
        assert_eq!(id.get_version_num(), 4);
    }

    #[test]
    fn domestic_merchant_uses_home_currency_without_drawing() {
        let config = GeneratorConfig::default_test();
        let synth = TransactionSynthesizer::new(&config).unwrap();
        let us = config.merchants.iter().find(|m| m.country == "US").unwrap();

        let mut a = RngBank::new(4).for_stage(StageSlot::Transaction);
        let mut b = RngBank::new(4).for_stage(StageSlot::Transaction);
        let (currency, rate) = synth.currency_and_rate(us, &mut a).unwrap();
        assert_eq!(currency, "USD");
        assert_eq!(rate, 1.0);
        assert_eq!(a.next_u64(), b.next_u64(), "domestic path consumed entropy");
    }

    #[test]
    fn foreign_merchant_gets_foreign_currency_in_range() {
        let config = GeneratorConfig::default_test();
        let synth = TransactionSynthesizer::new(&config).unwrap();
        let gb = config.merchants.iter().find(|m| m.country == "GB").unwrap();
        let mut rng = RngBank::new(4).for_stage(StageSlot::Transaction);

        for _ in 0..500 {
            let (currency, rate) = synth.currency_and_rate(gb, &mut rng).unwrap();
            assert_ne!(currency, "USD");
            assert!(config.currencies.contains(&currency));
            assert!((0.7..=1.3).contains(&rate), "rate {rate} out of range");
        }
    }

    #[test]
    fn custom_entry_table_is_respected() {
        let mut config = GeneratorConfig::default_test();
        config.entry_modes = vec![crate::config::EntryChannel {
            entry_mode: EntryMode::Swipe,
            channel: Channel::Pos,
        }];
        let customers = pool(&config);
        let synth = TransactionSynthesizer::new(&config).unwrap();
        let mut rng = RngBank::new(2).for_stage(StageSlot::Transaction);

        let txns = synth.synthesize(&customers, &mut rng).unwrap();
        assert!(txns
            .iter()
            .all(|t| t.entry_mode == EntryMode::Swipe && t.channel == Channel::Pos));
    }

    #[test]
    fn refund_probability_one_gives_only_refunds() {
        let mut config = GeneratorConfig::default_test();
        config.refund_probability = 1.0;
        let customers = pool(&config);
        let synth = TransactionSynthesizer::new(&config).unwrap();
        let mut rng = RngBank::new(3).for_stage(StageSlot::Transaction);

        for t in synth.synthesize(&customers, &mut rng).unwrap() {
            assert_eq!(t.transaction_type, TransactionType::Refund);
            assert!(t.amount < 0.0);
        }
    }

    #[test]
    fn empty_pool_is_rejected_per_record() {
        let config = GeneratorConfig::default_test();
        let synth = TransactionSynthesizer::new(&config).unwrap();
        let mut rng = RngBank::new(3).for_stage(StageSlot::Transaction);
        assert!(matches!(
            synth.synthesize_one(&[], &mut rng),
            Err(GenError::Config(_))
        ));
    }
}

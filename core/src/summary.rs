//! End-of-run aggregates for the runner's summary.

use crate::{
    transaction::{Channel, Transaction},
    types::{round2, CurrencyCode},
};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DatasetSummary {
    pub txn_count: usize,
    pub purchase_count: usize,
    pub refund_count: usize,
    /// Transactions at merchants outside the home country.
    pub foreign_count: usize,
    /// Sum of signed amounts.
    pub net_volume: f64,
    /// Sum of absolute amounts.
    pub gross_volume: f64,
    pub fee_income: f64,
    pub by_channel: BTreeMap<Channel, usize>,
    pub by_currency: BTreeMap<CurrencyCode, usize>,
}

impl DatasetSummary {
    pub fn from_transactions(transactions: &[Transaction], home_country: &str) -> Self {
        let mut s = Self::default();
        for t in transactions {
            s.txn_count += 1;
            if t.is_refund() {
                s.refund_count += 1;
            } else {
                s.purchase_count += 1;
            }
            if t.merchant_country != home_country {
                s.foreign_count += 1;
            }
            s.net_volume += t.amount;
            s.gross_volume += t.amount.abs();
            s.fee_income += t.merchant_fee;
            *s.by_channel.entry(t.channel).or_default() += 1;
            *s.by_currency.entry(t.currency.clone()).or_default() += 1;
        }
        s.net_volume = round2(s.net_volume);
        s.gross_volume = round2(s.gross_volume);
        s.fee_income = round2(s.fee_income);
        s
    }

    pub fn refund_share(&self) -> f64 {
        if self.txn_count == 0 {
            0.0
        } else {
            self.refund_count as f64 / self.txn_count as f64
        }
    }
}

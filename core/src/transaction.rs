//! The transaction record and its small closed vocabularies.

use crate::{
    customer::CardNetwork,
    types::{CountryCode, CurrencyCode, EntityId, Mcc},
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Purchase,
    Refund,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Purchase => "Purchase",
            Self::Refund => "Refund",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// How the card was presented.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryMode {
    Chip,
    Swipe,
    Contactless,
    Online,
    #[serde(rename = "ATM")]
    Atm,
}

impl EntryMode {
    pub const ALL: [EntryMode; 5] = [
        Self::Chip,
        Self::Swipe,
        Self::Contactless,
        Self::Online,
        Self::Atm,
    ];

    /// The standard entry mode to channel mapping.
    pub fn default_channel(&self) -> Channel {
        match self {
            Self::Chip | Self::Swipe | Self::Contactless => Channel::Pos,
            Self::Online => Channel::Online,
            Self::Atm => Channel::Atm,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chip => "Chip",
            Self::Swipe => "Swipe",
            Self::Contactless => "Contactless",
            Self::Online => "Online",
            Self::Atm => "ATM",
        }
    }
}

impl fmt::Display for EntryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Coarse transaction medium, derived from the entry mode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    #[serde(rename = "POS")]
    Pos,
    Online,
    #[serde(rename = "ATM")]
    Atm,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pos => "POS",
            Self::Online => "Online",
            Self::Atm => "ATM",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One output row. Field order is the CSV column order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub transaction_id: EntityId,
    pub card_number_masked: String,
    pub account_id: EntityId,
    pub customer_id: EntityId,
    pub card_network: CardNetwork,
    pub transaction_date: NaiveDate,
    pub transaction_time: NaiveTime,
    pub posting_date: NaiveDate,
    pub transaction_type: TransactionType,
    pub channel: Channel,
    pub amount: f64,
    pub currency: CurrencyCode,
    pub exchange_rate: f64,
    pub merchant_fee: f64,
    pub authorization_code: String,
    pub merchant_id: EntityId,
    pub merchant_name: String,
    pub merchant_category_code: Mcc,
    pub merchant_city: String,
    pub merchant_country: CountryCode,
    pub terminal_id: String,
    pub transaction_country: CountryCode,
    pub transaction_latitude: f64,
    pub transaction_longitude: f64,
    pub entry_mode: EntryMode,
}

impl Transaction {
    /// CSV header, in column order.
    pub const FIELDS: [&'static str; 25] = [
        "transaction_id",
        "card_number_masked",
        "account_id",
        "customer_id",
        "card_network",
        "transaction_date",
        "transaction_time",
        "posting_date",
        "transaction_type",
        "channel",
        "amount",
        "currency",
        "exchange_rate",
        "merchant_fee",
        "authorization_code",
        "merchant_id",
        "merchant_name",
        "merchant_category_code",
        "merchant_city",
        "merchant_country",
        "terminal_id",
        "transaction_country",
        "transaction_latitude",
        "transaction_longitude",
        "entry_mode",
    ];

    pub fn is_refund(&self) -> bool {
        self.transaction_type == TransactionType::Refund
    }

    /// Days between transaction and posting.
    pub fn posting_lag_days(&self) -> i64 {
        (self.posting_date - self.transaction_date).num_days()
    }
}

//! Customer pool builder.
//!
//! Customers are created once before any transaction is synthesized and
//! never change afterwards. Ids are sequential so the pool is stable
//! for a given count, only the card suffix and network consume entropy.

use crate::{
    error::{GenError, GenResult},
    rng::StageRng,
    types::EntityId,
};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const CARD_SUFFIX_MIN: u64 = 1000;
pub const CARD_SUFFIX_MAX: u64 = 9999;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardNetwork {
    Visa,
    Mastercard,
    Amex,
}

impl CardNetwork {
    pub const ALL: [CardNetwork; 3] = [Self::Visa, Self::Mastercard, Self::Amex];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visa => "VISA",
            Self::Mastercard => "MASTERCARD",
            Self::Amex => "AMEX",
        }
    }
}

impl fmt::Display for CardNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub customer_id: EntityId,
    pub account_id: EntityId,
    pub card_number_masked: String,
    pub card_network: CardNetwork,
}

impl Customer {
    /// Last four digits of the card, as displayed after the mask.
    pub fn card_last4(&self) -> &str {
        self.card_number_masked.trim_start_matches('*')
    }
}

pub fn customer_id(index: usize) -> EntityId {
    format!("CUST{:04}", index + 1)
}

pub fn account_id(index: usize) -> EntityId {
    format!("ACC{:05}", index + 1)
}

pub fn mask_card(last4: u64) -> String {
    format!("****{last4}")
}

/// Build `count` customers. Fails if `count > 0` and `networks` is empty.
pub fn build_customer_pool(
    count: usize,
    networks: &[CardNetwork],
    rng: &mut StageRng,
) -> GenResult<Vec<Customer>> {
    let mut customers = Vec::with_capacity(count);

    for i in 0..count {
        let last4 = rng.range_inclusive(CARD_SUFFIX_MIN, CARD_SUFFIX_MAX);
        let card_network = rng
            .pick(networks)
            .copied()
            .ok_or_else(|| GenError::Config("card_networks is empty".into()))?;

        customers.push(Customer {
            customer_id: customer_id(i),
            account_id: account_id(i),
            card_number_masked: mask_card(last4),
            card_network,
        });
    }

    log::debug!("customer pool: built {} customers", customers.len());
    Ok(customers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, StageSlot};

    #[test]
    fn ids_are_zero_padded_and_sequential() {
        assert_eq!(customer_id(0), "CUST0001");
        assert_eq!(customer_id(49), "CUST0050");
        assert_eq!(account_id(0), "ACC00001");
        assert_eq!(account_id(9998), "ACC09999");
    }

    #[test]
    fn pool_has_requested_size_and_valid_cards() {
        let mut rng = RngBank::new(42).for_stage(StageSlot::Customer);
        let pool = build_customer_pool(50, &CardNetwork::ALL, &mut rng).unwrap();

        assert_eq!(pool.len(), 50);
        for (i, c) in pool.iter().enumerate() {
            assert_eq!(c.customer_id, customer_id(i));
            assert_eq!(c.account_id, account_id(i));
            assert!(c.card_number_masked.starts_with("****"));
            assert_eq!(c.card_last4().len(), 4);
            assert!(c.card_last4().chars().all(|ch| ch.is_ascii_digit()));
        }
    }

    #[test]
    fn single_network_is_always_chosen() {
        let mut rng = RngBank::new(5).for_stage(StageSlot::Customer);
        let pool = build_customer_pool(20, &[CardNetwork::Amex], &mut rng).unwrap();
        assert!(pool.iter().all(|c| c.card_network == CardNetwork::Amex));
    }

    #[test]
    fn empty_network_list_is_rejected() {
        let mut rng = RngBank::new(5).for_stage(StageSlot::Customer);
        assert!(matches!(
            build_customer_pool(3, &[], &mut rng),
            Err(GenError::Config(_))
        ));
        assert!(build_customer_pool(0, &[], &mut rng).unwrap().is_empty());
    }

    #[test]
    fn network_serializes_uppercase() {
        let json = serde_json::to_string(&CardNetwork::Mastercard).unwrap();
        assert_eq!(json, "\"MASTERCARD\"");
        assert_eq!(CardNetwork::Amex.to_string(), "AMEX");
    }
}

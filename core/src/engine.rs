//! The generation engine.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Config validation   (fail fast, before any draw)
//!   2. Customer pool       (StageSlot::Customer stream)
//!   3. Transactions        (StageSlot::Transaction stream)
//!
//! RULES:
//!   - Stages run once, in order, with no feedback.
//!   - Each stage draws only from its own RNG stream.
//!   - Customers and merchants are read-only once built.

use crate::{
    config::GeneratorConfig,
    customer::{build_customer_pool, Customer},
    error::GenResult,
    rng::{RngBank, StageSlot},
    synthesizer::TransactionSynthesizer,
    transaction::Transaction,
};

/// Everything one run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub seed: u64,
    pub customers: Vec<Customer>,
    pub transactions: Vec<Transaction>,
}

impl Dataset {
    /// The first `n` transactions, for printing.
    pub fn preview(&self, n: usize) -> &[Transaction] {
        &self.transactions[..n.min(self.transactions.len())]
    }
}

pub struct DatasetEngine {
    pub config: GeneratorConfig,
    pub rng_bank: RngBank,
}

impl DatasetEngine {
    pub fn new(config: GeneratorConfig, seed: u64) -> Self {
        Self {
            config,
            rng_bank: RngBank::new(seed),
        }
    }

    /// Engine over `GeneratorConfig::default_test()`.
    pub fn build_test(seed: u64) -> Self {
        Self::new(GeneratorConfig::default_test(), seed)
    }

    pub fn seed(&self) -> u64 {
        self.rng_bank.master_seed()
    }

    /// Run both stages. Every call starts from fresh streams, so
    /// repeated runs on the same engine give the same dataset.
    pub fn run(&self) -> GenResult<Dataset> {
        let synthesizer = TransactionSynthesizer::new(&self.config)?;

        let mut customer_rng = self.rng_bank.for_stage(StageSlot::Customer);
        let customers = build_customer_pool(
            self.config.customer_count,
            &self.config.card_networks,
            &mut customer_rng,
        )?;
        log::info!(
            "seed={} {}: built {} customers",
            self.seed(),
            customer_rng.name,
            customers.len()
        );

        let mut txn_rng = self.rng_bank.for_stage(StageSlot::Transaction);
        let transactions = synthesizer.synthesize(&customers, &mut txn_rng)?;
        log::info!(
            "seed={} {}: synthesized {} transactions",
            self.seed(),
            txn_rng.name,
            transactions.len()
        );

        Ok(Dataset {
            seed: self.seed(),
            customers,
            transactions,
        })
    }
}

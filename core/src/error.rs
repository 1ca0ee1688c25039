use crate::types::Mcc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Merchant catalog is empty")]
    EmptyMerchantCatalog,

    #[error("No amount range for MCC {mcc} (merchant '{merchant_id}')")]
    MissingAmountRange { mcc: Mcc, merchant_id: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GenResult<T> = Result<T, GenError>;

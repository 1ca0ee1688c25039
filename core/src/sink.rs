//! CSV output.
//!
//! RULE: Only sink.rs writes files.
//! Errors are returned unchanged; a failed write is fatal to the run
//! and nothing is retried.

use crate::{customer::Customer, error::GenResult, transaction::Transaction};
use serde::Serialize;
use std::{io::Write, path::Path};

/// Write a header row then one row per record, in order.
fn write_records<W: Write, T: Serialize>(writer: W, records: &[T]) -> GenResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_transactions_csv<W: Write>(writer: W, transactions: &[Transaction]) -> GenResult<()> {
    if transactions.is_empty() {
        // serde-driven headers need a first record; emit them by hand.
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(Transaction::FIELDS)?;
        csv_writer.flush()?;
        return Ok(());
    }
    write_records(writer, transactions)
}

pub fn write_transactions_csv_path(
    path: impl AsRef<Path>,
    transactions: &[Transaction],
) -> GenResult<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_transactions_csv(std::io::BufWriter::new(file), transactions)?;
    log::info!("wrote {} transactions to {}", transactions.len(), path.display());
    Ok(())
}

pub fn write_customers_csv<W: Write>(writer: W, customers: &[Customer]) -> GenResult<()> {
    write_records(writer, customers)
}

pub fn write_customers_csv_path(path: impl AsRef<Path>, customers: &[Customer]) -> GenResult<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_customers_csv(std::io::BufWriter::new(file), customers)?;
    log::info!("wrote {} customers to {}", customers.len(), path.display());
    Ok(())
}

//! CSV sink tests.

use cardgen_core::{
    engine::DatasetEngine,
    error::GenError,
    sink,
    transaction::Transaction,
};
use std::io::{self, Write};

#[test]
fn header_matches_field_order() {
    let dataset = DatasetEngine::build_test(42).run().unwrap();
    let mut buf = Vec::new();
    sink::write_transactions_csv(&mut buf, &dataset.transactions).unwrap();

    let text = String::from_utf8(buf).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next().unwrap(), Transaction::FIELDS.join(","));
    assert_eq!(lines.count(), dataset.transactions.len());
}

#[test]
fn empty_output_still_has_header() {
    let mut buf = Vec::new();
    sink::write_transactions_csv(&mut buf, &[]).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert_eq!(text.trim_end(), Transaction::FIELDS.join(","));
}

#[test]
fn rows_read_back_into_records() {
    let dataset = DatasetEngine::build_test(17).run().unwrap();
    let mut buf = Vec::new();
    sink::write_transactions_csv(&mut buf, &dataset.transactions).unwrap();

    let mut reader = csv::Reader::from_reader(buf.as_slice());
    let back: Vec<Transaction> = reader.deserialize().collect::<Result<_, _>>().unwrap();
    assert_eq!(back.len(), dataset.transactions.len());

    let first = &back[0];
    let orig = &dataset.transactions[0];
    assert_eq!(first.transaction_id, orig.transaction_id);
    assert_eq!(first.transaction_date, orig.transaction_date);
    assert_eq!(first.transaction_time, orig.transaction_time);
    assert_eq!(first.channel, orig.channel);
    assert_eq!(first.entry_mode, orig.entry_mode);
    assert_eq!(first.amount, orig.amount);
}

#[test]
fn dates_and_vocabulary_use_display_forms() {
    let dataset = DatasetEngine::build_test(3).run().unwrap();
    let mut buf = Vec::new();
    sink::write_transactions_csv(&mut buf, &dataset.transactions[..1]).unwrap();

    let text = String::from_utf8(buf).unwrap();
    let row: Vec<&str> = text.lines().nth(1).unwrap().split(',').collect();
    let t = &dataset.transactions[0];

    assert_eq!(row[5], t.transaction_date.format("%Y-%m-%d").to_string());
    assert_eq!(row[6], t.transaction_time.format("%H:%M:%S").to_string());
    assert_eq!(row[8], t.transaction_type.as_str());
    assert_eq!(row[9], t.channel.as_str());
    assert_eq!(row[24], t.entry_mode.as_str());
}

#[test]
fn customers_csv_has_one_row_per_customer() {
    let dataset = DatasetEngine::build_test(8).run().unwrap();
    let mut buf = Vec::new();
    sink::write_customers_csv(&mut buf, &dataset.customers).unwrap();

    let text = String::from_utf8(buf).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next().unwrap(), "customer_id,account_id,card_number_masked,card_network");
    assert_eq!(lines.count(), dataset.customers.len());
}

struct BrokenSink;

impl Write for BrokenSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
    }
}

#[test]
fn sink_errors_surface_unchanged() {
    let dataset = DatasetEngine::build_test(1).run().unwrap();
    let err = sink::write_transactions_csv(BrokenSink, &dataset.transactions).unwrap_err();
    assert!(matches!(err, GenError::Csv(_) | GenError::Io(_)), "got {err:?}");
}

#[test]
fn unwritable_path_is_an_error() {
    let dataset = DatasetEngine::build_test(1).run().unwrap();
    let err = sink::write_transactions_csv_path("/nonexistent-dir/out.csv", &dataset.transactions)
        .unwrap_err();
    assert!(matches!(err, GenError::Io(_)));
}

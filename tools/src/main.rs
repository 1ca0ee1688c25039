//! txn-gen: headless runner for the synthetic transaction generator.
//!
//! Usage:
//!   txn-gen --seed 12345 --out transactions_raw.csv
//!   txn-gen --config data/generator.json --transactions 10000 --preview 10
//!   txn-gen --customers-out customers.csv --start-date 2024-01-01

use anyhow::{Context, Result};
use cardgen_core::{
    config::GeneratorConfig,
    engine::{Dataset, DatasetEngine},
    sink,
    summary::DatasetSummary,
};
use chrono::NaiveDate;
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let preview = parse_arg(&args, "--preview", 5usize);
    let out = flag_value(&args, "--out").unwrap_or("transactions_raw.csv");
    let customers_out = flag_value(&args, "--customers-out");

    let mut config = match flag_value(&args, "--config") {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    config.customer_count = parse_arg(&args, "--customers", config.customer_count);
    config.transaction_count = parse_arg(&args, "--transactions", config.transaction_count);
    if let Some(raw) = flag_value(&args, "--start-date") {
        config.start_date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("--start-date expects YYYY-MM-DD, got {raw}"))?;
    }

    println!("txn-gen");
    println!("  seed:          {seed}");
    println!("  customers:     {}", config.customer_count);
    println!("  transactions:  {}", config.transaction_count);
    println!("  start date:    {}", config.start_date);
    println!("  out:           {out}");
    println!();

    let home_country = config.home_country.clone();
    let engine = DatasetEngine::new(config, seed);
    let dataset = engine.run()?;

    sink::write_transactions_csv_path(out, &dataset.transactions)
        .with_context(|| format!("writing {out}"))?;
    if let Some(path) = customers_out {
        sink::write_customers_csv_path(path, &dataset.customers)
            .with_context(|| format!("writing {path}"))?;
    }

    print_preview(&dataset, preview);
    print_summary(&dataset, &home_country);
    Ok(())
}

fn print_preview(dataset: &Dataset, n: usize) {
    let rows = dataset.preview(n);
    if rows.is_empty() {
        return;
    }
    println!("=== PREVIEW (first {}) ===", rows.len());
    for t in rows {
        println!(
            "  {} | {} {} | {:<8} | {:<7} | {:>9.2} {} | {} {}",
            &t.transaction_id[..8],
            t.transaction_date,
            t.transaction_time,
            t.transaction_type,
            t.channel,
            t.amount,
            t.currency,
            t.merchant_name,
            t.customer_id,
        );
    }
    println!();
}

fn print_summary(dataset: &Dataset, home_country: &str) {
    let s = DatasetSummary::from_transactions(&dataset.transactions, home_country);

    println!("=== RUN SUMMARY ===");
    println!("  seed:          {}", dataset.seed);
    println!("  customers:     {}", dataset.customers.len());
    println!("  transactions:  {}", s.txn_count);
    println!("  purchases:     {}", s.purchase_count);
    println!("  refunds:       {} ({:.1}%)", s.refund_count, s.refund_share() * 100.0);
    println!("  foreign:       {}", s.foreign_count);
    println!("  net volume:    {:.2}", s.net_volume);
    println!("  gross volume:  {:.2}", s.gross_volume);
    println!("  fee income:    {:.2}", s.fee_income);
    for (channel, count) in &s.by_channel {
        println!("  channel {channel:<7} {count}");
    }
    for (currency, count) in &s.by_currency {
        println!("  currency {currency:<6} {count}");
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

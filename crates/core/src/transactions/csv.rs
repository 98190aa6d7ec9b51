//! CSV import/export for transactions.
//!
//! Import accepts the loose column naming seen in exports from other
//! trackers (`description`/`Description`, `date`/`Date`/`transaction_date`,
//! `Payment Method`, ...). Rows missing a description, amount, or date are
//! skipped rather than failing the whole file.

use chrono::NaiveDate;
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io;
use std::str::FromStr;

use crate::errors::{Result, ValidationError};
use crate::transactions::transactions_model::{TransactionKind, TransactionWithCategory};

/// One successfully parsed import row. The category is carried by name and
/// resolved against the caller's category list before insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvRow {
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: Option<String>,
    pub payment_method: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Result of parsing an import file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedCsv {
    pub rows: Vec<CsvRow>,
    /// Rows dropped for missing/unparseable required fields.
    pub skipped: usize,
}

/// Case-insensitive header lookup with aliases.
fn column_index(headers: &csv::StringRecord, aliases: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let h = h.trim();
        aliases.iter().any(|a| h.eq_ignore_ascii_case(a))
    })
}

fn field<'a>(record: &'a csv::StringRecord, index: Option<usize>) -> Option<&'a str> {
    index
        .and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Parse a transactions CSV from `reader`.
///
/// The first record is treated as a header row. Unknown columns are ignored.
pub fn parse_transactions_csv<R: io::Read>(reader: R) -> Result<ParsedCsv> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| ValidationError::InvalidInput(format!("Failed to read CSV header: {}", e)))?
        .clone();

    let description_col = column_index(&headers, &["description"]);
    let amount_col = column_index(&headers, &["amount"]);
    let date_col = column_index(&headers, &["date", "transaction_date", "transactionDate"]);
    let kind_col = column_index(&headers, &["type"]);
    let category_col = column_index(&headers, &["category"]);
    let payment_col = column_index(&headers, &["payment_method", "payment method", "paymentMethod"]);
    let tags_col = column_index(&headers, &["tags"]);

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for record in rdr.records() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping malformed CSV record: {}", e);
                skipped += 1;
                continue;
            }
        };

        let description = field(&record, description_col);
        let amount = field(&record, amount_col).and_then(|v| Decimal::from_str(v).ok());
        let date = field(&record, date_col)
            .and_then(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").ok());

        let (Some(description), Some(amount), Some(date)) = (description, amount, date) else {
            skipped += 1;
            continue;
        };

        // Anything that is not explicitly income counts as an expense.
        let kind = match field(&record, kind_col) {
            Some(v) if v.eq_ignore_ascii_case("income") => TransactionKind::Income,
            _ => TransactionKind::Expense,
        };

        let tags = field(&record, tags_col)
            .map(|v| {
                v.split(',')
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        rows.push(CsvRow {
            description: description.to_string(),
            amount,
            date,
            kind,
            category: field(&record, category_col).map(str::to_string),
            payment_method: field(&record, payment_col).map(str::to_string),
            tags,
        });
    }

    Ok(ParsedCsv { rows, skipped })
}

/// Write `transactions` as CSV to `writer`.
pub fn write_transactions_csv<W: io::Write>(
    writer: W,
    transactions: &[TransactionWithCategory],
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record([
        "Date",
        "Description",
        "Category",
        "Type",
        "Amount",
        "Payment Method",
        "Tags",
    ])
    .map_err(|e| ValidationError::InvalidInput(format!("Failed to write CSV: {}", e)))?;

    for t in transactions {
        let category = t
            .category
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or("Uncategorized");
        wtr.write_record([
            t.transaction.date.format("%Y-%m-%d").to_string().as_str(),
            t.transaction.description.as_str(),
            category,
            t.transaction.kind.as_str(),
            t.transaction.amount.to_string().as_str(),
            t.transaction.payment_method.as_deref().unwrap_or(""),
            t.transaction.tags.join(", ").as_str(),
        ])
        .map_err(|e| ValidationError::InvalidInput(format!("Failed to write CSV: {}", e)))?;
    }

    wtr.flush()
        .map_err(|e| ValidationError::InvalidInput(format!("Failed to write CSV: {}", e)))?;
    Ok(())
}

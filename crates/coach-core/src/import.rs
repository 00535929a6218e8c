//! CSV import for spending logs
//!
//! Expected header: `date,category,amount` with an optional `description`.
//! Columns are matched by name (case-insensitive) so their order and any
//! extra columns don't matter.

use std::collections::HashMap;
use std::io::Read;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{NewTransaction, SignConvention};

/// Column positions resolved from the header row
struct Columns {
    date: usize,
    category: usize,
    amount: usize,
    description: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let required = |name: &str| {
            find(name).ok_or_else(|| Error::Import(format!("Missing required column: {}", name)))
        };

        Ok(Self {
            date: required("date")?,
            category: required("category")?,
            amount: required("amount")?,
            description: find("description"),
        })
    }
}

/// Convert a CSV record to a JSON object using headers as keys
fn record_to_json(headers: &StringRecord, record: &StringRecord) -> String {
    let mut map = serde_json::Map::new();
    for (i, header) in headers.iter().enumerate() {
        if let Some(value) = record.get(i) {
            map.insert(header.to_string(), Value::String(value.to_string()));
        }
    }
    json!(map).to_string()
}

/// Parse a spending CSV into transactions in the stored sign convention
///
/// Any malformed row fails the whole file, reporting its line number.
pub fn parse_csv<R: Read>(reader: R, convention: SignConvention) -> Result<Vec<NewTransaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = Columns::from_headers(&headers)?;

    // Identical rows within one file are distinct purchases; count them so
    // each gets its own hash while a re-import still matches
    let mut seen: HashMap<String, u32> = HashMap::new();
    let mut transactions = Vec::new();

    for (index, result) in rdr.records().enumerate() {
        let record = result?;
        // Header is line 1
        let line = index + 2;

        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let field = |col: usize, name: &str| {
            record
                .get(col)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| Error::Import(format!("Line {}: missing {}", line, name)))
        };

        let date = parse_date(field(columns.date, "date")?)
            .map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?;
        let raw_category = field(columns.category, "category")?.to_string();
        let amount = parse_amount(field(columns.amount, "amount")?)
            .map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?;
        let amount = convention.to_stored(amount);
        let description = columns
            .description
            .and_then(|col| record.get(col))
            .unwrap_or_default()
            .to_string();

        let base_hash = generate_hash(&date, &raw_category, &description, amount, 0);
        let occurrence = seen.entry(base_hash.clone()).or_insert(0);
        let import_hash = if *occurrence == 0 {
            base_hash
        } else {
            generate_hash(&date, &raw_category, &description, amount, *occurrence)
        };
        *occurrence += 1;

        transactions.push(NewTransaction {
            date,
            description,
            amount,
            raw_category,
            import_hash,
            original_data: Some(record_to_json(&headers, &record)),
        });
    }

    debug!(
        count = transactions.len(),
        convention = %convention,
        "Parsed spending CSV"
    );
    Ok(transactions)
}

/// Hash the identifying fields of a row for deduplication
fn generate_hash(
    date: &NaiveDate,
    category: &str,
    description: &str,
    amount: f64,
    occurrence: u32,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(date.to_string().as_bytes());
    hasher.update(category.as_bytes());
    hasher.update(description.as_bytes());
    hasher.update(amount.to_be_bytes());
    if occurrence > 0 {
        hasher.update(occurrence.to_be_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Parse a date in one of the common export formats
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    // Timestamps: keep the calendar date as written
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%z", "%Y-%m-%d %H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Ok(dt.date_naive());
        }
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }

    let formats = [
        "%Y-%m-%d", // 2024-01-15
        "%m/%d/%Y", // 01/15/2024
        "%m/%d/%y", // 01/15/24
        "%m-%d-%Y", // 01-15-2024
        "%d/%m/%Y", // 15/01/2024 (European)
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    Err(Error::Import(format!("Unable to parse date: {}", s)))
}

/// Parse an amount string, handling currency symbols and commas
pub fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s
        .trim()
        .replace(['$', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    let amount = cleaned
        .parse::<f64>()
        .map_err(|_| Error::Import(format!("Unable to parse amount: {}", s)))?;

    if !amount.is_finite() {
        return Err(Error::Import(format!("Unable to parse amount: {}", s)));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
date,category,amount,description
2024-01-15 08:30:00+0000,Coffe,4.50,Morning latte
2024-01-16,Groceries,82.10,Weekly shop
01/20/2024,Restuarant,\"$1,234.56\",Anniversary dinner
";

    #[test]
    fn test_parse_date() {
        let jan15 = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_date("01/15/2024").unwrap(), jan15);
        assert_eq!(parse_date("2024-01-15").unwrap(), jan15);
        assert_eq!(parse_date("2024-01-15T23:10:00Z").unwrap(), jan15);
        assert_eq!(parse_date("2024-01-15 08:30:00+0000").unwrap(), jan15);
        assert_eq!(parse_date("2024-01-15 08:30:00").unwrap(), jan15);
        assert!(parse_date("next tuesday").is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$1,234.56").unwrap(), 1234.56);
        assert_eq!(parse_amount("(45.00)").unwrap(), -45.0);
        assert_eq!(parse_amount(" -12.5 ").unwrap(), -12.5);
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("inf").is_err());
    }

    #[test]
    fn test_parse_positive_expenses() {
        let txs = parse_csv(SAMPLE.as_bytes(), SignConvention::ExpensesPositive).unwrap();
        assert_eq!(txs.len(), 3);

        assert_eq!(txs[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(txs[0].raw_category, "Coffe");
        assert_eq!(txs[0].amount, -4.5);
        assert_eq!(txs[0].description, "Morning latte");
        assert_eq!(txs[2].amount, -1234.56);

        let original = txs[1].original_data.as_deref().unwrap();
        assert!(original.contains("\"category\":\"Groceries\""));
    }

    #[test]
    fn test_parse_negative_expenses_unchanged() {
        let csv = "date,category,amount\n2024-02-01,Salary,2500\n2024-02-02,Coffee,-3.75\n";
        let txs = parse_csv(csv.as_bytes(), SignConvention::ExpensesNegative).unwrap();
        assert_eq!(txs[0].amount, 2500.0);
        assert_eq!(txs[1].amount, -3.75);
        assert_eq!(txs[1].description, "");
    }

    #[test]
    fn test_columns_by_name() {
        let csv = "Amount,Notes,Category,Date\n-9.99,ignored,Music,2024-03-01\n";
        let txs = parse_csv(csv.as_bytes(), SignConvention::ExpensesNegative).unwrap();
        assert_eq!(txs[0].raw_category, "Music");
        assert_eq!(txs[0].amount, -9.99);
    }

    #[test]
    fn test_missing_column() {
        let csv = "date,amount\n2024-03-01,5.00\n";
        let result = parse_csv(csv.as_bytes(), SignConvention::ExpensesNegative);
        assert!(matches!(result, Err(Error::Import(msg)) if msg.contains("category")));
    }

    #[test]
    fn test_bad_row_reports_line() {
        let csv = "date,category,amount\n2024-03-01,Coffee,5.00\n2024-03-02,Coffee,lots\n";
        let result = parse_csv(csv.as_bytes(), SignConvention::ExpensesNegative);
        assert!(matches!(result, Err(Error::Import(msg)) if msg.starts_with("Line 3")));
    }

    #[test]
    fn test_hashes_stable_and_distinct() {
        let csv = "date,category,amount\n2024-03-01,Coffee,-5\n2024-03-01,Coffee,-5\n2024-03-01,Tea,-5\n";
        let first = parse_csv(csv.as_bytes(), SignConvention::ExpensesNegative).unwrap();
        let second = parse_csv(csv.as_bytes(), SignConvention::ExpensesNegative).unwrap();

        let hashes: Vec<_> = first.iter().map(|t| t.import_hash.as_str()).collect();
        assert_ne!(hashes[0], hashes[1]);
        assert_ne!(hashes[0], hashes[2]);
        assert_eq!(
            hashes,
            second.iter().map(|t| t.import_hash.as_str()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_skips_blank_rows() {
        let csv = "date,category,amount\n2024-03-01,Coffee,-5\n,,\n";
        let txs = parse_csv(csv.as_bytes(), SignConvention::ExpensesNegative).unwrap();
        assert_eq!(txs.len(), 1);
    }
}

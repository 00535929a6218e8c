//! Transaction storage and import

use std::io::Read;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use super::categories::ensure_category;
use super::{parse_date_column, parse_datetime, Database};
use crate::config::CoachConfig;
use crate::error::Result;
use crate::import::parse_csv;
use crate::models::{ImportStats, NewTransaction, SignConvention, Transaction};

const SELECT_TRANSACTIONS: &str = r#"
    SELECT t.id, t.date, t.amount, c.display_name, c.raw_name, t.description,
           t.import_hash, t.created_at
    FROM transactions t
    JOIN categories c ON c.id = t.category_id
"#;

/// Insert a transaction, returns None if duplicate (same import hash)
fn insert_transaction(
    conn: &Connection,
    category_id: i64,
    tx: &NewTransaction,
) -> Result<Option<i64>> {
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM transactions WHERE import_hash = ?",
            params![tx.import_hash],
            |row| row.get(0),
        )
        .optional()?;

    if existing.is_some() {
        return Ok(None);
    }

    conn.execute(
        r#"
        INSERT INTO transactions (date, description, amount, category_id, import_hash, original_data)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
        params![
            tx.date.to_string(),
            tx.description,
            tx.amount,
            category_id,
            tx.import_hash,
            tx.original_data,
        ],
    )?;

    Ok(Some(conn.last_insert_rowid()))
}

impl Database {
    /// Import a spending CSV
    ///
    /// The whole file is parsed before anything is written, and every row is
    /// stored in one transaction, so a malformed row or a failed insert leaves
    /// the store untouched. Rows already imported are counted as duplicates
    /// and skipped.
    pub fn import_csv<R: Read>(
        &self,
        reader: R,
        convention: SignConvention,
        config: &CoachConfig,
    ) -> Result<ImportStats> {
        let parsed = parse_csv(reader, convention)?;
        let mut stats = ImportStats {
            parsed: parsed.len(),
            ..Default::default()
        };

        let mut conn = self.conn()?;
        let db_tx = conn.transaction()?;

        for tx in &parsed {
            let (display_name, group) = config.normalize_category(&tx.raw_category);
            let (category_id, created) = ensure_category(
                &db_tx,
                tx.raw_category.trim(),
                &display_name,
                group.as_deref(),
            )?;
            if created {
                debug!(raw = %tx.raw_category, display = %display_name, "Created category");
                stats.categories_created += 1;
            }

            match insert_transaction(&db_tx, category_id, tx)? {
                Some(_) => stats.inserted += 1,
                None => stats.duplicates += 1,
            }
        }

        db_tx.commit()?;

        info!(
            parsed = stats.parsed,
            inserted = stats.inserted,
            duplicates = stats.duplicates,
            "Import complete"
        );
        Ok(stats)
    }

    /// List transactions, newest first
    pub fn list_transactions(&self, limit: i64, offset: i64) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let sql = format!(
            "{} ORDER BY t.date DESC, t.id DESC LIMIT ? OFFSET ?",
            SELECT_TRANSACTIONS
        );
        let mut stmt = conn.prepare(&sql)?;

        let transactions = stmt
            .query_map(params![limit, offset], Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Transactions dated in `[start, end)`, oldest first
    pub fn list_transactions_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let sql = format!(
            "{} WHERE t.date >= ? AND t.date < ? ORDER BY t.date, t.id",
            SELECT_TRANSACTIONS
        );
        let mut stmt = conn.prepare(&sql)?;

        let transactions = stmt
            .query_map(
                params![start.to_string(), end.to_string()],
                Self::row_to_transaction,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Every stored transaction, oldest first
    pub fn list_all_transactions(&self) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let sql = format!("{} ORDER BY t.date, t.id", SELECT_TRANSACTIONS);
        let mut stmt = conn.prepare(&sql)?;

        let transactions = stmt
            .query_map([], Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Count stored transactions
    pub fn count_transactions(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(count)
    }

    pub(crate) fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
        let date_str: String = row.get(1)?;
        let created_at_str: String = row.get(7)?;
        Ok(Transaction {
            id: row.get(0)?,
            date: parse_date_column(1, &date_str)?,
            amount: row.get(2)?,
            category: row.get(3)?,
            raw_category: row.get(4)?,
            description: row.get(5)?,
            import_hash: row.get(6)?,
            created_at: parse_datetime(&created_at_str),
        })
    }
}

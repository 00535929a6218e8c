//! Category operations

use rusqlite::{params, Connection, OptionalExtension};

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::Category;

/// Look up a category by its raw import label, creating it if missing
///
/// Returns `(id, created)`. An existing category keeps its display name
/// even if the alias table has since changed.
pub(super) fn ensure_category(
    conn: &Connection,
    raw_name: &str,
    display_name: &str,
    group_name: Option<&str>,
) -> Result<(i64, bool)> {
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM categories WHERE raw_name = ?",
            params![raw_name],
            |row| row.get(0),
        )
        .optional()?;

    if let Some(id) = existing {
        return Ok((id, false));
    }

    conn.execute(
        "INSERT INTO categories (raw_name, display_name, group_name) VALUES (?, ?, ?)",
        params![raw_name, display_name, group_name],
    )?;

    Ok((conn.last_insert_rowid(), true))
}

impl Database {
    /// List all categories, ordered by display name
    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, raw_name, display_name, group_name, created_at
             FROM categories ORDER BY display_name, raw_name",
        )?;

        let categories = stmt
            .query_map([], |row| {
                let created_at: String = row.get(4)?;
                Ok(Category {
                    id: row.get(0)?,
                    raw_name: row.get(1)?,
                    display_name: row.get(2)?,
                    group_name: row.get(3)?,
                    created_at: parse_datetime(&created_at),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    /// Whether any category carries this display name
    pub fn category_exists(&self, display_name: &str) -> Result<bool> {
        let conn = self.conn()?;
        let exists: bool = conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM categories WHERE display_name = ?)",
            params![display_name],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}

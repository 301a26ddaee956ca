//! Fixture database: the `Students` table and its five seeded rows.

use crate::types::Result;
use rusqlite::{params, Connection};
use serde::Serialize;
use std::path::Path;

/// Table DDL.
pub const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS Students(
    name VARCHAR(30),
    class VARCHAR(10),
    marks INT,
    company VARCHAR(30)
)";

/// Seeded rows: (name, class, marks, company).
pub const STUDENTS: [(&str, &str, i64, &str); 5] = [
    ("Sijo", "BTech", 75, "JSW"),
    ("Lijo", "MTech", 69, "TCS"),
    ("Rijo", "BSc", 79, "WIPRO"),
    ("Sibin", "MSc", 89, "INFOSYS"),
    ("Dilsha", "MCom", 99, "Cyient"),
];

/// Headline numbers for the home page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixtureSummary {
    pub students: i64,
    pub companies: i64,
    pub average_marks: Option<f64>,
}

/// Create the table and insert the fixture rows.
///
/// # Arguments
///
/// * `path` - Database file (created if missing)
/// * `reset` - Drop the table first
///
/// # Returns
///
/// Number of rows inserted; `0` when the table already had data and
/// `reset` was not requested
pub fn seed(path: &Path, reset: bool) -> Result<usize> {
    let mut conn = Connection::open(path)?;
    let tx = conn.transaction()?;

    if reset {
        tx.execute("DROP TABLE IF EXISTS Students", [])?;
    }
    tx.execute(CREATE_TABLE, [])?;

    let existing: i64 = tx.query_row("SELECT COUNT(*) FROM Students", [], |row| row.get(0))?;
    if existing > 0 {
        tracing::info!(path = %path.display(), rows = existing, "Fixture already seeded");
        return Ok(0);
    }

    {
        let mut insert = tx.prepare("INSERT INTO Students VALUES(?1, ?2, ?3, ?4)")?;
        for (name, class, marks, company) in STUDENTS {
            insert.execute(params![name, class, marks, company])?;
        }
    }
    tx.commit()?;

    tracing::info!(path = %path.display(), rows = STUDENTS.len(), "Fixture seeded");
    Ok(STUDENTS.len())
}

/// Compute the home page metrics from the live table.
pub fn summary(path: &Path) -> Result<FixtureSummary> {
    let conn = Connection::open_with_flags(path, rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    let summary = conn.query_row(
        "SELECT COUNT(*), COUNT(DISTINCT company), AVG(marks) FROM Students",
        [],
        |row| {
            Ok(FixtureSummary {
                students: row.get(0)?,
                companies: row.get(1)?,
                average_marks: row.get(2)?,
            })
        },
    )?;
    Ok(summary)
}

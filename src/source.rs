use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

use rusqlite::{Connection, OpenFlags};
use tracing::info;

use crate::error::{RaceError, RaceResult};
use crate::record::Record;

/// A one-shot provider of records, already ordered by ascending timestamp.
pub trait RecordSource {
    fn fetch(&self) -> RaceResult<Vec<Record>>;
}

/// JSON array of record objects read from a file, or from stdin when the path is `-`.
#[derive(Debug, Clone)]
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_reader<R: Read>(reader: R) -> RaceResult<Vec<Record>> {
        Ok(serde_json::from_reader(reader)?)
    }
}

impl RecordSource for JsonSource {
    fn fetch(&self) -> RaceResult<Vec<Record>> {
        let start_time = Instant::now();
        info!(action = "start", component = "json_source", path = ?self.path, "Reading records");

        let records = if self.path == Path::new("-") {
            Self::from_reader(io::stdin().lock())?
        } else {
            let file = File::open(&self.path).map_err(|e| {
                RaceError::data_source(format!("cannot open {}: {e}", self.path.display()))
            })?;
            Self::from_reader(BufReader::new(file))?
        };

        info!(
            action = "complete",
            component = "json_source",
            record_count = records.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Records loaded"
        );
        Ok(records)
    }
}

/// Table and column names used to query a SQLite database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteQuery {
    pub table: String,
    pub timestamp_column: String,
    pub category_column: String,
}

impl Default for SqliteQuery {
    fn default() -> Self {
        Self {
            table: "discussions".to_string(),
            timestamp_column: "DateCreated".to_string(),
            category_column: "Category".to_string(),
        }
    }
}

impl SqliteQuery {
    /// `SELECT` ordering rows by ascending timestamp.
    pub fn to_sql(&self) -> RaceResult<String> {
        let table = quote_identifier(&self.table)?;
        let ts = quote_identifier(&self.timestamp_column)?;
        let category = quote_identifier(&self.category_column)?;
        Ok(format!(
            "SELECT {ts}, {category} FROM {table} ORDER BY {ts} ASC"
        ))
    }
}

fn quote_identifier(name: &str) -> RaceResult<String> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if !valid {
        return Err(RaceError::configuration(format!(
            "invalid SQL identifier '{name}'"
        )));
    }
    Ok(format!("\"{name}\""))
}

/// Records stored in a SQLite table, opened read-only.
#[derive(Debug, Clone)]
pub struct SqliteSource {
    path: PathBuf,
    query: SqliteQuery,
}

impl SqliteSource {
    pub fn new(path: impl Into<PathBuf>, query: SqliteQuery) -> Self {
        Self {
            path: path.into(),
            query,
        }
    }

    pub fn read(conn: &Connection, query: &SqliteQuery) -> RaceResult<Vec<Record>> {
        let sql = query.to_sql()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, Option<String>>(0)?, row.get::<_, Option<String>>(1)?))
        })?;

        let mut records = Vec::new();
        for (index, row) in rows.enumerate() {
            match row? {
                (Some(timestamp), Some(category)) => records.push(Record {
                    timestamp,
                    category,
                }),
                _ => {
                    return Err(RaceError::data_source(format!(
                        "row {index} of '{}' has a NULL timestamp or category",
                        query.table
                    )))
                }
            }
        }
        Ok(records)
    }
}

impl RecordSource for SqliteSource {
    fn fetch(&self) -> RaceResult<Vec<Record>> {
        let start_time = Instant::now();
        info!(action = "start", component = "sqlite_source", path = ?self.path, table = %self.query.table, "Querying records");

        if !self.path.exists() {
            return Err(RaceError::data_source(format!(
                "database not found at {}",
                self.path.display()
            )));
        }

        let conn = Connection::open_with_flags(&self.path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        let records = Self::read(&conn, &self.query)?;

        info!(
            action = "complete",
            component = "sqlite_source",
            record_count = records.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Records loaded"
        );
        Ok(records)
    }
}

/// Which source reads an input path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SourceKind {
    /// SQLite for `.db`, `.sqlite` and `.sqlite3`, JSON otherwise
    Auto,
    Json,
    Sqlite,
}

impl SourceKind {
    pub fn resolve(self, path: &Path) -> Self {
        match self {
            Self::Auto => {
                let ext = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.to_ascii_lowercase());
                match ext.as_deref() {
                    Some("db" | "sqlite" | "sqlite3") => Self::Sqlite,
                    _ => Self::Json,
                }
            }
            other => other,
        }
    }
}

pub fn open_source(kind: SourceKind, path: &Path, query: SqliteQuery) -> Box<dyn RecordSource> {
    match kind.resolve(path) {
        SourceKind::Sqlite => Box::new(SqliteSource::new(path, query)),
        SourceKind::Json | SourceKind::Auto => Box::new(JsonSource::new(path)),
    }
}

// SQLite export of a roster CSV (`pick-board import`).
//
// The CSV header becomes the table's columns. Column affinity is inferred
// from the data (INTEGER, REAL, else TEXT); blank cells become NULL. An
// existing table of the same name is replaced.

use std::path::{Path, PathBuf};

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use tracing::{info, warn};

use crate::config::is_plain_identifier;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("CSV not found: {}", path.display())]
    CsvNotFound { path: PathBuf },

    #[error("CSV error in {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error("CSV {} has no header row", path.display())]
    NoHeader { path: PathBuf },

    #[error("invalid table name {name:?}")]
    InvalidTable { name: String },

    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

// ---------------------------------------------------------------------------
// Column typing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Real,
    Text,
}

impl ColumnType {
    /// Narrowest type that fits every non-blank value. All-blank columns are
    /// TEXT.
    pub fn infer<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        let mut seen = false;
        let mut all_int = true;
        let mut all_real = true;
        for value in values.into_iter().flatten() {
            seen = true;
            let v = value.trim();
            if all_int && v.parse::<i64>().is_err() {
                all_int = false;
            }
            if all_real && v.parse::<f64>().is_err() {
                all_real = false;
            }
            if !all_int && !all_real {
                break;
            }
        }
        match (seen, all_int, all_real) {
            (false, _, _) => ColumnType::Text,
            (true, true, _) => ColumnType::Integer,
            (true, false, true) => ColumnType::Real,
            _ => ColumnType::Text,
        }
    }

    fn sql(self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
        }
    }

    fn to_value(self, cell: Option<&str>) -> Value {
        let Some(raw) = cell else {
            return Value::Null;
        };
        match self {
            ColumnType::Integer => raw
                .trim()
                .parse()
                .map(Value::Integer)
                .unwrap_or_else(|_| Value::Text(raw.to_string())),
            ColumnType::Real => raw
                .trim()
                .parse()
                .map(Value::Real)
                .unwrap_or_else(|_| Value::Text(raw.to_string())),
            ColumnType::Text => Value::Text(raw.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// CSV table
// ---------------------------------------------------------------------------

/// A CSV file read into memory for import.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub columns: Vec<String>,
    pub types: Vec<ColumnType>,
    /// `None` for blank or missing cells.
    pub rows: Vec<Vec<Option<String>>>,
}

/// Make header names usable as distinct SQL columns: blank names become
/// `Unnamed: {index}` and repeats get a `.1`, `.2`, ... suffix.
pub fn normalize_columns(headers: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(headers.len());
    for (idx, header) in headers.iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {idx}")
        } else {
            header.clone()
        };
        let mut candidate = base.clone();
        let mut n = 1;
        while out.iter().any(|c| c.eq_ignore_ascii_case(&candidate)) {
            candidate = format!("{base}.{n}");
            n += 1;
        }
        out.push(candidate);
    }
    out
}

fn read_rows<R: std::io::Read>(rdr: R, path: &Path) -> Result<CsvTable, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(rdr);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ImportError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?
        .iter()
        .map(String::from)
        .collect();
    if headers.is_empty() {
        return Err(ImportError::NoHeader {
            path: path.to_path_buf(),
        });
    }
    let columns = normalize_columns(&headers);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| ImportError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;
        if record.len() > columns.len() {
            warn!(
                "row {} has {} cells for {} columns, dropping extras",
                rows.len() + 1,
                record.len(),
                columns.len()
            );
        }
        let row: Vec<Option<String>> = (0..columns.len())
            .map(|i| {
                record
                    .get(i)
                    .filter(|cell| !cell.is_empty())
                    .map(String::from)
            })
            .collect();
        rows.push(row);
    }

    let types = (0..columns.len())
        .map(|i| ColumnType::infer(rows.iter().map(|row| row[i].as_deref())))
        .collect();

    Ok(CsvTable {
        columns,
        types,
        rows,
    })
}

/// Read a CSV file for import.
pub fn read_csv_table(path: &Path) -> Result<CsvTable, ImportError> {
    if !path.exists() {
        return Err(ImportError::CsvNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = std::fs::File::open(path).map_err(|e| ImportError::Csv {
        path: path.to_path_buf(),
        source: csv::Error::from(e),
    })?;
    read_rows(file, path)
}

// ---------------------------------------------------------------------------
// Database
// ---------------------------------------------------------------------------

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// SQLite target for imports.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a SQLite database at `path`, creating its parent
    /// directory. Pass `":memory:"` for an ephemeral database.
    pub fn open(path: &Path) -> Result<Self, ImportError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ImportError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let conn = Connection::open(path)?;
        Ok(Database { conn })
    }

    /// Drop `name` if it exists and recreate it from `table`, inserting all
    /// rows in one transaction. Returns the number of rows written.
    pub fn replace_table(&mut self, name: &str, table: &CsvTable) -> Result<usize, ImportError> {
        if !is_plain_identifier(name) {
            return Err(ImportError::InvalidTable {
                name: name.to_string(),
            });
        }

        let column_defs: Vec<String> = table
            .columns
            .iter()
            .zip(&table.types)
            .map(|(col, ty)| format!("{} {}", quote_ident(col), ty.sql()))
            .collect();
        let placeholders: Vec<String> = (1..=table.columns.len()).map(|i| format!("?{i}")).collect();
        let insert_sql = format!(
            "INSERT INTO {} VALUES ({})",
            quote_ident(name),
            placeholders.join(", ")
        );

        let tx = self.conn.transaction()?;
        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {ident};
             CREATE TABLE {ident} ({defs});",
            ident = quote_ident(name),
            defs = column_defs.join(", ")
        ))?;
        {
            let mut stmt = tx.prepare(&insert_sql)?;
            for row in &table.rows {
                let values = row
                    .iter()
                    .zip(&table.types)
                    .map(|(cell, ty)| ty.to_value(cell.as_deref()));
                stmt.execute(params_from_iter(values))?;
            }
        }
        tx.commit()?;
        Ok(table.rows.len())
    }

    pub fn row_count(&self, name: &str) -> Result<usize, ImportError> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", quote_ident(name)),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Column names of `name`, in table order.
    pub fn column_names(&self, name: &str) -> Result<Vec<String>, ImportError> {
        let mut stmt = self
            .conn
            .prepare(&format!("PRAGMA table_info({})", quote_ident(name)))?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    #[cfg(test)]
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

/// Import `csv_path` into table `table` of the SQLite file at `db_path`.
/// Returns the number of rows imported.
pub fn import_csv_to_sqlite(
    csv_path: &Path,
    db_path: &Path,
    table: &str,
) -> Result<usize, ImportError> {
    let data = read_csv_table(csv_path)?;
    let mut db = Database::open(db_path)?;
    let count = db.replace_table(table, &data)?;
    info!(
        "Imported {} rows from {} into {} as table '{}'",
        count,
        csv_path.display(),
        db_path.display(),
        table
    );
    Ok(count)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

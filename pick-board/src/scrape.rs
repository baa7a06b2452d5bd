// Draft table scraper.
//
// Downloads a Wikipedia page, picks one table by its classes, flattens it
// into a header plus rows (rowspan/colspan expanded), and writes it out as
// CSV and optionally JSON. The CSV is the input of `pick-board import`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{info, warn};

use crate::db::normalize_columns;

pub const DEFAULT_URL: &str = "https://en.wikipedia.org/wiki/2025_NFL_draft";
pub const DEFAULT_CLASS: &str = "wikitable sortable plainrowheaders jquery-tablesorter";
pub const DEFAULT_OUT_CSV: &str = "data/2025_nfl_draft_table.csv";

/// Browser User-Agent; Wikipedia rejects some default client strings.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                                  (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Rows printed by `--preview`.
pub const PREVIEW_ROWS: usize = 10;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to fetch {url} after {attempts} attempt(s): {source}")]
    Fetch {
        url: String,
        attempts: u32,
        source: reqwest::Error,
    },

    #[error("invalid selector `{css}`: {message}")]
    Selector { css: String, message: String },

    #[error("no matching tables found on the page")]
    NoTables,

    #[error("table_index {index} out of range; found {found} matching tables")]
    TableIndex { index: usize, found: usize },

    #[error("matched table has no rows")]
    EmptyTable,

    #[error("failed to create {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Fetching
// ---------------------------------------------------------------------------

/// Timeout and retry settings for the page download.
#[derive(Debug, Clone)]
pub struct FetchPolicy {
    pub timeout: Duration,
    pub retries: u32,
    /// Delay before retry `n` (1-based) is `backoff^n` seconds.
    pub backoff: f64,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        FetchPolicy {
            timeout: Duration::from_secs(20),
            retries: 3,
            backoff: 1.5,
        }
    }
}

impl FetchPolicy {
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        Duration::from_secs_f64(self.backoff.powi(exponent).max(0.0))
    }
}

/// HTTP client with the browser User-Agent and the policy's timeout.
pub fn build_client(policy: &FetchPolicy) -> Result<reqwest::Client, ScrapeError> {
    reqwest::Client::builder()
        .user_agent(BROWSER_USER_AGENT)
        .timeout(policy.timeout)
        .build()
        .map_err(ScrapeError::Client)
}

/// GET `url`, retrying transport errors and non-2xx statuses.
pub async fn fetch_html(
    client: &reqwest::Client,
    url: &str,
    policy: &FetchPolicy,
) -> Result<String, ScrapeError> {
    let retries = policy.retries.max(1);
    let mut attempt = 1;
    loop {
        let result = async {
            client
                .get(url)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await
        }
        .await;

        match result {
            Ok(body) => {
                info!("Fetched {} ({} bytes, attempt {})", url, body.len(), attempt);
                return Ok(body);
            }
            Err(e) if attempt < retries => {
                let delay = policy.delay_after(attempt);
                warn!(
                    "Fetch of {} failed (attempt {}): {}; retrying in {:?}",
                    url, attempt, e, delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                return Err(ScrapeError::Fetch {
                    url: url.to_string(),
                    attempts: attempt,
                    source: e,
                })
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Table extraction
// ---------------------------------------------------------------------------

/// A flattened HTML table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

struct Cell {
    text: String,
    header: bool,
    rowspan: usize,
    colspan: usize,
}

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        css: css.to_string(),
        message: e.to_string(),
    })
}

fn has_all_classes(table: &ElementRef, required: &[&str]) -> bool {
    let classes: Vec<&str> = table.value().classes().collect();
    required.iter().all(|c| classes.contains(c))
}

/// Find the `table_index`-th table carrying every class in `class_list`
/// (space separated, any order), falling back to `table.wikitable` when none
/// match, and flatten it.
pub fn extract_table(
    html: &str,
    class_list: &str,
    table_index: usize,
) -> Result<ScrapedTable, ScrapeError> {
    let document = Html::parse_document(html);
    let required: Vec<&str> = class_list.split_whitespace().collect();

    let mut candidates: Vec<ElementRef> = document
        .select(&selector("table")?)
        .filter(|t| has_all_classes(t, &required))
        .collect();
    if candidates.is_empty() {
        warn!("No table has classes [{}]; falling back to table.wikitable", class_list);
        candidates = document.select(&selector("table.wikitable")?).collect();
    }
    if candidates.is_empty() {
        return Err(ScrapeError::NoTables);
    }
    let found = candidates.len();
    let table = candidates
        .get(table_index)
        .ok_or(ScrapeError::TableIndex {
            index: table_index,
            found,
        })?;

    let raw_rows = table_rows(table)?;
    flatten(raw_rows)
}

/// `<tr>` rows that belong to `table` itself, not to a nested table.
fn table_rows(table: &ElementRef) -> Result<Vec<Vec<Cell>>, ScrapeError> {
    let tr = selector("tr")?;
    let rows = table
        .select(&tr)
        .filter(|row| belongs_to(row, table))
        .map(|row| {
            row.children()
                .filter_map(ElementRef::wrap)
                .filter(|cell| matches!(cell.value().name(), "th" | "td"))
                .map(|cell| Cell {
                    text: cell_text(&cell),
                    header: cell.value().name() == "th",
                    rowspan: span(&cell, "rowspan"),
                    colspan: span(&cell, "colspan"),
                })
                .collect::<Vec<_>>()
        })
        .filter(|cells| !cells.is_empty())
        .collect();
    Ok(rows)
}

fn belongs_to(row: &ElementRef, table: &ElementRef) -> bool {
    row.ancestors()
        .find(|node| node.value().as_element().is_some_and(|e| e.name() == "table"))
        .is_some_and(|node| node.id() == table.id())
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Browsers clamp spans to this as well.
const MAX_SPAN: usize = 1000;

fn span(cell: &ElementRef, attr: &str) -> usize {
    cell.value()
        .attr(attr)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .map_or(1, |n| n.min(MAX_SPAN))
}

/// Expand spans into a rectangular grid, split off the leading all-`<th>`
/// rows as the header, and drop placeholder (`Unnamed*`) columns.
fn flatten(raw_rows: Vec<Vec<Cell>>) -> Result<ScrapedTable, ScrapeError> {
    let header_rows = raw_rows
        .iter()
        .take_while(|row| row.iter().all(|c| c.header))
        .count();

    let grid = expand_spans(raw_rows);
    if grid.is_empty() {
        return Err(ScrapeError::EmptyTable);
    }
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);

    let names: Vec<String> = (0..width)
        .map(|col| {
            if header_rows == 0 {
                return col.to_string();
            }
            let mut parts: Vec<&str> = Vec::new();
            for row in &grid[..header_rows] {
                let part = row.get(col).map(|s| s.trim()).unwrap_or("");
                if !part.is_empty() && parts.last() != Some(&part) {
                    parts.push(part);
                }
            }
            parts.join(" ")
        })
        .collect();
    let names = normalize_columns(&names);

    let keep: Vec<usize> = (0..width)
        .filter(|&i| !names[i].to_lowercase().starts_with("unnamed"))
        .collect();

    let columns = keep.iter().map(|&i| names[i].clone()).collect();
    let rows = grid[header_rows..]
        .iter()
        .map(|row| {
            keep.iter()
                .map(|&i| row.get(i).cloned().unwrap_or_default())
                .collect()
        })
        .collect();

    Ok(ScrapedTable { columns, rows })
}

/// Place each cell at its grid position, repeating rowspan cells downwards
/// and colspan cells across.
fn expand_spans(raw_rows: Vec<Vec<Cell>>) -> Vec<Vec<String>> {
    // Per column: rows still to fill from a rowspan above, and the text
    let mut carry: Vec<Option<(usize, String)>> = Vec::new();
    let mut grid = Vec::with_capacity(raw_rows.len());

    for row in raw_rows {
        let mut out: Vec<String> = Vec::new();
        let mut cells = row.into_iter();
        let mut col = 0;
        loop {
            if let Some(slot) = carry.get_mut(col) {
                if let Some((left, text)) = slot.take() {
                    out.push(text.clone());
                    if left > 1 {
                        *slot = Some((left - 1, text));
                    }
                    col += 1;
                    continue;
                }
            }
            let Some(cell) = cells.next() else {
                break;
            };
            for _ in 0..cell.colspan {
                if cell.rowspan > 1 {
                    if carry.len() <= col {
                        carry.resize(col + 1, None);
                    }
                    carry[col] = Some((cell.rowspan - 1, cell.text.clone()));
                }
                out.push(cell.text.clone());
                col += 1;
            }
        }
        // Rowspans further right than this row's own cells
        if let Some(last) = carry.iter().rposition(Option::is_some) {
            while col <= last {
                match carry[col].take() {
                    Some((left, text)) => {
                        out.push(text.clone());
                        if left > 1 {
                            carry[col] = Some((left - 1, text));
                        }
                    }
                    None => out.push(String::new()),
                }
                col += 1;
            }
        }
        grid.push(out);
    }
    grid
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn create_parent(path: &Path) -> Result<(), ScrapeError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            std::fs::create_dir_all(dir).map_err(|e| ScrapeError::Write {
                path: dir.to_path_buf(),
                source: e,
            })
        }
        _ => Ok(()),
    }
}

pub fn write_csv(table: &ScrapedTable, path: &Path) -> Result<(), ScrapeError> {
    create_parent(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush().map_err(|e| ScrapeError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

/// Records orientation: one JSON object per row, keys in column order.
pub fn to_json(table: &ScrapedTable) -> serde_json::Value {
    let records = table
        .rows
        .iter()
        .map(|row| {
            let object: serde_json::Map<String, serde_json::Value> = table
                .columns
                .iter()
                .zip(row)
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect();
            serde_json::Value::Object(object)
        })
        .collect();
    serde_json::Value::Array(records)
}

pub fn write_json(table: &ScrapedTable, path: &Path) -> Result<(), ScrapeError> {
    create_parent(path)?;
    let file = std::fs::File::create(path).map_err(|e| ScrapeError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::to_writer_pretty(file, &to_json(table))?;
    Ok(())
}

/// First `limit` rows as an aligned text table.
pub fn preview(table: &ScrapedTable, limit: usize) -> String {
    let shown = &table.rows[..table.rows.len().min(limit)];
    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            shown
                .iter()
                .filter_map(|row| row.get(i))
                .map(|v| v.chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{cell:<w$}", w = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format_row(&table.columns)];
    lines.extend(shown.iter().map(|row| format_row(row)));
    lines.join("\n")
}

pub fn summary_line(table: &ScrapedTable, out_csv: Option<&Path>, out_json: Option<&Path>) -> String {
    let saved = |p: Option<&Path>| p.map_or_else(|| "no".to_string(), |p| p.display().to_string());
    format!(
        "Done. Rows: {} | Columns: {} | Saved: CSV={} | JSON={}",
        table.rows.len(),
        table.columns.len(),
        saved(out_csv),
        saved(out_json)
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

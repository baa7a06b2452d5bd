// Roster CSV loading.
//
// A source is either a local file or an http(s) URL. The whole resource is
// fetched first, then parsed with the first row as header. Any failure
// aborts the load: there is no partially loaded roster.

use std::fmt;
use std::io::Read;
use std::path::PathBuf;

use tracing::{debug, info};

use super::{Record, Roster};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("request to {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("request to {url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("CSV error in {location}: {source}")]
    Csv {
        location: String,
        source: csv::Error,
    },
}

// ---------------------------------------------------------------------------
// RosterSource
// ---------------------------------------------------------------------------

/// Where the roster CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterSource {
    File(PathBuf),
    Url(String),
}

impl RosterSource {
    /// Classify a configured location: `http://` and `https://` are URLs,
    /// everything else is a filesystem path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            RosterSource::Url(trimmed.to_string())
        } else {
            RosterSource::File(PathBuf::from(location))
        }
    }

    /// Short name for user-facing messages: the file name, or the last path
    /// segment of a URL.
    pub fn display_name(&self) -> String {
        match self {
            RosterSource::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            RosterSource::Url(url) => {
                let without_query = url.split(['?', '#']).next().unwrap_or(url);
                let path = without_query
                    .split_once("://")
                    .map_or(without_query, |(_, rest)| rest)
                    .split_once('/')
                    .map_or("", |(_, path)| path);
                match path.trim_end_matches('/').rsplit('/').next() {
                    Some(segment) if !segment.is_empty() => segment.to_string(),
                    _ => url.clone(),
                }
            }
        }
    }
}

impl fmt::Display for RosterSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterSource::File(path) => write!(f, "{}", path.display()),
            RosterSource::Url(url) => f.write_str(url),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse CSV text into a roster.
///
/// The first row names the columns. Blank lines are skipped. Rows shorter
/// than the header simply lack the trailing columns; cells past the header
/// width are dropped. Values are kept verbatim (no trimming). Bytes that are
/// not valid UTF-8 become U+FFFD rather than failing the load.
pub fn parse_roster<R: Read>(rdr: R) -> Result<Roster, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(rdr);

    let headers: Vec<String> = reader.byte_headers()?.iter().map(lossy).collect();

    let mut records = Vec::new();
    for result in reader.byte_records() {
        let row = result?;
        if row.len() != headers.len() {
            debug!(
                "row {} has {} cells for {} columns",
                records.len() + 1,
                row.len(),
                headers.len()
            );
        }
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(column, value)| (column.clone(), lossy(value)))
            .collect();
        records.push(record);
    }

    Ok(Roster { headers, records })
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

// ---------------------------------------------------------------------------
// Fetching
// ---------------------------------------------------------------------------

async fn fetch_bytes(client: &reqwest::Client, source: &RosterSource) -> Result<Vec<u8>, LoadError> {
    match source {
        RosterSource::File(path) => tokio::fs::read(path).await.map_err(|e| LoadError::Io {
            path: path.display().to_string(),
            source: e,
        }),
        RosterSource::Url(url) => {
            let response = client.get(url).send().await.map_err(|e| LoadError::Http {
                url: url.clone(),
                source: e,
            })?;
            let status = response.status();
            if !status.is_success() {
                return Err(LoadError::Status {
                    url: url.clone(),
                    status,
                });
            }
            let body = response.bytes().await.map_err(|e| LoadError::Http {
                url: url.clone(),
                source: e,
            })?;
            Ok(body.to_vec())
        }
    }
}

/// Fetch and parse the roster from `source`.
pub async fn load_roster(
    client: &reqwest::Client,
    source: &RosterSource,
) -> Result<Roster, LoadError> {
    let bytes = fetch_bytes(client, source).await?;
    let roster = parse_roster(bytes.as_slice()).map_err(|e| LoadError::Csv {
        location: source.to_string(),
        source: e,
    })?;
    info!(
        "Parsed {} records ({} columns) from {}",
        roster.len(),
        roster.headers.len(),
        source
    );
    Ok(roster)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

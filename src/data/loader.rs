//! Source loading.
//!
//! Fetches every configured source concurrently, then parses and merges them
//! in source-list order. A load is all-or-nothing: if any source fails the
//! caller gets an error and no catalog.
//!
//! Addresses are either local paths or `http(s)://` URLs; [`DefaultFetcher`]
//! picks the transport from the address.

use crate::constants::{DEFAULT_CMOS_SOURCE, DEFAULT_TTL_SOURCE, HTTP_TIMEOUT_SECS, SLOW_QUERY_MS};
use crate::data::catalog::{Catalog, CatalogBuilder};
use crate::data::csv_parser::{SkippedRow, parse_source};
use crate::data::error::{DataError, DataResult};
use crate::perf::ScopedTimer;
use crate::types::Family;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error};

/// One catalog source: which family it holds and where to fetch it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    /// Name used in logs and errors
    pub label: String,
    pub family: Family,
    /// Local path or http(s) URL
    pub address: String,
}

impl SourceSpec {
    /// A source labelled after its family
    pub fn new(family: Family, address: impl Into<String>) -> Self {
        Self {
            label: family.tag().to_string(),
            family,
            address: address.into(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn is_remote(&self) -> bool {
        is_http_address(&self.address)
    }
}

/// The TTL and CMOS datasets next to the application
pub fn default_sources() -> Vec<SourceSpec> {
    vec![
        SourceSpec::new(Family::Ttl, DEFAULT_TTL_SOURCE),
        SourceSpec::new(Family::Cmos, DEFAULT_CMOS_SOURCE),
    ]
}

fn is_http_address(address: &str) -> bool {
    let lower = address.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

// ============================================================================
// Fetchers
// ============================================================================

/// Retrieves the raw text of a source.
pub trait SourceFetcher {
    fn fetch(&self, address: &str) -> impl Future<Output = DataResult<String>>;
}

/// Reads sources from the local filesystem.
///
/// Bytes that are not valid UTF-8 become U+FFFD, matching what the HTTP
/// transport does with an undeclared charset.
#[derive(Clone, Debug, Default)]
pub struct FileFetcher {
    /// Relative addresses are resolved against this directory
    base_dir: Option<PathBuf>,
}

impl FileFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    pub fn resolve(&self, address: &str) -> PathBuf {
        let path = PathBuf::from(address);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path,
        }
    }
}

impl SourceFetcher for FileFetcher {
    async fn fetch(&self, address: &str) -> DataResult<String> {
        let path = self.resolve(address);
        let bytes = tokio::fs::read(&path).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Downloads sources over HTTP(S). Non-2xx responses are failures.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> DataResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }
}

impl SourceFetcher for HttpFetcher {
    async fn fetch(&self, address: &str) -> DataResult<String> {
        let response = self.client.get(address).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// Dispatches to HTTP for `http(s)://` addresses and to the filesystem otherwise.
#[derive(Clone, Debug)]
pub struct DefaultFetcher {
    files: FileFetcher,
    http: HttpFetcher,
}

impl DefaultFetcher {
    pub fn new(files: FileFetcher) -> DataResult<Self> {
        Ok(Self {
            files,
            http: HttpFetcher::new()?,
        })
    }
}

impl SourceFetcher for DefaultFetcher {
    async fn fetch(&self, address: &str) -> DataResult<String> {
        if is_http_address(address) {
            self.http.fetch(address).await
        } else {
            self.files.fetch(address).await
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// A skipped row together with the source it came from
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SourceSkip {
    pub source: String,
    #[serde(flatten)]
    pub row: SkippedRow,
}

/// Result of a successful load
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub catalog: Catalog,
    /// Rows dropped by the parser, in source-list order
    pub skipped: Vec<SourceSkip>,
}

/// Fetch all sources concurrently and build a catalog.
///
/// Every fetch runs to completion before anything is merged. The first
/// failing source in list order is reported and no catalog is produced.
pub async fn load_catalog<F: SourceFetcher>(
    fetcher: &F,
    sources: &[SourceSpec],
) -> DataResult<LoadOutcome> {
    let _timer = ScopedTimer::new("load_catalog", SLOW_QUERY_MS);
    debug!(sources = sources.len(), "Fetching catalog sources");

    let bodies = join_all(sources.iter().map(|source| fetcher.fetch(&source.address))).await;

    let mut fetched = Vec::with_capacity(sources.len());
    for (source, body) in sources.iter().zip(bodies) {
        match body {
            Ok(content) => fetched.push((source, content)),
            Err(err) => {
                error!(
                    source = %source.label,
                    address = %source.address,
                    error = %err,
                    "Failed to fetch catalog source"
                );
                return Err(DataError::source_fetch(&source.label, &source.address, err));
            }
        }
    }

    let mut builder = CatalogBuilder::new();
    let mut skipped = Vec::new();
    for (source, content) in fetched {
        let report = parse_source(&content, source.family)?;
        skipped.extend(report.skipped.into_iter().map(|row| SourceSkip {
            source: source.label.clone(),
            row,
        }));
        builder.extend(&source.label, report.records);
    }

    let catalog = builder.finish();
    debug!(
        records = catalog.len(),
        skipped = skipped.len(),
        "Catalog load complete"
    );
    Ok(LoadOutcome { catalog, skipped })
}

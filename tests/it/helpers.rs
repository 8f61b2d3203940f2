//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestCatalogBuilder` - Builder pattern for catalogs and loaded controllers
//! - CSV fixture functions for well-formed and irregular sources
//! - `MapFetcher` - in-memory `SourceFetcher`
//! - `PendingFetcher` - a `SourceFetcher` that never finishes
//! - `serve_sources()` - a local HTTP server for the HTTP fetcher

#![allow(dead_code)]

use chipdex::data::{Catalog, CatalogBuilder, DataError, DataResult, LoadOutcome, SourceFetcher};
use chipdex::settings::CatalogSettings;
use chipdex::{CatalogController, ChipRecord, Family};
use std::collections::HashMap;
use std::thread;
use tiny_http::{Response, Server};

pub const HEADER: &str =
    "Index,IC Number,Function,Description,Connection Diagram,Function Table,Datasheet";

// ============================================================================
// TestCatalogBuilder - Builder pattern for creating test catalogs
// ============================================================================

/// Builder for catalogs and controllers with a loaded catalog.
///
/// # Example
/// ```ignore
/// let controller = TestCatalogBuilder::new()
///     .with_chip("7400", "Quad NAND", Family::Ttl)
///     .with_chip("4001", "Quad NOR", Family::Cmos)
///     .build_controller();
/// ```
#[derive(Default)]
pub struct TestCatalogBuilder {
    records: Vec<ChipRecord>,
    page_size: Option<usize>,
}

impl TestCatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chip(mut self, number: &str, function: &str, family: Family) -> Self {
        self.records.push(chip(number, function, "", family));
        self
    }

    pub fn with_described_chip(
        mut self,
        number: &str,
        function: &str,
        description: &str,
        family: Family,
    ) -> Self {
        self.records.push(chip(number, function, description, family));
        self
    }

    /// Add `count` chips numbered `<prefix>000`, `<prefix>001`, ...
    pub fn with_numbered_chips(mut self, prefix: &str, count: usize, family: Family) -> Self {
        for i in 0..count {
            let number = format!("{}{:03}", prefix, i);
            self.records.push(chip(&number, "Gate", "", family));
        }
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn build(self) -> Catalog {
        let mut builder = CatalogBuilder::new();
        builder.extend("test", self.records);
        builder.finish()
    }

    /// A controller that has finished loading this catalog
    pub fn build_controller(self) -> CatalogController {
        let mut settings = CatalogSettings::default();
        if let Some(page_size) = self.page_size {
            settings.page_size = page_size;
        }
        let catalog = self.build();

        let mut controller = CatalogController::new(settings);
        controller.begin_load().unwrap();
        controller
            .finish_load(Ok(LoadOutcome {
                catalog,
                skipped: Vec::new(),
            }))
            .unwrap();
        controller
    }
}

pub fn chip(number: &str, function: &str, description: &str, family: Family) -> ChipRecord {
    ChipRecord {
        number: number.to_string(),
        function_name: function.to_string(),
        description: description.to_string(),
        has_connection_diagram: false,
        has_function_table: false,
        datasheet_link: String::new(),
        family,
    }
}

// ============================================================================
// CSV fixtures
// ============================================================================

/// Join a header and rows into CSV text
pub fn csv_with_rows(rows: &[&str]) -> String {
    let mut content = String::from(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    content
}

pub fn ttl_csv() -> String {
    csv_with_rows(&[
        r#"1,7400,Quad 2-input NAND,"Four independent gates, each performing NAND",Yes,Yes,https://example.com/7400.pdf"#,
        r#"2,7402,Quad 2-input NOR,"Four ""positive"" NOR gates",Yes,No,"#,
        "",
        "3,,Orphan row,missing number,No,No,",
        r#"4,7474,Dual D flip-flop,"Preset, clear",no,yes,https://example.com/7474.pdf"#,
    ])
}

pub fn cmos_csv() -> String {
    csv_with_rows(&[
        "1,4001,Quad 2-input NOR,Four NOR gates,yes,yes,",
        "2,4011,Quad 2-input NAND,Four NAND gates,yes,no,",
        "3,4013,Dual D flip-flop",
        "4,74HC00,Quad NAND,High-speed CMOS NAND,no,no,",
    ])
}

// ============================================================================
// Fake fetchers
// ============================================================================

/// In-memory fetcher; unknown addresses fail like a missing file.
#[derive(Default)]
pub struct MapFetcher {
    sources: HashMap<String, String>,
}

impl MapFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, address: &str, content: impl Into<String>) -> Self {
        self.sources.insert(address.to_string(), content.into());
        self
    }
}

impl SourceFetcher for MapFetcher {
    async fn fetch(&self, address: &str) -> DataResult<String> {
        self.sources
            .get(address)
            .cloned()
            .ok_or_else(|| DataError::Io(std::io::Error::from(std::io::ErrorKind::NotFound)))
    }
}

/// Fetcher whose fetches never complete
pub struct PendingFetcher;

impl SourceFetcher for PendingFetcher {
    async fn fetch(&self, _address: &str) -> DataResult<String> {
        std::future::pending().await
    }
}

// ============================================================================
// Local HTTP server
// ============================================================================

/// Serve `routes` (path -> (status, body)) on an ephemeral port.
///
/// Returns the base URL, e.g. `http://127.0.0.1:43123`. Unknown paths get a
/// 404. The server thread lives until the test binary exits.
pub fn serve_sources(routes: Vec<(&str, u16, String)>) -> String {
    let server = Server::http("127.0.0.1:0").expect("bind test server");
    let port = server
        .server_addr()
        .to_ip()
        .expect("tcp listener")
        .port();

    let routes: HashMap<String, (u16, String)> = routes
        .into_iter()
        .map(|(path, status, body)| (path.to_string(), (status, body)))
        .collect();

    thread::spawn(move || {
        for request in server.incoming_requests() {
            let (status, body) = routes
                .get(request.url())
                .cloned()
                .unwrap_or((404, "not found".to_string()));
            let _ = request.respond(Response::from_string(body).with_status_code(status));
        }
    });

    format!("http://127.0.0.1:{}", port)
}

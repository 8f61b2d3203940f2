//! Crate-wide constants.
//!
//! Centralizes magic numbers so the parser, view engine and view-models
//! agree on the same values.

// ============================================================================
// CSV Layout
// ============================================================================

/// Number of columns a data row must have to be accepted
pub const EXPECTED_COLUMNS: usize = 7;

/// Column index of the chip number
pub const COL_NUMBER: usize = 1;

/// Column index of the short function name
pub const COL_FUNCTION: usize = 2;

/// Column index of the free-text description
pub const COL_DESCRIPTION: usize = 3;

/// Column index of the connection-diagram flag
pub const COL_CONNECTION_DIAGRAM: usize = 4;

/// Column index of the function-table flag
pub const COL_FUNCTION_TABLE: usize = 5;

/// Column index of the datasheet link
pub const COL_DATASHEET: usize = 6;

/// Token that marks an image as present (compared case-insensitively)
pub const YES_TOKEN: &str = "yes";

// ============================================================================
// Data Limits
// ============================================================================

/// Maximum source size accepted by the loader
pub const MAX_CSV_SIZE_MB: usize = 100;

/// Maximum number of lines accepted from a single source
pub const MAX_CSV_ROWS: usize = 100_000;

// ============================================================================
// View Defaults
// ============================================================================

/// Records added to the visible slice per "load more" request
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Characters of description shown on a card before truncation
pub const DESCRIPTION_PREVIEW_CHARS: usize = 150;

/// Marker appended to a truncated card summary
pub const TRUNCATION_MARKER: &str = "...";

/// Directory (or URL prefix) holding the per-chip images
pub const DEFAULT_IMAGE_ROOT: &str = "images";

/// Suffix of a connection-diagram image file
pub const CONNECTION_DIAGRAM_SUFFIX: &str = "C.png";

/// Suffix of a function-table image file
pub const FUNCTION_TABLE_SUFFIX: &str = "F.png";

// ============================================================================
// Sources
// ============================================================================

/// Default address of the TTL dataset
pub const DEFAULT_TTL_SOURCE: &str = "ttl.csv";

/// Default address of the CMOS dataset
pub const DEFAULT_CMOS_SOURCE: &str = "cmos.csv";

/// Directory name under the platform config dir
pub const SETTINGS_DIR_NAME: &str = "chipdex";

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "settings.json";

// ============================================================================
// Timing
// ============================================================================

/// Parsing or filtering slower than this is logged as slow
pub const SLOW_QUERY_MS: f64 = 8.0;

/// Per-request timeout for HTTP sources, in seconds
pub const HTTP_TIMEOUT_SECS: u64 = 30;

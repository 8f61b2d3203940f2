//! Snapshot tests using the insta crate.
//!
//! The view-models are what the view layer consumes, so their serialized
//! shape is pinned here. To update snapshots after intentional changes:
//! ```sh
//! cargo insta test --accept
//! ```

use crate::helpers::ttl_csv;
use chipdex::data::{SkipReason, SkippedRow, SourceSkip, parse_chip_csv};
use chipdex::view_model::{ChipCard, ChipDetail};
use chipdex::view_state::ViewState;
use chipdex::{Family, FamilyFilter};

#[test]
fn snapshot_chip_detail_with_images() {
    let records = parse_chip_csv(&ttl_csv(), Family::Ttl);
    let detail = ChipDetail::from_record(&records[0], "images");
    insta::assert_json_snapshot!(detail, @r#"
    {
      "number": "7400",
      "function_name": "Quad 2-input NAND",
      "description": "Four independent gates, each performing NAND",
      "family": "ttl",
      "connection_diagram": {
        "state": "available",
        "address": "images/7400C.png"
      },
      "function_table": {
        "state": "available",
        "address": "images/7400F.png"
      },
      "datasheet_link": "https://example.com/7400.pdf"
    }
    "#);
}

#[test]
fn snapshot_chip_detail_without_extras() {
    let records = parse_chip_csv(&ttl_csv(), Family::Ttl);
    let detail = ChipDetail::from_record(&records[1], "images");
    insta::assert_json_snapshot!(detail, @r#"
    {
      "number": "7402",
      "function_name": "Quad 2-input NOR",
      "description": "Four \"positive\" NOR gates",
      "family": "ttl",
      "connection_diagram": {
        "state": "available",
        "address": "images/7402C.png"
      },
      "function_table": {
        "state": "not_available"
      },
      "datasheet_link": null
    }
    "#);
}

#[test]
fn snapshot_chip_card() {
    let records = parse_chip_csv(&ttl_csv(), Family::Ttl);
    let card = ChipCard::from_record(&records[2]);
    insta::assert_json_snapshot!(card, @r#"
    {
      "number": "7474",
      "function_name": "Dual D flip-flop",
      "summary": "Preset, clear",
      "family": "ttl"
    }
    "#);
}

#[test]
fn snapshot_source_skip() {
    let skip = SourceSkip {
        source: "cmos".to_string(),
        row: SkippedRow {
            line: 4,
            reason: SkipReason::TooFewColumns { found: 3 },
        },
    };
    insta::assert_json_snapshot!(skip, @r#"
    {
      "source": "cmos",
      "line": 4,
      "reason": {
        "kind": "too_few_columns",
        "found": 3
      }
    }
    "#);
}

#[test]
fn snapshot_view_state() {
    let mut state = ViewState::new(20);
    state.set_filter(FamilyFilter::Cmos);
    state.set_search_term("NAND");
    state.request_more(true, false);
    insta::assert_json_snapshot!(state, @r#"
    {
      "filter": "cmos",
      "search_term": "NAND",
      "visible_count": 40,
      "page_size": 20
    }
    "#);
}

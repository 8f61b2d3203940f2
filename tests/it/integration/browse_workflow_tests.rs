//! Browse workflow tests: controller events -> view -> cards/detail.

use crate::helpers::{MapFetcher, TestCatalogBuilder, cmos_csv, ttl_csv};
use chipdex::data::{DataError, default_sources};
use chipdex::view_model::ImageSlot;
use chipdex::{CatalogController, Family, FamilyFilter, Status};

fn numbers(controller: &CatalogController) -> Vec<String> {
    controller
        .view()
        .records
        .iter()
        .map(|r| r.number.clone())
        .collect()
}

#[test]
fn test_paging_through_results() {
    let mut controller = TestCatalogBuilder::new()
        .with_numbered_chips("74", 45, Family::Ttl)
        .build_controller();

    let view = controller.view();
    assert_eq!(view.records.len(), 20);
    assert!(view.has_more);
    assert_eq!(view.result_label(), "45 chips");

    let view = controller.request_more();
    assert_eq!(view.records.len(), 40);
    assert!(view.has_more);

    let view = controller.request_more();
    assert_eq!(view.records.len(), 45);
    assert!(!view.has_more);
    assert_eq!(view.status, Status::Ready);

    // Nothing left to show
    let view = controller.request_more();
    assert_eq!(view.records.len(), 45);
    assert_eq!(controller.state().visible_count, 60);
}

#[test]
fn test_filter_and_search_reset_pagination() {
    let mut controller = TestCatalogBuilder::new()
        .with_numbered_chips("74", 30, Family::Ttl)
        .with_numbered_chips("40", 30, Family::Cmos)
        .with_page_size(10)
        .build_controller();

    controller.request_more();
    controller.request_more();
    assert_eq!(controller.state().visible_count, 30);

    let view = controller.set_filter(FamilyFilter::Cmos);
    assert_eq!(view.records.len(), 10);
    assert!(view.records.iter().all(|r| r.family == Family::Cmos));

    controller.request_more();
    let view = controller.set_search_term("40");
    assert_eq!(view.records.len(), 10);
    assert_eq!(controller.state().visible_count, 10);
}

#[test]
fn test_search_is_case_insensitive() {
    let mut controller = TestCatalogBuilder::new()
        .with_described_chip("7400", "Quad NAND", "Four gates", Family::Ttl)
        .with_described_chip("74HC00", "Quad NAND", "High-speed CMOS", Family::Cmos)
        .with_described_chip("4013", "Dual flip-flop", "", Family::Cmos)
        .build_controller();

    controller.set_search_term("hc");
    assert_eq!(numbers(&controller), vec!["74HC00"]);

    controller.set_search_term("NaNd");
    assert_eq!(numbers(&controller), vec!["7400", "74HC00"]);

    controller.set_filter(FamilyFilter::Ttl);
    assert_eq!(numbers(&controller), vec!["7400"]);

    controller.set_filter(FamilyFilter::All);
    controller.set_search_term("");
    assert_eq!(numbers(&controller), vec!["7400", "74HC00", "4013"]);
}

#[test]
fn test_empty_results_then_recovery() {
    let mut controller = TestCatalogBuilder::new()
        .with_chip("7400", "Quad NAND", Family::Ttl)
        .build_controller();

    let view = controller.set_filter(FamilyFilter::Cmos);
    assert_eq!(view.status, Status::EmptyResults);
    assert!(view.records.is_empty());
    assert_eq!(view.result_label(), "0 chips");
    let view = controller.request_more();
    assert_eq!(view.status, Status::EmptyResults);
    assert_eq!(controller.state().visible_count, 20);

    let view = controller.set_filter(FamilyFilter::Ttl);
    assert_eq!(view.status, Status::Ready);
    assert_eq!(view.result_label(), "1 chip");
}

#[test]
fn test_events_before_load_are_harmless() {
    let mut controller = CatalogController::default();
    let view = controller.set_search_term("7400");
    assert_eq!(view.status, Status::Idle);
    assert!(view.records.is_empty());
    assert_eq!(controller.request_more().status, Status::Idle);
    assert_eq!(controller.state().visible_count, 20);
    assert!(matches!(
        controller.get_record_by_key("7400"),
        Err(DataError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_cards_and_detail_from_loaded_sources() {
    let fetcher = MapFetcher::new()
        .with("ttl.csv", ttl_csv())
        .with("cmos.csv", cmos_csv());
    let mut controller = CatalogController::default();
    controller.load(&fetcher, &default_sources()).await.unwrap();

    let view = controller.set_search_term("flip-flop");
    let cards = view.cards();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].number, "7474");
    assert_eq!(cards[0].summary, "Preset, clear");

    let detail = controller.detail("7474").unwrap();
    assert_eq!(detail.family, Family::Ttl);
    assert_eq!(detail.connection_diagram, ImageSlot::NotAvailable);
    assert_eq!(detail.function_table.address(), Some("images/7474F.png"));
    assert_eq!(
        detail.datasheet_link.as_deref(),
        Some("https://example.com/7474.pdf")
    );

    // Lookup is independent of the current filter
    controller.set_filter(FamilyFilter::Cmos);
    assert_eq!(controller.get_record_by_key("7400").unwrap().family, Family::Ttl);
}

#[test]
fn test_long_description_truncated_on_card() {
    let description = "x".repeat(400);
    let controller = TestCatalogBuilder::new()
        .with_described_chip("74181", "ALU", &description, Family::Ttl)
        .build_controller();

    let cards = controller.view().cards();
    assert_eq!(cards[0].summary.chars().count(), 153);
    assert!(cards[0].summary.ends_with("..."));

    // Detail keeps the full text
    assert_eq!(controller.detail("74181").unwrap().description, description);
}

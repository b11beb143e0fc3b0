//! Tests for command parsing and snapshot rendering.

use super::*;
use crate::model::plant::{CareLevel, Plant, PlantSize};
use crate::state::catalog_state::CatalogState;

fn dispatch(line: &str) -> Vec<CatalogAction> {
    match parse_command(line) {
        Ok(Some(ShellCommand::Dispatch(actions))) => actions,
        other => panic!("Expected Dispatch for {line:?}, got {other:?}"),
    }
}

fn edit(line: &str) -> FilterEdit {
    match dispatch(line).as_slice() {
        [CatalogAction::EditFilter(edit)] => edit.clone(),
        other => panic!("Expected one filter edit for {line:?}, got {other:?}"),
    }
}

// ===== parse_command =====

#[test]
fn blank_line_is_ignored() {
    assert_eq!(parse_command("   "), Ok(None));
}

#[test]
fn search_keeps_inner_spaces() {
    assert_eq!(
        edit("search  snake plant "),
        FilterEdit::Search("snake plant".to_string())
    );
}

#[test]
fn bare_search_clears_the_text() {
    assert_eq!(edit("search"), FilterEdit::Search(String::new()));
}

#[test]
fn dash_clears_category_and_prices() {
    assert_eq!(edit("category -"), FilterEdit::Category(String::new()));
    assert_eq!(edit("min -"), FilterEdit::MinPrice(String::new()));
    assert_eq!(edit("max -"), FilterEdit::MaxPrice(String::new()));
}

#[test]
fn price_text_is_passed_through_unvalidated() {
    // Validation belongs to the filter store so it can attach a field message.
    assert_eq!(edit("min abc"), FilterEdit::MinPrice("abc".to_string()));
    assert_eq!(edit("max 500"), FilterEdit::MaxPrice("500".to_string()));
}

#[test]
fn stock_values_map_to_filter() {
    assert_eq!(edit("stock in"), FilterEdit::InStock(StockFilter::InStock));
    assert_eq!(edit("stock out"), FilterEdit::InStock(StockFilter::OutOfStock));
    assert_eq!(edit("stock any"), FilterEdit::InStock(StockFilter::Any));
}

#[test]
fn sort_with_order_emits_two_edits() {
    assert_eq!(
        dispatch("sort price desc"),
        vec![
            CatalogAction::EditFilter(FilterEdit::SortBy(SortBy::Price)),
            CatalogAction::EditFilter(FilterEdit::SortOrder(SortOrder::Desc)),
        ]
    );
}

#[test]
fn sort_without_order_emits_one_edit() {
    assert_eq!(edit("sort createdAt"), FilterEdit::SortBy(SortBy::CreatedAt));
}

#[test]
fn sort_rejects_unknown_field() {
    assert!(matches!(
        parse_command("sort colour"),
        Err(CommandError::InvalidArgument(_))
    ));
}

#[test]
fn page_and_size_parse_numbers() {
    assert_eq!(dispatch("page 3"), vec![CatalogAction::GoToPage(3)]);
    assert_eq!(
        dispatch("size 48"),
        vec![CatalogAction::SetPageSize(PageSize::new(48).unwrap())]
    );
}

#[test]
fn size_outside_allowed_set_is_rejected() {
    assert!(matches!(
        parse_command("size 20"),
        Err(CommandError::InvalidArgument(_))
    ));
}

#[test]
fn missing_argument_reports_usage() {
    assert_eq!(
        parse_command("page"),
        Err(CommandError::MissingArgument {
            command: "page",
            usage: "page <n>"
        })
    );
}

#[test]
fn simple_commands_map_to_actions() {
    assert_eq!(dispatch("go"), vec![CatalogAction::SubmitSearch]);
    assert_eq!(dispatch("clear"), vec![CatalogAction::ClearFilters]);
    assert_eq!(dispatch("retry"), vec![CatalogAction::Retry]);
    assert_eq!(parse_command("show"), Ok(Some(ShellCommand::Show)));
    assert_eq!(parse_command("help"), Ok(Some(ShellCommand::Help)));
    assert_eq!(parse_command("quit"), Ok(Some(ShellCommand::Quit)));
}

#[test]
fn unknown_command_is_an_error() {
    assert_eq!(
        parse_command("water all"),
        Err(CommandError::Unknown("water".to_string()))
    );
}

#[test]
fn add_builds_draft_from_pairs() {
    // GIVEN: an add line with every field
    let line = "add name=Money Plant; price=199; categories=Indoor, Air Purifying; \
                stock=15; image=https://img/m.jpg; description=Trailing vine; \
                careLevel=Medium; size=Small";

    // WHEN: parsed
    let actions = dispatch(line);

    // THEN: the draft carries the raw values
    let expected = PlantDraft {
        name: "Money Plant".to_string(),
        price: "199".to_string(),
        categories: vec!["Indoor".to_string(), "Air Purifying".to_string()],
        stock: "15".to_string(),
        image: "https://img/m.jpg".to_string(),
        description: "Trailing vine".to_string(),
        care_level: CareLevel::Medium,
        size: PlantSize::Small,
    };
    assert_eq!(actions, vec![CatalogAction::SubmitPlant(expected)]);
}

#[test]
fn add_with_missing_fields_still_parses() {
    // Required-field checks happen in PlantDraft::validate.
    assert_eq!(
        dispatch("add name=Fern"),
        vec![CatalogAction::SubmitPlant(PlantDraft {
            name: "Fern".to_string(),
            ..PlantDraft::default()
        })]
    );
}

#[test]
fn add_rejects_unknown_field() {
    assert!(matches!(
        parse_command("add colour=green"),
        Err(CommandError::InvalidArgument(msg)) if msg.contains("colour")
    ));
}

// ===== render =====

fn plant(id: &str, name: &str, stock: u32) -> Plant {
    Plant {
        id: id.to_string(),
        name: name.to_string(),
        price: 250.0,
        categories: vec!["Indoor".to_string()],
        stock,
        image: String::new(),
        description: String::new(),
        care_level: CareLevel::Easy,
        size: PlantSize::Medium,
        created_at: None,
    }
}

#[test]
fn render_empty_result_says_no_plants() {
    let snapshot = CatalogState::default().snapshot();

    let text = render(&snapshot);

    assert!(text.contains("No plants found."), "got:\n{text}");
    assert!(!text.contains("[clear to reset]"));
}

#[test]
fn render_lists_items_with_range_and_error() {
    // GIVEN: page 2 of 14 items at 12 per page, and a failed refresh
    let mut snapshot = CatalogState::default().snapshot();
    snapshot.page.set_total(14);
    snapshot.page.go_to(2);
    snapshot.display_range = snapshot.page.display_range();
    snapshot.count = 14;
    snapshot.items = vec![plant("13", "Aloe", 5), plant("14", "Basil", 0)];
    snapshot.error = Some("Server responded with status 500".to_string());
    snapshot.has_active_filters = true;

    // WHEN: rendered
    let text = render(&snapshot);

    // THEN: range, numbering and the retry hint all appear
    assert!(text.contains("Showing 13-14 of 14 (page 2/2, 12 per page)"), "got:\n{text}");
    assert!(text.contains(" 13. Aloe"), "got:\n{text}");
    assert!(text.contains(" 14. Basil"), "got:\n{text}");
    assert!(text.contains("Error: Server responded with status 500 (type 'retry')"));
    assert!(text.contains("[clear to reset]"));
}

#[test]
fn render_filtered_page_snapshot() {
    let mut state = CatalogState::default();
    let now = std::time::Instant::now();
    for edit in [
        FilterEdit::Category("Outdoor".to_string()),
        FilterEdit::MinPrice("100".to_string()),
        FilterEdit::InStock(StockFilter::InStock),
        FilterEdit::SortBy(SortBy::Price),
        FilterEdit::SortOrder(SortOrder::Desc),
    ] {
        state.update(CatalogAction::EditFilter(edit), now);
    }

    let mut snapshot = state.snapshot();
    snapshot.loading = false;
    snapshot.count = 2;
    snapshot.page.set_total(2);
    snapshot.display_range = snapshot.page.display_range();
    snapshot.items = vec![plant("1", "Tree Fern", 25), plant("2", "Sword Fern", 0)];
    snapshot.categories = vec!["Indoor".to_string(), "Outdoor".to_string()];

    insta::assert_snapshot!(render(&snapshot), @r#"
Filters: search="" category=Outdoor min=100 max=- stock=in sort=price desc  [clear to reset]
Showing 1-2 of 2 (page 1/1, 12 per page)
    1. Tree Fern - ₹250 [Indoor] (In Stock, 25)
    2. Sword Fern - ₹250 [Indoor] (Out of Stock, 0)
Categories: Indoor, Outdoor
"#);
}

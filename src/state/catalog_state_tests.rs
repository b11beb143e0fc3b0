//! Tests for CatalogState transitions.
//!
//! Each test drives the state with actions and inspects the emitted effects,
//! resolving fetches by hand to simulate the network.

use super::*;
use crate::model::filter::{FilterEdit, SortOrder};
use crate::model::plant::PlantPage;

// ===== Test Helpers =====

const DELAY: Duration = Duration::from_millis(500);

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn state() -> CatalogState {
    CatalogState::new(CatalogSettings {
        search_debounce: DELAY,
        ..CatalogSettings::default()
    })
}

fn plants(n: usize, prefix: &str) -> Vec<Plant> {
    (0..n)
        .map(|i| {
            serde_json::from_value(serde_json::json!({
                "id": format!("{prefix}-{i}"),
                "name": format!("{prefix} {i}"),
                "price": 10 + i,
                "categories": ["Indoor"],
                "stock": i
            }))
            .expect("valid plant")
        })
        .collect()
}

fn fetches(effects: &[Effect]) -> Vec<&FetchRequest> {
    effects.iter().filter_map(Effect::as_fetch).collect()
}

fn single_fetch(effects: &[Effect]) -> FetchRequest {
    let found = fetches(effects);
    assert_eq!(found.len(), 1, "Expected exactly one fetch, got {effects:?}");
    found[0].clone()
}

/// Start the state and answer the initial fetch with `count` items in total.
fn started_with(count: u64, now: Instant) -> CatalogState {
    let mut state = state();
    let effects = state.update(CatalogAction::Start, now);
    let request = single_fetch(&effects);
    let shown = (count as usize).min(request.limit as usize);
    state.update(
        CatalogAction::FetchCompleted {
            id: request.id,
            outcome: Ok(PlantPage {
                data: plants(shown, "init"),
                count,
            }),
        },
        now,
    );
    state
}

// ===== Start =====

#[test]
fn start_fetches_first_page_and_categories_once() {
    let now = Instant::now();
    let mut state = state();

    let effects = state.update(CatalogAction::Start, now);

    let request = single_fetch(&effects);
    assert_eq!(request.page, 1);
    assert_eq!(request.limit, 12);
    assert!(effects.contains(&Effect::FetchCategories));
    assert!(state.is_loading());
    assert!(
        state.update(CatalogAction::Start, now).is_empty(),
        "Second start must not refetch categories"
    );
}

#[test]
fn categories_failure_leaves_list_empty() {
    let now = Instant::now();
    let mut state = state();
    state.update(
        CatalogAction::CategoriesLoaded(Err(FetchError::Transport("down".into()))),
        now,
    );
    assert!(state.categories().is_empty());
    assert!(state.error().is_none(), "Category failure is not a listing error");

    state.update(
        CatalogAction::CategoriesLoaded(Ok(vec!["Indoor".into(), "Herb".into()])),
        now,
    );
    assert_eq!(state.categories(), ["Indoor", "Herb"]);
}

// ===== Filters =====

#[test]
fn structured_filter_resets_page_and_fetches_once() {
    let now = Instant::now();
    let mut state = started_with(45, now);
    state.update(CatalogAction::GoToPage(3), now);

    let effects = state.update(
        CatalogAction::EditFilter(FilterEdit::Category("Indoor".into())),
        now,
    );

    let request = single_fetch(&effects);
    assert_eq!(request.page, 1, "Query change resets to page 1");
    assert_eq!(request.query.get("category"), Some("Indoor"));
    assert_eq!(state.pages().current_page(), 1);
}

#[test]
fn search_fetches_only_after_debounce_tick() {
    let t0 = Instant::now();
    let mut state = started_with(45, t0);

    let typed: Vec<Effect> = ["b", "bo", "bon"]
        .iter()
        .enumerate()
        .flat_map(|(i, text)| {
            state.update(
                CatalogAction::EditFilter(FilterEdit::Search(text.to_string())),
                t0 + ms(i as u64 * 100),
            )
        })
        .collect();
    assert!(typed.is_empty(), "Keystrokes must not fetch");
    assert_eq!(state.next_deadline(), Some(t0 + ms(200) + DELAY));

    assert!(state.update(CatalogAction::Tick, t0 + ms(600)).is_empty());
    let effects = state.update(CatalogAction::Tick, t0 + ms(700));

    let request = single_fetch(&effects);
    assert_eq!(request.query.get("search"), Some("bon"));
    assert!(state.update(CatalogAction::Tick, t0 + ms(5_000)).is_empty());
}

#[test]
fn rejected_price_does_not_fetch() {
    let now = Instant::now();
    let mut state = started_with(10, now);

    let effects = state.update(
        CatalogAction::EditFilter(FilterEdit::MinPrice("-1".into())),
        now,
    );

    assert!(effects.is_empty());
    let snapshot = state.snapshot();
    assert_eq!(snapshot.filter_errors.len(), 1);
    assert!(snapshot.filters.min_price.is_none());
}

#[test]
fn clear_cancels_pending_search_and_fetches_exactly_once() {
    // GIVEN active filters and a search waiting on the debounce
    let t0 = Instant::now();
    let mut state = started_with(45, t0);
    state.update(
        CatalogAction::EditFilter(FilterEdit::SortOrder(SortOrder::Desc)),
        t0,
    );
    state.update(
        CatalogAction::EditFilter(FilterEdit::Search("stale".into())),
        t0,
    );

    // WHEN clearing
    let effects = state.update(CatalogAction::ClearFilters, t0 + ms(100));

    // THEN one immediate fetch with default parameters
    let request = single_fetch(&effects);
    assert_eq!(request.query.get("sortOrder"), Some("asc"));
    assert!(!request.query.contains("search"));
    assert!(!state.snapshot().has_active_filters);

    // AND the stale search never triggers another fetch
    let later: Vec<Effect> = (1..=20)
        .flat_map(|step| state.update(CatalogAction::Tick, t0 + ms(step * 100)))
        .collect();
    assert!(later.is_empty(), "Cancelled search must not fire: {later:?}");
}

#[test]
fn submit_search_fetches_immediately() {
    let t0 = Instant::now();
    let mut state = started_with(45, t0);
    state.update(
        CatalogAction::EditFilter(FilterEdit::Search("aloe".into())),
        t0,
    );

    let effects = state.update(CatalogAction::SubmitSearch, t0 + ms(10));

    assert_eq!(single_fetch(&effects).query.get("search"), Some("aloe"));
    assert!(state.update(CatalogAction::Tick, t0 + ms(2_000)).is_empty());
}

// ===== Pagination =====

#[test]
fn page_change_fetches_with_current_query() {
    let now = Instant::now();
    let mut state = started_with(45, now);

    let effects = state.update(CatalogAction::GoToPage(4), now);

    let request = single_fetch(&effects);
    assert_eq!(request.page, 4);
    assert_eq!(request.query.get("sortBy"), Some("name"));
}

#[test]
fn selecting_current_page_does_not_fetch() {
    let now = Instant::now();
    let mut state = started_with(45, now);
    assert!(state.update(CatalogAction::GoToPage(1), now).is_empty());
}

#[test]
fn page_size_change_reconciles_then_fetches() {
    let now = Instant::now();
    let mut state = started_with(45, now);
    state.update(CatalogAction::GoToPage(3), now);

    let size = PageSize::new(24).unwrap();
    let effects = state.update(CatalogAction::SetPageSize(size), now);

    let request = single_fetch(&effects);
    assert_eq!(request.page, 2);
    assert_eq!(request.limit, 24);
}

#[test]
fn shrunken_count_clamps_page_and_refetches() {
    let now = Instant::now();
    let mut state = started_with(45, now);
    let effects = state.update(CatalogAction::GoToPage(4), now);
    let request = single_fetch(&effects);

    // Server now reports only 20 items: page 4 is gone
    let effects = state.update(
        CatalogAction::FetchCompleted {
            id: request.id,
            outcome: Ok(PlantPage {
                data: Vec::new(),
                count: 20,
            }),
        },
        now,
    );

    let corrective = single_fetch(&effects);
    assert_eq!(corrective.page, 2);
}

#[test]
fn empty_result_shows_zero_range() {
    let now = Instant::now();
    let state = started_with(0, now);

    let snapshot = state.snapshot();
    assert_eq!(snapshot.page.total_pages(), 0);
    assert_eq!(snapshot.display_range, (0, 0));
    assert_eq!(snapshot.page.current_page(), 1);
}

// ===== Results =====

#[test]
fn late_response_for_old_query_is_ignored() {
    let now = Instant::now();
    let mut state = started_with(45, now);
    let a = single_fetch(&state.update(
        CatalogAction::EditFilter(FilterEdit::Category("Herb".into())),
        now,
    ));
    let b = single_fetch(&state.update(
        CatalogAction::EditFilter(FilterEdit::Category("Cactus".into())),
        now,
    ));

    state.update(
        CatalogAction::FetchCompleted {
            id: b.id,
            outcome: Ok(PlantPage {
                data: plants(2, "cactus"),
                count: 2,
            }),
        },
        now,
    );
    state.update(
        CatalogAction::FetchCompleted {
            id: a.id,
            outcome: Ok(PlantPage {
                data: plants(7, "herb"),
                count: 7,
            }),
        },
        now,
    );

    let snapshot = state.snapshot();
    assert_eq!(snapshot.count, 2);
    assert!(snapshot.items.iter().all(|p| p.id.starts_with("cactus")));
    assert!(!snapshot.loading);
}

#[test]
fn failure_shows_error_keeps_items_and_retry_recovers() {
    let now = Instant::now();
    let mut state = started_with(5, now);
    let request = single_fetch(&state.update(
        CatalogAction::EditFilter(FilterEdit::Category("Tree".into())),
        now,
    ));

    state.update(
        CatalogAction::FetchCompleted {
            id: request.id,
            outcome: Err(FetchError::Status {
                status: 500,
                body: "oops".into(),
            }),
        },
        now,
    );

    let snapshot = state.snapshot();
    assert_eq!(snapshot.items.len(), 5, "Previous items stay visible");
    assert_eq!(
        snapshot.error.as_deref(),
        Some("Server responded with status 500")
    );
    assert!(!snapshot.loading);

    let retry = single_fetch(&state.update(CatalogAction::Retry, now));
    assert_eq!(retry.params(), request.params());
    assert!(state.is_loading());
}

// ===== Add plant =====

#[test]
fn invalid_draft_records_form_errors_without_request() {
    let now = Instant::now();
    let mut state = started_with(3, now);

    let effects = state.update(CatalogAction::SubmitPlant(PlantDraft::default()), now);

    assert!(effects.is_empty());
    assert!(!state.snapshot().form_errors.is_empty());
}

#[test]
fn created_plant_is_appended_to_current_list() {
    let now = Instant::now();
    let mut state = started_with(3, now);
    let draft = PlantDraft {
        name: "Pothos".into(),
        price: "199".into(),
        categories: vec!["Trailing".into()],
        image: "https://img/pothos.jpg".into(),
        ..PlantDraft::default()
    };

    let effects = state.update(CatalogAction::SubmitPlant(draft), now);
    assert!(matches!(effects.as_slice(), [Effect::CreatePlant(p)] if p.name == "Pothos"));
    assert!(state.snapshot().creating);

    let created = plants(1, "pothos").remove(0);
    let effects = state.update(CatalogAction::PlantCreated(Ok(created)), now);

    assert!(fetches(&effects).is_empty(), "No refetch after create");
    let snapshot = state.snapshot();
    assert_eq!(snapshot.items.len(), 4);
    assert_eq!(snapshot.count, 4);
    assert!(!snapshot.creating);
}

#[test]
fn create_failure_is_reported() {
    let now = Instant::now();
    let mut state = state();
    let draft = PlantDraft {
        name: "Fern".into(),
        price: "50".into(),
        categories: vec!["Indoor".into()],
        image: "https://img/fern.jpg".into(),
        ..PlantDraft::default()
    };
    state.update(CatalogAction::SubmitPlant(draft), now);

    state.update(
        CatalogAction::PlantCreated(Err(FetchError::Transport("refused".into()))),
        now,
    );

    let snapshot = state.snapshot();
    assert!(snapshot.create_error.is_some());
    assert!(snapshot.items.is_empty());
}

// ===== Teardown =====

#[test]
fn teardown_cancels_pending_search_and_ignores_later_actions() {
    let t0 = Instant::now();
    let mut state = started_with(10, t0);
    state.update(
        CatalogAction::EditFilter(FilterEdit::Search("ivy".into())),
        t0,
    );

    state.update(CatalogAction::Teardown, t0 + ms(50));

    assert!(state.is_torn_down());
    assert_eq!(state.next_deadline(), None);
    assert!(state.update(CatalogAction::Tick, t0 + ms(10_000)).is_empty());
}

//! Transition rules every engine must honour.

use crate::fixtures::{engines, ids, item, numbered};
use std::sync::Arc;
use view_model::{Action, ItemRef, SortKey, SortOrder, ViewEngine};

fn load(engine: &mut dyn ViewEngine, items: Arc<[ItemRef]>) {
    engine.dispatch(&Action::SetItems(items)).unwrap();
}

/// 45 items at 20 per page clamp to page 2 and stop there.
#[test]
fn pagination_clamps_to_last_page() {
    for mut engine in engines() {
        let kind = engine.kind();
        load(engine.as_mut(), numbered(45));

        let view = engine.dispatch(&Action::SetPage(99)).unwrap();
        assert_eq!(view.current_page, 2, "{kind}");
        assert_eq!(view.max_page(), 2, "{kind}");
        assert_eq!(view.total_pages(), 3, "{kind}");
        assert_eq!(engine.dispatch(&Action::NextPage).unwrap().current_page, 2, "{kind}");
        assert_eq!(engine.page_items().unwrap().len(), 5, "{kind}");

        assert_eq!(engine.dispatch(&Action::PrevPage).unwrap().current_page, 1, "{kind}");
        engine.dispatch(&Action::SetPage(0)).unwrap();
        assert_eq!(engine.dispatch(&Action::PrevPage).unwrap().current_page, 0, "{kind}");
    }
}

/// An empty collection has one page and nowhere to go.
#[test]
fn empty_collection_stays_on_page_zero() {
    for mut engine in engines() {
        let kind = engine.kind();
        load(engine.as_mut(), Arc::from(Vec::new()));
        let view = engine.dispatch(&Action::NextPage).unwrap();
        assert_eq!(view.current_page, 0, "{kind}");
        assert_eq!(view.max_page(), 0, "{kind}");
        assert_eq!(view.total_pages(), 1, "{kind}");
        assert!(engine.page_items().unwrap().is_empty(), "{kind}");
    }
}

/// Tag filtering always lands on the first page.
#[test]
fn tag_filter_resets_page() {
    for mut engine in engines() {
        let kind = engine.kind();
        load(engine.as_mut(), numbered(100));
        engine.dispatch(&Action::SetPage(3)).unwrap();

        let view = engine
            .dispatch(&Action::FilterByTag(Some("Horror".to_string())))
            .unwrap();
        assert_eq!(view.current_page, 0, "{kind}");
        assert_eq!(view.filtered_count, 50, "{kind}");
        assert!(engine
            .page_items()
            .unwrap()
            .iter()
            .all(|item| item.has_tag("Horror")));
    }
}

/// Sorting twice by rating changes nothing the second time.
#[test]
fn sort_by_rating_is_idempotent() {
    for mut engine in engines() {
        let kind = engine.kind();
        load(engine.as_mut(), numbered(60));
        engine.dispatch(&Action::SetPage(1)).unwrap();

        let once = engine.dispatch(&Action::SortByRating).unwrap();
        let once_page = ids(&engine.page_items().unwrap());
        let twice = engine.dispatch(&Action::SortByRating).unwrap();
        assert_eq!(once, twice, "{kind}");
        assert_eq!(once_page, ids(&engine.page_items().unwrap()), "{kind}");
        assert_eq!(twice.current_page, 1, "{kind}");
        assert_eq!(twice.sort_by, Some(SortKey::Rating), "{kind}");
    }
}

/// Ties keep their source order in both directions.
#[test]
fn rating_sort_is_stable() {
    let items: Arc<[ItemRef]> = vec![
        item("b", "B", &["Drama"], 2.0, true),
        item("a", "A", &["Drama"], 4.5, true),
        item("c", "C", &["Drama"], 4.5, true),
    ]
    .into();

    for mut engine in engines() {
        let kind = engine.kind();
        load(engine.as_mut(), Arc::clone(&items));

        engine.dispatch(&Action::SortByRating).unwrap();
        assert_eq!(ids(&engine.page_items().unwrap()), ["b", "a", "c"], "{kind}");

        let view = engine.dispatch(&Action::ToggleSortOrder).unwrap();
        assert_eq!(view.sort_order, SortOrder::Desc, "{kind}");
        assert_eq!(ids(&engine.page_items().unwrap()), ["a", "c", "b"], "{kind}");
    }
}

/// Title order ignores case and is the same on both engines.
#[test]
fn title_sort_ignores_case() {
    let items: Arc<[ItemRef]> = vec![
        item("1", "banana", &[], 3.0, true),
        item("2", "Apple", &[], 3.0, true),
        item("3", "cherry", &[], 3.0, true),
        item("4", "apple", &[], 3.0, true),
    ]
    .into();

    for mut engine in engines() {
        let kind = engine.kind();
        load(engine.as_mut(), Arc::clone(&items));
        engine.dispatch(&Action::SortByTitle).unwrap();
        assert_eq!(ids(&engine.page_items().unwrap()), ["4", "2", "1", "3"], "{kind}");
    }
}

/// Filtering before or after a descending title sort yields the same projection.
#[test]
fn filter_and_sort_commute() {
    let mut per_kind = Vec::new();
    for kind_index in 0..2 {
        let mut first = engines().swap_remove(kind_index);
        let mut second = engines().swap_remove(kind_index);
        load(first.as_mut(), numbered(80));
        load(second.as_mut(), numbered(80));

        first
            .dispatch(&Action::FilterByTag(Some("Action".to_string())))
            .unwrap();
        first.dispatch(&Action::FilterByPlayable(Some(true))).unwrap();
        first.dispatch(&Action::SortByTitle).unwrap();
        let a = first.dispatch(&Action::ToggleSortOrder).unwrap();

        second.dispatch(&Action::SortByTitle).unwrap();
        second.dispatch(&Action::ToggleSortOrder).unwrap();
        second.dispatch(&Action::FilterByPlayable(Some(true))).unwrap();
        let b = second
            .dispatch(&Action::FilterByTag(Some("Action".to_string())))
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(a.sort_order, SortOrder::Desc);
        assert_eq!(a.sort_by, Some(SortKey::Title));
        let page = ids(&first.page_items().unwrap());
        assert_eq!(page, ids(&second.page_items().unwrap()));
        per_kind.push(page);
    }
    assert_eq!(per_kind[0], per_kind[1]);
}

/// Reloading keeps the criteria and applies them to the new items.
#[test]
fn criteria_survive_reload() {
    for mut engine in engines() {
        let kind = engine.kind();
        load(engine.as_mut(), numbered(40));
        engine
            .dispatch(&Action::FilterByTag(Some("Action".to_string())))
            .unwrap();
        engine.dispatch(&Action::SortByRating).unwrap();

        let view = engine.dispatch(&Action::SetItems(numbered(100))).unwrap();
        assert_eq!(view.filter_tag.as_deref(), Some("Action"), "{kind}");
        assert_eq!(view.sort_by, Some(SortKey::Rating), "{kind}");
        assert_eq!(view.filtered_count, 25, "{kind}");
        assert_eq!(view.total_items, 100, "{kind}");
    }
}

/// Clearing both filters shows everything again.
#[test]
fn clearing_filters_restores_all_items() {
    for mut engine in engines() {
        let kind = engine.kind();
        load(engine.as_mut(), numbered(50));
        engine.dispatch(&Action::FilterByPlayable(Some(false))).unwrap();
        engine
            .dispatch(&Action::FilterByTag(Some("Comedy".to_string())))
            .unwrap();
        engine.dispatch(&Action::FilterByPlayable(None)).unwrap();
        let view = engine.dispatch(&Action::FilterByTag(None)).unwrap();
        assert_eq!(view.filtered_count, 50, "{kind}");
        assert_eq!(view.filter_playable, None, "{kind}");
    }
}

/// Unknown actions leave the view untouched.
#[test]
fn unknown_action_is_ignored() {
    let decoded: Action = serde_json::from_str(r#"{"type":"SHUFFLE"}"#).unwrap();
    assert_eq!(decoded, Action::Unknown);

    for mut engine in engines() {
        let kind = engine.kind();
        load(engine.as_mut(), numbered(30));
        engine.dispatch(&Action::SortByTitle).unwrap();
        let before = engine.view().unwrap();
        let page = ids(&engine.page_items().unwrap());
        assert_eq!(engine.dispatch(&decoded).unwrap(), before, "{kind}");
        assert_eq!(ids(&engine.page_items().unwrap()), page, "{kind}");
    }
}

//! Native and sandboxed engines agree page by page on generated data.

use crate::fixtures::{ids, native, sandboxed};
use item_source::{ItemSource, RandomItems};
use std::sync::Arc;
use view_model::{Action, ItemRef, ViewEngine};

fn seeded_items(count: usize) -> Arc<[ItemRef]> {
    RandomItems::seeded(0x5EED)
        .generate(count)
        .into_iter()
        .map(Arc::new)
        .collect()
}

fn assert_every_page_matches(native: &mut dyn ViewEngine, sandboxed: &mut dyn ViewEngine) {
    let pages = native.view().unwrap().total_pages();
    for page in 0..pages {
        let expected = native.dispatch(&Action::SetPage(page)).unwrap();
        let actual = sandboxed.dispatch(&Action::SetPage(page)).unwrap();
        assert_eq!(actual, expected, "page {page}");
        assert_eq!(
            ids(&sandboxed.page_items().unwrap()),
            ids(&native.page_items().unwrap()),
            "page {page}"
        );
    }
}

/// A seeded 1000-item catalogue projects identically under every criteria combination.
#[test]
fn engines_agree_on_every_page() {
    let _ = env_logger::builder().is_test(true).try_init();
    let items = seeded_items(1_000);
    let mut native = native();
    let mut sandboxed = sandboxed();

    let steps: Vec<Vec<Action>> = vec![
        vec![Action::SetItems(Arc::clone(&items))],
        vec![Action::SortByRating],
        vec![Action::ToggleSortOrder],
        vec![Action::SortByTitle],
        vec![Action::FilterByTag(Some("Action".to_string()))],
        vec![Action::FilterByPlayable(Some(true)), Action::ToggleSortOrder],
        vec![Action::FilterByTag(Some("Sci-Fi".to_string())), Action::SortByRating],
        vec![Action::FilterByPlayable(Some(false)), Action::FilterByTag(None)],
    ];

    for step in &steps {
        for action in step {
            let expected = native.dispatch(action).unwrap();
            let actual = sandboxed.dispatch(action).unwrap();
            assert_eq!(actual, expected, "after {}", action.name());
        }
        assert_every_page_matches(&mut native, &mut sandboxed);
    }
}

/// Item payloads survive the boundary unchanged.
#[test]
fn page_items_cross_the_boundary_intact() {
    let items = seeded_items(25);
    let mut native = native();
    let mut sandboxed = sandboxed();
    native.dispatch(&Action::SetItems(Arc::clone(&items))).unwrap();
    sandboxed.dispatch(&Action::SetItems(items)).unwrap();
    assert_eq!(sandboxed.page_items().unwrap(), native.page_items().unwrap());
}

//! Randomised checks of the projection invariant on both engines.

use crate::fixtures::{ids, item, native, sandboxed};
use proptest::collection;
use proptest::option;
use proptest::prelude::*;
use std::sync::Arc;
use view_model::{Action, ItemRef, ViewEngine};

const TAGS: [&str; 4] = ["Action", "Drama", "Horror", "Comedy"];
const TITLES: [&str; 5] = ["alpha", "Alpha", "beta", "Gamma", "gamma 2"];

fn arb_item() -> impl Strategy<Value = (usize, usize, u8, bool)> {
    (0..TITLES.len(), 0usize..16, 10u8..=50, any::<bool>())
}

fn arb_items() -> impl Strategy<Value = Arc<[ItemRef]>> {
    collection::vec(arb_item(), 0..70).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (title, tag_mask, rating, playable))| {
                let tags: Vec<&str> = TAGS
                    .iter()
                    .enumerate()
                    .filter(|(bit, _)| tag_mask & (1 << bit) != 0)
                    .map(|(_, tag)| *tag)
                    .collect();
                item(
                    &format!("item-{i}"),
                    TITLES[title],
                    &tags,
                    f64::from(rating) / 10.0,
                    playable,
                )
            })
            .collect()
    })
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::SortByRating),
        Just(Action::SortByTitle),
        Just(Action::ToggleSortOrder),
        Just(Action::NextPage),
        Just(Action::PrevPage),
        (0usize..6).prop_map(Action::SetPage),
        option::of(prop::sample::select(TAGS.to_vec()))
            .prop_map(|tag| Action::FilterByTag(tag.map(str::to_string))),
        option::of(any::<bool>()).prop_map(Action::FilterByPlayable),
    ]
}

proptest! {
    /// The native projection always equals a fresh filter-and-sort of its items.
    #[test]
    fn native_projection_matches_recomputation(
        items in arb_items(),
        actions in collection::vec(arb_action(), 1..40),
    ) {
        let mut engine = native();
        engine.apply(&Action::SetItems(items));
        for action in &actions {
            let state = engine.apply(action);
            let expected = state.criteria().project(state.items());
            prop_assert_eq!(ids(state.filtered_items()), ids(&expected));
            prop_assert!(state.current_page() <= state.max_page());
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// The sandboxed view tracks the native one after every action.
    #[test]
    fn sandboxed_tracks_native(
        items in arb_items(),
        actions in collection::vec(arb_action(), 1..25),
    ) {
        let mut native = native();
        let mut sandboxed = sandboxed();
        let load = Action::SetItems(items);
        native.dispatch(&load).unwrap();
        sandboxed.dispatch(&load).unwrap();

        for action in &actions {
            let expected = native.dispatch(action).unwrap();
            let actual = sandboxed.dispatch(action).unwrap();
            prop_assert_eq!(&actual, &expected);
            prop_assert!(actual.current_page <= actual.max_page());
            prop_assert_eq!(
                ids(&sandboxed.page_items().unwrap()),
                ids(&native.page_items().unwrap())
            );
        }
    }
}

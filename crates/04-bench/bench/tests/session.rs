//! Session commands end to end.

use bench::{
    BenchConfig, BenchmarkOutcome, DataSize, Immediate, Refusal, Session, SessionConfig,
};
use futures::executor::block_on;
use item_source::RandomItems;
use runtime_sandbox::{LoadStatus, SandboxLoader};
use std::sync::Arc;
use view_model::{Action, EngineError, EngineKind, SortKey, ViewEngine};

fn config() -> SessionConfig {
    SessionConfig {
        bench: BenchConfig {
            iterations: 2,
            ..BenchConfig::default()
        },
        seed: Some(5),
        ..SessionConfig::default()
    }
}

fn session_with(loader: SandboxLoader) -> Session {
    Session::with_parts(
        config(),
        Box::new(RandomItems::seeded(5)),
        loader,
        Arc::new(Immediate),
    )
}

/// Loading data fills the native engine and reports its timing.
#[test]
fn load_data_fills_native_engine() {
    let mut session = session_with(SandboxLoader::new());
    session.set_data_size(DataSize::Small);
    let report = session.load_data().unwrap();
    assert_eq!(report.items, 10_000);
    assert_eq!(report.sandboxed_ms, None);

    let view = session.view().unwrap();
    assert_eq!(view.reducer_type, EngineKind::Native);
    assert_eq!(view.total_items, 10_000);
    assert_eq!(view.filtered_count, 10_000);
    assert_eq!(view.total_pages, 500);
    assert_eq!(view.page_items.len(), 20);
    assert_eq!(view.metrics_summary, None);
}

/// Both engines show the same screen after the same dispatches.
#[test]
fn engines_agree_through_the_session() {
    let mut session = session_with(SandboxLoader::new());
    session.load_data().unwrap();
    block_on(session.load_sandbox()).unwrap();
    assert_eq!(session.sandbox_status(), LoadStatus::Ready);

    let script = [
        Action::FilterByTag(Some("Drama".to_string())),
        Action::SortByRating,
        Action::NextPage,
    ];
    for action in &script {
        session.dispatch(action).unwrap();
    }
    let native = session.view().unwrap();

    session.set_reducer_type(EngineKind::Sandboxed);
    for action in &script {
        session.dispatch(action).unwrap();
    }
    let sandboxed = session.view().unwrap();

    assert_eq!(sandboxed.reducer_type, EngineKind::Sandboxed);
    assert_eq!(sandboxed.filtered_count, native.filtered_count);
    assert_eq!(sandboxed.current_page, 1);
    assert_eq!(sandboxed.sort_by, Some(SortKey::Rating));
    assert_eq!(sandboxed.page_items, native.page_items);
}

/// Dispatches are recorded and cleared on engine switch.
#[test]
fn metrics_follow_dispatches() {
    let mut session = session_with(SandboxLoader::new());
    session.load_data().unwrap();
    session.dispatch(&Action::SortByTitle).unwrap();
    session.dispatch(&Action::NextPage).unwrap();
    assert_eq!(session.metrics().len(), 2);
    assert!(session.view().unwrap().metrics_summary.is_some());

    session.set_reducer_type(EngineKind::Native);
    assert!(session.metrics().is_empty());
    assert_eq!(session.view().unwrap().long_tasks, Some(0));
}

/// A failed sandbox load leaves the session usable in native mode.
#[test]
fn failed_sandbox_load_keeps_native_mode() {
    let mut session = session_with(SandboxLoader::with_boot(|| Err("no module".to_string())));
    session.load_data().unwrap();

    let err = block_on(session.load_sandbox()).unwrap_err();
    assert_eq!(err, EngineError::LoadFailure("no module".to_string()));
    assert_eq!(block_on(session.load_sandbox()).unwrap_err(), err);

    session.dispatch(&Action::NextPage).unwrap();
    assert_eq!(session.view().unwrap().current_page, 1);

    let outcome = block_on(session.run_benchmark()).unwrap();
    assert_eq!(outcome, BenchmarkOutcome::Refused(Refusal::SandboxNotLoaded));

    session.set_reducer_type(EngineKind::Sandboxed);
    assert_eq!(
        session.dispatch(&Action::NextPage).unwrap_err(),
        EngineError::NotLoaded
    );
}

/// A completed benchmark is kept for the presentation.
#[test]
fn benchmark_results_are_presented() {
    let mut session = session_with(SandboxLoader::new());
    assert_eq!(
        block_on(session.run_benchmark()).unwrap(),
        BenchmarkOutcome::Refused(Refusal::NoItems)
    );

    session.load_data().unwrap();
    block_on(session.load_sandbox()).unwrap();
    let BenchmarkOutcome::Completed(results) = block_on(session.run_benchmark()).unwrap() else {
        panic!("benchmark was refused");
    };
    assert_eq!(results.len(), 6);
    assert_eq!(session.view().unwrap().benchmark_results, results);
    assert_eq!(session.benchmark_results().len(), 6);
}

/// Loading the sandbox after native dispatches carries the native view over.
#[test]
fn sandbox_load_replays_the_native_view() {
    let mut session = session_with(SandboxLoader::new());
    session.load_data().unwrap();
    session
        .dispatch(&Action::FilterByTag(Some("Horror".to_string())))
        .unwrap();
    session.dispatch(&Action::SortByTitle).unwrap();
    session.dispatch(&Action::ToggleSortOrder).unwrap();
    session.dispatch(&Action::NextPage).unwrap();
    let native = session.view().unwrap();

    block_on(session.load_sandbox()).unwrap();
    session.set_reducer_type(EngineKind::Sandboxed);
    let sandboxed = session.view().unwrap();

    assert_eq!(sandboxed.filter_tag.as_deref(), Some("Horror"));
    assert_eq!(sandboxed.filtered_count, native.filtered_count);
    assert_eq!(sandboxed.sort_by, Some(SortKey::Title));
    assert_eq!(sandboxed.sort_order, native.sort_order);
    assert_eq!(sandboxed.current_page, 1);
    assert_eq!(sandboxed.page_items, native.page_items);
}

/// Resyncing discards sandbox-only dispatches.
#[test]
fn resync_brings_the_sandbox_back_to_native() {
    let mut session = session_with(SandboxLoader::new());
    session.load_data().unwrap();
    block_on(session.load_sandbox()).unwrap();
    session.dispatch(&Action::SortByRating).unwrap();

    session.set_reducer_type(EngineKind::Sandboxed);
    session
        .dispatch(&Action::FilterByPlayable(Some(false)))
        .unwrap();
    session.dispatch(&Action::SetPage(4)).unwrap();

    session.resync_sandbox().unwrap();
    let expected = session.native().view().unwrap();
    assert_eq!(session.sandbox().get_view_state().unwrap(), expected);
}

/// A run after sandbox-only dispatches leaves both engines where they were.
#[test]
fn benchmark_after_divergence_keeps_both_views() {
    let mut session = session_with(SandboxLoader::new());
    session.load_data().unwrap();
    block_on(session.load_sandbox()).unwrap();
    session.set_reducer_type(EngineKind::Sandboxed);
    session
        .dispatch(&Action::FilterByTag(Some("Horror".to_string())))
        .unwrap();
    session.dispatch(&Action::SetPage(7)).unwrap();
    let sandboxed_before = session.sandbox().get_view_state().unwrap();
    let native_before = session.native().view().unwrap();
    assert_ne!(sandboxed_before, native_before);

    let outcome = block_on(session.run_benchmark()).unwrap();
    assert!(matches!(outcome, BenchmarkOutcome::Completed(_)));
    assert_eq!(session.sandbox().get_view_state().unwrap(), sandboxed_before);
    assert_eq!(session.native().view().unwrap(), native_before);
}

/// The presented size follows the last load, not the pending selection.
#[test]
fn presented_size_is_the_loaded_size() {
    let mut session = session_with(SandboxLoader::new());
    assert_eq!(session.view().unwrap().data_size, 0);

    session.load_data().unwrap();
    session.set_data_size(DataSize::Medium);
    let view = session.view().unwrap();
    assert_eq!(view.data_size, 10_000);
    assert_eq!(view.data_size, view.total_items);

    session.load_data().unwrap();
    assert_eq!(session.view().unwrap().data_size, 20_000);
}

use futures::executor::block_on;
use runtime_native::NativeEngine;
use runtime_sandbox::{SandboxLoader, SandboxReducer};
use smallvec::SmallVec;
use std::sync::Arc;
use view_model::{Item, ItemRef, ViewEngine, DEFAULT_ITEMS_PER_PAGE};

pub fn item(id: &str, title: &str, tags: &[&str], rating: f64, is_playable: bool) -> ItemRef {
    Arc::new(Item {
        id: id.to_string(),
        title: title.to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect::<SmallVec<_>>(),
        rating,
        is_playable,
    })
}

/// `count` items with predictable tags, ratings and playability.
pub fn numbered(count: usize) -> Arc<[ItemRef]> {
    (0..count)
        .map(|i| {
            let tags: &[&str] = match i % 4 {
                0 => &["Horror"],
                1 => &["Action", "Drama"],
                2 => &["Drama"],
                _ => &["Horror", "Comedy"],
            };
            item(
                &format!("item-{i}"),
                &format!("Title {}", (i * 7) % 13),
                tags,
                1.0 + (i % 9) as f64 * 0.5,
                i % 5 != 0,
            )
        })
        .collect()
}

pub fn ids(items: &[ItemRef]) -> Vec<String> {
    items.iter().map(|item| item.id.clone()).collect()
}

pub fn native() -> NativeEngine {
    NativeEngine::new(DEFAULT_ITEMS_PER_PAGE)
}

pub fn sandboxed() -> SandboxReducer {
    let module = block_on(SandboxLoader::new().load()).expect("sandbox boots");
    SandboxReducer::with_module(module)
}

/// Both engines, boxed behind the shared seam.
pub fn engines() -> Vec<Box<dyn ViewEngine>> {
    vec![Box::new(native()), Box::new(sandboxed())]
}

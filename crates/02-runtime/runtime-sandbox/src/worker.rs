//! Serving loop executed on the sandbox worker thread.

use crate::codec::{Frame, SandboxCodec};
use crate::protocol::{Reply, Request};
use crate::store::SandboxStore;
use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, trace};
use view_model::{SortKey, DEFAULT_ITEMS_PER_PAGE};

/// Name given to the worker thread hosting the store.
pub const WORKER_THREAD_NAME: &str = "view-sandbox";

/// Serves requests until shutdown or until the caller side disconnects.
pub(crate) fn serve(requests: Receiver<Frame>, replies: Sender<Frame>) {
    let codec = SandboxCodec;
    let mut store = SandboxStore::new(DEFAULT_ITEMS_PER_PAGE);

    while let Ok(frame) = requests.recv() {
        let reply = match codec.decode_request(&frame) {
            Ok(Request::Shutdown) => break,
            Ok(request) => {
                trace!("sandbox {}", request.name());
                handle(&mut store, request)
            }
            Err(err) => Reply::Fault(err.to_string()),
        };

        let encoded = codec
            .encode_reply(&reply)
            .or_else(|err| codec.encode_reply(&Reply::Fault(err.to_string())));
        let Ok(encoded) = encoded else {
            error!("sandbox could not encode a reply; stopping");
            break;
        };
        if replies.send(encoded).is_err() {
            break;
        }
    }

    debug!("sandbox worker stopped");
}

fn handle(store: &mut SandboxStore, request: Request) -> Reply {
    match request {
        Request::InitStore { items_per_page } => {
            *store = SandboxStore::new(items_per_page);
            Reply::Ack
        }
        Request::SetItems { items } => {
            store.set_items(items);
            Reply::View(store.view_state())
        }
        Request::FilterByTag { tag } => {
            store.filter_by_tag(tag);
            Reply::View(store.view_state())
        }
        Request::FilterByPlayable { playable } => {
            store.filter_by_playable(playable);
            Reply::View(store.view_state())
        }
        Request::SortByRating => {
            store.sort_by(SortKey::Rating);
            Reply::View(store.view_state())
        }
        Request::SortByTitle => {
            store.sort_by(SortKey::Title);
            Reply::View(store.view_state())
        }
        Request::ToggleSortOrder => {
            store.toggle_sort_order();
            Reply::View(store.view_state())
        }
        Request::SetPage { page } => {
            store.set_page(page);
            Reply::View(store.view_state())
        }
        Request::NextPage => {
            store.next_page();
            Reply::View(store.view_state())
        }
        Request::PrevPage => {
            store.prev_page();
            Reply::View(store.view_state())
        }
        Request::GetPageItems => Reply::Items(store.page_items()),
        Request::GetViewState => Reply::View(store.view_state()),
        Request::Shutdown => Reply::Ack,
    }
}

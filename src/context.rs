//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use leptos::task::spawn_local;
use position_core::tree::flatten_forest;
use position_core::{Position, PositionRemote, PositionStore, RemoteResult};

use crate::components::TreeRow;
use crate::store::{store_bump_revision, store_push_notice, NoticeKind, UiStateStoreFields, UiStore};

/// The position store as owned by the app root
pub type SharedPositionStore = Rc<PositionStore<Box<dyn PositionRemote>>>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Canonical positions (not reactive by itself; reads track `ui.revision`)
    positions: StoredValue<SharedPositionStore, LocalStorage>,
    pub ui: UiStore,
}

impl AppContext {
    pub fn new(positions: SharedPositionStore, ui: UiStore) -> Self {
        Self {
            positions: StoredValue::new_local(positions),
            ui,
        }
    }

    pub fn positions(&self) -> SharedPositionStore {
        self.positions.get_value()
    }

    // ========================
    // Reactive reads
    // ========================

    /// Display rows of the current forest, in depth-first order
    pub fn tree_rows(&self) -> Vec<TreeRow> {
        self.ui.revision().track();
        let tree = self.positions.with_value(|store| store.tree_node());
        flatten_forest(&tree)
            .into_iter()
            .map(|(node, depth)| TreeRow {
                key: node.key.clone(),
                title: node.title.clone(),
                is_leaf: node.is_leaf,
                depth,
            })
            .collect()
    }

    pub fn all_positions(&self) -> Vec<Position> {
        self.ui.revision().track();
        self.positions.with_value(|store| store.all_positions())
    }

    pub fn parent_candidates(&self, editing: Option<&str>) -> Vec<Position> {
        self.ui.revision().track();
        self.positions.with_value(|store| store.parent_candidates(editing))
    }

    // ========================
    // Commands
    // ========================

    /// Reload the whole list from the backend
    pub fn reload(&self) {
        let ctx = *self;
        let store = self.positions();
        ctx.ui.loading().set(true);
        spawn_local(async move {
            let result = store.fetch_all().await;
            ctx.ui.loading().set(false);
            match result {
                Ok(()) => ctx.ui.load_error().set(None),
                Err(err) => {
                    log::error!("[APP] Loading positions failed: {}", err);
                    ctx.ui.load_error().set(Some(err.to_string()));
                }
            }
            store_bump_revision(&ctx.ui);
        });
    }

    /// Run a store operation in the background and refresh the view once it settles.
    ///
    /// Failures show a generic error toast; state was already left untouched by the store.
    pub fn dispatch<T, Fut>(&self, action: &'static str, operation: impl FnOnce(SharedPositionStore) -> Fut)
    where
        T: 'static,
        Fut: Future<Output = RemoteResult<T>> + 'static,
    {
        let ctx = *self;
        let pending = operation(self.positions());
        spawn_local(async move {
            if let Err(err) = pending.await {
                log::warn!("[APP] {} failed: {}", action, err);
                store_push_notice(&ctx.ui, NoticeKind::Error, "Error", &format!("Could not {}. Please try again.", action));
            }
            store_bump_revision(&ctx.ui);
        });
    }

    /// Select an already loaded position
    pub fn select(&self, id: &str) -> Option<Position> {
        let found = self.positions.with_value(|store| store.select_local(id));
        store_bump_revision(&self.ui);
        found
    }

    pub fn clear_selection(&self) {
        self.positions.with_value(|store| store.clear_selection());
        store_bump_revision(&self.ui);
    }
}

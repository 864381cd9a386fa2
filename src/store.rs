//! UI State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.
//! Positions themselves live in `position_core::PositionStore`; this store
//! only holds what the screen needs around them.

use leptos::prelude::*;
use leptos::task::spawn_local;
use position_core::{MutationKind, Position};
use reactive_stores::Store;

/// How long a toast stays on screen
const NOTICE_DURATION_MS: u32 = 3_000;

/// What the side drawer is showing
#[derive(Clone, Debug, PartialEq)]
pub enum DrawerMode {
    Create,
    Edit(Position),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u32,
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

/// Screen state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct UiState {
    /// Mirrors the position store revision (increment to trigger re-reads)
    pub revision: u64,
    /// Open drawer, None = closed
    pub drawer: Option<DrawerMode>,
    /// Toasts, oldest first
    pub notices: Vec<Notice>,
    pub next_notice_id: u32,
    /// Initial fetch in flight
    pub loading: bool,
    /// Last failed fetch, shown instead of the tree
    pub load_error: Option<String>,
}

/// Type alias for the store
pub type UiStore = Store<UiState>;

/// Get the UI store from context
pub fn use_ui_store() -> UiStore {
    expect_context::<UiStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_bump_revision(store: &UiStore) {
    store.revision().update(|v| *v += 1);
}

pub fn store_open_drawer(store: &UiStore, mode: DrawerMode) {
    store.drawer().set(Some(mode));
}

pub fn store_close_drawer(store: &UiStore) {
    store.drawer().set(None);
}

/// Show a toast that removes itself after a few seconds
pub fn store_push_notice(store: &UiStore, kind: NoticeKind, title: &str, message: &str) {
    let id = store.next_notice_id().get_untracked();
    store.next_notice_id().set(id.wrapping_add(1));
    store.notices().write().push(Notice {
        id,
        kind,
        title: title.to_string(),
        message: message.to_string(),
    });

    let store = *store;
    spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(NOTICE_DURATION_MS).await;
        store_dismiss_notice(&store, id);
    });
}

pub fn store_dismiss_notice(store: &UiStore, id: u32) {
    store.notices().write().retain(|n| n.id != id);
}

/// Toast text for a dispatched mutation
pub fn mutation_message(kind: MutationKind) -> &'static str {
    match kind {
        MutationKind::Create => "Position created successfully!",
        MutationKind::Update => "Position updated successfully!",
        MutationKind::Delete => "Position deleted successfully!",
    }
}

/// Feedback hook handed to the position store
pub fn notify_mutation(store: &UiStore, kind: MutationKind) {
    log::info!("[UI] {} dispatched", kind.as_str());
    store_push_notice(store, NoticeKind::Success, "Success", mutation_message(kind));
}

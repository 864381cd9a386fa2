//! Position Hierarchy App
//!
//! Composition root: builds the position store and lays out the screen.

use std::rc::Rc;

use leptos::prelude::*;
use position_core::{HttpPositionRemote, InMemoryPositionRemote, PositionRemote, PositionStore};
use reactive_stores::Store;

use crate::components::{NotificationToasts, PositionDrawer, PositionTreeView};
use crate::config::{AppConfig, Backend};
use crate::context::AppContext;
use crate::store::{notify_mutation, store_open_drawer, store_push_notice, DrawerMode, NoticeKind, UiState, UiStore};

/// Pick the remote collaborator; a bad URL falls back to the in-memory backend
fn build_remote(config: &AppConfig, ui: &UiStore) -> Box<dyn PositionRemote> {
    match &config.backend {
        Backend::InMemory => {
            log::info!("[APP] Using in-memory backend");
            Box::new(InMemoryPositionRemote::new())
        }
        Backend::Http(remote_config) => match HttpPositionRemote::new(remote_config.clone()) {
            Ok(remote) => {
                log::info!("[APP] Using backend at {}", remote_config.collection_url());
                Box::new(remote)
            }
            Err(err) => {
                log::error!("[APP] Backend config rejected ({}), using in-memory backend", err);
                store_push_notice(ui, NoticeKind::Error, "Configuration", &err.to_string());
                Box::new(InMemoryPositionRemote::new())
            }
        },
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_env();

    // State
    let ui: UiStore = Store::new(UiState::default());
    provide_context(ui);

    let remote = build_remote(&config, &ui);
    let positions = PositionStore::new(remote).with_notifier(move |kind| notify_mutation(&ui, kind));
    let ctx = AppContext::new(Rc::new(positions), ui);
    provide_context(ctx);

    // Load positions on mount
    ctx.reload();

    view! {
        <div class="app-layout">
            <main class="main-content">
                <header class="page-header">
                    <div>
                        <h1>"Employee Hierarchy"</h1>
                        <p class="subtitle">"Manage your organization's position structure"</p>
                    </div>
                    <button
                        type="button"
                        class="primary-btn"
                        on:click=move |_| {
                            ctx.clear_selection();
                            store_open_drawer(&ui, DrawerMode::Create);
                        }
                    >
                        "Create Position"
                    </button>
                </header>

                <section class="tree-panel">
                    <PositionTreeView />
                </section>

                <p class="position-count">{move || format!("{} positions", ctx.all_positions().len())}</p>
            </main>

            <PositionDrawer />
            <NotificationToasts />
        </div>
    }
}

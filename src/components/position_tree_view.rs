//! Position Tree View Component
//!
//! Displays the position forest as an indented, always-expanded tree.

use leptos::prelude::*;

use crate::components::TreeNodeRow;
use crate::context::AppContext;
use crate::store::{store_open_drawer, DrawerMode, UiStateStoreFields};

#[component]
pub fn PositionTreeView() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let rows = Memo::new(move |_| ctx.tree_rows());

    view! {
        <div class="tree-view">
            {move || {
                if ctx.ui.loading().get() {
                    view! { <div class="tree-message">"Loading positions..."</div> }.into_any()
                } else if let Some(err) = ctx.ui.load_error().get() {
                    view! {
                        <div class="tree-message error">
                            <p>"Could not load positions."</p>
                            <p class="tree-message-detail">{err}</p>
                            <button type="button" on:click=move |_| ctx.reload()>"Retry"</button>
                        </div>
                    }.into_any()
                } else if rows.with(|rows| rows.is_empty()) {
                    view! {
                        <div class="tree-empty">
                            <h3>"No positions yet"</h3>
                            <p>"Start building your organization's hierarchy"</p>
                            <button
                                type="button"
                                class="primary-btn"
                                on:click=move |_| store_open_drawer(&ctx.ui, DrawerMode::Create)
                            >
                                "Create Position"
                            </button>
                        </div>
                    }.into_any()
                } else {
                    view! {
                        <For
                            each=move || rows.get()
                            key=|row| (row.key.clone(), row.title.clone(), row.is_leaf, row.depth)
                            children=move |row| view! { <TreeNodeRow row=row /> }
                        />
                    }.into_any()
                }
            }}
        </div>
    }
}

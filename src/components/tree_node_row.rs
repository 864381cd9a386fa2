//! Tree Node Row Component
//!
//! One position in the tree view.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::store::{store_open_drawer, DrawerMode, UiStateStoreFields};

/// Flattened tree entry, ready for rendering
#[derive(Clone, Debug, PartialEq)]
pub struct TreeRow {
    pub key: String,
    pub title: String,
    pub is_leaf: bool,
    pub depth: usize,
}

/// A single position row; clicking it opens the edit drawer
#[component]
pub fn TreeNodeRow(row: TreeRow) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let key = row.key.clone();
    let indent = row.depth * 24;
    let is_selected = {
        let key = key.clone();
        move || matches!(ctx.ui.drawer().get(), Some(DrawerMode::Edit(p)) if p.id == key)
    };
    let row_class = move || if is_selected() { "tree-row selected" } else { "tree-row" };

    let on_click = move |_: web_sys::MouseEvent| {
        if let Some(found) = ctx.select(&key) {
            store_open_drawer(&ctx.ui, DrawerMode::Edit(found));
        }
    };

    view! {
        <div
            class=row_class
            style=format!("padding-left: {}px;", indent)
            on:click=on_click
        >
            {if row.is_leaf {
                view! { <span class="tree-leaf-marker">"·"</span> }.into_any()
            } else {
                view! { <span class="tree-branch-marker">"▼"</span> }.into_any()
            }}
            <span class="tree-title">{row.title}</span>
        </div>
    }
}

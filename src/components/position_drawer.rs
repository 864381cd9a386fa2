//! Position Drawer Component
//!
//! Right-hand panel hosting the position form.

use leptos::prelude::*;

use crate::components::PositionForm;
use crate::context::AppContext;
use crate::store::{store_close_drawer, DrawerMode, UiStateStoreFields};

fn drawer_title(mode: &DrawerMode) -> String {
    match mode {
        DrawerMode::Create => "Create Position".to_string(),
        DrawerMode::Edit(position) if position.name.is_empty() => "Edit: Position".to_string(),
        DrawerMode::Edit(position) => format!("Edit: {}", position.name),
    }
}

#[component]
pub fn PositionDrawer() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let close = move |_: web_sys::MouseEvent| {
        store_close_drawer(&ctx.ui);
        ctx.clear_selection();
    };

    // A new form per mode, so fields start from the selected record
    move || {
        ctx.ui.drawer().get().map(|mode| {
            view! {
                <div class="drawer-backdrop" on:click=close></div>
                <aside class="drawer">
                    <header class="drawer-header">
                        <h2>{drawer_title(&mode)}</h2>
                        <button type="button" class="drawer-close" on:click=close>"×"</button>
                    </header>
                    <div class="drawer-body">
                        <PositionForm mode=mode />
                    </div>
                </aside>
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use position_core::Position;

    #[test]
    fn test_drawer_title() {
        assert_eq!(drawer_title(&DrawerMode::Create), "Create Position");
        assert_eq!(drawer_title(&DrawerMode::Edit(Position::new("1", "CEO"))), "Edit: CEO");
        assert_eq!(drawer_title(&DrawerMode::Edit(Position::new("1", ""))), "Edit: Position");
    }
}

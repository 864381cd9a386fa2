//! Delete Position Button
//!
//! Danger button in the edit form. The first click arms it and shows what the
//! deletion does to the hierarchy; the second click deletes.

use leptos::prelude::*;
use position_core::Position;

use crate::context::AppContext;

/// Confirmation text for deleting `name` with `orphaned` direct reports
pub fn delete_prompt(name: &str, orphaned: usize) -> String {
    match orphaned {
        0 => format!("Delete \"{}\"?", name),
        1 => format!("Delete \"{}\"? 1 position below it moves to the top level.", name),
        n => format!("Delete \"{}\"? {} positions below it move to the top level.", name, n),
    }
}

/// Positions that name `id` as their parent
pub fn direct_reports(positions: &[Position], id: &str) -> usize {
    positions.iter().filter(|p| p.effective_parent_id() == Some(id)).count()
}

#[component]
pub fn DeletePositionButton(position: Position, #[prop(into)] on_confirm: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let armed = RwSignal::new(false);

    let Position { id, name, .. } = position;
    let prompt = move || delete_prompt(&name, direct_reports(&ctx.all_positions(), &id));

    move || {
        if armed.get() {
            view! {
                <div class="delete-armed" role="alert">
                    <span class="delete-prompt">{prompt.clone()}</span>
                    <button type="button" class="danger-btn" on:click=move |_| on_confirm.run(())>
                        "Yes, delete"
                    </button>
                    <button type="button" class="secondary-btn" on:click=move |_| armed.set(false)>
                        "Keep"
                    </button>
                </div>
            }
            .into_any()
        } else {
            view! {
                <button type="button" class="danger-btn" on:click=move |_| armed.set(true)>
                    "Delete Position"
                </button>
            }
            .into_any()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_prompt_mentions_orphans() {
        assert_eq!(delete_prompt("QA", 0), "Delete \"QA\"?");
        assert_eq!(
            delete_prompt("CTO", 1),
            "Delete \"CTO\"? 1 position below it moves to the top level."
        );
        assert_eq!(
            delete_prompt("CEO", 3),
            "Delete \"CEO\"? 3 positions below it move to the top level."
        );
    }

    #[test]
    fn test_direct_reports_ignores_grandchildren() {
        let positions = vec![
            Position::new("1", "CEO"),
            Position::new("2", "CTO").with_parent("1"),
            Position::new("3", "CFO").with_parent("1"),
            Position::new("4", "Dev").with_parent("2"),
        ];

        assert_eq!(direct_reports(&positions, "1"), 2);
        assert_eq!(direct_reports(&positions, "2"), 1);
        assert_eq!(direct_reports(&positions, "4"), 0);
    }
}

//! Position Form Component
//!
//! Create/edit form with name, description and parent selection.

use leptos::prelude::*;
use position_core::{Position, PositionDraft};

use crate::components::DeletePositionButton;
use crate::context::AppContext;
use crate::store::{store_close_drawer, DrawerMode};

/// Name after trimming, or None when the field is effectively empty
pub fn validate_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Optional text fields: blank means "not set"
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Build the draft submitted for a new position
pub fn draft_from_fields(name: &str, description: &str, parent_id: &str) -> Option<PositionDraft> {
    Some(PositionDraft {
        name: validate_name(name)?,
        description: non_blank(description),
        parent_id: non_blank(parent_id),
    })
}

/// Build the full record submitted when editing `current`
pub fn position_from_fields(current: &Position, name: &str, description: &str, parent_id: &str) -> Option<Position> {
    draft_from_fields(name, description, parent_id).map(|draft| draft.into_position(current.id.clone()))
}

/// Parent options whose name contains `query` (case-insensitive).
///
/// The currently chosen parent stays in the list so the select keeps showing it.
pub fn filter_candidates(candidates: &[Position], query: &str, chosen: &str) -> Vec<Position> {
    let needle = query.trim().to_lowercase();
    candidates
        .iter()
        .filter(|p| needle.is_empty() || p.id == chosen || p.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Form for creating or editing a position
#[component]
pub fn PositionForm(mode: DrawerMode) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let editing: Option<Position> = match &mode {
        DrawerMode::Create => None,
        DrawerMode::Edit(position) => Some(position.clone()),
    };
    let is_new = editing.is_none();

    let (name, set_name) = signal(editing.as_ref().map(|p| p.name.clone()).unwrap_or_default());
    let (description, set_description) =
        signal(editing.as_ref().and_then(|p| p.description.clone()).unwrap_or_default());
    let (parent_id, set_parent_id) =
        signal(editing.as_ref().and_then(|p| p.effective_parent_id().map(str::to_string)).unwrap_or_default());
    let (touched, set_touched) = signal(false);

    let editing_id = editing.as_ref().map(|p| p.id.clone());
    let (parent_query, set_parent_query) = signal(String::new());
    let parent_candidates = Memo::new(move |_| ctx.parent_candidates(editing_id.as_deref()));
    let parent_options =
        Memo::new(move |_| parent_candidates.with(|all| filter_candidates(all, &parent_query.get(), &parent_id.get())));
    let name_invalid = move || validate_name(&name.get()).is_none();

    let submit_target = editing.clone();
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_touched.set(true);
        let (name, description, parent_id) = (name.get(), description.get(), parent_id.get());

        match &submit_target {
            None => {
                let Some(draft) = draft_from_fields(&name, &description, &parent_id) else { return; };
                ctx.dispatch("create position", move |store| async move { store.create(draft).await });
            }
            Some(current) => {
                let Some(position) = position_from_fields(current, &name, &description, &parent_id) else { return; };
                ctx.dispatch("update position", move |store| async move { store.update(position).await });
            }
        }
        store_close_drawer(&ctx.ui);
        ctx.clear_selection();
    };

    let delete_button = editing.map(|current| {
        let id = current.id.clone();
        let on_confirm = Callback::new(move |_: ()| {
            let id = id.clone();
            ctx.dispatch("delete position", move |store| async move { store.delete(&id).await });
            store_close_drawer(&ctx.ui);
            ctx.clear_selection();
        });
        view! { <DeletePositionButton position=current on_confirm=on_confirm /> }
    });

    view! {
        <form class="position-form" on:submit=on_submit>
            <div class="form-field">
                <label>"Position Name " <span class="required">"*"</span></label>
                <input
                    type="text"
                    placeholder="Enter Name"
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                    on:blur=move |_| set_touched.set(true)
                />
                <Show when=move || touched.get() && name_invalid()>
                    <span class="field-error">"Name is required"</span>
                </Show>
            </div>

            <div class="form-field">
                <label>"Description"</label>
                <textarea
                    rows="3"
                    placeholder="Enter Description"
                    prop:value=move || description.get()
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                />
            </div>

            <div class="form-field">
                <label>"Parent Position"</label>
                <input
                    type="search"
                    class="parent-filter"
                    placeholder="Search positions"
                    prop:value=move || parent_query.get()
                    on:input=move |ev| set_parent_query.set(event_target_value(&ev))
                />
                <select on:change=move |ev| set_parent_id.set(event_target_value(&ev))>
                    <option value="" selected=move || parent_id.get().is_empty()>"(No parent)"</option>
                    <For
                        each=move || parent_options.get()
                        key=|p| (p.id.clone(), p.name.clone())
                        children=move |p| {
                            let id = p.id.clone();
                            let is_selected = move || parent_id.get() == id;
                            view! {
                                <option value=p.id.clone() selected=is_selected>{p.name.clone()}</option>
                            }
                        }
                    />
                </select>
            </div>

            <div class="form-actions">
                <button type="submit" class="primary-btn" disabled=name_invalid>
                    {if is_new { "Create Position" } else { "Update Position" }}
                </button>
                {delete_button}
            </div>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  CTO "), Some("CTO".to_string()));
        assert_eq!(validate_name("   "), None);
        assert_eq!(validate_name(""), None);
    }

    #[test]
    fn test_draft_from_fields() {
        let draft = draft_from_fields("QA", "", "2").unwrap();
        assert_eq!(draft, PositionDraft::new("QA").with_parent("2"));

        let draft = draft_from_fields("CEO", " Runs things ", "").unwrap();
        assert_eq!(draft, PositionDraft::new("CEO").with_description("Runs things"));

        assert!(draft_from_fields(" ", "desc", "1").is_none());
    }

    #[test]
    fn test_filter_candidates() {
        let candidates = vec![
            Position::new("1", "CEO"),
            Position::new("2", "CTO"),
            Position::new("3", "Accountant"),
        ];
        let names = |found: Vec<Position>| found.into_iter().map(|p| p.name).collect::<Vec<_>>();

        assert_eq!(names(filter_candidates(&candidates, "", "")), vec!["CEO", "CTO", "Accountant"]);
        assert_eq!(names(filter_candidates(&candidates, " ct ", "")), vec!["CTO"]);
        // The chosen parent survives a filter that does not match it
        assert_eq!(names(filter_candidates(&candidates, "acc", "1")), vec!["CEO", "Accountant"]);
        assert!(filter_candidates(&candidates, "zzz", "").is_empty());
    }

    #[test]
    fn test_position_from_fields_keeps_id() {
        let current = Position::new("2", "CTO").with_parent("1");

        let updated = position_from_fields(&current, "Chief Tech", "", "").unwrap();

        assert_eq!(updated, Position::new("2", "Chief Tech"));
    }
}

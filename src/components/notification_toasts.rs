//! Notification Toasts Component
//!
//! Bottom-right stack of short-lived success/error messages.

use leptos::prelude::*;

use crate::store::{store_dismiss_notice, use_ui_store, NoticeKind, UiStateStoreFields};

#[component]
pub fn NotificationToasts() -> impl IntoView {
    let store = use_ui_store();

    view! {
        <div class="toast-stack">
            <For
                each=move || store.notices().get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    let toast_class = match notice.kind {
                        NoticeKind::Success => "toast success",
                        NoticeKind::Error => "toast error",
                    };
                    view! {
                        <div class=toast_class on:click=move |_| store_dismiss_notice(&store, id)>
                            <strong class="toast-title">{notice.title}</strong>
                            <p class="toast-message">{notice.message}</p>
                        </div>
                    }
                }
            />
        </div>
    }
}

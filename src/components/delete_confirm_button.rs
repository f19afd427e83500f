//! Confirm Button Component
//!
//! Destructive actions (delete, cancel order) ask once inline before
//! running.

use leptos::prelude::*;

/// Two-step button: `label` first, then `question` with Yes / No.
#[component]
pub fn DeleteConfirmButton(
    #[prop(into, default = "Delete".to_string())] label: String,
    #[prop(into, default = "Are you sure?".to_string())] question: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let asking = RwSignal::new(false);
    let answer = move |ev: web_sys::MouseEvent, confirmed: bool| {
        ev.stop_propagation();
        asking.set(false);
        if confirmed {
            on_confirm.run(());
        }
    };

    view! {
        <Show
            when=move || asking.get()
            fallback=move || {
                let label = label.clone();
                view! {
                    <button
                        class="btn btn-danger-outline"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            asking.set(true);
                        }
                    >
                        {label}
                    </button>
                }
            }
        >
            <span class="delete-confirm">
                <span class="delete-confirm-text">{question.clone()}</span>
                <button class="btn btn-danger" on:click=move |ev| answer(ev, true)>"Yes"</button>
                <button class="btn" on:click=move |ev| answer(ev, false)>"No"</button>
            </span>
        </Show>
    }
}

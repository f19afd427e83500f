//! Snackbar Component
//!
//! Bottom toast for the last action outcome. Dismisses itself after a few
//! seconds; a newer message restarts the timer.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::context::use_app_context;

const DISMISS_AFTER_MS: u32 = 4_000;

#[component]
pub fn Snackbar() -> impl IntoView {
    let ctx = use_app_context();
    let (generation, set_generation) = signal(0u32);

    Effect::new(move |_| {
        if ctx.snackbar.get().is_none() {
            return;
        }
        let current = generation.get_untracked().wrapping_add(1);
        set_generation.set(current);
        Timeout::new(DISMISS_AFTER_MS, move || {
            if generation.get_untracked() == current {
                ctx.dismiss_snackbar();
            }
        })
        .forget();
    });

    view! {
        {move || ctx.snackbar.get().map(|result| {
            let class = if result.success { "snackbar success" } else { "snackbar error" };
            view! {
                <div class=class role="status">
                    <span>{result.message}</span>
                    <button class="snackbar-close" on:click=move |_| ctx.dismiss_snackbar()>"×"</button>
                </div>
            }
        })}
    }
}

//! Settings
//!
//! Device settings (server address, theme, connectivity check) for
//! everyone; account settings (preferences, password, sign-out) once
//! signed in.

use bookstore_core::api::services::{auth, catalog, health, preferences};
use bookstore_core::config::{normalize_server, ClientConfig};
use bookstore_core::domain::UserPreferences;
use bookstore_core::prefs::{AppSettings, ThemeMode};
use bookstore_core::{validation, ApiError, ErrorCode};
use futures::future::{select, Either};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};

use crate::components::FormField;
use crate::context::use_app_context;
use crate::pages::Page;
use crate::storage::LocalStorageStore;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::theme::apply_theme;

#[derive(Debug, Clone, PartialEq)]
enum Connectivity {
    Idle,
    Checking,
    Reachable(u32),
    Unreachable(String),
}

/// Ping the server, giving up after the client's connectivity timeout even
/// where the transport has no timeout of its own.
async fn check_connectivity(api: bookstore_core::ApiClient) -> Result<u32, ApiError> {
    let timeout = api.connectivity_timeout();
    let started = js_sys::Date::now();
    let ping = Box::pin(async move { health::ping_with_timeout(&api, timeout).await });
    let timer = Box::pin(TimeoutFuture::new(timeout.as_millis() as u32));
    match select(ping, timer).await {
        Either::Left((result, _)) => result.map(|_| (js_sys::Date::now() - started).max(0.0) as u32),
        Either::Right(_) => Err(ApiError::new(
            ErrorCode::Timeout,
            format!("No answer within {} seconds", timeout.as_secs()),
        )),
    }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let ctx = use_app_context();
    let settings = expect_context::<RwSignal<AppSettings>>();

    let server = RwSignal::new(settings.get_untracked().server_override.unwrap_or_default());
    let (status, set_status) = signal(Connectivity::Idle);

    let persist = move || {
        if let Err(e) = settings.get_untracked().save(&LocalStorageStore) {
            warn!("Could not save settings: {}", e);
        }
    };

    let save_server = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let raw = server.get();
        let server_override = if raw.trim().is_empty() {
            None
        } else {
            match normalize_server(&raw) {
                Some(s) => Some(s),
                None => {
                    ctx.report_error(&ApiError::validation("Enter a host like 192.168.1.5:8000"));
                    return;
                }
            }
        };
        server.set(server_override.clone().unwrap_or_default());
        settings.update(|s| s.server_override = server_override.clone());
        persist();
        let config = ClientConfig::default().with_override(server_override.as_deref());
        ctx.api().set_base_url(&config);
        info!("Server set to {}", config.server);
        set_status.set(Connectivity::Idle);
        ctx.toast(format!("Using {}", config.api_base()));
        ctx.reload();
    };

    let test_connection = move |_| {
        set_status.set(Connectivity::Checking);
        let api = ctx.api();
        spawn_local(async move {
            match check_connectivity(api).await {
                Ok(ms) => set_status.set(Connectivity::Reachable(ms)),
                Err(e) => set_status.set(Connectivity::Unreachable(e.message)),
            }
        });
    };

    let set_theme = move |ev: web_sys::Event| {
        let mode = ThemeMode::parse(&event_target_value(&ev));
        settings.update(|s| s.theme = mode);
        apply_theme(mode);
        persist();
    };

    view! {
        <section class="settings-page">
            <h1>"Settings"</h1>

            <form class="settings-card" on:submit=save_server>
                <h2>"Server"</h2>
                <p class="muted">{move || format!("Current API: {}", ctx.api().base_url())}</p>
                <FormField label="Server address" value=server placeholder="192.168.1.5:8000 (empty for default)" />
                <div class="form-actions">
                    <button type="submit" class="btn btn-primary">"Save"</button>
                    <button type="button" class="btn" on:click=test_connection
                        disabled=move || status.get() == Connectivity::Checking>
                        "Test connection"
                    </button>
                </div>
                {move || match status.get() {
                    Connectivity::Idle => None,
                    Connectivity::Checking => Some(view! { <p class="muted">"Checking…"</p> }.into_any()),
                    Connectivity::Reachable(ms) => Some(view! {
                        <p class="status-ok">{format!("Server reachable ({} ms)", ms)}</p>
                    }.into_any()),
                    Connectivity::Unreachable(msg) => Some(view! {
                        <p class="status-error">{format!("Server unreachable: {}", msg)}</p>
                    }.into_any()),
                }}
            </form>

            <div class="settings-card">
                <h2>"Appearance"</h2>
                <select class="input" on:change=set_theme>
                    {ThemeMode::ALL.into_iter().map(|mode| view! {
                        <option value=mode.as_str() selected=move || settings.with(|s| s.theme == mode)>
                            {mode.label()}
                        </option>
                    }).collect_view()}
                </select>
            </div>

            <Show
                when=move || ctx.is_signed_in()
                fallback=move || view! {
                    <div class="settings-card">
                        <button class="btn btn-primary" on:click=move |_| ctx.navigate(Page::Login)>"Sign in"</button>
                    </div>
                }
            >
                <AccountSettings />
            </Show>
        </section>
    }
}

#[component]
fn AccountSettings() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let current = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirmation = RwSignal::new(String::new());
    let (submitted, set_submitted) = signal(false);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let api = ctx.api();
        spawn_local(async move {
            match preferences::get_preferences(&api).await {
                Ok(prefs) => store.preferences().set(prefs),
                Err(e) => ctx.check_auth(&e),
            }
            if store.categories().with(|c| c.is_empty()) {
                let result = catalog::list_categories(&api).await;
                store.categories().write().finish(result);
            }
        });
    });

    let save_prefs = move |change: Box<dyn FnOnce(&mut UserPreferences)>| {
        let mut prefs = store.preferences().get();
        change(&mut prefs);
        let api = ctx.api();
        spawn_local(async move {
            let result = preferences::update_preferences(&api, &prefs).await;
            match &result {
                Ok(saved) => store.preferences().set(saved.clone()),
                Err(e) => ctx.report_error(e),
            }
        });
    };

    let change_password = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_submitted.set(true);
        let (old, new) = (current.get(), new_password.get());
        if let Some(msg) = validation::confirm_password(&new, &confirmation.get()) {
            ctx.report_error(&ApiError::validation(msg));
            return;
        }
        let api = ctx.api();
        spawn_local(async move {
            let result = auth::change_password(&api, &old, &new).await;
            if ctx.report(&result, "Password changed") {
                current.set(String::new());
                new_password.set(String::new());
                confirmation.set(String::new());
                set_submitted.set(false);
            }
        });
    };

    let sign_out = move |_| {
        let api = ctx.api();
        spawn_local(async move {
            auth::logout(&api).await;
            ctx.signed_out();
            ctx.toast("Signed out");
            ctx.navigate(Page::Books);
        });
    };

    view! {
        <div class="settings-card">
            <h2>"Notifications"</h2>
            <label class="toggle">
                <input type="checkbox"
                    prop:checked=move || store.preferences().with(|p| p.order_notifications)
                    on:change=move |ev| {
                        let on = event_target_checked(&ev);
                        save_prefs(Box::new(move |p| p.order_notifications = on));
                    } />
                <span>"Order updates"</span>
            </label>
            <label class="toggle">
                <input type="checkbox"
                    prop:checked=move || store.preferences().with(|p| p.borrow_notifications)
                    on:change=move |ev| {
                        let on = event_target_checked(&ev);
                        save_prefs(Box::new(move |p| p.borrow_notifications = on));
                    } />
                <span>"Borrowing reminders"</span>
            </label>
            <label class="toggle">
                <input type="checkbox"
                    prop:checked=move || store.preferences().with(|p| p.newsletter)
                    on:change=move |ev| {
                        let on = event_target_checked(&ev);
                        save_prefs(Box::new(move |p| p.newsletter = on));
                    } />
                <span>"Newsletter"</span>
            </label>

            <h3>"Favourite categories"</h3>
            <div class="chip-list">
                {move || store.categories().with(|c| c.items.clone()).into_iter().map(|cat| {
                    let id = cat.id.clone();
                    let id_toggle = cat.id.clone();
                    view! {
                        <button
                            class=move || if store.preferences().with(|p| p.is_favorite(&id)) { "chip active" } else { "chip" }
                            on:click=move |_| {
                                let id = id_toggle.clone();
                                save_prefs(Box::new(move |p| p.toggle_favorite(&id)));
                            }
                        >
                            {cat.name.clone()}
                        </button>
                    }
                }).collect_view()}
            </div>
        </div>

        <form class="settings-card" on:submit=change_password>
            <h2>"Change password"</h2>
            <FormField label="Current password" value=current input_type="password" />
            <FormField label="New password" value=new_password input_type="password"
                validator=validation::password submitted=submitted />
            <FormField label="Confirm new password" value=confirmation input_type="password" />
            <button type="submit" class="btn btn-primary">"Change password"</button>
        </form>

        <div class="settings-card">
            <button class="btn btn-danger" on:click=sign_out>"Sign out"</button>
        </div>
    }
}

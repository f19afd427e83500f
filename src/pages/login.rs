//! Sign-in and Registration

use bookstore_core::api::services::auth::{self, RegisterRequest};
use bookstore_core::validation;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::FormField;
use crate::context::use_app_context;
use crate::pages::Page;

fn password_present(value: &str) -> Option<String> {
    validation::required(value, "Password")
}

fn optional_phone(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        validation::phone(value)
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app_context();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (submitted, set_submitted) = signal(false);
    let (busy, set_busy) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (resetting, set_resetting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_submitted.set(true);
        let (email, password) = (email.get(), password.get());
        if let Some(msg) = validation::validate_all([validation::email(&email), password_present(&password)]) {
            set_error.set(Some(msg));
            return;
        }
        set_busy.set(true);
        set_error.set(None);
        let api = ctx.api();
        spawn_local(async move {
            match auth::login(&api, &email, &password).await {
                Ok(session) => ctx.signed_in(session),
                Err(e) => set_error.set(Some(e.message)),
            }
            set_busy.set(false);
        });
    };

    let send_reset = move |_| {
        let address = email.get();
        if let Some(msg) = validation::email(&address) {
            set_error.set(Some(msg));
            return;
        }
        let api = ctx.api();
        spawn_local(async move {
            let result = auth::forgot_password(&api, &address).await;
            if ctx.report(&result, "If the address is registered, a reset link is on its way") {
                set_resetting.set(false);
            }
        });
    };

    view! {
        <section class="auth-page">
            <h1>"Sign in"</h1>
            <form class="auth-form" on:submit=on_submit>
                <FormField label="Email" value=email input_type="email" validator=validation::email submitted=submitted />
                <Show when=move || !resetting.get()>
                    <FormField label="Password" value=password input_type="password" validator=password_present submitted=submitted />
                </Show>
                {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
                <Show
                    when=move || !resetting.get()
                    fallback=move || view! {
                        <div class="form-actions">
                            <button type="button" class="btn btn-primary" on:click=send_reset>"Send reset link"</button>
                            <button type="button" class="btn-link" on:click=move |_| set_resetting.set(false)>"Back to sign in"</button>
                        </div>
                    }
                >
                    <div class="form-actions">
                        <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                            {move || if busy.get() { "Signing in…" } else { "Sign in" }}
                        </button>
                        <button type="button" class="btn-link" on:click=move |_| set_resetting.set(true)>"Forgot password?"</button>
                    </div>
                </Show>
            </form>
            <p class="auth-switch">
                "New here? "
                <button class="btn-link" on:click=move |_| ctx.navigate(Page::Register)>"Create an account"</button>
            </p>
        </section>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let ctx = use_app_context();
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let address = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirmation = RwSignal::new(String::new());
    let (submitted, set_submitted) = signal(false);
    let (busy, set_busy) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_submitted.set(true);
        let optional = |s: String| Some(s.trim().to_string()).filter(|s| !s.is_empty());
        let request = RegisterRequest {
            name: name.get().trim().to_string(),
            email: email.get().trim().to_string(),
            password: password.get(),
            phone: optional(phone.get()),
            address: optional(address.get()),
        };
        if let Some(msg) = request.validate(&confirmation.get()) {
            set_error.set(Some(msg));
            return;
        }
        set_busy.set(true);
        set_error.set(None);
        let api = ctx.api();
        spawn_local(async move {
            match auth::register(&api, &request).await {
                Ok(session) => {
                    ctx.toast("Welcome! Your account is ready");
                    ctx.signed_in(session);
                }
                Err(e) => set_error.set(Some(e.message)),
            }
            set_busy.set(false);
        });
    };

    view! {
        <section class="auth-page">
            <h1>"Create account"</h1>
            <form class="auth-form" on:submit=on_submit>
                <FormField label="Full name" value=name validator=validation::name submitted=submitted />
                <FormField label="Email" value=email input_type="email" validator=validation::email submitted=submitted />
                <FormField label="Phone (optional)" value=phone input_type="tel" validator=optional_phone submitted=submitted />
                <FormField label="Address (optional)" value=address />
                <FormField label="Password" value=password input_type="password" validator=validation::password submitted=submitted />
                <FormField label="Confirm password" value=confirmation input_type="password" />
                {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
                <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                    {move || if busy.get() { "Creating…" } else { "Create account" }}
                </button>
            </form>
            <p class="auth-switch">
                "Already registered? "
                <button class="btn-link" on:click=move |_| ctx.navigate(Page::Login)>"Sign in"</button>
            </p>
        </section>
    }
}

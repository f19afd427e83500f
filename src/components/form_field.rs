//! Validated Form Fields
//!
//! Inputs bound to an `RwSignal<String>` that show their validator's
//! message once the user has touched the field or tried to submit.

use leptos::prelude::*;

pub type Validator = fn(&str) -> Option<String>;

#[component]
pub fn FormField(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(into, default = "text".to_string())] input_type: String,
    #[prop(optional)] validator: Option<Validator>,
    /// Set once the form was submitted so untouched fields show errors too
    #[prop(optional, into)]
    submitted: Option<Signal<bool>>,
    #[prop(into, default = String::new())] placeholder: String,
) -> impl IntoView {
    let (touched, set_touched) = signal(false);
    let error = move || {
        let show = touched.get() || submitted.map(|s| s.get()).unwrap_or(false);
        if !show {
            return None;
        }
        validator.and_then(|check| value.with(|v| check(v)))
    };

    view! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            <input
                type=input_type
                placeholder=placeholder
                class=move || if error().is_some() { "input invalid" } else { "input" }
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                on:blur=move |_| set_touched.set(true)
            />
            {move || error().map(|msg| view! { <span class="field-error">{msg}</span> })}
        </label>
    }
}

#[component]
pub fn TextAreaField(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(into, default = String::new())] placeholder: String,
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            <textarea
                class="input"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            ></textarea>
        </label>
    }
}

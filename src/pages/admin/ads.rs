//! Advertisements shown on the catalogue page.

use bookstore_core::api::services::ads::{self, AdInput};
use bookstore_core::domain::PublicAd;
use bookstore_core::format::format_opt_date;
use bookstore_core::state::ListState;
use bookstore_core::validation;
use chrono::{DateTime, Utc};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{list_placeholder, load_list, optional_text};
use crate::components::{DeleteConfirmButton, FormField, ListErrorBanner, StatusBadge, TextAreaField, Tone};
use crate::context::use_app_context;

fn date_field(date: Option<&DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

#[component]
pub(super) fn AdsAdmin() -> impl IntoView {
    let ctx = use_app_context();
    let list = RwSignal::new(ListState::<PublicAd>::default());
    let editing = RwSignal::new(None::<String>);
    let title = RwSignal::new(String::new());
    let content = RwSignal::new(String::new());
    let image_url = RwSignal::new(String::new());
    let link_url = RwSignal::new(String::new());
    let start_date = RwSignal::new(String::new());
    let end_date = RwSignal::new(String::new());
    let active = RwSignal::new(true);
    let (submitted, set_submitted) = signal(false);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        load_list(ctx, list, |api| async move { ads::all_ads(&api).await });
    });

    let reset = move || {
        editing.set(None);
        for field in [title, content, image_url, link_url, start_date, end_date] {
            field.set(String::new());
        }
        active.set(true);
        set_submitted.set(false);
    };

    let edit = move |ad: &PublicAd| {
        editing.set(Some(ad.id.clone()));
        title.set(ad.title.clone());
        content.set(ad.content.clone().unwrap_or_default());
        image_url.set(ad.image_url.clone().unwrap_or_default());
        link_url.set(ad.link_url.clone().unwrap_or_default());
        start_date.set(date_field(ad.start_date.as_ref()));
        end_date.set(date_field(ad.end_date.as_ref()));
        active.set(ad.active);
    };

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_submitted.set(true);
        let input = AdInput {
            title: title.get().trim().to_string(),
            content: content.get().trim().to_string(),
            image_url: optional_text(&image_url.get()),
            link_url: optional_text(&link_url.get()),
            start_date: start_date.get().trim().to_string(),
            end_date: end_date.get().trim().to_string(),
            active: active.get(),
        };
        let target = editing.get_untracked();
        let api = ctx.api();
        spawn_local(async move {
            let result = match &target {
                Some(id) => ads::update_ad(&api, id, &input).await,
                None => ads::create_ad(&api, &input).await,
            };
            if let Ok(ad) = &result {
                list.update(|l| l.upsert(ad.clone()));
                reset();
            }
            ctx.report(&result, "Ad saved");
        });
    };

    let delete = move |id: String| {
        let api = ctx.api();
        spawn_local(async move {
            let result = ads::delete_ad(&api, &id).await;
            if result.is_ok() {
                list.update(|l| {
                    l.remove(&id);
                });
            }
            ctx.report(&result, "Ad deleted");
        });
    };

    let retry = Callback::new(move |_| ctx.reload());

    view! {
        <form class="admin-form" on:submit=save>
            <FormField label="Title" value=title submitted=submitted
                validator=|v: &str| validation::required(v, "Title") />
            <TextAreaField label="Text" value=content />
            <div class="form-row">
                <FormField label="Starts" value=start_date input_type="date" submitted=submitted
                    validator=validation::date />
                <FormField label="Ends" value=end_date input_type="date" submitted=submitted
                    validator=validation::date />
            </div>
            <FormField label="Image URL" value=image_url placeholder="Optional" />
            <FormField label="Link URL" value=link_url placeholder="Optional" />
            <label class="toggle">
                <input type="checkbox" prop:checked=move || active.get()
                    on:change=move |ev| active.set(event_target_checked(&ev)) />
                <span>"Active"</span>
            </label>
            <div class="form-actions">
                <button type="submit" class="btn btn-primary">
                    {move || if editing.get().is_some() { "Save changes" } else { "Create ad" }}
                </button>
                <Show when=move || editing.get().is_some()>
                    <button type="button" class="btn" on:click=move |_| reset()>"Cancel"</button>
                </Show>
            </div>
        </form>
        <ListErrorBanner error=Signal::derive(move || list.with(|s| s.error.clone())) on_retry=retry />
        {move || list.with(|state| {
            if let Some(placeholder) = list_placeholder(state, "No ads yet") {
                return placeholder;
            }
            let now = Utc::now();
            state.items.iter().cloned().map(|ad| {
                let id = ad.id.clone();
                let (label, tone) = if ad.is_live(now) {
                    ("Live", Tone::Success)
                } else if ad.is_expired(now) {
                    ("Expired", Tone::Neutral)
                } else {
                    ("Scheduled", Tone::Info)
                };
                let to_edit = ad.clone();
                view! {
                    <article class="ad-row">
                        <header>
                            <strong>{ad.title.clone()}</strong>
                            <StatusBadge label=label tone=tone />
                        </header>
                        <p class="muted">
                            {format!(
                                "{} to {}",
                                format_opt_date(ad.start_date.as_ref()),
                                format_opt_date(ad.end_date.as_ref()),
                            )}
                        </p>
                        <div class="row-actions">
                            <button class="btn" on:click=move |_| edit(&to_edit)>"Edit"</button>
                            <DeleteConfirmButton on_confirm=move |_| delete(id.clone()) />
                        </div>
                    </article>
                }
            }).collect_view().into_any()
        })}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_date_field() {
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();
        assert_eq!(date_field(Some(&date)), "2024-03-05");
        assert_eq!(date_field(None), "");
    }
}

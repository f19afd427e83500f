//! Application Context
//!
//! Shared state provided via Leptos Context API.

use bookstore_core::domain::{AuthSession, Role};
use bookstore_core::prefs;
use bookstore_core::state::ActionResult;
use bookstore_core::{ApiClient, ApiError};
use leptos::prelude::*;
use log::{info, warn};

use crate::pages::Page;
use crate::storage::LocalStorageStore;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current page - read
    pub page: ReadSignal<Page>,
    set_page: WriteSignal<Page>,
    /// Signed-in session, `None` when signed out - read
    pub session: ReadSignal<Option<AuthSession>>,
    set_session: WriteSignal<Option<AuthSession>>,
    /// Trigger to refetch after a mutation - read
    pub reload_trigger: ReadSignal<u32>,
    set_reload_trigger: WriteSignal<u32>,
    /// Last action outcome shown in the snackbar - read
    pub snackbar: ReadSignal<Option<ActionResult>>,
    set_snackbar: WriteSignal<Option<ActionResult>>,
    api: StoredValue<ApiClient>,
}

impl AppContext {
    pub fn new(api: ApiClient, session: Option<AuthSession>) -> Self {
        let start = match &session {
            Some(s) => Page::home_for(s.role()),
            None => Page::Books,
        };
        let (page, set_page) = signal(start);
        let (session, set_session) = signal(session);
        let (reload_trigger, set_reload_trigger) = signal(0u32);
        let (snackbar, set_snackbar) = signal(None);
        Self {
            page,
            set_page,
            session,
            set_session,
            reload_trigger,
            set_reload_trigger,
            snackbar,
            set_snackbar,
            api: StoredValue::new(api),
        }
    }

    /// Shared API client (cheap clone).
    pub fn api(&self) -> ApiClient {
        self.api.get_value()
    }

    pub fn role(&self) -> Option<Role> {
        self.session.with(|s| s.as_ref().map(AuthSession::role))
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.with(Option::is_some)
    }

    /// Switch page. Pages the current role may not see go to sign-in
    /// (signed out) or the role's home page.
    pub fn navigate(&self, page: Page) {
        let target = match self.role() {
            None if page.requires_sign_in() => Page::Login,
            Some(role) if !page.visible_to(Some(role)) => Page::home_for(role),
            _ => page,
        };
        self.set_page.set(target);
    }

    /// Trigger a reload of the current lists
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn notify(&self, result: ActionResult) {
        if result.needs_sign_in() {
            self.signed_out();
            self.set_page.set(Page::Login);
        }
        self.set_snackbar.set(Some(result));
    }

    pub fn dismiss_snackbar(&self) {
        self.set_snackbar.set(None);
    }

    pub fn toast(&self, message: impl Into<String>) {
        self.notify(ActionResult::ok(message));
    }

    /// Snackbar for an error; auth failures also end the session.
    pub fn report_error(&self, error: &ApiError) {
        self.notify(ActionResult::failed(error));
    }

    /// Snackbar for a mutation outcome, reloading lists on success.
    pub fn report<T>(&self, result: &Result<T, ApiError>, success_message: &str) -> bool {
        let outcome = ActionResult::from_result(result, success_message);
        let success = outcome.success;
        self.notify(outcome);
        if success {
            self.reload();
        }
        success
    }

    /// Only auth failures need handling when an error is already shown inline.
    pub fn check_auth(&self, error: &ApiError) {
        if error.is_auth_failure() {
            self.notify(ActionResult::failed(error));
        }
    }

    pub fn signed_in(&self, session: AuthSession) {
        if let Err(e) = prefs::save_session(&LocalStorageStore, &session) {
            warn!("Could not persist session: {}", e);
        }
        let home = Page::home_for(session.role());
        self.api().set_token(Some(session.token.clone()));
        self.set_session.set(Some(session));
        self.set_page.set(home);
        self.reload();
    }

    /// Forget the session locally. The logout request itself is sent by
    /// the settings page.
    pub fn signed_out(&self) {
        self.api().set_token(None);
        if let Err(e) = prefs::clear_session(&LocalStorageStore) {
            warn!("Could not clear saved session: {}", e);
        }
        self.set_session.set(None);
        info!("Session cleared");
    }

    pub fn go_to_login(&self) {
        self.set_page.set(Page::Login);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

//! Login / register page.

pub mod password;

use log::{info, warn};
use std::rc::Rc;
use std::time::Instant;
use thiserror::Error;

use crate::api::{Reply, Request};
use crate::auth::password::Strength;
use crate::config::DemoAccount;
use crate::domain::email::Credentials;
use crate::error::ApiError;
use crate::flow::{Controller, Navigation, Route, Step};
use crate::notify::{Level, TOAST_TTL, Toast};
use crate::session;
use crate::store::repo::KeyValueStore;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Password is too weak, please follow the requirements")]
    WeakPassword,
    #[error("The two passwords do not match")]
    PasswordMismatch,
}

/// Checks run in order; the first failure is reported.
pub fn validate_registration(email: &str, password: &str, confirm: &str) -> Result<(), RegisterError> {
    if email.is_empty() || password.is_empty() || confirm.is_empty() {
        return Err(RegisterError::MissingFields);
    }
    if !email.contains('@') || !email.contains('.') {
        return Err(RegisterError::InvalidEmail);
    }
    if !password::meets_requirements(password) {
        return Err(RegisterError::WeakPassword);
    }
    if password != confirm {
        return Err(RegisterError::PasswordMismatch);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthTab {
    #[default]
    Login,
    Register,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm: String,
}

pub struct AuthController {
    store: Rc<dyn KeyValueStore>,
    presets: Vec<DemoAccount>,
    tab: AuthTab,
    pub login: LoginForm,
    pub register: RegisterForm,
    /// Timed error shown inside the form it was raised in.
    inline_error: Option<(AuthTab, Toast)>,
    /// Blocking message; input is ignored until dismissed.
    alert: Option<String>,
    notice: Option<Toast>,
    filled: Option<(usize, Instant)>,
    pending: bool,
}

impl AuthController {
    pub fn new(store: Rc<dyn KeyValueStore>, presets: Vec<DemoAccount>, notice: Option<String>) -> Self {
        Self {
            store,
            presets,
            tab: AuthTab::Login,
            login: LoginForm::default(),
            register: RegisterForm::default(),
            inline_error: None,
            alert: None,
            notice: notice.map(|n| Toast::new(Level::Info, n)),
            filled: None,
            pending: false,
        }
    }

    pub fn tab(&self) -> AuthTab {
        self.tab
    }

    pub fn switch_tab(&mut self, tab: AuthTab) {
        self.tab = tab;
    }

    pub fn password_strength(&self) -> Option<Strength> {
        password::indicator(&self.register.password)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn submit_login(&mut self) -> Step {
        if self.alert.is_some() || self.pending {
            return Step::Idle;
        }
        self.pending = true;
        Step::Fetch(Request::Login(Credentials {
            email: self.login.email.clone(),
            password: self.login.password.clone(),
        }))
    }

    pub fn submit_register(&mut self) -> Step {
        if self.alert.is_some() || self.pending {
            return Step::Idle;
        }
        let form = &self.register;
        if let Err(e) = validate_registration(&form.email, &form.password, &form.confirm) {
            self.show_error(e.to_string());
            return Step::Idle;
        }
        self.pending = true;
        Step::Fetch(Request::Register(Credentials {
            email: form.email.clone(),
            password: form.password.clone(),
        }))
    }

    pub fn presets(&self) -> &[DemoAccount] {
        &self.presets
    }

    /// Copies a demo account into the login form and switches to it.
    pub fn quick_fill(&mut self, index: usize) -> bool {
        let Some(preset) = self.presets.get(index) else {
            return false;
        };
        self.tab = AuthTab::Login;
        self.login.email = preset.email.clone();
        self.login.password = preset.password.clone();
        self.filled = Some((index, Instant::now()));
        true
    }

    pub fn quick_fill_label(&self, index: usize, now: Instant) -> &'static str {
        match self.filled {
            Some((i, at)) if i == index && now.duration_since(at) < TOAST_TTL => "Filled",
            _ => "Quick fill",
        }
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn inline_error_at(&self, now: Instant) -> Option<&str> {
        match &self.inline_error {
            Some((tab, toast)) if *tab == self.tab && toast.is_live_at(now) => {
                Some(toast.message.as_str())
            }
            _ => None,
        }
    }

    pub fn notice_at(&self, now: Instant) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|t| t.is_live_at(now))
            .map(|t| t.message.as_str())
    }

    fn show_error(&mut self, message: String) {
        self.inline_error = Some((self.tab, Toast::new(Level::Error, message)));
    }

    fn enter_mailbox(&mut self, email: &str) -> Step {
        match session::persist(self.store.as_ref(), email) {
            Ok(()) => {
                info!("{email} signed in");
                Step::Navigate(Navigation::to(Route::Mailbox))
            }
            Err(e) => {
                warn!("could not store session: {e}");
                self.alert = Some(format!("Could not store the session: {e}"));
                Step::Idle
            }
        }
    }
}

impl Controller for AuthController {
    fn on_reply(&mut self, reply: Reply) -> Step {
        match reply {
            Reply::Login { email, result } => {
                self.pending = false;
                match result {
                    Ok(()) => self.enter_mailbox(&email),
                    Err(e) => {
                        warn!("login failed: {e}");
                        self.alert = Some(login_failure(&e));
                        Step::Idle
                    }
                }
            }
            Reply::Register { email, result } => {
                self.pending = false;
                match result {
                    Ok(()) => self.enter_mailbox(&email),
                    Err(e) => {
                        warn!("registration failed: {e}");
                        let message = e
                            .server_message()
                            .unwrap_or("Registration failed, please try again later");
                        self.show_error(message.to_string());
                        Step::Idle
                    }
                }
            }
            _ => Step::Idle,
        }
    }
}

fn login_failure(e: &ApiError) -> String {
    match e {
        ApiError::Network(_) | ApiError::Decode(_) => "Login failed, please try again later".into(),
        _ => e
            .server_message()
            .unwrap_or("Login failed, please check your email and password")
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::flow::settle;
    use crate::store::memory::MemoryStore;
    use std::time::Duration;

    fn controller() -> (Rc<MemoryStore>, AuthController) {
        let store = Rc::new(MemoryStore::new());
        let presets = vec![DemoAccount {
            email: "demo@x.com".into(),
            password: "demo123".into(),
        }];
        let ctrl = AuthController::new(store.clone(), presets, None);
        (store, ctrl)
    }

    #[test]
    fn validation_order() {
        assert_eq!(
            validate_registration("", "abcdef", "abcdef"),
            Err(RegisterError::MissingFields)
        );
        assert_eq!(
            validate_registration("ax.com", "x", "y"),
            Err(RegisterError::InvalidEmail)
        );
        assert_eq!(
            validate_registration("a@x.com", "ab12", "ab12"),
            Err(RegisterError::WeakPassword)
        );
        assert_eq!(
            validate_registration("a@x.com", "abcdef", "abcdeg"),
            Err(RegisterError::PasswordMismatch)
        );
        assert_eq!(validate_registration("a@x.com", "abcdef", "abcdef"), Ok(()));
    }

    #[test]
    fn login_success_stores_session_and_navigates() {
        let (store, mut ctrl) = controller();
        let api = FakeApi::default();
        ctrl.login.email = "a@x.com".into();
        ctrl.login.password = "secret1".into();

        let step = ctrl.submit_login();
        let nav = settle(&mut ctrl, &api, step);

        assert_eq!(nav, Some(Navigation::to(Route::Mailbox)));
        assert_eq!(api.calls(), vec!["POST /api/login"]);
        assert_eq!(
            store.get(session::USER_EMAIL_KEY).unwrap().as_deref(),
            Some("a@x.com")
        );
        assert_eq!(
            store.get(session::LOGGED_IN_KEY).unwrap().as_deref(),
            Some("true")
        );
    }

    #[test]
    fn login_failure_raises_blocking_alert() {
        let (store, mut ctrl) = controller();
        let api = FakeApi::default();
        *api.login.borrow_mut() = Err(ApiError::Unauthorized(Some("wrong email or password".into())));

        let step = ctrl.submit_login();
        assert_eq!(settle(&mut ctrl, &api, step), None);
        assert_eq!(ctrl.alert(), Some("wrong email or password"));
        assert_eq!(store.get(session::USER_EMAIL_KEY).unwrap(), None);

        // blocked until dismissed
        assert_eq!(ctrl.submit_login(), Step::Idle);
        ctrl.dismiss_alert();
        assert!(matches!(ctrl.submit_login(), Step::Fetch(Request::Login(_))));
    }

    #[test]
    fn login_network_failure_uses_generic_message() {
        let (_store, mut ctrl) = controller();
        let api = FakeApi::default();
        *api.login.borrow_mut() = Err(ApiError::Network("refused".into()));
        let step = ctrl.submit_login();
        settle(&mut ctrl, &api, step);
        assert_eq!(ctrl.alert(), Some("Login failed, please try again later"));
    }

    #[test]
    fn register_accepts_letters_only_password() {
        let (store, mut ctrl) = controller();
        let api = FakeApi::default();
        ctrl.switch_tab(AuthTab::Register);
        ctrl.register = RegisterForm {
            email: "new@x.com".into(),
            password: "abcdef".into(),
            confirm: "abcdef".into(),
        };

        let step = ctrl.submit_register();
        assert_eq!(
            settle(&mut ctrl, &api, step),
            Some(Navigation::to(Route::Mailbox))
        );
        assert_eq!(
            store.get(session::USER_EMAIL_KEY).unwrap().as_deref(),
            Some("new@x.com")
        );
    }

    #[test]
    fn register_rejects_short_password_without_request() {
        let (_store, mut ctrl) = controller();
        ctrl.switch_tab(AuthTab::Register);
        ctrl.register = RegisterForm {
            email: "new@x.com".into(),
            password: "ab12".into(),
            confirm: "ab12".into(),
        };

        assert_eq!(ctrl.submit_register(), Step::Idle);
        let now = Instant::now();
        assert_eq!(
            ctrl.inline_error_at(now),
            Some("Password is too weak, please follow the requirements")
        );
        assert_eq!(ctrl.inline_error_at(now + TOAST_TTL + Duration::from_millis(1)), None);

        // a newer error replaces the old one
        ctrl.register.password = "abcdef".into();
        ctrl.submit_register();
        assert_eq!(
            ctrl.inline_error_at(Instant::now()),
            Some("The two passwords do not match")
        );

        // errors stay with the form that raised them
        ctrl.switch_tab(AuthTab::Login);
        assert_eq!(ctrl.inline_error_at(Instant::now()), None);
    }

    #[test]
    fn register_server_error_is_inline() {
        let (_store, mut ctrl) = controller();
        let api = FakeApi::default();
        *api.register.borrow_mut() = Err(ApiError::Server {
            status: 400,
            message: Some("email already registered".into()),
        });
        ctrl.switch_tab(AuthTab::Register);
        ctrl.register = RegisterForm {
            email: "a@x.com".into(),
            password: "abc123".into(),
            confirm: "abc123".into(),
        };
        let step = ctrl.submit_register();
        assert_eq!(settle(&mut ctrl, &api, step), None);
        assert_eq!(ctrl.alert(), None);
        assert_eq!(
            ctrl.inline_error_at(Instant::now()),
            Some("email already registered")
        );
    }

    #[test]
    fn quick_fill_switches_to_login() {
        let (_store, mut ctrl) = controller();
        ctrl.switch_tab(AuthTab::Register);

        assert!(ctrl.quick_fill(0));
        assert_eq!(ctrl.tab(), AuthTab::Login);
        assert_eq!(ctrl.login.email, "demo@x.com");
        assert_eq!(ctrl.login.password, "demo123");

        let now = Instant::now();
        assert_eq!(ctrl.quick_fill_label(0, now), "Filled");
        assert_eq!(ctrl.quick_fill_label(0, now + TOAST_TTL), "Quick fill");

        assert!(!ctrl.quick_fill(5));
    }

    #[test]
    fn strength_indicator_follows_register_password() {
        let (_store, mut ctrl) = controller();
        assert_eq!(ctrl.password_strength(), None);
        ctrl.register.password = "abc".into();
        assert_eq!(ctrl.password_strength(), Some(Strength::Weak));
        ctrl.register.password = "abc123".into();
        assert_eq!(ctrl.password_strength(), Some(Strength::Strong));
    }
}

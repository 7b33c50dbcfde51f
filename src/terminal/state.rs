use anyhow::Result;
use log::info;
use ratatui::widgets::ListState;
use std::rc::Rc;
use std::time::Instant;

use crate::api::Reply;
use crate::auth::{AuthController, AuthTab};
use crate::config::DemoAccount;
use crate::domain::email::EmailId;
use crate::flow::{Controller, Navigation, Route, Step};
use crate::mailbox::MailboxController;
use crate::store::repo::KeyValueStore;
use crate::terminal::worker::Worker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthField {
    #[default]
    Email,
    Password,
    Confirm,
}

pub struct AuthScreen {
    pub ctrl: AuthController,
    pub field: AuthField,
}

impl AuthScreen {
    fn fields(&self) -> &'static [AuthField] {
        match self.ctrl.tab() {
            AuthTab::Login => &[AuthField::Email, AuthField::Password],
            AuthTab::Register => &[AuthField::Email, AuthField::Password, AuthField::Confirm],
        }
    }

    pub fn move_field(&mut self, delta: i32) {
        let fields = self.fields();
        let cur = fields.iter().position(|f| *f == self.field).unwrap_or(0) as i32;
        let next = (cur + delta).rem_euclid(fields.len() as i32) as usize;
        self.field = fields[next];
    }

    pub fn switch_tab(&mut self, tab: AuthTab) {
        self.ctrl.switch_tab(tab);
        self.field = AuthField::Email;
    }

    pub fn field_mut(&mut self) -> &mut String {
        let tab = self.ctrl.tab();
        match (tab, self.field) {
            (AuthTab::Login, AuthField::Password) => &mut self.ctrl.login.password,
            (AuthTab::Login, _) => &mut self.ctrl.login.email,
            (AuthTab::Register, AuthField::Email) => &mut self.ctrl.register.email,
            (AuthTab::Register, AuthField::Password) => &mut self.ctrl.register.password,
            (AuthTab::Register, AuthField::Confirm) => &mut self.ctrl.register.confirm,
        }
    }
}

pub struct MailboxScreen {
    pub ctrl: MailboxController,
    pub list_state: ListState,
    pub focus: Focus,
    pub body_scroll: u16,
}

impl MailboxScreen {
    fn new(ctrl: MailboxController) -> Self {
        Self {
            ctrl,
            list_state: ListState::default(),
            focus: Focus::List,
            body_scroll: 0,
        }
    }

    pub fn cursor_id(&self) -> Option<EmailId> {
        let idx = self.list_state.selected()?;
        self.ctrl.emails().get(idx).map(|e| e.id)
    }

    pub fn move_cursor(&mut self, delta: i32) {
        let len = self.ctrl.emails().len() as i32;
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let cur = self.list_state.selected().unwrap_or(0) as i32;
        let next = (cur + delta).clamp(0, len - 1) as usize;
        self.list_state.select(Some(next));
    }

    pub fn scroll_body(&mut self, delta: i32) {
        if delta < 0 {
            self.body_scroll = self.body_scroll.saturating_sub((-delta) as u16);
        } else {
            self.body_scroll = self.body_scroll.saturating_add(delta as u16);
        }
    }

    /// Keeps the cursor inside the list after it was replaced.
    fn sync_cursor(&mut self) {
        let len = self.ctrl.emails().len();
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            None => self.list_state.select(Some(0)),
            Some(_) => {}
        }
    }
}

pub enum Screen {
    Auth(AuthScreen),
    Mailbox(MailboxScreen),
}

pub struct App {
    pub screen: Screen,
    store: Rc<dyn KeyValueStore>,
    presets: Vec<DemoAccount>,
    worker: Worker,
}

impl App {
    /// Opens on the mailbox; the session guard falls back to the login page.
    pub fn new(store: Rc<dyn KeyValueStore>, presets: Vec<DemoAccount>, worker: Worker) -> Result<Self> {
        let auth = AuthController::new(store.clone(), presets.clone(), None);
        let mut app = Self {
            screen: Screen::Auth(AuthScreen {
                ctrl: auth,
                field: AuthField::Email,
            }),
            store,
            presets,
            worker,
        };
        app.navigate(Navigation::to(Route::Mailbox))?;
        Ok(app)
    }

    pub fn dispatch(&mut self, step: Step) -> Result<()> {
        match step {
            Step::Idle => Ok(()),
            Step::Fetch(req) => self.worker.submit(req),
            Step::Navigate(nav) => self.navigate(nav),
        }
    }

    fn navigate(&mut self, nav: Navigation) -> Result<()> {
        info!("navigating to {:?}", nav.to);
        match nav.to {
            Route::Auth => {
                let ctrl = AuthController::new(self.store.clone(), self.presets.clone(), nav.notice);
                self.screen = Screen::Auth(AuthScreen {
                    ctrl,
                    field: AuthField::Email,
                });
                Ok(())
            }
            Route::Mailbox => match MailboxController::start(self.store.clone()) {
                Ok((ctrl, step)) => {
                    self.screen = Screen::Mailbox(MailboxScreen::new(ctrl));
                    self.dispatch(step)
                }
                Err(redirect) => self.navigate(redirect),
            },
        }
    }

    /// Feeds every finished request back into the current page.
    pub fn pump(&mut self) -> Result<()> {
        while let Some(reply) = self.worker.try_recv()? {
            let step = self.deliver(reply);
            self.dispatch(step)?;
        }
        Ok(())
    }

    fn deliver(&mut self, reply: Reply) -> Step {
        match &mut self.screen {
            Screen::Auth(s) => s.ctrl.on_reply(reply),
            Screen::Mailbox(s) => {
                let opened = matches!(reply, Reply::Email { .. });
                let step = s.ctrl.on_reply(reply);
                s.sync_cursor();
                if opened {
                    s.body_scroll = 0;
                }
                step
            }
        }
    }

    pub fn tick(&mut self, now: Instant) {
        if let Screen::Mailbox(s) = &mut self.screen {
            s.ctrl.toasts_mut().prune(now);
        }
    }
}

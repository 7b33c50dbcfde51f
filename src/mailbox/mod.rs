//! Mailbox page: folder list, message detail, compose modal, logout.

pub mod compose;
pub mod view;

use log::{debug, info, warn};
use std::rc::Rc;

use crate::api::{Reply, Request};
use crate::domain::email::{EmailId, EmailSummary, Folder};
use crate::error::ApiError;
use crate::flow::{Controller, Navigation, Route, Step, Ticket, next_ticket};
use crate::mailbox::compose::ComposeState;
use crate::mailbox::view::{DetailView, ListView, list_view_at};
use crate::notify::{Level, Toasts};
use crate::session::{self, SessionMarker};
use crate::store::repo::KeyValueStore;

const SESSION_EXPIRED: &str = "Your session has expired, please log in again";

/// State of the rows in `emails`. A folder switch does not touch them until
/// its listing arrives, so rows are always drawn with the template of the
/// folder they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Listing {
    Pending,
    /// The first load failed; there is nothing to keep on screen.
    Failed,
    Shown(Folder),
}

pub struct MailboxController {
    store: Rc<dyn KeyValueStore>,
    session: SessionMarker,
    folder: Folder,
    emails: Vec<EmailSummary>,
    listing: Listing,
    selected: Option<EmailId>,
    detail: Option<DetailView>,
    compose: Option<ComposeState>,
    toasts: Toasts,
    folder_ticket: Option<Ticket>,
    email_ticket: Option<Ticket>,
    compose_ticket: Option<Ticket>,
}

impl MailboxController {
    /// Session guard on page entry. `Err` carries the redirect to the login
    /// page when no session marker is stored; otherwise the inbox load is
    /// the first step.
    pub fn start(store: Rc<dyn KeyValueStore>) -> Result<(Self, Step), Navigation> {
        let marker = match session::load(store.as_ref()) {
            Ok(Some(m)) => m,
            Ok(None) => {
                info!("no stored session, redirecting to login");
                return Err(Navigation::to(Route::Auth));
            }
            Err(e) => {
                warn!("could not read stored session: {e}");
                return Err(Navigation::to(Route::Auth));
            }
        };
        let mut ctrl = Self {
            store,
            session: marker,
            folder: Folder::Inbox,
            emails: vec![],
            listing: Listing::Pending,
            selected: None,
            detail: None,
            compose: None,
            toasts: Toasts::default(),
            folder_ticket: None,
            email_ticket: None,
            compose_ticket: None,
        };
        let step = ctrl.select_folder(Folder::Inbox);
        Ok((ctrl, step))
    }

    pub fn session(&self) -> &SessionMarker {
        &self.session
    }

    pub fn folder(&self) -> Folder {
        self.folder
    }

    pub fn header(&self) -> &'static str {
        self.folder.title()
    }

    pub fn emails(&self) -> &[EmailSummary] {
        &self.emails
    }

    pub fn selected(&self) -> Option<EmailId> {
        self.selected
    }

    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    pub fn compose(&self) -> Option<&ComposeState> {
        self.compose.as_ref()
    }

    pub fn compose_mut(&mut self) -> Option<&mut ComposeState> {
        self.compose.as_mut()
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut Toasts {
        &mut self.toasts
    }

    pub fn list_view(&self) -> ListView {
        match self.listing {
            Listing::Pending => ListView::Loading,
            Listing::Failed => ListView::Unavailable,
            Listing::Shown(folder) => {
                list_view_at(folder, &self.emails, self.selected, &chrono::Local::now())
            }
        }
    }

    /// Switches the active tab and asks for the folder's contents. The current
    /// rows stay on screen, with their own template, until the new ones arrive.
    pub fn select_folder(&mut self, folder: Folder) -> Step {
        self.folder = folder;
        let ticket = next_ticket();
        self.folder_ticket = Some(ticket);
        Step::Fetch(Request::LoadFolder { folder, ticket })
    }

    pub fn open_email(&mut self, id: EmailId) -> Step {
        let ticket = next_ticket();
        self.email_ticket = Some(ticket);
        Step::Fetch(Request::LoadEmail { id, ticket })
    }

    pub fn open_compose(&mut self) -> Step {
        let ticket = next_ticket();
        self.compose = Some(ComposeState::new());
        self.compose_ticket = Some(ticket);
        Step::Fetch(Request::LoadUsers { ticket })
    }

    /// Cancel button and backdrop click both land here.
    pub fn dismiss_compose(&mut self) {
        self.compose = None;
        self.compose_ticket = None;
    }

    pub fn submit_compose(&mut self) -> Step {
        let (Some(compose), Some(ticket)) = (self.compose.as_mut(), self.compose_ticket) else {
            return Step::Idle;
        };
        if compose.sending {
            return Step::Idle;
        }
        match compose.draft() {
            Some(draft) => {
                compose.sending = true;
                Step::Fetch(Request::Send { draft, ticket })
            }
            None => {
                compose.show_error("Please fill in all required fields");
                Step::Idle
            }
        }
    }

    pub fn logout(&mut self) -> Step {
        Step::Fetch(Request::Logout)
    }

    fn expire(&self, notice: Option<&str>) -> Step {
        session::expire(self.store.as_ref(), notice)
    }

    fn fail(&mut self, message: &str, e: &ApiError) -> Step {
        warn!("{message}: {e}");
        self.toasts.push(Level::Error, message);
        Step::Idle
    }
}

impl Controller for MailboxController {
    fn on_reply(&mut self, reply: Reply) -> Step {
        match reply {
            Reply::Folder {
                folder,
                ticket,
                result,
            } => {
                if self.folder_ticket != Some(ticket) {
                    debug!("dropping stale {folder:?} listing (ticket {ticket})");
                    return Step::Idle;
                }
                match result {
                    Ok(emails) => {
                        self.emails = emails;
                        self.listing = Listing::Shown(folder);
                        Step::Idle
                    }
                    Err(e) if e.is_unauthorized() => self.expire(None),
                    Err(e) => {
                        if self.listing == Listing::Pending {
                            self.listing = Listing::Failed;
                        }
                        self.fail("Failed to load emails, please try again later", &e)
                    }
                }
            }
            Reply::Email { id, ticket, result } => {
                if self.email_ticket != Some(ticket) {
                    debug!("dropping stale email {id} (ticket {ticket})");
                    return Step::Idle;
                }
                match result {
                    Ok(detail) => {
                        self.selected = Some(id);
                        self.detail = Some(DetailView::new(&detail, &self.session));
                        Step::Idle
                    }
                    Err(e) if e.is_unauthorized() => self.expire(None),
                    Err(e) => self.fail("Failed to load email, please try again later", &e),
                }
            }
            Reply::Users { ticket, result } => {
                if self.compose_ticket != Some(ticket) {
                    debug!("dropping user list for a closed compose window");
                    return Step::Idle;
                }
                let Some(compose) = self.compose.as_mut() else {
                    return Step::Idle;
                };
                match result {
                    Ok(users) => {
                        compose.set_recipients(users, &self.session.user_email);
                        Step::Idle
                    }
                    Err(e) => self.fail("Failed to load the user list", &e),
                }
            }
            Reply::Sent { ticket, result } => {
                // a send from an earlier modal still reports, but leaves the
                // open draft alone
                let current = self.compose_ticket == Some(ticket);
                if current && let Some(compose) = self.compose.as_mut() {
                    compose.sending = false;
                }
                match result {
                    Ok(()) => {
                        info!("email sent");
                        self.toasts.push(Level::Success, "Email sent");
                        if current {
                            self.dismiss_compose();
                        }
                        if self.folder == Folder::Sent {
                            self.select_folder(Folder::Sent)
                        } else {
                            Step::Idle
                        }
                    }
                    Err(e) if e.is_unauthorized() => self.expire(Some(SESSION_EXPIRED)),
                    Err(e) => {
                        let message = e
                            .server_message()
                            .unwrap_or("Failed to send, please try again later")
                            .to_string();
                        self.fail(&message, &e)
                    }
                }
            }
            // the marker is only dropped once the server has let go of the
            // session, so a failed logout leaves the user signed in
            Reply::Logout(result) => match result {
                Ok(()) | Err(ApiError::Unauthorized(_)) => {
                    if let Err(e) = session::clear(self.store.as_ref()) {
                        warn!("could not clear stored session: {e}");
                    }
                    info!("{} logged out", self.session.user_email);
                    Step::Navigate(Navigation::to(Route::Auth))
                }
                Err(e) => self.fail("Logout failed, please try again", &e),
            },
            Reply::Login { .. } | Reply::Register { .. } => Step::Idle,
        }
    }
}

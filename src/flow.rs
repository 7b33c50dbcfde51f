//! Message dispatch between controllers and the backend.
//!
//! Controllers never do I/O. Every handler returns a [`Step`]: either nothing
//! to do, a [`Request`] for the backend, or a page change. Whoever owns the
//! controller executes the request (inline or on a worker thread) and hands
//! the [`Reply`] back through [`Controller::on_reply`].

use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::api::{MailApi, Reply, Request};

/// Identifies a folder or email request so late replies can be discarded.
pub type Ticket = u64;

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Tickets are unique for the whole process, so a reply addressed to a page
/// that has since been replaced can never match a newer request.
pub fn next_ticket() -> Ticket {
    NEXT_TICKET.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Auth,
    Mailbox,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub to: Route,
    /// Shown on the destination page, e.g. why the user was logged out.
    pub notice: Option<String>,
}

impl Navigation {
    pub fn to(route: Route) -> Self {
        Self {
            to: route,
            notice: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Idle,
    Fetch(Request),
    Navigate(Navigation),
}

pub trait Controller {
    fn on_reply(&mut self, reply: Reply) -> Step;
}

/// Runs requests inline until the controller goes idle or leaves the page.
pub fn settle(ctrl: &mut dyn Controller, api: &dyn MailApi, step: Step) -> Option<Navigation> {
    let mut step = step;
    loop {
        match step {
            Step::Idle => return None,
            Step::Navigate(nav) => return Some(nav),
            Step::Fetch(req) => {
                debug!("dispatching {req:?}");
                step = ctrl.on_reply(req.execute(api));
            }
        }
    }
}

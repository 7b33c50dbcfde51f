//! Scripted in-process backend for controller tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::api::MailApi;
use crate::domain::email::{ComposeDraft, Credentials, EmailDetail, EmailId, EmailSummary, Folder};
use crate::error::{ApiError, ApiResult};

pub struct FakeApi {
    pub calls: RefCell<Vec<String>>,
    pub folders: RefCell<HashMap<Folder, ApiResult<Vec<EmailSummary>>>>,
    pub emails: RefCell<HashMap<EmailId, EmailDetail>>,
    pub users: RefCell<ApiResult<Vec<String>>>,
    pub login: RefCell<ApiResult<()>>,
    pub register: RefCell<ApiResult<()>>,
    pub send: RefCell<ApiResult<()>>,
    pub logout: RefCell<ApiResult<()>>,
    pub sent_drafts: RefCell<Vec<ComposeDraft>>,
    /// When set, every endpoint behind the login check answers 401.
    pub expired: Cell<bool>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            calls: RefCell::new(vec![]),
            folders: RefCell::new(HashMap::new()),
            emails: RefCell::new(HashMap::new()),
            users: RefCell::new(Ok(vec![])),
            login: RefCell::new(Ok(())),
            register: RefCell::new(Ok(())),
            send: RefCell::new(Ok(())),
            logout: RefCell::new(Ok(())),
            sent_drafts: RefCell::new(vec![]),
            expired: Cell::new(false),
        }
    }
}

impl FakeApi {
    pub fn with_folder(self, folder: Folder, emails: Vec<EmailSummary>) -> Self {
        self.folders.borrow_mut().insert(folder, Ok(emails));
        self
    }

    pub fn with_email(self, detail: EmailDetail) -> Self {
        self.emails.borrow_mut().insert(detail.id, detail);
        self
    }

    pub fn with_users(self, users: &[&str]) -> Self {
        *self.users.borrow_mut() = Ok(users.iter().map(|u| u.to_string()).collect());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == call).count()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn guard(&self) -> ApiResult<()> {
        if self.expired.get() {
            Err(ApiError::Unauthorized(Some("please log in first".into())))
        } else {
            Ok(())
        }
    }
}

pub fn summary(id: EmailId, sender: &str, receiver: &str, subject: &str, content: &str) -> EmailSummary {
    EmailSummary {
        id,
        sender_email: Some(sender.to_string()),
        receiver_email: Some(receiver.to_string()),
        subject: subject.to_string(),
        content: content.to_string(),
        created_at: "2024-05-15T11:00:00Z".to_string(),
    }
}

pub fn detail(id: EmailId, sender_id: i64, sender: &str, receiver: &str, content: &str) -> EmailDetail {
    EmailDetail {
        id,
        sender_id,
        receiver_id: None,
        sender_email: sender.to_string(),
        receiver_email: receiver.to_string(),
        subject: format!("subject {id}"),
        content: content.to_string(),
        date: "Wed, 15 May 2024 11:00:00 GMT".to_string(),
    }
}

impl MailApi for FakeApi {
    fn login(&self, _creds: &Credentials) -> ApiResult<()> {
        self.record("POST /api/login".into());
        self.login.borrow().clone()
    }

    fn register(&self, _creds: &Credentials) -> ApiResult<()> {
        self.record("POST /api/register".into());
        self.register.borrow().clone()
    }

    fn logout(&self) -> ApiResult<()> {
        self.record("POST /api/logout".into());
        self.guard()?;
        self.logout.borrow().clone()
    }

    fn list_folder(&self, folder: Folder) -> ApiResult<Vec<EmailSummary>> {
        self.record(format!("GET /{}", folder.endpoint()));
        self.guard()?;
        self.folders
            .borrow()
            .get(&folder)
            .cloned()
            .unwrap_or_else(|| Ok(vec![]))
    }

    fn get_email(&self, id: EmailId) -> ApiResult<EmailDetail> {
        self.record(format!("GET /api/email/{id}"));
        self.guard()?;
        self.emails.borrow().get(&id).cloned().ok_or(ApiError::Server {
            status: 404,
            message: Some("email not found".into()),
        })
    }

    fn send_email(&self, draft: &ComposeDraft) -> ApiResult<()> {
        self.record("POST /api/send_email".into());
        self.guard()?;
        self.sent_drafts.borrow_mut().push(draft.clone());
        self.send.borrow().clone()
    }

    fn list_users(&self) -> ApiResult<Vec<String>> {
        self.record("GET /api/users".into());
        self.users.borrow().clone()
    }
}

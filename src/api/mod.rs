pub mod http;

#[cfg(test)]
pub mod fake;

use crate::domain::email::{ComposeDraft, Credentials, EmailDetail, EmailId, EmailSummary, Folder};
use crate::error::ApiResult;
use crate::flow::Ticket;

/// The REST backend as the client sees it.
pub trait MailApi: Send {
    fn login(&self, creds: &Credentials) -> ApiResult<()>;
    fn register(&self, creds: &Credentials) -> ApiResult<()>;
    fn logout(&self) -> ApiResult<()>;

    fn list_folder(&self, folder: Folder) -> ApiResult<Vec<EmailSummary>>;
    fn get_email(&self, id: EmailId) -> ApiResult<EmailDetail>;

    fn send_email(&self, draft: &ComposeDraft) -> ApiResult<()>;
    /// Every registered address, including the caller's own.
    fn list_users(&self) -> ApiResult<Vec<String>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Login(Credentials),
    Register(Credentials),
    Logout,
    LoadFolder { folder: Folder, ticket: Ticket },
    LoadEmail { id: EmailId, ticket: Ticket },
    LoadUsers { ticket: Ticket },
    Send { draft: ComposeDraft, ticket: Ticket },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Login {
        email: String,
        result: ApiResult<()>,
    },
    Register {
        email: String,
        result: ApiResult<()>,
    },
    Logout(ApiResult<()>),
    Folder {
        folder: Folder,
        ticket: Ticket,
        result: ApiResult<Vec<EmailSummary>>,
    },
    Email {
        id: EmailId,
        ticket: Ticket,
        result: ApiResult<EmailDetail>,
    },
    /// Compose replies carry the ticket of the modal that asked for them.
    Users {
        ticket: Ticket,
        result: ApiResult<Vec<String>>,
    },
    Sent {
        ticket: Ticket,
        result: ApiResult<()>,
    },
}

impl Request {
    pub fn execute(self, api: &dyn MailApi) -> Reply {
        match self {
            Request::Login(creds) => Reply::Login {
                result: api.login(&creds),
                email: creds.email,
            },
            Request::Register(creds) => Reply::Register {
                result: api.register(&creds),
                email: creds.email,
            },
            Request::Logout => Reply::Logout(api.logout()),
            Request::LoadFolder { folder, ticket } => Reply::Folder {
                folder,
                ticket,
                result: api.list_folder(folder),
            },
            Request::LoadEmail { id, ticket } => Reply::Email {
                id,
                ticket,
                result: api.get_email(id),
            },
            Request::LoadUsers { ticket } => Reply::Users {
                ticket,
                result: api.list_users(),
            },
            Request::Send { draft, ticket } => Reply::Sent {
                ticket,
                result: api.send_email(&draft),
            },
        }
    }
}

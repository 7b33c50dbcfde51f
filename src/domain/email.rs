use serde::{Deserialize, Serialize};
use std::fmt;

pub type EmailId = u64;

/// The three mail categories the backend exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Folder {
    #[default]
    Inbox,
    Sent,
    Spam,
}

impl Folder {
    pub const ALL: [Folder; 3] = [Folder::Inbox, Folder::Sent, Folder::Spam];

    pub fn endpoint(self) -> &'static str {
        match self {
            Folder::Inbox => "api/inbox",
            Folder::Sent => "api/sent",
            Folder::Spam => "api/spam",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Folder::Inbox => "Inbox",
            Folder::Sent => "Sent",
            Folder::Spam => "Spam",
        }
    }

    pub fn empty_text(self) -> &'static str {
        match self {
            Folder::Spam => "No spam",
            Folder::Inbox | Folder::Sent => "No emails",
        }
    }
}

/// One row of a folder listing. Inbox and spam listings only carry the
/// sender address, sent listings only the receiver address.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmailSummary {
    pub id: EmailId,
    #[serde(default)]
    pub sender_email: Option<String>,
    #[serde(default)]
    pub receiver_email: Option<String>,
    pub subject: String,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmailDetail {
    pub id: EmailId,
    pub sender_id: i64,
    #[serde(default)]
    pub receiver_id: Option<i64>,
    pub sender_email: String,
    pub receiver_email: String,
    pub subject: String,
    pub content: String,
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct FolderListing {
    pub emails: Vec<EmailSummary>,
}

#[derive(Debug, Deserialize)]
pub struct UserEntry {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Body of `POST /api/send_email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposeDraft {
    pub to: String,
    pub subject: String,
    pub content: String,
}

//! What the mailbox page shows, independent of how it is drawn.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

use crate::domain::email::{EmailDetail, EmailId, EmailSummary, Folder};
use crate::format::{PREVIEW_CHARS, format_date, format_date_at, paragraphs, preview};
use crate::session::SessionMarker;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: EmailId,
    pub contact: String,
    pub date: String,
    pub subject: String,
    pub preview: String,
    pub spam: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// Nothing fetched yet.
    Loading,
    /// The first listing failed to load.
    Unavailable,
    Empty(&'static str),
    Rows(Vec<RowView>),
}

pub fn list_view_at<Tz: TimeZone>(
    folder: Folder,
    emails: &[EmailSummary],
    selected: Option<EmailId>,
    now: &DateTime<Tz>,
) -> ListView
where
    Tz::Offset: Display,
{
    if emails.is_empty() {
        return ListView::Empty(folder.empty_text());
    }
    let rows = emails
        .iter()
        .map(|e| {
            let contact = match folder {
                Folder::Sent => format!("To: {}", e.receiver_email.as_deref().unwrap_or("")),
                Folder::Inbox | Folder::Spam => {
                    format!("From: {}", e.sender_email.as_deref().unwrap_or(""))
                }
            };
            RowView {
                id: e.id,
                contact,
                date: format_date_at(&e.created_at, false, now),
                subject: e.subject.clone(),
                preview: preview(&e.content, PREVIEW_CHARS),
                spam: folder == Folder::Spam,
                selected: selected == Some(e.id),
            }
        })
        .collect();
    ListView::Rows(rows)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Sender,
    Receiver,
}

impl Role {
    /// Uses the stored numeric user id when there is one, otherwise the
    /// session email, which the login flow always records.
    pub fn of(detail: &EmailDetail, session: &SessionMarker) -> Self {
        let sent = match session.user_id {
            Some(id) => detail.sender_id == id,
            None => detail.sender_email == session.user_email,
        };
        if sent { Role::Sender } else { Role::Receiver }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub subject: String,
    pub contact_label: &'static str,
    pub contact_email: String,
    pub date: String,
    pub paragraphs: Vec<String>,
}

impl DetailView {
    pub fn new(detail: &EmailDetail, session: &SessionMarker) -> Self {
        let (contact_label, contact_email) = match Role::of(detail, session) {
            Role::Sender => ("To:", detail.receiver_email.clone()),
            Role::Receiver => ("From:", detail.sender_email.clone()),
        };
        Self {
            subject: detail.subject.clone(),
            contact_label,
            contact_email,
            date: format_date(&detail.date, true),
            paragraphs: paragraphs(&detail.content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{detail, summary};
    use chrono::Utc;

    fn marker(email: &str, user_id: Option<i64>) -> SessionMarker {
        SessionMarker {
            user_email: email.into(),
            logged_in: true,
            user_id,
        }
    }

    #[test]
    fn empty_state_differs_only_for_spam() {
        let now = Utc::now();
        assert_eq!(
            list_view_at(Folder::Inbox, &[], None, &now),
            ListView::Empty("No emails")
        );
        assert_eq!(
            list_view_at(Folder::Sent, &[], None, &now),
            ListView::Empty("No emails")
        );
        assert_eq!(
            list_view_at(Folder::Spam, &[], None, &now),
            ListView::Empty("No spam")
        );
    }

    #[test]
    fn row_template_depends_on_folder() {
        let now = Utc::now();
        let emails = vec![summary(1, "b@x.com", "a@x.com", "hi", "body")];

        let ListView::Rows(rows) = list_view_at(Folder::Sent, &emails, Some(1), &now) else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].contact, "To: a@x.com");
        assert!(!rows[0].spam);
        assert!(rows[0].selected);
        assert_eq!(rows[0].preview, "body...");

        let ListView::Rows(rows) = list_view_at(Folder::Spam, &emails, None, &now) else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].contact, "From: b@x.com");
        assert!(rows[0].spam);
        assert!(!rows[0].selected);
    }

    #[test]
    fn detail_direction() {
        let d = detail(4, 2, "b@x.com", "a@x.com", "line one\nline two");

        let received = DetailView::new(&d, &marker("a@x.com", None));
        assert_eq!(received.contact_label, "From:");
        assert_eq!(received.contact_email, "b@x.com");
        assert_eq!(received.paragraphs, vec!["line one", "line two"]);

        let sent = DetailView::new(&d, &marker("b@x.com", None));
        assert_eq!(sent.contact_label, "To:");
        assert_eq!(sent.contact_email, "a@x.com");

        // a stored id wins over the email comparison
        let by_id = DetailView::new(&d, &marker("a@x.com", Some(2)));
        assert_eq!(by_id.contact_label, "To:");
    }
}

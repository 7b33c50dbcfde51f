use std::time::Instant;

use crate::domain::email::ComposeDraft;
use crate::notify::{Level, Toast};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposeField {
    #[default]
    Recipient,
    Subject,
    Content,
}

/// State of the open compose modal. Dropped on cancel or successful send.
#[derive(Debug, Default)]
pub struct ComposeState {
    recipients: Vec<String>,
    recipient: Option<usize>,
    pub subject: String,
    pub content: String,
    pub field: ComposeField,
    error: Option<Toast>,
    pub sending: bool,
}

impl ComposeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills the recipient selector, leaving out the sender's own address.
    pub fn set_recipients(&mut self, users: Vec<String>, own_email: &str) {
        self.recipients = users
            .into_iter()
            .filter(|u| !u.is_empty() && u != own_email)
            .collect();
        self.recipient = None;
    }

    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    pub fn recipient(&self) -> Option<&str> {
        self.recipient
            .and_then(|i| self.recipients.get(i))
            .map(String::as_str)
    }

    pub fn select_recipient(&mut self, email: &str) -> bool {
        match self.recipients.iter().position(|r| r == email) {
            Some(i) => {
                self.recipient = Some(i);
                true
            }
            None => false,
        }
    }

    /// Steps through the selector; the first step from "none" lands on the
    /// first (or last) entry.
    pub fn cycle_recipient(&mut self, delta: i32) {
        if self.recipients.is_empty() {
            return;
        }
        let len = self.recipients.len() as i32;
        let next = match self.recipient {
            None if delta < 0 => len - 1,
            None => 0,
            Some(cur) => (cur as i32 + delta).rem_euclid(len),
        };
        self.recipient = Some(next as usize);
    }

    pub fn next_field(&mut self) {
        self.field = match self.field {
            ComposeField::Recipient => ComposeField::Subject,
            ComposeField::Subject => ComposeField::Content,
            ComposeField::Content => ComposeField::Recipient,
        };
    }

    pub fn prev_field(&mut self) {
        self.field = match self.field {
            ComposeField::Recipient => ComposeField::Content,
            ComposeField::Subject => ComposeField::Recipient,
            ComposeField::Content => ComposeField::Subject,
        };
    }

    pub fn input(&mut self, c: char) {
        match self.field {
            ComposeField::Recipient => {}
            ComposeField::Subject if c == '\n' => {}
            ComposeField::Subject => self.subject.push(c),
            ComposeField::Content => self.content.push(c),
        }
    }

    pub fn backspace(&mut self) {
        match self.field {
            ComposeField::Recipient => {}
            ComposeField::Subject => {
                self.subject.pop();
            }
            ComposeField::Content => {
                self.content.pop();
            }
        }
    }

    /// The draft to send, or `None` when a required field is empty.
    pub fn draft(&self) -> Option<ComposeDraft> {
        let to = self.recipient()?;
        if self.subject.is_empty() || self.content.is_empty() {
            return None;
        }
        Some(ComposeDraft {
            to: to.to_string(),
            subject: self.subject.clone(),
            content: self.content.clone(),
        })
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error = Some(Toast::new(Level::Error, message));
    }

    pub fn error_at(&self, now: Instant) -> Option<&str> {
        self.error
            .as_ref()
            .filter(|t| t.is_live_at(now))
            .map(|t| t.message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn own_address_is_not_a_recipient() {
        let mut c = ComposeState::new();
        c.set_recipients(
            vec!["a@x.com".into(), "".into(), "b@x.com".into(), "A@x.com".into()],
            "a@x.com",
        );
        assert_eq!(c.recipients(), ["b@x.com", "A@x.com"]);
    }

    #[test]
    fn cycling_wraps() {
        let mut c = ComposeState::new();
        c.set_recipients(vec!["b@x.com".into(), "c@x.com".into()], "a@x.com");
        assert_eq!(c.recipient(), None);
        c.cycle_recipient(-1);
        assert_eq!(c.recipient(), Some("c@x.com"));
        c.cycle_recipient(1);
        assert_eq!(c.recipient(), Some("b@x.com"));
    }

    #[test]
    fn draft_requires_every_field() {
        let mut c = ComposeState::new();
        c.set_recipients(vec!["b@x.com".into()], "a@x.com");
        c.select_recipient("b@x.com");
        c.content = "hello".into();
        assert_eq!(c.draft(), None);

        c.field = ComposeField::Subject;
        for ch in "Hi\n!".chars() {
            c.input(ch);
        }
        assert_eq!(c.subject, "Hi!");
        let draft = c.draft().unwrap();
        assert_eq!(draft.to, "b@x.com");
        assert_eq!(draft.content, "hello");
    }
}

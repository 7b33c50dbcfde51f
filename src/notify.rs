use std::time::{Duration, Instant};

/// How long notifications, inline errors and the quick-fill confirmation stay up.
pub const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub level: Level,
    pub message: String,
    expires_at: Instant,
}

impl Toast {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_TTL,
        }
    }

    pub fn is_live_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Stack of self-dismissing notifications.
#[derive(Debug, Default)]
pub struct Toasts {
    items: Vec<Toast>,
}

impl Toasts {
    pub fn push(&mut self, level: Level, message: impl Into<String>) {
        self.items.push(Toast::new(level, message));
    }

    pub fn prune(&mut self, now: Instant) {
        self.items.retain(|t| t.is_live_at(now));
    }

    pub fn live_at(&self, now: Instant) -> impl Iterator<Item = &Toast> {
        self.items.iter().filter(move |t| t.is_live_at(now))
    }

    pub fn last(&self) -> Option<&Toast> {
        self.items.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_dismiss_themselves() {
        let mut toasts = Toasts::default();
        toasts.push(Level::Error, "Failed to load emails");
        let now = Instant::now();
        assert_eq!(toasts.live_at(now).count(), 1);

        let later = now + TOAST_TTL + Duration::from_millis(1);
        assert_eq!(toasts.live_at(later).count(), 0);
        toasts.prune(later);
        assert!(toasts.last().is_none());
    }
}

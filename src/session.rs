//! The session marker: proof-of-login consulted before the mailbox renders.

use anyhow::Result;
use log::{info, warn};

use crate::flow::{Navigation, Route, Step};
use crate::store::repo::KeyValueStore;

pub const USER_EMAIL_KEY: &str = "userEmail";
pub const LOGGED_IN_KEY: &str = "isLoggedIn";
pub const USER_ID_KEY: &str = "userId";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionMarker {
    pub user_email: String,
    pub logged_in: bool,
    pub user_id: Option<i64>,
}

/// Returns `None` when no user email is stored.
pub fn load(store: &dyn KeyValueStore) -> Result<Option<SessionMarker>> {
    let Some(user_email) = store.get(USER_EMAIL_KEY)?.filter(|e| !e.is_empty()) else {
        return Ok(None);
    };
    let logged_in = store.get(LOGGED_IN_KEY)?.as_deref() == Some("true");
    let user_id = store
        .get(USER_ID_KEY)?
        .and_then(|s| s.trim().parse::<i64>().ok());
    Ok(Some(SessionMarker {
        user_email,
        logged_in,
        user_id,
    }))
}

pub fn persist(store: &dyn KeyValueStore, user_email: &str) -> Result<()> {
    store.set(USER_EMAIL_KEY, user_email)?;
    store.set(LOGGED_IN_KEY, "true")?;
    info!("session stored for {user_email}");
    Ok(())
}

pub fn clear(store: &dyn KeyValueStore) -> Result<()> {
    store.remove(USER_EMAIL_KEY)?;
    store.remove(LOGGED_IN_KEY)?;
    store.remove(USER_ID_KEY)?;
    Ok(())
}

/// Session guard for a 401: drop local session state and send the user back
/// to the login page.
pub fn expire(store: &dyn KeyValueStore, notice: Option<&str>) -> Step {
    warn!("session rejected by server, returning to login");
    if let Err(e) = clear(store) {
        warn!("could not clear stored session: {e}");
    }
    Step::Navigate(Navigation {
        to: Route::Auth,
        notice: notice.map(str::to_string),
    })
}

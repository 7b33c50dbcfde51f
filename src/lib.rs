pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod flow;
pub mod format;
pub mod mailbox;
pub mod notify;
pub mod session;
pub mod store;
pub mod terminal;

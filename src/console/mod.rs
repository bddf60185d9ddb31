//! Admin Console - terminal client for the storefront API.
//!
//! A passphrase-gated [`Session`] guards a tabbed [`Dashboard`] whose tabs are
//! fetched through the [`ApiClient`] and rendered as text fragments.

/// HTTP client for the API
pub mod client;
/// Console input parsing
pub mod command;
/// Tabs and action outcomes
pub mod dashboard;
/// Text output of the dashboard
pub mod render;
/// Command dispatch for the interactive console
pub mod repl;
/// Passphrase gate
pub mod session;

pub use client::ApiClient;
pub use command::{Command, HELP, parse_command};
pub use dashboard::{Banner, Dashboard, Tab, TabView};
pub use repl::execute;
pub use session::{
    AuthState, CredentialCheck, MemoryStorage, SESSION_KEY, Session, SessionStorage,
    StaticPassphrase,
};

//! Login gate of the admin console.
//!
//! A two-state machine: `LoggedOut` until a passphrase passes the injected
//! [`CredentialCheck`], then `LoggedIn` until [`Session::logout`]. The accepted
//! passphrase is kept in a [`SessionStorage`] under [`SESSION_KEY`] so a new
//! session over the same storage resumes without asking again.

use crate::errors::{Error, Result};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Storage key holding the accepted passphrase.
pub const SESSION_KEY: &str = "admin_authenticated";

/// Decides whether a candidate passphrase unlocks the console.
pub trait CredentialCheck {
    /// True when `candidate` is accepted.
    fn verify(&self, candidate: &str) -> bool;
}

/// Exact comparison against a single shared passphrase.
#[derive(Debug, Clone)]
pub struct StaticPassphrase {
    passphrase: String,
}

impl StaticPassphrase {
    /// Accepts exactly `passphrase`.
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
        }
    }
}

impl CredentialCheck for StaticPassphrase {
    fn verify(&self, candidate: &str) -> bool {
        candidate == self.passphrase
    }
}

/// Session-scoped key/value storage.
pub trait SessionStorage {
    /// Value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;
    /// Stores `value` under `key`, replacing any previous one.
    fn set(&mut self, key: &str, value: String);
    /// Forgets `key`.
    fn remove(&mut self, key: &str);
}

/// Storage living as long as the console process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Whether the dashboard is unlocked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// Only the passphrase prompt is available
    LoggedOut,
    /// The dashboard is available
    LoggedIn,
}

/// Login state machine over a credential check and a session storage
#[derive(Debug)]
pub struct Session<C, S> {
    check: C,
    storage: S,
    state: AuthState,
}

impl<C: CredentialCheck, S: SessionStorage> Session<C, S> {
    /// Creates a session and resumes it if `storage` already holds a valid passphrase.
    pub fn new(check: C, storage: S) -> Self {
        let mut session = Self {
            check,
            storage,
            state: AuthState::LoggedOut,
        };
        session.resume();
        session
    }

    /// Re-evaluates the stored passphrase.
    pub fn resume(&mut self) -> AuthState {
        self.state = match self.storage.get(SESSION_KEY) {
            Some(stored) if self.check.verify(&stored) => AuthState::LoggedIn,
            Some(_) => {
                warn!("Stored session passphrase no longer valid, discarding it");
                self.storage.remove(SESSION_KEY);
                AuthState::LoggedOut
            }
            None => AuthState::LoggedOut,
        };
        debug!("Session resumed as {:?}", self.state);
        self.state
    }

    /// Attempts to log in.
    ///
    /// # Errors
    /// Returns `Error::Validation` if the passphrase is rejected; the state is
    /// left unchanged.
    pub fn login(&mut self, candidate: &str) -> Result<()> {
        if !self.check.verify(candidate) {
            warn!("Rejected console login attempt");
            return Err(Error::validation("Invalid passphrase"));
        }
        self.storage.set(SESSION_KEY, candidate.to_string());
        self.state = AuthState::LoggedIn;
        info!("Console session unlocked");
        Ok(())
    }

    /// Locks the console and forgets the stored passphrase.
    pub fn logout(&mut self) {
        self.storage.remove(SESSION_KEY);
        self.state = AuthState::LoggedOut;
        info!("Console session closed");
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> AuthState {
        self.state
    }

    /// Shorthand for `state() == AuthState::LoggedIn`.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.state == AuthState::LoggedIn
    }

    /// Consumes the session, handing back its storage.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

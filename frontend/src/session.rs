//! Session state and its persistence.
//!
//! A [`Session`] is a plain value. The view tree holds the current one in a
//! context; [`SessionController`] is the only thing that writes the persisted
//! copy, once on login and once on logout.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::StorageError;

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key of the account email.
pub const EMAIL_KEY: &str = "email";

/// A bearer token together with the account it belongs to. Both parts are
/// guaranteed non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
    email: String,
}

impl Credentials {
    pub fn new(token: impl Into<String>, email: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let email = email.into();
        if token.trim().is_empty() || email.trim().is_empty() {
            return None;
        }
        Some(Self { token, email })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("email", &self.email)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    credentials: Option<Credentials>,
}

impl Session {
    pub fn authenticated(credentials: Credentials) -> Self {
        Self {
            credentials: Some(credentials),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.credentials.as_ref().map(Credentials::token)
    }

    pub fn account_email(&self) -> Option<&str> {
        self.credentials.as_ref().map(Credentials::email)
    }
}

/// Durable key/value storage for the session record.
pub trait SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Store that lives only as long as the process. Used off-browser and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<Vec<(String, String)>>,
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .entries
            .borrow()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.borrow_mut();
        match entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => entries.push((key.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().retain(|(k, _)| k != key);
        Ok(())
    }
}

#[derive(Clone)]
pub struct SessionController {
    store: Rc<dyn SessionStore>,
}

impl SessionController {
    pub fn new(store: Rc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Reads the persisted session once at startup. Anything short of a
    /// complete token/email pair starts anonymous.
    pub fn restore(&self) -> Session {
        let read = |key| match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("could not read {key} from session storage: {e}");
                None
            }
        };
        match (read(TOKEN_KEY), read(EMAIL_KEY)) {
            (Some(token), Some(email)) => match Credentials::new(token, email) {
                Some(creds) => {
                    log::info!("restored session for {}", creds.email());
                    Session::authenticated(creds)
                }
                None => Session::anonymous(),
            },
            _ => Session::anonymous(),
        }
    }

    /// Persists the credentials and returns the authenticated session.
    pub fn login(&self, credentials: Credentials) -> Result<Session, StorageError> {
        self.store.set(TOKEN_KEY, credentials.token())?;
        if let Err(e) = self.store.set(EMAIL_KEY, credentials.email()) {
            let _ = self.store.remove(TOKEN_KEY);
            return Err(e);
        }
        log::info!("logged in as {}", credentials.email());
        Ok(Session::authenticated(credentials))
    }

    /// Clears the persisted record. Always ends anonymous.
    pub fn logout(&self) -> Session {
        for key in [TOKEN_KEY, EMAIL_KEY] {
            if let Err(e) = self.store.remove(key) {
                log::warn!("could not clear {key}: {e}");
            }
        }
        log::info!("logged out");
        Session::anonymous()
    }
}

impl PartialEq for SessionController {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store)
    }
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> (Rc<MemoryStore>, SessionController) {
        let store = Rc::new(MemoryStore::default());
        (store.clone(), SessionController::new(store))
    }

    #[test]
    fn credentials_require_both_parts() {
        assert!(Credentials::new("", "a@b.c").is_none());
        assert!(Credentials::new("tok", "  ").is_none());
        assert!(Credentials::new("tok", "a@b.c").is_some());
    }

    #[test]
    fn anonymous_session_has_nothing() {
        let s = Session::anonymous();
        assert!(!s.is_authenticated());
        assert_eq!(s.token(), None);
        assert_eq!(s.account_email(), None);
    }

    #[test]
    fn login_persists_and_restore_reads_back() {
        let (store, ctl) = controller();
        let session = ctl.login(Credentials::new("tok", "a@b.c").unwrap()).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("tok"));
        assert_eq!(store.get(EMAIL_KEY).unwrap().as_deref(), Some("a@b.c"));

        let restored = SessionController::new(store).restore();
        assert_eq!(restored, session);
    }

    #[test]
    fn restore_with_partial_record_is_anonymous() {
        let (store, ctl) = controller();
        store.set(TOKEN_KEY, "tok").unwrap();
        assert!(!ctl.restore().is_authenticated());

        store.set(EMAIL_KEY, "").unwrap();
        assert!(!ctl.restore().is_authenticated());
    }

    #[test]
    fn logout_clears_storage() {
        let (store, ctl) = controller();
        ctl.login(Credentials::new("tok", "a@b.c").unwrap()).unwrap();
        let session = ctl.logout();
        assert!(!session.is_authenticated());
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(store.get(EMAIL_KEY).unwrap(), None);
        assert!(!ctl.restore().is_authenticated());
    }

    #[test]
    fn debug_output_hides_token() {
        let creds = Credentials::new("secret-token", "a@b.c").unwrap();
        assert!(!format!("{creds:?}").contains("secret-token"));
    }
}

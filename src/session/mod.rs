//! Authentication session.
//!
//! A [`Session`] is created once and passed to whoever needs it. It starts in
//! [`AuthState::Booting`]; [`Session::boot`] restores a persisted user and
//! token if both exist, otherwise the session becomes anonymous. Login and
//! Google login each make one API call and persist the result. Logout clears
//! memory and storage without contacting the server.

pub mod password;
pub mod store;

use log::{info, warn};
use std::sync::Arc;

use crate::backend::{Backend, BackendError, RegisterArgs};
use crate::constants::{
    ERROR_GOOGLE_LOGIN_FAILED, ERROR_LOGIN_FAILED, ERROR_PASSWORD_MISMATCH, ERROR_PASSWORD_WEAK,
    ERROR_REGISTER_FAILED, SUCCESS_GOOGLE_LOGIN, SUCCESS_LOGIN, SUCCESS_LOGOUT, SUCCESS_REGISTERED,
};
use crate::entities::{AuthResponse, User};
use crate::notify::Notifier;

pub use password::PasswordStrength;
pub use store::{FileSessionStore, MemorySessionStore, PersistedSession, SessionStore, StoreError};

#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    /// Persisted state has not been read yet.
    Booting,
    Anonymous,
    Authenticated { user: User, token: String },
}

/// Input of the sign-up form.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Check the confirmation and the strength rules. No network involved.
    pub fn validate(&self) -> Result<(), BackendError> {
        if self.password != self.confirm_password {
            return Err(BackendError::validation(ERROR_PASSWORD_MISMATCH));
        }
        if !PasswordStrength::evaluate(&self.password).is_valid() {
            return Err(BackendError::validation(ERROR_PASSWORD_WEAK));
        }
        Ok(())
    }
}

pub struct Session {
    state: AuthState,
    loading: bool,
    backend: Arc<dyn Backend>,
    store: Box<dyn SessionStore>,
    notifier: Notifier,
}

impl Session {
    pub fn new(backend: Arc<dyn Backend>, store: Box<dyn SessionStore>, notifier: Notifier) -> Self {
        Self {
            state: AuthState::Booting,
            loading: false,
            backend,
            store,
            notifier,
        }
    }

    /// Restore the persisted session, if any. An unreadable store counts as signed out.
    pub fn boot(&mut self) {
        let restored = match self.store.load() {
            Ok(Some(persisted)) => persisted.complete(),
            Ok(None) => None,
            Err(e) => {
                warn!("⚠️  Ignoring stored session: {}", e);
                None
            }
        };

        self.state = match restored {
            Some((user, token)) => {
                info!("🔑 Restored session for {}", user.email);
                self.backend.set_token(Some(token.clone()));
                AuthState::Authenticated { user, token }
            }
            None => {
                self.backend.set_token(None);
                AuthState::Anonymous
            }
        };
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn is_booted(&self) -> bool {
        self.state != AuthState::Booting
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, AuthState::Authenticated { .. })
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            AuthState::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match &self.state {
            AuthState::Authenticated { token, .. } => Some(token),
            _ => None,
        }
    }

    pub fn backend(&self) -> Arc<dyn Backend> {
        Arc::clone(&self.backend)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, BackendError> {
        self.loading = true;
        let result = self.backend.login(email, password).await;
        self.loading = false;

        match result {
            Ok(auth) => {
                self.notifier.success(SUCCESS_LOGIN);
                Ok(self.establish(auth))
            }
            Err(e) => {
                self.notifier.error(failure_message(&e, ERROR_LOGIN_FAILED));
                Err(e)
            }
        }
    }

    pub async fn login_with_google(&mut self, google_token: &str) -> Result<User, BackendError> {
        self.loading = true;
        let result = self.backend.login_with_google(google_token).await;
        self.loading = false;

        match result {
            Ok(auth) => {
                self.notifier.success(SUCCESS_GOOGLE_LOGIN);
                Ok(self.establish(auth))
            }
            Err(e) => {
                self.notifier.error(ERROR_GOOGLE_LOGIN_FAILED);
                Err(e)
            }
        }
    }

    /// Create an account. The session stays as it was; the user signs in afterwards.
    pub async fn register(&mut self, form: &RegistrationForm) -> Result<(), BackendError> {
        if let Err(e) = form.validate() {
            self.notifier.error(e.to_string());
            return Err(e);
        }

        self.loading = true;
        let result = self
            .backend
            .register(RegisterArgs {
                name: form.name.trim().to_string(),
                email: form.email.trim().to_string(),
                password: form.password.clone(),
            })
            .await;
        self.loading = false;

        match result {
            Ok(()) => {
                self.notifier.success(SUCCESS_REGISTERED);
                Ok(())
            }
            Err(e) => {
                self.notifier.error(failure_message(&e, ERROR_REGISTER_FAILED));
                Err(e)
            }
        }
    }

    /// Forget the user and token, in memory and on disk.
    pub fn logout(&mut self) {
        self.state = AuthState::Anonymous;
        self.backend.set_token(None);
        if let Err(e) = self.store.clear() {
            warn!("⚠️  Failed to clear stored session: {}", e);
        }
        self.notifier.info(SUCCESS_LOGOUT);
    }

    fn establish(&mut self, auth: AuthResponse) -> User {
        let AuthResponse { user, token } = auth;
        self.backend.set_token(Some(token.clone()));
        if let Err(e) = self.store.save(&PersistedSession::new(user.clone(), token.clone())) {
            warn!("⚠️  Signed in but could not persist session: {}", e);
        }
        info!("🔑 Signed in as {}", user.email);
        self.state = AuthState::Authenticated {
            user: user.clone(),
            token,
        };
        user
    }
}

/// Server message when there is one, otherwise the generic fallback.
fn failure_message(err: &BackendError, fallback: &str) -> String {
    let text = err.to_string();
    if text.trim().is_empty() {
        fallback.to_string()
    } else {
        text
    }
}

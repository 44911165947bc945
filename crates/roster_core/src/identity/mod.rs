//! Identity-provider contract and readiness gate.
//!
//! # Responsibility
//! - Define the sign-in/sign-out contract the record manager's callers
//!   scope their queries with.
//! - Gate all identity access behind an explicit two-state handle so
//!   nothing touches the provider before it is initialized.
//!
//! # Invariants
//! - `owner_id` values handed to the store always come from a `Ready`
//!   handle's current user.
//! - Sign-in failures surface once; there is no retry loop and no
//!   lockout policy.

use log::{info, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque stable identifier for an authenticated user.
pub type UserId = String;

/// Identity-layer error surfaced to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// Email/password pair rejected by the provider.
    InvalidCredentials,
    /// Identity handle used before initialization completed.
    NotReady,
}

impl Display for IdentityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid email or password"),
            Self::NotReady => write!(f, "identity provider is not initialized yet"),
        }
    }
}

impl Error for IdentityError {}

/// External identity collaborator.
///
/// The core treats the user id as an opaque stable identifier scoping all
/// client queries; token handling and session transport belong to the
/// implementation.
pub trait IdentityProvider {
    /// Returns the signed-in user, if any.
    fn current_user(&self) -> Option<UserId>;
    /// Attempts a credential sign-in and returns the resulting user id.
    fn sign_in(&mut self, email: &str, password: &str) -> Result<UserId, IdentityError>;
    /// Ends the current session. Idempotent.
    fn sign_out(&mut self);
}

/// Two-state handle to a lazily-initialized identity provider.
///
/// Every dependent operation must pass through `provider()` /
/// `provider_mut()`, which reject access until `initialize` has run. This
/// replaces nullable shared state with an explicit readiness gate.
pub enum IdentityHandle<P> {
    Uninitialized,
    Ready(P),
}

impl<P: IdentityProvider> IdentityHandle<P> {
    pub fn new() -> Self {
        Self::Uninitialized
    }

    /// Installs the provider, moving the handle to `Ready`.
    ///
    /// Re-initialization replaces the previous provider; any session it
    /// held is dropped with it.
    pub fn initialize(&mut self, provider: P) {
        if matches!(self, Self::Ready(_)) {
            warn!("event=identity_init module=identity status=ok note=reinitialized");
        } else {
            info!("event=identity_init module=identity status=ok");
        }
        *self = Self::Ready(provider);
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Returns the provider, or `NotReady` before initialization.
    pub fn provider(&self) -> Result<&P, IdentityError> {
        match self {
            Self::Ready(provider) => Ok(provider),
            Self::Uninitialized => Err(IdentityError::NotReady),
        }
    }

    /// Mutable access for sign-in/sign-out flows.
    pub fn provider_mut(&mut self) -> Result<&mut P, IdentityError> {
        match self {
            Self::Ready(provider) => Ok(provider),
            Self::Uninitialized => Err(IdentityError::NotReady),
        }
    }

    /// Convenience passthrough: the signed-in user of a ready handle.
    pub fn current_user(&self) -> Result<Option<UserId>, IdentityError> {
        Ok(self.provider()?.current_user())
    }
}

impl<P: IdentityProvider> Default for IdentityHandle<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory credential table, used by the CLI probe and tests.
#[derive(Debug, Default)]
pub struct StaticIdentityProvider {
    /// email -> (password, user id)
    users: BTreeMap<String, (String, UserId)>,
    current: Option<UserId>,
}

impl StaticIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one credential triple.
    pub fn with_user(
        mut self,
        email: impl Into<String>,
        password: impl Into<String>,
        user_id: impl Into<UserId>,
    ) -> Self {
        self.users
            .insert(email.into(), (password.into(), user_id.into()));
        self
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn current_user(&self) -> Option<UserId> {
        self.current.clone()
    }

    fn sign_in(&mut self, email: &str, password: &str) -> Result<UserId, IdentityError> {
        match self.users.get(email) {
            Some((expected, user_id)) if expected == password => {
                self.current = Some(user_id.clone());
                info!("event=sign_in module=identity status=ok");
                Ok(user_id.clone())
            }
            _ => {
                warn!("event=sign_in module=identity status=error error_code=invalid_credentials");
                Err(IdentityError::InvalidCredentials)
            }
        }
    }

    fn sign_out(&mut self) {
        if self.current.take().is_some() {
            info!("event=sign_out module=identity status=ok");
        }
    }
}

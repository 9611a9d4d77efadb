use tracing::{info, warn};

use crate::api::ApiClient;
use crate::auth::accounts;
use crate::auth::gate::{self, Access, Page};
use crate::auth::session::SessionStore;
use crate::models::{NewUser, Role, User, UserStatus};
use crate::utils::error::{ClientError, ClientResult};

/// Holds at most one logged-in identity, mirrored to a [`SessionStore`].
///
/// The identity is trusted as stored: it gates what the client shows but is never
/// presented to, or checked by, the backend.
#[derive(Debug)]
pub struct AuthContext<S: SessionStore> {
    store: S,
    user: Option<User>,
}

impl<S: SessionStore> AuthContext<S> {
    /// Restores the saved identity. A corrupt session is discarded, not fatal.
    pub fn restore(store: S) -> ClientResult<Self> {
        let user = match store.load() {
            Ok(user) => user,
            Err(err @ ClientError::SessionFormat(_)) => {
                warn!(error = %err, "Discarding unreadable session");
                store.clear()?;
                None
            }
            Err(err) => return Err(err),
        };

        if let Some(user) = &user {
            info!(user_id = %user.id, role = %user.role, "Session restored");
        }

        Ok(Self { store, user })
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn require_user(&self) -> ClientResult<&User> {
        self.user.as_ref().ok_or(ClientError::Unauthenticated)
    }

    pub fn authorize(&self, page: Page) -> Access<'_> {
        gate::authorize(self.user.as_ref(), page)
    }

    /// Returns `Ok(false)` for bad credentials; `Err` only when the session cannot be saved.
    pub fn login(&mut self, email: &str, password: &str) -> ClientResult<bool> {
        let Some(user) = accounts::authenticate(email, password) else {
            warn!(email = %email, "Login rejected");
            return Ok(false);
        };

        self.store.save(&user)?;
        info!(user_id = %user.id, role = %user.role, "Logged in");
        self.user = Some(user);
        Ok(true)
    }

    pub fn logout(&mut self) -> ClientResult<()> {
        self.store.clear()?;
        if let Some(user) = self.user.take() {
            info!(user_id = %user.id, "Logged out");
        }
        Ok(())
    }

    /// Creates a customer account on the backend. Does not log the new user in.
    pub async fn register(
        &self,
        api: &ApiClient,
        name: &str,
        email: &str,
        password: &str,
        phone: &str,
    ) -> ClientResult<User> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(ClientError::Validation(
                "Name, email and password are required".to_string(),
            ));
        }

        let request = NewUser {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
            phone: phone.trim().to_string(),
            role: Role::Customer,
            status: UserStatus::Active,
        };

        let user = api.create_user(&request).await?;
        info!(user_id = %user.id, "Registered");
        Ok(user)
    }
}

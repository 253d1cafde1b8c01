//! Authentication service — signup, login, and token verification.

use onvest_core::error::{OnvestError, OnvestResult};
use onvest_core::models::user::{CreateUser, PublicUser, UserRole};
use onvest_core::repository::UserRepository;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;

/// Successful login result.
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed JWT access token.
    pub access_token: String,
    /// The authenticated user.
    pub user: PublicUser,
    /// Token lifetime in seconds.
    pub expires_in: u64,
}

/// Authentication service.
///
/// Generic over the user repository so it carries no database
/// dependency of its own.
pub struct AuthService<U: UserRepository> {
    user_repo: U,
    config: AuthConfig,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(user_repo: U, config: AuthConfig) -> Self {
        Self { user_repo, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Register a new account with the `user` role.
    ///
    /// Admin accounts are provisioned out of band; there is no
    /// self-service path to the `admin` role.
    pub async fn signup(&self, username: &str, password: &str) -> OnvestResult<Uuid> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials.into());
        }

        // 1. Reject taken usernames up front. The unique index on the
        //    user table remains the backstop for concurrent signups.
        match self.user_repo.get_by_username(username).await {
            Ok(_) => return Err(AuthError::UsernameTaken.into()),
            Err(OnvestError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        // 2. Hash the password; the plaintext never leaves this call.
        let password_hash = password::hash_password(password)?;

        // 3. Persist.
        let user = self
            .user_repo
            .create(CreateUser {
                username: username.to_string(),
                password_hash,
                role: UserRole::User,
            })
            .await?;

        Ok(user.id)
    }

    /// Authenticate with username and password, issuing an access token.
    ///
    /// Unknown usernames and wrong passwords fail identically.
    pub async fn login(&self, username: &str, password: &str) -> OnvestResult<LoginOutput> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials.into());
        }

        // 1. Look up the user.
        let user = match self.user_repo.get_by_username(username).await {
            Ok(user) => user,
            Err(OnvestError::NotFound { .. }) => {
                // Burn a hash so the unknown-user path costs about as
                // much as a real verification.
                let _ = password::hash_password(password);
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        // 2. Verify the password.
        if !password::verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        // 3. Issue the access token.
        let public = user.to_public();
        let access_token = token::issue_access_token(&public, &self.config)?;

        Ok(LoginOutput {
            access_token,
            user: public,
            expires_in: self.config.token_lifetime_secs,
        })
    }

    /// Validate a bearer token and return the user it identifies.
    pub fn verify(&self, token: &str) -> OnvestResult<PublicUser> {
        let validated = token::validate_access_token(token, &self.config)?;
        Ok(validated.0.to_public_user()?)
    }
}

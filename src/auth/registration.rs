//! Account creation and credential checks.

use tracing::{info, warn};

use crate::auth::{hash_password, verify_password};
use crate::db::{Database, NewUser, User, UserRepository};
use crate::queue::{Job, JobQueue};
use crate::{FilesError, Result};

/// Registration request data.
#[derive(Debug, Clone, Default)]
pub struct RegistrationRequest {
    /// Login email.
    pub email: Option<String>,
    /// Plain-text password.
    pub password: Option<String>,
}

impl RegistrationRequest {
    /// Create a new registration request.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }
}

/// Create an account and queue its welcome mail.
///
/// Fails with `"Missing email"`, `"Missing password"` or `"Already exist"`.
pub async fn register(
    db: &Database,
    queue: &dyn JobQueue,
    request: RegistrationRequest,
) -> Result<User> {
    let email = request
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| FilesError::validation("Missing email"))?;
    let password = request
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| FilesError::validation("Missing password"))?;

    let repo = UserRepository::new(db.pool());
    if repo.email_exists(&email).await? {
        return Err(FilesError::validation("Already exist"));
    }

    let hash = hash_password(&password)?;
    let user = repo.create(&NewUser::new(email, hash)).await?;
    info!(user_id = %user.object_id(), "User registered");

    queue.enqueue(Job::welcome_email(&user.object_id())).await?;

    Ok(user)
}

/// Look up the account for `email` and check its password.
///
/// Unknown email and wrong password fail the same way.
pub async fn authenticate(db: &Database, email: &str, password: &str) -> Result<User> {
    let repo = UserRepository::new(db.pool());
    let Some(user) = repo.get_by_email(email).await? else {
        warn!("Login failed: unknown email");
        return Err(FilesError::Auth("invalid credentials".to_string()));
    };

    if verify_password(password, &user.password).is_err() {
        warn!(user_id = %user.object_id(), "Login failed: wrong password");
        return Err(FilesError::Auth("invalid credentials".to_string()));
    }

    Ok(user)
}

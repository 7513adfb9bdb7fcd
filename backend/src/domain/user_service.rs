//! User creation and lookup.

use crate::domain::ports::LedgerStore;
use crate::domain::{CREATED_AT_PLACEHOLDER, EntityRepository, Error, User};

/// Arguments for [`UserService::create_user`].
#[derive(Debug, Clone, Default)]
pub struct CreateUserRequest {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub organization: String,
    /// Produced by the caller; stored verbatim.
    pub password_hash: String,
}

/// Creates and reads users.
pub struct UserService<'s, S: ?Sized> {
    repository: EntityRepository<'s, S>,
}

impl<'s, S> UserService<'s, S>
where
    S: LedgerStore + ?Sized,
{
    pub fn new(repository: EntityRepository<'s, S>) -> Self {
        Self { repository }
    }

    pub fn create_user(&self, request: CreateUserRequest) -> Result<(), Error> {
        let user = User {
            username: request.username,
            full_name: request.full_name,
            email: request.email,
            role: request.role,
            organization: request.organization,
            password_hash: request.password_hash,
            created_at: CREATED_AT_PLACEHOLDER.to_owned(),
        };
        self.repository.create(&user)?;
        tracing::info!(username = %user.username, organization = %user.organization, "user created");
        Ok(())
    }

    /// Returns the stored document, password hash included.
    pub fn query_user(&self, username: &str) -> Result<User, Error> {
        self.repository.get(username)
    }
}

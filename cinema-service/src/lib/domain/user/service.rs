use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::ResetToken;
use chrono::Utc;

use crate::domain::user::models::AuthSession;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::ResetPasswordCommand;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::PhotoStorage;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for account operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR, PS>
where
    UR: UserRepository,
    PS: PhotoStorage,
{
    repository: Arc<UR>,
    photo_storage: Arc<PS>,
    authenticator: Arc<Authenticator>,
}

impl<UR, PS> UserService<UR, PS>
where
    UR: UserRepository,
    PS: PhotoStorage,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `photo_storage` - Profile photo storage implementation
    /// * `authenticator` - Password hashing and token issuing
    ///
    /// # Returns
    /// Configured user service instance
    pub fn new(
        repository: Arc<UR>,
        photo_storage: Arc<PS>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            repository,
            photo_storage,
            authenticator,
        }
    }

    async fn find_existing(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl<UR, PS> UserServicePort for UserService<UR, PS>
where
    UR: UserRepository,
    PS: PhotoStorage,
{
    async fn register(&self, command: CreateUserCommand) -> Result<AuthSession, UserError> {
        if command.password.is_empty() {
            return Err(UserError::MissingField("password".to_string()));
        }

        // The unique index still catches a racing registration.
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self.authenticator.hash_password(&command.password)?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            is_admin: false,
            phone: None,
            bio: None,
            address: None,
            photo: None,
            reset: None,
            created_at: now,
            updated_at: now,
        };

        let created_user = self.repository.create(user).await?;
        let token = self.authenticator.issue_token(created_user.id)?;

        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(AuthSession {
            user: created_user,
            token,
        })
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, UserError> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        let result = self
            .authenticator
            .authenticate(password, &user.password_hash, user.id)?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthSession {
            user,
            token: result.access_token,
        })
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.find_existing(id).await
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError> {
        let mut user = self.find_existing(id).await?;

        if let Some(new_name) = command.name {
            user.name = new_name;
        }

        if let Some(new_email) = command.email {
            if new_email != user.email {
                let taken = self
                    .repository
                    .find_by_email(new_email.as_str())
                    .await?
                    .is_some_and(|other| other.id != user.id);

                if taken {
                    return Err(UserError::EmailAlreadyExists(
                        new_email.as_str().to_string(),
                    ));
                }
            }
            user.email = new_email;
        }

        if let Some(phone) = command.phone {
            user.phone = Some(phone);
        }

        if let Some(bio) = command.bio {
            user.bio = Some(bio);
        }

        if let Some(address) = command.address {
            user.address = Some(address);
        }

        let mut stored_photo = None;
        if let Some(upload) = command.photo {
            let path = self.photo_storage.store(upload).await?;
            tracing::debug!(user_id = %user.id, photo = %path, "Profile photo stored");
            user.photo = Some(path.clone());
            stored_photo = Some(path);
        }

        user.updated_at = Utc::now();

        let updated_user = match self.repository.update(user).await {
            Ok(user) => user,
            Err(e) => {
                if let Some(path) = stored_photo {
                    if let Err(remove_err) = self.photo_storage.remove(&path).await {
                        tracing::warn!(
                            photo = %path,
                            error = %remove_err,
                            "Failed to remove orphaned profile photo"
                        );
                    }
                }
                return Err(e);
            }
        };

        tracing::info!(user_id = %updated_user.id, "User profile updated");

        Ok(updated_user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;

        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }

    async fn request_password_reset(&self, email: &str) -> Result<ResetToken, UserError> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| UserError::NotFound(email.to_string()))?;

        let reset = ResetToken::generate(Utc::now());
        self.repository
            .set_reset_token(&user.id, reset.token(), reset.expires_at())
            .await?;

        tracing::info!(
            user_id = %user.id,
            expires_at = %reset.expires_at(),
            "Password reset requested"
        );

        Ok(reset)
    }

    async fn reset_password(&self, command: ResetPasswordCommand) -> Result<(), UserError> {
        if command.token.is_empty() {
            return Err(UserError::MissingField("token".to_string()));
        }
        if command.new_password.is_empty() {
            return Err(UserError::MissingField("newPassword".to_string()));
        }

        let password_hash = self.authenticator.hash_password(&command.new_password)?;

        let user = self
            .repository
            .consume_reset_token(&command.token, &password_hash, Utc::now())
            .await?
            .ok_or(UserError::InvalidOrExpiredResetToken)?;

        tracing::info!(user_id = %user.id, "Password reset completed");

        Ok(())
    }
}

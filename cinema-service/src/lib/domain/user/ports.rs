use async_trait::async_trait;
use auth::ResetToken;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::AuthSession;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::PhotoUpload;
use crate::domain::user::models::ResetPasswordCommand;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::PhotoStorageError;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new account and sign the caller in.
    ///
    /// # Arguments
    /// * `command` - Validated command containing name, email, and password
    ///
    /// # Returns
    /// Created user with a bearer token bound to its id
    ///
    /// # Errors
    /// * `MissingField` - Password is empty
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: CreateUserCommand) -> Result<AuthSession, UserError>;

    /// Verify credentials and issue a bearer token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Retrieve every registered user.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// Merge-patch a user's profile.
    ///
    /// # Arguments
    /// * `id` - User ID to update
    /// * `command` - Fields to overwrite; absent fields keep their values
    ///
    /// # Returns
    /// Updated user entity
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email belongs to another user
    /// * `PhotoStorage` - Uploaded photo could not be stored
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError>;

    /// Permanently delete a user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;

    /// Start password recovery for the account registered under `email`.
    ///
    /// Any earlier pending reset for the account is replaced.
    ///
    /// # Returns
    /// The freshly issued reset token
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    /// * `DatabaseError` - Database operation failed
    async fn request_password_reset(&self, email: &str) -> Result<ResetToken, UserError>;

    /// Redeem a reset token and set a new password.
    ///
    /// # Errors
    /// * `MissingField` - Token or new password is empty
    /// * `InvalidOrExpiredResetToken` - Token unknown, already used, or expired
    /// * `DatabaseError` - Database operation failed
    async fn reset_password(&self, command: ResetPasswordCommand) -> Result<(), UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by exact email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Retrieve all users from storage.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<User>, UserError>;

    /// Update existing user in storage.
    ///
    /// Writes name, email, profile fields and `updated_at`. The password
    /// hash and pending reset are left untouched; only
    /// `consume_reset_token` changes them.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Remove user from storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;

    /// Record a pending reset, replacing any previous one.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn set_reset_token(
        &self,
        id: &UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), UserError>;

    /// Atomically swap in `password_hash` and clear the pending reset, but
    /// only for the user whose token equals `token` and expires after `now`.
    ///
    /// # Returns
    /// The updated user, or None when no live token matched
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn consume_reset_token(
        &self,
        token: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, UserError>;
}

/// Blob storage for profile photos.
#[async_trait]
pub trait PhotoStorage: Send + Sync + 'static {
    /// Store an uploaded photo.
    ///
    /// # Returns
    /// Public path the photo is served under
    ///
    /// # Errors
    /// * `EmptyUpload` - Upload carried no bytes
    /// * `WriteFailed` - Underlying storage rejected the write
    async fn store(&self, upload: PhotoUpload) -> Result<String, PhotoStorageError>;

    /// Delete a photo previously returned by `store`.
    ///
    /// Paths this storage did not issue are ignored.
    ///
    /// # Errors
    /// * `RemoveFailed` - Underlying storage rejected the delete
    async fn remove(&self, public_path: &str) -> Result<(), PhotoStorageError>;
}

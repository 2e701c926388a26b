//! Operator authentication and profile management.

use dioxus_logger::tracing;
use sea_orm::{DatabaseConnection, DbErr};

use crate::{
    model::user::{LoginDto, RegisterDto, UpdateProfileDto, UserDto},
    server::{
        data::user::UserRepository,
        error::{auth::AuthError, retry::is_unique_violation, Error},
        model::db::UserModel,
        service::retry::RetryContext,
        util::password::{hash_password, verify_password},
    },
};

pub const USERNAME_MIN_LEN: usize = 2;
pub const USERNAME_MAX_LEN: usize = 64;
pub const PASSWORD_MIN_LEN: usize = 6;

/// Username of the account created on first startup.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

impl From<UserModel> for UserDto {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            username: user.username,
            avatar: user.avatar,
        }
    }
}

/// Service for operator accounts.
///
/// Handles registration, credential checks, and profile changes. Session handling stays with
/// the controllers; this service only answers which user, if any, a request acts as.
pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    /// Creates a new instance of [`AuthService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new operator account
    ///
    /// # Returns
    /// - `Ok(UserDto)` - The created account
    /// - `Err(Error::AuthError(AuthError::Validation))` - Username or password rejected
    /// - `Err(Error::AuthError(AuthError::UsernameTaken))` - Username already in use
    pub async fn register(&self, dto: RegisterDto) -> Result<UserDto, Error> {
        let username = validate_username(&dto.username)?;
        validate_new_password(&dto.password, &dto.confirm_password)?;

        let user_repo = UserRepository::new(self.db);
        if user_repo.find_by_username(&username).await?.is_some() {
            return Err(AuthError::UsernameTaken(username).into());
        }

        let password_hash = hash_password(&dto.password)?;
        let user = user_repo
            .create(&username, &password_hash)
            .await
            .map_err(|e| username_conflict(e, &username))?;

        tracing::info!("Registered operator account {:?}", user.username);

        Ok(user.into())
    }

    /// Checks credentials, returning the matching user
    ///
    /// # Returns
    /// - `Ok(UserDto)` - Username exists and the password matches
    /// - `Err(Error::AuthError(AuthError::InvalidCredentials))` - Unknown user or wrong password
    pub async fn login(&self, dto: LoginDto) -> Result<UserDto, Error> {
        let user = UserRepository::new(self.db)
            .find_by_username(dto.username.trim())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&dto.password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(user.into())
    }

    /// Retrieves an operator account by ID
    ///
    /// # Returns
    /// - `Ok(Some(UserDto))` - User found
    /// - `Ok(None)` - User not found in database
    /// - `Err(Error::DbErr)` - Database operation failed after retries
    pub async fn get_user(&self, user_id: i32) -> Result<Option<UserDto>, Error> {
        let ctx = RetryContext::new();

        let user = ctx
            .execute_with_retry(&format!("get user ID {}", user_id), || async {
                Ok(UserRepository::new(self.db).get_by_id(user_id).await?)
            })
            .await?;

        Ok(user.map(UserDto::from))
    }

    /// Applies username and/or password changes to an account
    ///
    /// A password change needs the current password, a new password, and a matching
    /// confirmation. If the current password is wrong nothing is changed, including the
    /// username.
    ///
    /// # Returns
    /// - `Ok(UserDto)` - The account after the update
    /// - `Err(Error::AuthError(AuthError::IncorrectPassword))` - Current password is wrong
    /// - `Err(Error::AuthError(AuthError::UsernameTaken))` - New username already in use
    /// - `Err(Error::AuthError(AuthError::UserNotInDatabase))` - Account no longer exists
    pub async fn update_profile(
        &self,
        user_id: i32,
        dto: UpdateProfileDto,
    ) -> Result<UserDto, Error> {
        let user_repo = UserRepository::new(self.db);
        let user = user_repo
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotInDatabase(user_id))?;

        let username = match dto.username.as_deref().map(str::trim) {
            Some(username) if !username.is_empty() && username != user.username => {
                let username = validate_username(username)?;
                if user_repo.find_by_username(&username).await?.is_some() {
                    return Err(AuthError::UsernameTaken(username).into());
                }
                Some(username)
            }
            _ => None,
        };

        let current_password = dto.current_password.filter(|p| !p.is_empty());
        let new_password = dto.new_password.filter(|p| !p.is_empty());

        let password_hash = match (current_password, new_password) {
            (None, None) => None,
            (Some(current_password), Some(new_password)) => {
                validate_new_password(
                    &new_password,
                    dto.confirm_new_password.as_deref().unwrap_or_default(),
                )?;
                if !verify_password(&current_password, &user.password_hash)? {
                    return Err(AuthError::IncorrectPassword.into());
                }
                Some(hash_password(&new_password)?)
            }
            _ => {
                return Err(AuthError::Validation(
                    "Both the current and the new password are required to change the password."
                        .to_string(),
                )
                .into())
            }
        };

        if username.is_none() && password_hash.is_none() {
            return Ok(user.into());
        }

        let new_username = username.clone();
        let user = user_repo
            .update(user_id, username, password_hash)
            .await
            .map_err(|e| match &new_username {
                Some(username) => username_conflict(e, username),
                None => e.into(),
            })?
            .ok_or(AuthError::UserNotInDatabase(user_id))?;

        tracing::info!("Updated profile of user ID {}", user.id);

        Ok(user.into())
    }

    /// Creates the default `admin` account if no accounts exist yet
    ///
    /// # Returns
    /// - `Ok(true)` - The default account was created
    /// - `Ok(false)` - Accounts already exist, nothing changed
    pub async fn seed_default_user(&self, password: &str) -> Result<bool, Error> {
        let user_repo = UserRepository::new(self.db);
        if user_repo.count().await? > 0 {
            return Ok(false);
        }

        let password_hash = hash_password(password)?;
        user_repo
            .create(DEFAULT_ADMIN_USERNAME, &password_hash)
            .await?;

        tracing::warn!(
            "Created default user {:?}, change its password immediately via the profile page",
            DEFAULT_ADMIN_USERNAME
        );

        Ok(true)
    }
}

/// Maps a write that lost the race for `username` to [`AuthError::UsernameTaken`]
fn username_conflict(err: DbErr, username: &str) -> Error {
    if is_unique_violation(&err) {
        AuthError::UsernameTaken(username.to_string()).into()
    } else {
        err.into()
    }
}

fn validate_username(username: &str) -> Result<String, AuthError> {
    let username = username.trim();
    let len = username.chars().count();

    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(AuthError::Validation(format!(
            "Username must be between {} and {} characters.",
            USERNAME_MIN_LEN, USERNAME_MAX_LEN
        )));
    }

    Ok(username.to_string())
}

fn validate_new_password(password: &str, confirm_password: &str) -> Result<(), AuthError> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(AuthError::Validation(format!(
            "Password must be at least {} characters.",
            PASSWORD_MIN_LEN
        )));
    }
    if password != confirm_password {
        return Err(AuthError::Validation("Passwords do not match.".to_string()));
    }

    Ok(())
}

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter,
};

use crate::server::model::db::UserModel;

/// Avatar assigned to accounts that never uploaded one.
pub const DEFAULT_AVATAR: &str = "default_avatar.png";

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new operator account with the default avatar
    pub async fn create(&self, username: &str, password_hash: &str) -> Result<UserModel, DbErr> {
        let user = entity::orderdesk_user::ActiveModel {
            username: ActiveValue::Set(username.to_string()),
            password_hash: ActiveValue::Set(password_hash.to_string()),
            avatar: ActiveValue::Set(DEFAULT_AVATAR.to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    pub async fn get_by_id(&self, user_id: i32) -> Result<Option<UserModel>, DbErr> {
        entity::prelude::OrderdeskUser::find_by_id(user_id)
            .one(self.db)
            .await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<UserModel>, DbErr> {
        entity::prelude::OrderdeskUser::find()
            .filter(entity::orderdesk_user::Column::Username.eq(username))
            .one(self.db)
            .await
    }

    /// Number of operator accounts
    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::OrderdeskUser::find().count(self.db).await
    }

    /// Replaces the username and/or password hash of an account
    ///
    /// Fields passed as `None` are left untouched. Returns `Ok(None)` if the user does not
    /// exist.
    pub async fn update(
        &self,
        user_id: i32,
        username: Option<String>,
        password_hash: Option<String>,
    ) -> Result<Option<UserModel>, DbErr> {
        let user = match entity::prelude::OrderdeskUser::find_by_id(user_id)
            .one(self.db)
            .await?
        {
            Some(user) => user,
            None => return Ok(None),
        };

        let mut user_am = user.into_active_model();
        if let Some(username) = username {
            user_am.username = ActiveValue::Set(username);
        }
        if let Some(password_hash) = password_hash {
            user_am.password_hash = ActiveValue::Set(password_hash);
        }

        let user = user_am.update(self.db).await?;

        Ok(Some(user))
    }
}

use std::collections::HashMap;

use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::{
    model::user::{UserDto, UserRole},
    server::{
        data::user::UserRepository, error::Error, model::db::UserModel,
        service::retry::RetryContext,
    },
};

/// Service for reading user accounts.
///
/// Accounts are provisioned by the identity provider integration, this service only resolves
/// them for the session user context and for display names on other records.
pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of [`UserService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Retrieves a user with their role and landing path.
    ///
    /// # Returns
    /// - `Ok(Some(UserDto))` - User found
    /// - `Ok(None)` - User not found in database
    /// - `Err(Error::DbErr)` - Database operation failed after retries
    /// - `Err(Error::StoredValueError)` - The stored role is not a known role
    pub async fn get_user(&self, user_id: i32) -> Result<Option<UserDto>, Error> {
        let ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(&format!("get user ID {}", user_id), || {
            let db = db.clone();

            Box::pin(async move {
                let user_repo = UserRepository::new(&db);

                match user_repo.get_by_id(user_id).await? {
                    None => Ok(None),
                    Some(user) => Ok(Some(user_dto(user)?)),
                }
            })
        })
        .await
    }
}

pub(crate) fn user_dto(user: UserModel) -> Result<UserDto, Error> {
    let role: UserRole = user.role.parse()?;

    Ok(UserDto {
        id: user.id,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        role,
        landing_path: role.landing_path().to_string(),
    })
}

/// Looks up the display names of the provided user IDs.
///
/// IDs without a matching user are absent from the returned map.
pub(crate) async fn display_names<C: ConnectionTrait>(
    db: &C,
    user_ids: impl IntoIterator<Item = i32>,
) -> Result<HashMap<i32, String>, Error> {
    let mut ids: Vec<i32> = user_ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();

    let users = UserRepository::new(db).get_many(&ids).await?;

    Ok(users
        .into_iter()
        .map(|user| (user.id, format!("{} {}", user.first_name, user.last_name)))
        .collect())
}

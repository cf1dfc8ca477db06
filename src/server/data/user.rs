use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

use crate::server::model::db::UserModel;

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, user_id: i32) -> Result<Option<UserModel>, DbErr> {
        entity::prelude::BarangayUser::find_by_id(user_id)
            .one(self.db)
            .await
    }

    /// Gets the users with the provided IDs, IDs without a user are skipped
    pub async fn get_many(&self, user_ids: &[i32]) -> Result<Vec<UserModel>, DbErr> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::BarangayUser::find()
            .filter(entity::barangay_user::Column::Id.is_in(user_ids.iter().copied()))
            .all(self.db)
            .await
    }
}

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, model::UserModel, TestContext};

static NEXT_EMAIL: AtomicU64 = AtomicU64::new(1);

impl TestContext {
    pub fn user(&self) -> UserFixtures<'_> {
        UserFixtures { setup: self }
    }
}

pub struct UserFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> UserFixtures<'a> {
    /// Insert a user with the given role and a generated unique email.
    pub async fn insert_user(&self, role: &str) -> Result<UserModel, TestError> {
        let n = NEXT_EMAIL.fetch_add(1, Ordering::Relaxed);

        self.insert_user_with_email(&format!("{}{}@example.com", role, n), role)
            .await
    }

    pub async fn insert_user_with_email(
        &self,
        email: &str,
        role: &str,
    ) -> Result<UserModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::BarangayUser::insert(entity::barangay_user::ActiveModel {
                email: ActiveValue::Set(email.to_string()),
                first_name: ActiveValue::Set("Test".to_string()),
                last_name: ActiveValue::Set(capitalize(role)),
                role: ActiveValue::Set(role.to_string()),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

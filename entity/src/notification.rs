use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::barangay_user::Entity",
        from = "Column::UserId",
        to = "super::barangay_user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    BarangayUser,
}

impl Related<super::barangay_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BarangayUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

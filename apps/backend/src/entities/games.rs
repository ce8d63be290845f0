use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    /// Deadline for the next turn; pushed forward on every completed turn
    #[sea_orm(column_name = "next_expiration")]
    pub next_expiration: OffsetDateTime,
    #[sea_orm(column_name = "completed_at")]
    pub completed_at: Option<OffsetDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::turns::Entity")]
    Turns,
}

impl Related<super::turns::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Turns.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

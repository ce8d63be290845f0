use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "turns")]
pub struct Model {
    /// Monotonic; orders turns within a game
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "game_id")]
    pub game_id: i64,
    /// The only account allowed to complete this turn
    #[sea_orm(column_name = "account_id")]
    pub account_id: i64,
    #[sea_orm(column_name = "is_complete")]
    pub is_complete: bool,
    #[sea_orm(column_name = "is_drawing")]
    pub is_drawing: bool,
    /// JSON-encoded drawing; only meaningful when `is_drawing`
    #[sea_orm(column_type = "Text", nullable)]
    pub drawing: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub label: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::games::Entity",
        from = "Column::GameId",
        to = "super::games::Column::Id",
        on_delete = "Cascade"
    )]
    Game,
}

impl Related<super::games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

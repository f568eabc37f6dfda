//! Comment entity for SeaORM.
//!
//! There is deliberately no foreign key to `posts`: deleting a post leaves
//! its comments in place as orphans (see DESIGN.md).

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author_id: Uuid,
    pub post_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub modified_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for forum_core::domain::Comment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author_id: model.author_id,
            post_id: model.post_id,
            content: model.content,
            modified_at: model.modified_at.into(),
        }
    }
}

impl From<forum_core::domain::Comment> for ActiveModel {
    fn from(comment: forum_core::domain::Comment) -> Self {
        Self {
            id: Set(comment.id),
            author_id: Set(comment.author_id),
            post_id: Set(comment.post_id),
            content: Set(comment.content),
            modified_at: Set(comment.modified_at.into()),
        }
    }
}

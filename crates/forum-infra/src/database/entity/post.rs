//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author_id: Uuid,
    pub subject: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub tag: String,
    pub approval: Approval,
    pub modified_at: DateTimeWithTimeZone,
}

/// Stored approval flag. Two values only, matching the form's select choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Approval {
    #[sea_orm(string_value = "given")]
    Given,
    #[sea_orm(string_value = "not_given")]
    NotGiven,
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

impl From<Approval> for forum_core::domain::Approval {
    fn from(value: Approval) -> Self {
        match value {
            Approval::Given => Self::Given,
            Approval::NotGiven => Self::NotGiven,
        }
    }
}

impl From<forum_core::domain::Approval> for Approval {
    fn from(value: forum_core::domain::Approval) -> Self {
        match value {
            forum_core::domain::Approval::Given => Self::Given,
            forum_core::domain::Approval::NotGiven => Self::NotGiven,
        }
    }
}

impl From<Model> for forum_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author_id: model.author_id,
            subject: model.subject,
            content: model.content,
            tag: model.tag,
            approval: model.approval.into(),
            modified_at: model.modified_at.into(),
        }
    }
}

impl From<forum_core::domain::Post> for ActiveModel {
    fn from(post: forum_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            author_id: Set(post.author_id),
            subject: Set(post.subject),
            content: Set(post.content),
            tag: Set(post.tag),
            approval: Set(post.approval.into()),
            modified_at: Set(post.modified_at.into()),
        }
    }
}

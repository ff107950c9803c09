//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, Set};

use domain::User;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub username: String,
    pub email: String,
    pub state: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            username: model.username,
            email: model.email,
            state: model.state,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Full row for inserts
impl From<User> for ActiveModel {
    fn from(user: User) -> Self {
        ActiveModel {
            id: Set(user.id),
            username: Set(user.username),
            email: Set(user.email),
            state: Set(user.state),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
    }
}

impl ActiveModel {
    /// Row changes for an update keyed by ID; the key itself is left unset.
    pub fn for_update(user: User) -> Self {
        ActiveModel {
            id: NotSet,
            ..ActiveModel::from(user)
        }
    }
}

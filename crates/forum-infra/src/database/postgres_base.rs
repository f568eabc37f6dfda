use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DbConn, EntityTrait, IntoActiveModel, PrimaryKeyTrait,
    TryIntoModel,
};

use forum_core::error::RepoError;
use forum_core::ports::BaseRepository;

/// Generic SeaORM repository over any entity whose model converts to and
/// from a domain type.
pub struct PostgresRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

fn map_db_err(err: sea_orm::DbErr) -> RepoError {
    let msg = err.to_string();
    if msg.contains("duplicate") || msg.contains("unique") {
        RepoError::Constraint(msg)
    } else {
        RepoError::Query(msg)
    }
}

#[async_trait]
impl<E, T, ID> BaseRepository<T, ID> for PostgresRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel:
        ActiveModelTrait<Entity = E> + ActiveModelBehavior + TryIntoModel<E::Model> + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    ID: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
    T: From<E::Model> + Into<E::ActiveModel> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    /// Insert the row, falling back to an update when the primary key
    /// already exists. Domain entities generate their own ids, so the
    /// active model always carries a set primary key.
    ///
    /// Only a primary-key conflict means "this row already exists, update
    /// it". Conflicts on other unique columns (Postgres names those
    /// constraints without the `_pkey` suffix) are surfaced as constraint
    /// violations; updating by the fresh id would match nothing.
    async fn save(&self, entity: T) -> Result<T, RepoError> {
        let active: E::ActiveModel = entity.into();

        match E::insert(active.clone()).exec_with_returning(&self.db).await {
            Ok(model) => Ok(model.into()),
            Err(err) => match map_db_err(err) {
                RepoError::Constraint(ref msg) if msg.contains("_pkey") => {
                    let model = active.update(&self.db).await.map_err(map_db_err)?;
                    Ok(model.into())
                }
                other => Err(other),
            },
        }
    }

    async fn delete(&self, id: ID) -> Result<(), RepoError> {
        let result = E::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

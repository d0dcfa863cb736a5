//! Storage gateway: typed CRUD over one sea-orm entity.
//!
//! `Repository<A>` is parameterized by the entity's `ActiveModel`, so every
//! resource gets the same list/find/create/update/delete primitives without
//! repeating query code. Each call is an independent statement; there is no
//! surrounding transaction.

use std::marker::PhantomData;

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, Iterable, PrimaryKeyToColumn, PrimaryKeyTrait, QueryFilter,
};

use crate::errors::ServiceError;

/// Entity type behind an active model.
pub type EntityOf<A> = <A as ActiveModelTrait>::Entity;
/// Plain (read) model behind an active model.
pub type ModelOf<A> = <EntityOf<A> as EntityTrait>::Model;
/// Primary key value type of the entity behind an active model.
pub type IdOf<A> = <<EntityOf<A> as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

pub struct Repository<A> {
    db: DatabaseConnection,
    _record: PhantomData<fn() -> A>,
}

impl<A> Clone for Repository<A> {
    fn clone(&self) -> Self {
        Self { db: self.db.clone(), _record: PhantomData }
    }
}

impl<A> Repository<A>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send + 'static,
    ModelOf<A>: IntoActiveModel<A> + Send + Sync,
    IdOf<A>: From<i32>,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db, _record: PhantomData }
    }

    pub async fn find_all(&self) -> Result<Vec<ModelOf<A>>, ServiceError> {
        Ok(<EntityOf<A> as EntityTrait>::find().all(&self.db).await?)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<ModelOf<A>>, ServiceError> {
        Ok(<EntityOf<A> as EntityTrait>::find_by_id(id).one(&self.db).await?)
    }

    /// First row in storage order; used for singleton tables.
    pub async fn find_first(&self) -> Result<Option<ModelOf<A>>, ServiceError> {
        Ok(<EntityOf<A> as EntityTrait>::find().one(&self.db).await?)
    }

    /// Insert the record; the store assigns the identity.
    pub async fn create(&self, record: A) -> Result<ModelOf<A>, ServiceError> {
        Ok(record.insert(&self.db).await?)
    }

    /// Write only the `Set` fields of `changes` to the row with `id`.
    /// Returns the number of rows affected (0 when no row matched).
    pub async fn update_by_id(&self, id: i32, changes: A) -> Result<u64, ServiceError> {
        let pk = primary_key_column::<EntityOf<A>>()?;
        let res = <EntityOf<A> as EntityTrait>::update_many()
            .set(changes)
            .filter(pk.eq(id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected)
    }

    /// Returns the number of rows removed (0 when no row matched).
    pub async fn delete_by_id(&self, id: i32) -> Result<u64, ServiceError> {
        let res = <EntityOf<A> as EntityTrait>::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected)
    }
}

fn primary_key_column<E: EntityTrait>() -> Result<E::Column, ServiceError> {
    E::PrimaryKey::iter()
        .next()
        .map(|pk| pk.into_column())
        .ok_or_else(|| ServiceError::Db("entity has no primary key".into()))
}

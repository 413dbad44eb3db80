// src/services/crud_service.rs

// Every write endpoint answers with a one-element array, the wire
// contract the existing frontend already consumes.

use crate::{
    common::error::AppError,
    db::Repository,
    models::{new_id, Record, Stamp},
};

pub async fn create<E, R>(repo: &R, stamp: Stamp, new: E::New) -> Result<Vec<E>, AppError>
where
    E: Record,
    R: Repository<E> + ?Sized,
{
    let row = E::build(new_id(), &stamp, new);
    let created = repo.insert(row).await?;
    Ok(vec![created])
}

pub async fn update<E, R>(repo: &R, id: &str, patch: E::Patch, stamp: Stamp) -> Result<Vec<E>, AppError>
where
    E: Record,
    R: Repository<E> + ?Sized,
{
    repo.update(id, patch, &stamp)
        .await?
        .map(|row| vec![row])
        .ok_or(AppError::NotFound(E::ENTITY))
}

// src/services/contact_service.rs

use std::sync::Arc;

use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    common::{
        clock::Clock,
        error::{AppError, EntityKind},
    },
    db::ContactRepository,
    models::contact::{Contact, ContactFilter, ContactInput},
};

#[derive(Clone)]
pub struct ContactService {
    pool: SqlitePool,
    repo: ContactRepository,
    clock: Arc<dyn Clock>,
}

impl ContactService {
    pub fn new(pool: SqlitePool, repo: ContactRepository, clock: Arc<dyn Clock>) -> Self {
        Self { pool, repo, clock }
    }

    pub async fn list(&self, filter: &ContactFilter) -> Result<Vec<Contact>, AppError> {
        self.repo.list(filter).await
    }

    pub async fn get(&self, id: i64) -> Result<Contact, AppError> {
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Contact))
    }

    pub async fn create(&self, input: ContactInput) -> Result<Contact, AppError> {
        input.validate()?;
        let kind = input
            .contact_type()
            .ok_or_else(|| AppError::InvalidInput("invalid contact type".into()))?;

        let id = self
            .repo
            .create(
                &self.pool,
                &input.name,
                kind,
                input.email.as_deref(),
                input.phone.as_deref(),
                self.clock.now(),
            )
            .await?;

        self.get(id).await
    }

    pub async fn update(&self, id: i64, input: ContactInput) -> Result<Contact, AppError> {
        input.validate()?;
        let kind = input
            .contact_type()
            .ok_or_else(|| AppError::InvalidInput("invalid contact type".into()))?;

        let updated = self
            .repo
            .update(
                &self.pool,
                id,
                &input.name,
                kind,
                input.email.as_deref(),
                input.phone.as_deref(),
                self.clock.now(),
            )
            .await?;
        if updated == 0 {
            return Err(AppError::NotFound(EntityKind::Contact));
        }

        self.get(id).await
    }

    // Bills, invoices e movimentações ficam com contact_id = NULL.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let deleted = self.repo.delete(&self.pool, id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound(EntityKind::Contact));
        }
        Ok(())
    }
}

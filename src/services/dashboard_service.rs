// src/services/dashboard_service.rs

use sqlx::SqlitePool;

use crate::{common::error::AppError, db::DashboardRepository, models::dashboard::DashboardSummary};

#[derive(Clone)]
pub struct DashboardService {
    pool: SqlitePool,
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(pool: SqlitePool, repo: DashboardRepository) -> Self {
        Self { pool, repo }
    }

    pub async fn get_summary(&self) -> Result<DashboardSummary, AppError> {
        self.repo.get_summary(&self.pool).await
    }
}

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::{
    domain::{CreateLeadRequest, Lead, LeadStatus, UpdateLeadRequest},
    error::{AppError, Result},
    repository::LeadRepository,
};

#[derive(FromRow)]
struct LeadRow {
    id: i64,
    name: String,
    email: String,
    phone: String,
    destination: String,
    message: String,
    source: String,
    status: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteLeadRepository {
    pool: SqlitePool,
}

impl SqliteLeadRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_lead(row: LeadRow) -> Result<Lead> {
        Ok(Lead {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            destination: row.destination,
            message: row.message,
            source: row.source,
            status: LeadStatus::parse(&row.status)
                .ok_or_else(|| AppError::Database(format!("Invalid lead status: {}", row.status)))?,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }
}

#[async_trait]
impl LeadRepository for SqliteLeadRepository {
    async fn create(&self, lead: CreateLeadRequest) -> Result<Lead> {
        let now = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            INSERT INTO leads (name, email, phone, destination, message, source, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&lead.name)
        .bind(&lead.email)
        .bind(&lead.phone)
        .bind(&lead.destination)
        .bind(&lead.message)
        .bind(&lead.source)
        .bind(LeadStatus::New.as_str())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(result.last_insert_rowid())
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created lead".to_string()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Lead>> {
        let row = sqlx::query_as::<_, LeadRow>("SELECT * FROM leads WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_lead(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Lead>> {
        let rows = sqlx::query_as::<_, LeadRow>(
            "SELECT * FROM leads ORDER BY created_at DESC LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_lead).collect()
    }

    async fn list_by_status(&self, status: LeadStatus) -> Result<Vec<Lead>> {
        let rows = sqlx::query_as::<_, LeadRow>(
            "SELECT * FROM leads WHERE status = ? ORDER BY created_at DESC",
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_lead).collect()
    }

    async fn count_by_status(&self, status: LeadStatus) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM leads WHERE status = ?")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count.0)
    }

    async fn update(&self, id: i64, update: UpdateLeadRequest) -> Result<Lead> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Lead not found".to_string()))?;

        let status = update.status.unwrap_or(existing.status);
        let phone = update.phone.unwrap_or(existing.phone);
        let destination = update.destination.unwrap_or(existing.destination);
        let message = update.message.unwrap_or(existing.message);
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            UPDATE leads
            SET status = ?, phone = ?, destination = ?, message = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(status.as_str())
        .bind(&phone)
        .bind(&destination)
        .bind(&message)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve updated lead".to_string()))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM leads WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}

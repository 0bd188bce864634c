use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::{
    domain::{CreatePackageRequest, ItineraryDay, TourPackage, UpdatePackageRequest},
    error::{AppError, Result},
    repository::PackageRepository,
};

#[derive(FromRow)]
struct PackageRow {
    id: i64,
    name: String,
    city: String,
    days: i64,
    nights: i64,
    price: f64,
    summary: String,
    /// JSON-encoded itinerary; a corrupt blob reads as an empty itinerary
    /// rather than failing the listing.
    itinerary: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqlitePackageRepository {
    pool: SqlitePool,
}

impl SqlitePackageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_package(row: PackageRow) -> TourPackage {
        let itinerary: Vec<ItineraryDay> =
            serde_json::from_str(&row.itinerary).unwrap_or_default();

        TourPackage {
            id: row.id,
            name: row.name,
            city: row.city,
            days: row.days,
            nights: row.nights,
            price: row.price,
            summary: row.summary,
            itinerary,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        }
    }

    fn encode_itinerary(itinerary: &[ItineraryDay]) -> Result<String> {
        serde_json::to_string(itinerary).map_err(|e| AppError::Internal(e.to_string()))
    }
}

#[async_trait]
impl PackageRepository for SqlitePackageRepository {
    async fn create(&self, package: CreatePackageRequest) -> Result<TourPackage> {
        let itinerary = Self::encode_itinerary(&package.itinerary)?;
        let now = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            INSERT INTO packages (name, city, days, nights, price, summary, itinerary, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&package.name)
        .bind(&package.city)
        .bind(package.days)
        .bind(package.nights)
        .bind(package.price)
        .bind(&package.summary)
        .bind(&itinerary)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(result.last_insert_rowid())
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created package".to_string()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<TourPackage>> {
        let row = sqlx::query_as::<_, PackageRow>("SELECT * FROM packages WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.map(Self::row_to_package))
    }

    async fn list(&self) -> Result<Vec<TourPackage>> {
        let rows = sqlx::query_as::<_, PackageRow>("SELECT * FROM packages ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Self::row_to_package).collect())
    }

    async fn list_by_city(&self, city: &str) -> Result<Vec<TourPackage>> {
        let rows = sqlx::query_as::<_, PackageRow>(
            "SELECT * FROM packages WHERE city = ? COLLATE NOCASE ORDER BY name",
        )
        .bind(city)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Self::row_to_package).collect())
    }

    async fn update(&self, id: i64, update: UpdatePackageRequest) -> Result<TourPackage> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Package not found".to_string()))?;

        let itinerary =
            Self::encode_itinerary(update.itinerary.as_deref().unwrap_or(&existing.itinerary))?;
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            UPDATE packages
            SET name = ?, city = ?, days = ?, nights = ?, price = ?, summary = ?, itinerary = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(update.name.unwrap_or(existing.name))
        .bind(update.city.unwrap_or(existing.city))
        .bind(update.days.unwrap_or(existing.days))
        .bind(update.nights.unwrap_or(existing.nights))
        .bind(update.price.unwrap_or(existing.price))
        .bind(update.summary.unwrap_or(existing.summary))
        .bind(&itinerary)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve updated package".to_string()))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM packages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}

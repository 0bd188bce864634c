use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::{
    domain::{CityPage, UpsertCityPageRequest},
    error::{AppError, Result},
    repository::ContentRepository,
};

#[derive(FromRow)]
struct CityPageRow {
    id: i64,
    slug: String,
    city: String,
    hero_heading: String,
    intro: String,
    highlights: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteContentRepository {
    pool: SqlitePool,
}

impl SqliteContentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_page(row: CityPageRow) -> CityPage {
        CityPage {
            id: row.id,
            slug: row.slug,
            city: row.city,
            hero_heading: row.hero_heading,
            intro: row.intro,
            highlights: serde_json::from_str(&row.highlights).unwrap_or_default(),
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        }
    }
}

#[async_trait]
impl ContentRepository for SqliteContentRepository {
    async fn upsert(&self, slug: &str, page: UpsertCityPageRequest) -> Result<CityPage> {
        let highlights =
            serde_json::to_string(&page.highlights).map_err(|e| AppError::Internal(e.to_string()))?;
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO city_pages (slug, city, hero_heading, intro, highlights, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(slug) DO UPDATE SET
                city = excluded.city,
                hero_heading = excluded.hero_heading,
                intro = excluded.intro,
                highlights = excluded.highlights,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(slug)
        .bind(&page.city)
        .bind(&page.hero_heading)
        .bind(&page.intro)
        .bind(&highlights)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve upserted page".to_string()))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<CityPage>> {
        let row = sqlx::query_as::<_, CityPageRow>("SELECT * FROM city_pages WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.map(Self::row_to_page))
    }

    async fn list(&self) -> Result<Vec<CityPage>> {
        let rows = sqlx::query_as::<_, CityPageRow>("SELECT * FROM city_pages ORDER BY city")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Self::row_to_page).collect())
    }

    async fn delete(&self, slug: &str) -> Result<()> {
        sqlx::query("DELETE FROM city_pages WHERE slug = ?")
            .bind(slug)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}

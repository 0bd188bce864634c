use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::{
    domain::{
        CreateFixedDepartureRequest, CreateHotelRequest, CreateVehicleRequest, FixedDeparture,
        Hotel, Vehicle,
    },
    error::{AppError, Result},
    repository::CatalogRepository,
};

#[derive(FromRow)]
struct HotelRow {
    id: i64,
    name: String,
    city: String,
    category: String,
    created_at: NaiveDateTime,
}

#[derive(FromRow)]
struct VehicleRow {
    id: i64,
    name: String,
    capacity: i64,
    created_at: NaiveDateTime,
}

#[derive(FromRow)]
struct FixedDepartureRow {
    id: i64,
    city: String,
    package_name: String,
    departure_date: String,
    seats: i64,
    created_at: NaiveDateTime,
}

pub struct SqliteCatalogRepository {
    pool: SqlitePool,
}

impl SqliteCatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_departure(row: FixedDepartureRow) -> Result<FixedDeparture> {
        Ok(FixedDeparture {
            id: row.id,
            city: row.city,
            package_name: row.package_name,
            departure_date: NaiveDate::parse_from_str(&row.departure_date, "%Y-%m-%d")
                .map_err(|e| AppError::Database(e.to_string()))?,
            seats: row.seats,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        })
    }
}

#[async_trait]
impl CatalogRepository for SqliteCatalogRepository {
    async fn create_hotel(&self, hotel: CreateHotelRequest) -> Result<Hotel> {
        let now = Utc::now().naive_utc();

        let result = sqlx::query(
            "INSERT INTO hotels (name, city, category, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&hotel.name)
        .bind(&hotel.city)
        .bind(&hotel.category)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(Hotel {
            id: result.last_insert_rowid(),
            name: hotel.name,
            city: hotel.city,
            category: hotel.category,
            created_at: DateTime::from_naive_utc_and_offset(now, Utc),
        })
    }

    async fn list_hotels(&self) -> Result<Vec<Hotel>> {
        let rows = sqlx::query_as::<_, HotelRow>("SELECT * FROM hotels ORDER BY city, name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|r| Hotel {
                id: r.id,
                name: r.name,
                city: r.city,
                category: r.category,
                created_at: DateTime::from_naive_utc_and_offset(r.created_at, Utc),
            })
            .collect())
    }

    async fn delete_hotel(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM hotels WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn create_vehicle(&self, vehicle: CreateVehicleRequest) -> Result<Vehicle> {
        let now = Utc::now().naive_utc();

        let result =
            sqlx::query("INSERT INTO vehicles (name, capacity, created_at) VALUES (?, ?, ?)")
                .bind(&vehicle.name)
                .bind(vehicle.capacity)
                .bind(now)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(Vehicle {
            id: result.last_insert_rowid(),
            name: vehicle.name,
            capacity: vehicle.capacity,
            created_at: DateTime::from_naive_utc_and_offset(now, Utc),
        })
    }

    async fn list_vehicles(&self) -> Result<Vec<Vehicle>> {
        let rows = sqlx::query_as::<_, VehicleRow>("SELECT * FROM vehicles ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|r| Vehicle {
                id: r.id,
                name: r.name,
                capacity: r.capacity,
                created_at: DateTime::from_naive_utc_and_offset(r.created_at, Utc),
            })
            .collect())
    }

    async fn delete_vehicle(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM vehicles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn create_fixed_departure(
        &self,
        departure: CreateFixedDepartureRequest,
    ) -> Result<FixedDeparture> {
        let now = Utc::now().naive_utc();
        let date_str = departure.departure_date.format("%Y-%m-%d").to_string();

        let result = sqlx::query(
            r#"
            INSERT INTO fixed_departures (city, package_name, departure_date, seats, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&departure.city)
        .bind(&departure.package_name)
        .bind(&date_str)
        .bind(departure.seats)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(FixedDeparture {
            id: result.last_insert_rowid(),
            city: departure.city,
            package_name: departure.package_name,
            departure_date: departure.departure_date,
            seats: departure.seats,
            created_at: DateTime::from_naive_utc_and_offset(now, Utc),
        })
    }

    async fn list_fixed_departures(&self) -> Result<Vec<FixedDeparture>> {
        let rows = sqlx::query_as::<_, FixedDepartureRow>(
            "SELECT * FROM fixed_departures ORDER BY departure_date",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_departure).collect()
    }

    async fn delete_fixed_departure(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM fixed_departures WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}

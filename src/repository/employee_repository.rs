use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::{
    domain::{CreateEmployeeRequest, Employee, UpdateEmployeeRequest},
    error::{AppError, Result},
    repository::EmployeeRepository,
};

#[derive(FromRow)]
struct EmployeeRow {
    id: i64,
    name: String,
    email: String,
    role: String,
    created_at: NaiveDateTime,
}

pub struct SqliteEmployeeRepository {
    pool: SqlitePool,
}

impl SqliteEmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_employee(row: EmployeeRow) -> Employee {
        Employee {
            id: row.id,
            name: row.name,
            email: row.email,
            role: row.role,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        }
    }
}

#[async_trait]
impl EmployeeRepository for SqliteEmployeeRepository {
    async fn create(&self, employee: CreateEmployeeRequest) -> Result<Employee> {
        let now = Utc::now().naive_utc();

        let result = sqlx::query(
            "INSERT INTO employees (name, email, role, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(&employee.role)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                AppError::Conflict("Employee email already exists".to_string())
            } else {
                AppError::Database(e.to_string())
            }
        })?;

        Ok(Employee {
            id: result.last_insert_rowid(),
            name: employee.name,
            email: employee.email,
            role: employee.role,
            created_at: DateTime::from_naive_utc_and_offset(now, Utc),
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>("SELECT * FROM employees WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.map(Self::row_to_employee))
    }

    async fn list(&self) -> Result<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>("SELECT * FROM employees ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Self::row_to_employee).collect())
    }

    async fn update(&self, id: i64, update: UpdateEmployeeRequest) -> Result<Employee> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

        sqlx::query("UPDATE employees SET name = ?, email = ?, role = ? WHERE id = ?")
            .bind(update.name.unwrap_or(existing.name))
            .bind(update.email.unwrap_or(existing.email))
            .bind(update.role.unwrap_or(existing.role))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve updated employee".to_string()))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}

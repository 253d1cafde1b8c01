//! SurrealDB implementation of [`EmployeeRepository`].

use onvest_core::error::OnvestResult;
use onvest_core::models::employee::Employee;
use onvest_core::repository::EmployeeRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct EmployeeRow {
    name: String,
    position: String,
}

#[derive(Debug, SurrealValue)]
struct EmployeeRowWithId {
    record_id: String,
    name: String,
    position: String,
}

impl EmployeeRowWithId {
    fn try_into_employee(self) -> Result<Employee, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Corrupt(format!("invalid employee UUID: {e}")))?;
        Ok(Employee {
            id,
            name: self.name,
            position: self.position,
        })
    }
}

/// SurrealDB implementation of the Employee repository.
#[derive(Clone)]
pub struct SurrealEmployeeRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealEmployeeRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> EmployeeRepository for SurrealEmployeeRepository<C> {
    async fn get_by_id(&self, id: Uuid) -> OnvestResult<Employee> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('employee', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<EmployeeRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "employee".into(),
            id: id_str,
        })?;

        Ok(Employee {
            id,
            name: row.name,
            position: row.position,
        })
    }

    async fn list(&self) -> OnvestResult<Vec<Employee>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM employee \
                 ORDER BY name ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<EmployeeRowWithId> = result.take(0).map_err(DbError::from)?;
        rows.into_iter()
            .map(|row| row.try_into_employee().map_err(Into::into))
            .collect()
    }
}

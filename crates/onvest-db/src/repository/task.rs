//! SurrealDB implementation of [`TaskRepository`].

use chrono::{DateTime, Utc};
use onvest_core::error::OnvestResult;
use onvest_core::models::task::{AdminTask, TaskStatus, UpdateTask};
use onvest_core::repository::TaskRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
pub(super) struct TaskRow {
    application_id: String,
    assigned_to_employee_id: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct TaskRowWithId {
    record_id: String,
    application_id: String,
    assigned_to_employee_id: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_status(status: &str) -> Result<TaskStatus, DbError> {
    TaskStatus::parse(status)
        .ok_or_else(|| DbError::Corrupt(format!("unknown task status: {status}")))
}

impl TaskRow {
    pub(super) fn into_task(self, id: Uuid) -> Result<AdminTask, DbError> {
        let application_id = Uuid::parse_str(&self.application_id)
            .map_err(|e| DbError::Corrupt(format!("invalid application UUID: {e}")))?;
        let assigned_to_employee_id = self
            .assigned_to_employee_id
            .map(|raw| {
                Uuid::parse_str(&raw)
                    .map_err(|e| DbError::Corrupt(format!("invalid employee UUID: {e}")))
            })
            .transpose()?;
        Ok(AdminTask {
            id,
            application_id,
            assigned_to_employee_id,
            status: parse_status(&self.status)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl TaskRowWithId {
    fn try_into_task(self) -> Result<AdminTask, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Corrupt(format!("invalid task UUID: {e}")))?;
        let row = TaskRow {
            application_id: self.application_id,
            assigned_to_employee_id: self.assigned_to_employee_id,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        row.into_task(id)
    }
}

/// SurrealDB implementation of the Task repository.
#[derive(Clone)]
pub struct SurrealTaskRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealTaskRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> TaskRepository for SurrealTaskRepository<C> {
    async fn get_by_application(&self, application_id: Uuid) -> OnvestResult<Option<AdminTask>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM admin_task \
                 WHERE application_id = $application_id",
            )
            .bind(("application_id", application_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TaskRowWithId> = result.take(0).map_err(DbError::from)?;
        rows.into_iter()
            .next()
            .map(|row| row.try_into_task().map_err(Into::into))
            .transpose()
    }

    async fn list(&self) -> OnvestResult<Vec<AdminTask>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM admin_task \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TaskRowWithId> = result.take(0).map_err(DbError::from)?;
        rows.into_iter()
            .map(|row| row.try_into_task().map_err(Into::into))
            .collect()
    }

    async fn list_by_status(&self, status: TaskStatus) -> OnvestResult<Vec<AdminTask>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM admin_task \
                 WHERE status = $status \
                 ORDER BY created_at ASC",
            )
            .bind(("status", status.as_str().to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TaskRowWithId> = result.take(0).map_err(DbError::from)?;
        rows.into_iter()
            .map(|row| row.try_into_task().map_err(Into::into))
            .collect()
    }

    async fn update(&self, id: Uuid, input: UpdateTask) -> OnvestResult<AdminTask> {
        let id_str = id.to_string();

        let mut sets: Vec<&str> = Vec::new();
        if input.assigned_to_employee_id.is_some() {
            sets.push("assigned_to_employee_id = $assigned_to_employee_id");
        }
        if input.status.is_some() {
            sets.push("status = $status");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('admin_task', $id) SET {}",
            sets.join(", ")
        );

        let mut q = self.db.query(query).bind(("id", id_str.clone()));
        if let Some(employee_id) = input.assigned_to_employee_id {
            q = q.bind(("assigned_to_employee_id", employee_id.to_string()));
        }
        if let Some(status) = input.status {
            q = q.bind(("status", status.as_str().to_string()));
        }

        let mut result = q.await.map_err(DbError::from)?;

        let rows: Vec<TaskRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "admin_task".into(),
            id: id_str,
        })?;

        row.into_task(id).map_err(Into::into)
    }
}

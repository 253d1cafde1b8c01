//! SurrealDB implementation of [`UserRepository`].

use chrono::{DateTime, Utc};
use onvest_core::error::OnvestResult;
use onvest_core::models::user::{CreateUser, User, UserRole};
use onvest_core::repository::UserRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct UserRow {
    username: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct UserRowWithId {
    record_id: String,
    username: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
}

fn parse_role(role: &str) -> Result<UserRole, DbError> {
    UserRole::parse(role).ok_or_else(|| DbError::Corrupt(format!("unknown user role: {role}")))
}

impl UserRow {
    fn into_user(self, id: Uuid) -> Result<User, DbError> {
        Ok(User {
            id,
            username: self.username,
            password_hash: self.password_hash,
            role: parse_role(&self.role)?,
            created_at: self.created_at,
        })
    }
}

impl UserRowWithId {
    fn try_into_user(self) -> Result<User, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Corrupt(format!("invalid user UUID: {e}")))?;
        Ok(User {
            id,
            username: self.username,
            password_hash: self.password_hash,
            role: parse_role(&self.role)?,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB implementation of the User repository.
#[derive(Clone)]
pub struct SurrealUserRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealUserRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> UserRepository for SurrealUserRepository<C> {
    async fn create(&self, input: CreateUser) -> OnvestResult<User> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('user', $id) SET \
                 username = $username, \
                 password_hash = $password_hash, \
                 role = $role",
            )
            .bind(("id", id_str.clone()))
            .bind(("username", input.username))
            .bind(("password_hash", input.password_hash))
            .bind(("role", input.role.as_str().to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = match result.check() {
            Ok(result) => result,
            // Unique index violation on username.
            Err(e) if e.to_string().contains("already contains") => {
                return Err(DbError::Duplicate {
                    entity: "username".into(),
                }
                .into());
            }
            Err(e) => return Err(DbError::Surreal(e).into()),
        };

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: id_str,
        })?;

        row.into_user(id).map_err(Into::into)
    }

    async fn get_by_id(&self, id: Uuid) -> OnvestResult<User> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('user', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: id_str,
        })?;

        row.into_user(id).map_err(Into::into)
    }

    async fn get_by_username(&self, username: &str) -> OnvestResult<User> {
        let username_owned = username.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 WHERE username = $username",
            )
            .bind(("username", username_owned.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: format!("username={username_owned}"),
        })?;

        row.try_into_user().map_err(Into::into)
    }
}

//! Integration tests for the user repository using in-memory SurrealDB.

use onvest_core::error::OnvestError;
use onvest_core::models::user::{CreateUser, UserRole};
use onvest_core::repository::UserRepository;
use onvest_db::repository::SurrealUserRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

async fn setup() -> SurrealUserRepository<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    onvest_db::run_migrations(&db).await.unwrap();
    SurrealUserRepository::new(db)
}

fn create_input(username: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$c3RvcmVkaGFzaA".to_string(),
        role: UserRole::User,
    }
}

#[tokio::test]
async fn create_and_get_by_id() {
    let repo = setup().await;

    let created = repo.create(create_input("alice")).await.unwrap();
    assert_eq!(created.username, "alice");
    assert_eq!(created.role, UserRole::User);
    assert!(created.password_hash.starts_with("$argon2id$"));

    let fetched = repo.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.username, "alice");
    assert_eq!(fetched.password_hash, created.password_hash);
}

#[tokio::test]
async fn get_by_username() {
    let repo = setup().await;

    let created = repo.create(create_input("bob")).await.unwrap();
    let fetched = repo.get_by_username("bob").await.unwrap();

    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.role, UserRole::User);
}

#[tokio::test]
async fn duplicate_username_rejected() {
    let repo = setup().await;

    repo.create(create_input("alice")).await.unwrap();
    let result = repo.create(create_input("alice")).await;

    assert!(matches!(
        result,
        Err(OnvestError::AlreadyExists { .. })
    ));
}

#[tokio::test]
async fn unknown_user_not_found() {
    let repo = setup().await;

    let by_id = repo.get_by_id(Uuid::new_v4()).await;
    assert!(matches!(by_id, Err(OnvestError::NotFound { .. })));

    let by_name = repo.get_by_username("nobody").await;
    assert!(matches!(by_name, Err(OnvestError::NotFound { .. })));
}

#[tokio::test]
async fn admin_role_round_trips() {
    let repo = setup().await;

    let mut input = create_input("root-admin");
    input.role = UserRole::Admin;

    let created = repo.create(input).await.unwrap();
    let fetched = repo.get_by_username("root-admin").await.unwrap();

    assert_eq!(created.role, UserRole::Admin);
    assert_eq!(fetched.role, UserRole::Admin);
}

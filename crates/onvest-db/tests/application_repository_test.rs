//! Integration tests for the application repository using in-memory
//! SurrealDB.

use std::time::Duration;

use onvest_core::error::OnvestError;
use onvest_core::models::application::{ApplicationStatus, CreateApplication, FundSelection};
use onvest_core::models::task::TaskStatus;
use onvest_core::repository::ApplicationRepository;
use onvest_db::repository::SurrealApplicationRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

async fn setup() -> (SurrealApplicationRepository<Db>, Surreal<Db>) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    onvest_db::run_migrations(&db).await.unwrap();
    (SurrealApplicationRepository::new(db.clone()), db)
}

fn sample_application(user_id: Uuid) -> CreateApplication {
    CreateApplication {
        user_id,
        full_name: "Alice Example".to_string(),
        govt_id_number: "P123456".to_string(),
        mobile: "+41791234567".to_string(),
        email: "alice@example.com".to_string(),
        time_horizon: "5-10 years".to_string(),
        risk_tolerance: "moderate".to_string(),
        investments_owned: vec!["stocks".to_string(), "bonds".to_string()],
        acceptable_annual_return: "5-10%".to_string(),
        dob: "1990-04-02".to_string(),
        nationality: "Swiss".to_string(),
        address: "Bahnhofstrasse 1, Zurich".to_string(),
        client_type: "individual".to_string(),
        contact_details: Some("prefers email".to_string()),
        govt_id_file_path: "uploads/1-passport.pdf".to_string(),
        source_of_funds: "salary".to_string(),
        occupation_details: "software engineer".to_string(),
        income_proof_file_path: "uploads/2-payslip.pdf".to_string(),
        selected_funds: vec![
            FundSelection {
                id: 1,
                name: "Global Equity Fund".to_string(),
                amount: 10000.0,
            },
            FundSelection {
                id: 4,
                name: "Bond Income Fund".to_string(),
                amount: 2500.5,
            },
        ],
        terms_accepted: true,
    }
}

#[tokio::test]
async fn create_returns_application_and_open_task() {
    let (repo, _db) = setup().await;
    let user_id = Uuid::new_v4();

    let (application, task) = repo.create_with_task(sample_application(user_id)).await.unwrap();

    assert_eq!(application.user_id, user_id);
    assert_eq!(application.status, ApplicationStatus::Pending);
    assert_eq!(task.application_id, application.id);
    assert_eq!(task.status, TaskStatus::Open);
    assert_eq!(task.assigned_to_employee_id, None);
}

#[tokio::test]
async fn created_application_round_trips() {
    let (repo, _db) = setup().await;
    let input = sample_application(Uuid::new_v4());

    let (created, _task) = repo.create_with_task(input.clone()).await.unwrap();
    let fetched = repo.get_by_id(created.id).await.unwrap();

    assert_eq!(fetched.full_name, input.full_name);
    assert_eq!(fetched.investments_owned, input.investments_owned);
    assert_eq!(fetched.selected_funds, input.selected_funds);
    assert_eq!(fetched.contact_details, input.contact_details);
    assert!(fetched.terms_accepted);
    assert_eq!(fetched.submission_date, created.submission_date);
}

#[tokio::test]
async fn empty_contact_details_round_trips_as_none() {
    let (repo, _db) = setup().await;
    let mut input = sample_application(Uuid::new_v4());
    input.contact_details = None;

    let (created, _task) = repo.create_with_task(input).await.unwrap();
    let fetched = repo.get_by_id(created.id).await.unwrap();

    assert_eq!(fetched.contact_details, None);
}

#[tokio::test]
async fn second_task_for_same_application_rejected() {
    let (repo, db) = setup().await;

    let (application, _task) = repo
        .create_with_task(sample_application(Uuid::new_v4()))
        .await
        .unwrap();

    // The unique index on application_id guards the 1:1 pairing.
    let result = db
        .query(
            "CREATE admin_task SET \
             application_id = $application_id, \
             assigned_to_employee_id = NONE, \
             status = 'open'",
        )
        .bind(("application_id", application.id.to_string()))
        .await
        .unwrap()
        .check();

    assert!(result.is_err(), "second task for one application should be rejected");
}

#[tokio::test]
async fn list_by_status_ordered_oldest_first() {
    let (repo, _db) = setup().await;

    let (first, _) = repo
        .create_with_task(sample_application(Uuid::new_v4()))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    let (second, _) = repo
        .create_with_task(sample_application(Uuid::new_v4()))
        .await
        .unwrap();

    let pending = repo.list_by_status(ApplicationStatus::Pending).await.unwrap();
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].id, first.id);
    assert_eq!(pending[1].id, second.id);

    let approved = repo.list_by_status(ApplicationStatus::Approved).await.unwrap();
    assert!(approved.is_empty());
}

#[tokio::test]
async fn latest_for_user_picks_most_recent() {
    let (repo, _db) = setup().await;
    let user_id = Uuid::new_v4();

    assert!(repo.latest_for_user(user_id).await.unwrap().is_none());

    repo.create_with_task(sample_application(user_id)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    let (second, _) = repo.create_with_task(sample_application(user_id)).await.unwrap();

    let latest = repo.latest_for_user(user_id).await.unwrap().unwrap();
    assert_eq!(latest.id, second.id);

    // Another user's submissions stay invisible.
    assert!(repo.latest_for_user(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn set_status_updates_and_returns() {
    let (repo, _db) = setup().await;

    let (application, _) = repo
        .create_with_task(sample_application(Uuid::new_v4()))
        .await
        .unwrap();

    let updated = repo
        .set_status(application.id, ApplicationStatus::Approved)
        .await
        .unwrap();
    assert_eq!(updated.status, ApplicationStatus::Approved);

    let fetched = repo.get_by_id(application.id).await.unwrap();
    assert_eq!(fetched.status, ApplicationStatus::Approved);
}

#[tokio::test]
async fn set_status_unknown_application_not_found() {
    let (repo, _db) = setup().await;

    let result = repo.set_status(Uuid::new_v4(), ApplicationStatus::Rejected).await;
    assert!(matches!(result, Err(OnvestError::NotFound { .. })));
}

#[tokio::test]
async fn get_unknown_application_not_found() {
    let (repo, _db) = setup().await;

    let result = repo.get_by_id(Uuid::new_v4()).await;
    assert!(matches!(result, Err(OnvestError::NotFound { .. })));
}

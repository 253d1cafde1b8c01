//! SurrealDB implementation of [`ApplicationRepository`].
//!
//! The list fields (`investments_owned`, `selected_funds`) are stored
//! as JSON text and decoded back at the row boundary, so application
//! content survives storage byte for byte.

use chrono::{DateTime, Utc};
use onvest_core::error::OnvestResult;
use onvest_core::models::application::{
    ApplicationStatus, CreateApplication, FundSelection, OnboardingApplication,
};
use onvest_core::models::task::AdminTask;
use onvest_core::repository::ApplicationRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::task::TaskRow;

#[derive(Debug, SurrealValue)]
struct ApplicationRow {
    user_id: String,
    full_name: String,
    govt_id_number: String,
    mobile: String,
    email: String,
    time_horizon: String,
    risk_tolerance: String,
    investments_owned: String,
    acceptable_annual_return: String,
    dob: String,
    nationality: String,
    address: String,
    client_type: String,
    contact_details: Option<String>,
    govt_id_file_path: String,
    source_of_funds: String,
    occupation_details: String,
    income_proof_file_path: String,
    selected_funds: String,
    terms_accepted: bool,
    submission_date: DateTime<Utc>,
    status: String,
}

#[derive(Debug, SurrealValue)]
struct ApplicationRowWithId {
    record_id: String,
    user_id: String,
    full_name: String,
    govt_id_number: String,
    mobile: String,
    email: String,
    time_horizon: String,
    risk_tolerance: String,
    investments_owned: String,
    acceptable_annual_return: String,
    dob: String,
    nationality: String,
    address: String,
    client_type: String,
    contact_details: Option<String>,
    govt_id_file_path: String,
    source_of_funds: String,
    occupation_details: String,
    income_proof_file_path: String,
    selected_funds: String,
    terms_accepted: bool,
    submission_date: DateTime<Utc>,
    status: String,
}

fn parse_status(status: &str) -> Result<ApplicationStatus, DbError> {
    ApplicationStatus::parse(status)
        .ok_or_else(|| DbError::Corrupt(format!("unknown application status: {status}")))
}

fn decode_string_list(field: &str, raw: &str) -> Result<Vec<String>, DbError> {
    serde_json::from_str(raw).map_err(|e| DbError::Corrupt(format!("{field}: {e}")))
}

fn decode_fund_list(field: &str, raw: &str) -> Result<Vec<FundSelection>, DbError> {
    serde_json::from_str(raw).map_err(|e| DbError::Corrupt(format!("{field}: {e}")))
}

impl ApplicationRow {
    fn into_application(self, id: Uuid) -> Result<OnboardingApplication, DbError> {
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| DbError::Corrupt(format!("invalid user UUID: {e}")))?;
        Ok(OnboardingApplication {
            id,
            user_id,
            full_name: self.full_name,
            govt_id_number: self.govt_id_number,
            mobile: self.mobile,
            email: self.email,
            time_horizon: self.time_horizon,
            risk_tolerance: self.risk_tolerance,
            investments_owned: decode_string_list("investments_owned", &self.investments_owned)?,
            acceptable_annual_return: self.acceptable_annual_return,
            dob: self.dob,
            nationality: self.nationality,
            address: self.address,
            client_type: self.client_type,
            contact_details: self.contact_details,
            govt_id_file_path: self.govt_id_file_path,
            source_of_funds: self.source_of_funds,
            occupation_details: self.occupation_details,
            income_proof_file_path: self.income_proof_file_path,
            selected_funds: decode_fund_list("selected_funds", &self.selected_funds)?,
            terms_accepted: self.terms_accepted,
            submission_date: self.submission_date,
            status: parse_status(&self.status)?,
        })
    }
}

impl ApplicationRowWithId {
    fn try_into_application(self) -> Result<OnboardingApplication, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Corrupt(format!("invalid application UUID: {e}")))?;
        let row = ApplicationRow {
            user_id: self.user_id,
            full_name: self.full_name,
            govt_id_number: self.govt_id_number,
            mobile: self.mobile,
            email: self.email,
            time_horizon: self.time_horizon,
            risk_tolerance: self.risk_tolerance,
            investments_owned: self.investments_owned,
            acceptable_annual_return: self.acceptable_annual_return,
            dob: self.dob,
            nationality: self.nationality,
            address: self.address,
            client_type: self.client_type,
            contact_details: self.contact_details,
            govt_id_file_path: self.govt_id_file_path,
            source_of_funds: self.source_of_funds,
            occupation_details: self.occupation_details,
            income_proof_file_path: self.income_proof_file_path,
            selected_funds: self.selected_funds,
            terms_accepted: self.terms_accepted,
            submission_date: self.submission_date,
            status: self.status,
        };
        row.into_application(id)
    }
}

/// SurrealDB implementation of the Application repository.
#[derive(Clone)]
pub struct SurrealApplicationRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealApplicationRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ApplicationRepository for SurrealApplicationRepository<C> {
    async fn create_with_task(
        &self,
        input: CreateApplication,
    ) -> OnvestResult<(OnboardingApplication, AdminTask)> {
        let app_id = Uuid::new_v4();
        let task_id = Uuid::new_v4();

        let investments_owned = serde_json::to_string(&input.investments_owned)
            .map_err(|e| DbError::Corrupt(format!("investments_owned: {e}")))?;
        let selected_funds = serde_json::to_string(&input.selected_funds)
            .map_err(|e| DbError::Corrupt(format!("selected_funds: {e}")))?;

        // Application and review task land in one transaction; neither
        // row can exist without the other.
        let result = self
            .db
            .query(
                "BEGIN TRANSACTION; \
                 CREATE type::record('application', $app_id) SET \
                 user_id = $user_id, \
                 full_name = $full_name, \
                 govt_id_number = $govt_id_number, \
                 mobile = $mobile, \
                 email = $email, \
                 time_horizon = $time_horizon, \
                 risk_tolerance = $risk_tolerance, \
                 investments_owned = $investments_owned, \
                 acceptable_annual_return = $acceptable_annual_return, \
                 dob = $dob, \
                 nationality = $nationality, \
                 address = $address, \
                 client_type = $client_type, \
                 contact_details = $contact_details, \
                 govt_id_file_path = $govt_id_file_path, \
                 source_of_funds = $source_of_funds, \
                 occupation_details = $occupation_details, \
                 income_proof_file_path = $income_proof_file_path, \
                 selected_funds = $selected_funds, \
                 terms_accepted = $terms_accepted, \
                 status = 'pending'; \
                 CREATE type::record('admin_task', $task_id) SET \
                 application_id = $app_id, \
                 assigned_to_employee_id = NONE, \
                 status = 'open'; \
                 COMMIT TRANSACTION;",
            )
            .bind(("app_id", app_id.to_string()))
            .bind(("task_id", task_id.to_string()))
            .bind(("user_id", input.user_id.to_string()))
            .bind(("full_name", input.full_name))
            .bind(("govt_id_number", input.govt_id_number))
            .bind(("mobile", input.mobile))
            .bind(("email", input.email))
            .bind(("time_horizon", input.time_horizon))
            .bind(("risk_tolerance", input.risk_tolerance))
            .bind(("investments_owned", investments_owned))
            .bind(("acceptable_annual_return", input.acceptable_annual_return))
            .bind(("dob", input.dob))
            .bind(("nationality", input.nationality))
            .bind(("address", input.address))
            .bind(("client_type", input.client_type))
            .bind(("contact_details", input.contact_details))
            .bind(("govt_id_file_path", input.govt_id_file_path))
            .bind(("source_of_funds", input.source_of_funds))
            .bind(("occupation_details", input.occupation_details))
            .bind(("income_proof_file_path", input.income_proof_file_path))
            .bind(("selected_funds", selected_funds))
            .bind(("terms_accepted", input.terms_accepted))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::Surreal)?;

        // Slots 0 and 3 belong to BEGIN/COMMIT; the CREATE results sit
        // at 1 and 2.
        let app_rows: Vec<ApplicationRow> = result.take(1).map_err(DbError::from)?;
        let app_row = app_rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::Corrupt("transaction returned no application row".into()))?;

        let task_rows: Vec<TaskRow> = result.take(2).map_err(DbError::from)?;
        let task_row = task_rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::Corrupt("transaction returned no task row".into()))?;

        let application = app_row.into_application(app_id)?;
        let task = task_row.into_task(task_id)?;

        Ok((application, task))
    }

    async fn get_by_id(&self, id: Uuid) -> OnvestResult<OnboardingApplication> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('application', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ApplicationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "application".into(),
            id: id_str,
        })?;

        row.into_application(id).map_err(Into::into)
    }

    async fn list(&self) -> OnvestResult<Vec<OnboardingApplication>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM application \
                 ORDER BY submission_date ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ApplicationRowWithId> = result.take(0).map_err(DbError::from)?;
        rows.into_iter()
            .map(|row| row.try_into_application().map_err(Into::into))
            .collect()
    }

    async fn list_by_status(
        &self,
        status: ApplicationStatus,
    ) -> OnvestResult<Vec<OnboardingApplication>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM application \
                 WHERE status = $status \
                 ORDER BY submission_date ASC",
            )
            .bind(("status", status.as_str().to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ApplicationRowWithId> = result.take(0).map_err(DbError::from)?;
        rows.into_iter()
            .map(|row| row.try_into_application().map_err(Into::into))
            .collect()
    }

    async fn latest_for_user(&self, user_id: Uuid) -> OnvestResult<Option<OnboardingApplication>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM application \
                 WHERE user_id = $user_id \
                 ORDER BY submission_date DESC \
                 LIMIT 1",
            )
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ApplicationRowWithId> = result.take(0).map_err(DbError::from)?;
        rows.into_iter()
            .next()
            .map(|row| row.try_into_application().map_err(Into::into))
            .transpose()
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> OnvestResult<OnboardingApplication> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("UPDATE type::record('application', $id) SET status = $status")
            .bind(("id", id_str.clone()))
            .bind(("status", status.as_str().to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ApplicationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "application".into(),
            id: id_str,
        })?;

        row.into_application(id).map_err(Into::into)
    }
}

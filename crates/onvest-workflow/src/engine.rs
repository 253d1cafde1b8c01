//! The onboarding workflow engine.

use std::collections::HashMap;

use onvest_core::error::{OnvestError, OnvestResult};
use onvest_core::models::application::{ApplicationStatus, CreateApplication, FundSelection};
use onvest_core::models::employee::Employee;
use onvest_core::models::task::{AdminTask, TaskStatus, UpdateTask};
use onvest_core::repository::{ApplicationRepository, EmployeeRepository, TaskRepository};
use serde::de::DeserializeOwned;
use tokio::sync::broadcast;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::WorkflowError;
use crate::event::{WorkflowEvent, WorkflowEventKind, WorkflowEvents};
use crate::query::{ApplicationDetail, ApplicationFilter, ApplicationSummary, StatusFilter};
use crate::storage::DocumentStore;

/// One uploaded document as received from the submission form.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Text fields of the onboarding form, verbatim as submitted.
///
/// List fields arrive JSON-encoded and the terms flag arrives as a
/// string, both exactly as the multipart form carries them; decoding
/// happens during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionForm {
    pub full_name: String,
    pub govt_id_number: String,
    pub mobile: String,
    pub email: String,
    pub time_horizon: String,
    pub risk_tolerance: String,
    pub investments_owned: String,
    pub acceptable_annual_return: String,
    pub dob: String,
    pub nationality: String,
    pub address: String,
    pub client_type: String,
    pub contact_details: String,
    pub source_of_funds: String,
    pub occupation_details: String,
    pub selected_funds: String,
    pub terms_accepted: String,
}

/// Outcome of a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub application_id: Uuid,
    pub status: ApplicationStatus,
}

/// Orchestrates the onboarding lifecycle: submission intake, the
/// application/task pair, and the admin review operations.
///
/// Generic over the repositories so it carries no database dependency.
pub struct OnboardingEngine<A, T, E>
where
    A: ApplicationRepository,
    T: TaskRepository,
    E: EmployeeRepository,
{
    applications: A,
    tasks: T,
    employees: E,
    documents: DocumentStore,
    events: WorkflowEvents,
}

impl<A, T, E> OnboardingEngine<A, T, E>
where
    A: ApplicationRepository,
    T: TaskRepository,
    E: EmployeeRepository,
{
    pub fn new(applications: A, tasks: T, employees: E, documents: DocumentStore) -> Self {
        Self {
            applications,
            tasks,
            employees,
            documents,
            events: WorkflowEvents::default(),
        }
    }

    /// Subscribe to workflow change events.
    pub fn subscribe(&self) -> broadcast::Receiver<WorkflowEvent> {
        self.events.subscribe()
    }

    /// Accept an onboarding submission for `user_id`.
    ///
    /// Validation runs before anything touches disk or the database;
    /// a rejected submission leaves no stored file and no row. The
    /// application and its open review task are created in one atomic
    /// write.
    pub async fn submit_application(
        &self,
        user_id: Uuid,
        form: SubmissionForm,
        govt_id_file: Option<UploadedDocument>,
        income_proof_file: Option<UploadedDocument>,
    ) -> OnvestResult<SubmissionReceipt> {
        // 1. Validate every field and document up front.
        validate_required_fields(&form)?;
        if form.terms_accepted != "true" {
            return Err(WorkflowError::TermsNotAccepted.into());
        }
        let govt_id_file =
            govt_id_file.ok_or(WorkflowError::MissingDocument("govtIdFile"))?;
        let income_proof_file =
            income_proof_file.ok_or(WorkflowError::MissingDocument("incomeProofFile"))?;

        let investments_owned: Vec<String> =
            parse_list_field("investmentsOwned", &form.investments_owned)?;
        let selected_funds: Vec<FundSelection> =
            parse_list_field("selectedFunds", &form.selected_funds)?;

        // 2. Stage both documents. If the second write fails, the first
        //    file is removed again.
        let govt_id_path = self
            .documents
            .store(&govt_id_file.filename, &govt_id_file.bytes)
            .await?;
        let income_proof_path = match self
            .documents
            .store(&income_proof_file.filename, &income_proof_file.bytes)
            .await
        {
            Ok(path) => path,
            Err(e) => {
                self.documents.remove(&govt_id_path).await;
                return Err(e.into());
            }
        };

        // 3. Persist application + review task atomically. On failure
        //    the staged documents are removed so nothing is left behind.
        let contact_details = form.contact_details.trim();
        let input = CreateApplication {
            user_id,
            full_name: form.full_name,
            govt_id_number: form.govt_id_number,
            mobile: form.mobile,
            email: form.email,
            time_horizon: form.time_horizon,
            risk_tolerance: form.risk_tolerance,
            investments_owned,
            acceptable_annual_return: form.acceptable_annual_return,
            dob: form.dob,
            nationality: form.nationality,
            address: form.address,
            client_type: form.client_type,
            contact_details: if contact_details.is_empty() {
                None
            } else {
                Some(contact_details.to_string())
            },
            govt_id_file_path: govt_id_path.to_string_lossy().into_owned(),
            source_of_funds: form.source_of_funds,
            occupation_details: form.occupation_details,
            income_proof_file_path: income_proof_path.to_string_lossy().into_owned(),
            selected_funds,
            terms_accepted: true,
        };

        let (application, _task) = match self.applications.create_with_task(input).await {
            Ok(pair) => pair,
            Err(e) => {
                self.documents.remove(&govt_id_path).await;
                self.documents.remove(&income_proof_path).await;
                return Err(e);
            }
        };

        info!(
            application_id = %application.id,
            user_id = %user_id,
            "onboarding application submitted"
        );
        self.events.publish(WorkflowEvent {
            kind: WorkflowEventKind::ApplicationSubmitted,
            application_id: application.id,
        });

        Ok(SubmissionReceipt {
            application_id: application.id,
            status: application.status,
        })
    }

    /// Review status of the user's most recent application, or `None`
    /// if they never submitted one.
    pub async fn onboarding_status(&self, user_id: Uuid) -> OnvestResult<Option<ApplicationStatus>> {
        let latest = self.applications.latest_for_user(user_id).await?;
        Ok(latest.map(|application| application.status))
    }

    /// Applications awaiting review: status `pending` with the review
    /// task still `open`, oldest submission first.
    pub async fn list_pending(&self) -> OnvestResult<Vec<ApplicationSummary>> {
        let applications = self
            .applications
            .list_by_status(ApplicationStatus::Pending)
            .await?;
        let open_tasks = self.tasks.list_by_status(TaskStatus::Open).await?;
        let by_application: HashMap<Uuid, &AdminTask> = open_tasks
            .iter()
            .map(|task| (task.application_id, task))
            .collect();

        Ok(applications
            .iter()
            .filter_map(|application| {
                by_application
                    .get(&application.id)
                    .copied()
                    .map(|task| ApplicationSummary::new(application, Some(task)))
            })
            .collect())
    }

    /// All applications matching `filter`, oldest submission first.
    pub async fn list_applications(
        &self,
        filter: ApplicationFilter,
    ) -> OnvestResult<Vec<ApplicationSummary>> {
        let applications = match filter.status {
            StatusFilter::All => self.applications.list().await?,
            StatusFilter::Status(status) => self.applications.list_by_status(status).await?,
        };
        let tasks = self.tasks.list().await?;
        let by_application: HashMap<Uuid, &AdminTask> = tasks
            .iter()
            .map(|task| (task.application_id, task))
            .collect();

        Ok(applications
            .iter()
            .map(|application| {
                ApplicationSummary::new(application, by_application.get(&application.id).copied())
            })
            .filter(|summary| filter.matches(summary))
            .collect())
    }

    /// Full content and review state of one application.
    pub async fn application_detail(&self, application_id: Uuid) -> OnvestResult<ApplicationDetail> {
        let application = self.applications.get_by_id(application_id).await?;
        let task = self.tasks.get_by_application(application_id).await?;
        Ok(ApplicationDetail::new(application, task))
    }

    /// Assign an employee to an application's review task.
    ///
    /// An `open` task moves to `in_progress`; any later status is left
    /// alone. Nothing is written unless both the employee and the task
    /// exist.
    pub async fn assign_employee(
        &self,
        application_id: Uuid,
        employee_id: Uuid,
    ) -> OnvestResult<()> {
        let employee = self.employees.get_by_id(employee_id).await?;

        let task = self
            .tasks
            .get_by_application(application_id)
            .await?
            .ok_or_else(|| OnvestError::NotFound {
                entity: "admin_task".into(),
                id: format!("application={application_id}"),
            })?;

        let next_status = (task.status == TaskStatus::Open).then_some(TaskStatus::InProgress);
        self.tasks
            .update(
                task.id,
                UpdateTask {
                    assigned_to_employee_id: Some(employee_id),
                    status: next_status,
                },
            )
            .await?;

        info!(
            application_id = %application_id,
            employee = %employee.name,
            "employee assigned to review task"
        );
        self.events.publish(WorkflowEvent {
            kind: WorkflowEventKind::EmployeeAssigned,
            application_id,
        });

        Ok(())
    }

    /// Set the review status of an application.
    ///
    /// The application row is the primary record and must exist. The
    /// paired task is synchronized afterwards (`approved`/`rejected`
    /// complete it, `pending` reopens it as `in_progress`); a missing
    /// task is logged and tolerated so the decision itself stands.
    pub async fn update_status(
        &self,
        application_id: Uuid,
        new_status: ApplicationStatus,
    ) -> OnvestResult<()> {
        self.applications.set_status(application_id, new_status).await?;

        let task_status = match new_status {
            ApplicationStatus::Approved | ApplicationStatus::Rejected => TaskStatus::Completed,
            ApplicationStatus::Pending => TaskStatus::InProgress,
        };
        match self.tasks.get_by_application(application_id).await {
            Ok(Some(task)) => {
                let update = UpdateTask {
                    status: Some(task_status),
                    ..Default::default()
                };
                if let Err(e) = self.tasks.update(task.id, update).await {
                    warn!(
                        application_id = %application_id,
                        error = %e,
                        "review task status sync failed"
                    );
                }
            }
            Ok(None) => {
                warn!(
                    application_id = %application_id,
                    "no review task to sync for status change"
                );
            }
            Err(e) => {
                warn!(
                    application_id = %application_id,
                    error = %e,
                    "review task lookup failed during status change"
                );
            }
        }

        info!(
            application_id = %application_id,
            status = %new_status,
            "application status updated"
        );
        self.events.publish(WorkflowEvent {
            kind: WorkflowEventKind::StatusChanged,
            application_id,
        });

        Ok(())
    }

    /// The employee roster, ordered by name.
    pub async fn list_employees(&self) -> OnvestResult<Vec<Employee>> {
        self.employees.list().await
    }
}

/// Text fields the form must fill in, by their wire names.
fn validate_required_fields(form: &SubmissionForm) -> Result<(), WorkflowError> {
    let required: [(&'static str, &str); 13] = [
        ("fullName", &form.full_name),
        ("govtIdNumber", &form.govt_id_number),
        ("mobile", &form.mobile),
        ("email", &form.email),
        ("timeHorizon", &form.time_horizon),
        ("riskTolerance", &form.risk_tolerance),
        ("acceptableAnnualReturn", &form.acceptable_annual_return),
        ("dob", &form.dob),
        ("nationality", &form.nationality),
        ("address", &form.address),
        ("clientType", &form.client_type),
        ("sourceOfFunds", &form.source_of_funds),
        ("occupationDetails", &form.occupation_details),
    ];

    for (name, value) in required {
        if value.trim().is_empty() {
            return Err(WorkflowError::MissingField(name));
        }
    }
    Ok(())
}

/// Decode a JSON-encoded list field. An absent field means an empty
/// list; malformed JSON is a validation failure.
fn parse_list_field<T: DeserializeOwned>(
    field: &'static str,
    raw: &str,
) -> Result<Vec<T>, WorkflowError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|e| WorkflowError::MalformedField {
        field,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> SubmissionForm {
        SubmissionForm {
            full_name: "Alice Example".into(),
            govt_id_number: "P123".into(),
            mobile: "+4179".into(),
            email: "a@example.com".into(),
            time_horizon: "5-10 years".into(),
            risk_tolerance: "moderate".into(),
            investments_owned: r#"["stocks"]"#.into(),
            acceptable_annual_return: "5-10%".into(),
            dob: "1990-01-01".into(),
            nationality: "Swiss".into(),
            address: "Somewhere 1".into(),
            client_type: "individual".into(),
            contact_details: String::new(),
            source_of_funds: "salary".into(),
            occupation_details: "engineer".into(),
            selected_funds: r#"[{"id":1,"name":"Fund","amount":100.0}]"#.into(),
            terms_accepted: "true".into(),
        }
    }

    #[test]
    fn filled_form_passes_validation() {
        assert!(validate_required_fields(&filled_form()).is_ok());
    }

    #[test]
    fn blank_field_is_reported_by_wire_name() {
        let mut form = filled_form();
        form.acceptable_annual_return = "  ".into();

        let err = validate_required_fields(&form).unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::MissingField("acceptableAnnualReturn")
        ));
    }

    #[test]
    fn empty_list_field_decodes_to_empty_vec() {
        let list: Vec<String> = parse_list_field("investmentsOwned", "").unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn malformed_list_field_is_rejected() {
        let result: Result<Vec<FundSelection>, _> =
            parse_list_field("selectedFunds", "{not json");
        assert!(matches!(
            result,
            Err(WorkflowError::MalformedField {
                field: "selectedFunds",
                ..
            })
        ));
    }
}

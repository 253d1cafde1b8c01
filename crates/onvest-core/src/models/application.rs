//! Onboarding application domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Review status of an onboarding application.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ApplicationStatus::Pending),
            "approved" => Some(ApplicationStatus::Approved),
            "rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fund pick from the submission form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FundSelection {
    /// Catalog identifier as presented by the client.
    pub id: i64,
    pub name: String,
    /// Amount committed, in account currency.
    pub amount: f64,
}

/// One client onboarding submission.
///
/// Application content is immutable after creation; only `status`
/// changes over the review lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingApplication {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub govt_id_number: String,
    pub mobile: String,
    pub email: String,
    pub time_horizon: String,
    pub risk_tolerance: String,
    pub investments_owned: Vec<String>,
    pub acceptable_annual_return: String,
    pub dob: String,
    pub nationality: String,
    pub address: String,
    pub client_type: String,
    pub contact_details: Option<String>,
    /// Server-local path of the stored government ID document.
    pub govt_id_file_path: String,
    pub source_of_funds: String,
    pub occupation_details: String,
    /// Server-local path of the stored income proof document.
    pub income_proof_file_path: String,
    pub selected_funds: Vec<FundSelection>,
    pub terms_accepted: bool,
    pub submission_date: DateTime<Utc>,
    pub status: ApplicationStatus,
}

/// Input for creating an application. Status and submission date are
/// server-assigned.
#[derive(Debug, Clone)]
pub struct CreateApplication {
    pub user_id: Uuid,
    pub full_name: String,
    pub govt_id_number: String,
    pub mobile: String,
    pub email: String,
    pub time_horizon: String,
    pub risk_tolerance: String,
    pub investments_owned: Vec<String>,
    pub acceptable_annual_return: String,
    pub dob: String,
    pub nationality: String,
    pub address: String,
    pub client_type: String,
    pub contact_details: Option<String>,
    pub govt_id_file_path: String,
    pub source_of_funds: String,
    pub occupation_details: String,
    pub income_proof_file_path: String,
    pub selected_funds: Vec<FundSelection>,
    pub terms_accepted: bool,
}

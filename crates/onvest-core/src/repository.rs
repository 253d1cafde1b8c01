//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async and return [`OnvestResult`].
//! Implementations live in `onvest-db`; the service crates depend only
//! on these traits so they can be exercised against any backing store.

use uuid::Uuid;

use crate::error::OnvestResult;
use crate::models::application::{ApplicationStatus, CreateApplication, OnboardingApplication};
use crate::models::employee::Employee;
use crate::models::task::{AdminTask, TaskStatus, UpdateTask};
use crate::models::user::{CreateUser, User};

// ---- User ----

pub trait UserRepository: Send + Sync {
    /// Create a user. Fails with `AlreadyExists` when the username is
    /// taken.
    fn create(&self, input: CreateUser) -> impl Future<Output = OnvestResult<User>> + Send;

    fn get_by_id(&self, id: Uuid) -> impl Future<Output = OnvestResult<User>> + Send;

    fn get_by_username(&self, username: &str) -> impl Future<Output = OnvestResult<User>> + Send;
}

// ---- Onboarding application ----

pub trait ApplicationRepository: Send + Sync {
    /// Create an application together with its open review task in a
    /// single atomic write. A stored application is never observable
    /// without its task.
    fn create_with_task(
        &self,
        input: CreateApplication,
    ) -> impl Future<Output = OnvestResult<(OnboardingApplication, AdminTask)>> + Send;

    fn get_by_id(&self, id: Uuid) -> impl Future<Output = OnvestResult<OnboardingApplication>> + Send;

    /// All applications, oldest submission first.
    fn list(&self) -> impl Future<Output = OnvestResult<Vec<OnboardingApplication>>> + Send;

    /// Applications in the given status, oldest submission first.
    fn list_by_status(
        &self,
        status: ApplicationStatus,
    ) -> impl Future<Output = OnvestResult<Vec<OnboardingApplication>>> + Send;

    /// The most recently submitted application of a user, if any.
    fn latest_for_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = OnvestResult<Option<OnboardingApplication>>> + Send;

    /// Set the review status. Fails with `NotFound` for an unknown id.
    fn set_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> impl Future<Output = OnvestResult<OnboardingApplication>> + Send;
}

// ---- Admin review task ----

pub trait TaskRepository: Send + Sync {
    /// The task paired with an application, if one exists.
    fn get_by_application(
        &self,
        application_id: Uuid,
    ) -> impl Future<Output = OnvestResult<Option<AdminTask>>> + Send;

    fn list(&self) -> impl Future<Output = OnvestResult<Vec<AdminTask>>> + Send;

    fn list_by_status(
        &self,
        status: TaskStatus,
    ) -> impl Future<Output = OnvestResult<Vec<AdminTask>>> + Send;

    /// Apply a partial update and return the task as stored. Fails with
    /// `NotFound` for an unknown id.
    fn update(
        &self,
        id: Uuid,
        input: UpdateTask,
    ) -> impl Future<Output = OnvestResult<AdminTask>> + Send;
}

// ---- Employee ----

pub trait EmployeeRepository: Send + Sync {
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = OnvestResult<Employee>> + Send;

    /// The full roster, ordered by name.
    fn list(&self) -> impl Future<Output = OnvestResult<Vec<Employee>>> + Send;
}

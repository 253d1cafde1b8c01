//! ONVEST Core — shared domain types for the client onboarding platform.
//!
//! This crate defines the domain models (users, onboarding applications,
//! review tasks, employees), the error taxonomy shared by every layer,
//! and the repository traits that abstract data access so the service
//! crates never depend on a concrete database.

pub mod error;
pub mod models;
pub mod repository;

pub use error::{OnvestError, OnvestResult};

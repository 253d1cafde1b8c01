//! Domain models for the ONVEST platform.

pub mod application;
pub mod employee;
pub mod task;
pub mod user;

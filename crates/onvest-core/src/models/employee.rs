//! Employee roster model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A back-office employee that review tasks can be assigned to.
///
/// The roster is seeded at deployment; there is no self-service
/// employee management.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub position: String,
}

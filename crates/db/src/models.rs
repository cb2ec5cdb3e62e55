use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Id carried by an application that has not been stored yet
pub const UNASSIGNED_ID: i64 = 0;

/// Application model
///
/// One row of the `applications` table. Instances are immutable: fields are
/// only readable, and [`Application::with_id`] consumes the value to build a
/// new one. Serialized names match the column names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Application {
    #[serde(default)]
    id: i64,
    customer_id: i64,
    name: String,
    created_at: DateTime<Utc>,
}

impl Application {
    /// Create an application that is not yet persisted
    #[must_use]
    pub fn new(customer_id: i64, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: UNASSIGNED_ID,
            customer_id,
            name: name.into(),
            created_at,
        }
    }

    /// Return a copy of this application carrying `id`
    #[must_use]
    pub fn with_id(self, id: i64) -> Self {
        Self { id, ..self }
    }

    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    #[must_use]
    pub fn customer_id(&self) -> i64 {
        self.customer_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
